use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;
use tether_hooks::{HookAction, HookReport, HookState, HookStatus, SkipReason};

use crate::cli::OutputFormat;

/// Human-readable rendering used by `--format text`.
pub trait TextRender {
    fn render_text(&self) -> String;
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize + TextRender>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.render_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + TextRender>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Returned instead of a report when the package is not inside a git repository.
#[derive(Debug, Serialize)]
pub struct NotARepository {
    pub path: PathBuf,
}

impl TextRender for NotARepository {
    fn render_text(&self) -> String {
        format!(
            "{} is not inside a git repository, skipping git hooks",
            self.path.display()
        )
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub hook_dir: PathBuf,
    pub core_hooks_path: Option<String>,
    pub hooks: Vec<HookStatus>,
}

impl TextRender for HookReport {
    fn render_text(&self) -> String {
        let mut out = match &self.skipped {
            Some(reason) => format!("skipped: {}", skip_reason_text(reason)),
            None => format!("hook directory: {}", self.hook_dir.display()),
        };
        for warning in &self.warnings {
            let _ = write!(out, "\nwarning: {warning}");
        }
        if self.skipped.is_some() {
            return out;
        }

        for hook in &self.hooks {
            if matches!(hook.action, HookAction::Absent | HookAction::Unchanged) {
                continue;
            }
            let _ = write!(out, "\n  {:<20} {}", hook.name, action_text(&hook.action));
        }
        let _ = write!(
            out,
            "\n{} changed, {} failed",
            self.changed(),
            self.failed()
        );
        out
    }
}

impl TextRender for StatusReport {
    fn render_text(&self) -> String {
        let mut out = format!("hook directory: {}", self.hook_dir.display());
        if let Some(path) = &self.core_hooks_path {
            let _ = write!(
                out,
                "\nwarning: core.hooksPath is set to '{path}', git will not run these hooks"
            );
        }
        for hook in &self.hooks {
            let state = match hook.state {
                HookState::Absent => "absent".to_string(),
                HookState::Owned => "owned".to_string(),
                HookState::Legacy { tool } => format!("legacy ({tool})"),
                HookState::Foreign => "foreign".to_string(),
            };
            let _ = write!(out, "\n  {:<20} {state}", hook.name);
            if let Some(error) = &hook.error {
                let _ = write!(out, " ({error})");
            }
        }
        out
    }
}

fn skip_reason_text(reason: &SkipReason) -> String {
    match reason {
        SkipReason::Ci => "CI detected".to_string(),
        SkipReason::MissingManifest => "no package.json found".to_string(),
        SkipReason::DependencyDirectory { segment } => {
            format!("package is inside a '{segment}' directory")
        }
    }
}

fn action_text(action: &HookAction) -> String {
    match action {
        HookAction::Created => "created".to_string(),
        HookAction::Updated => "updated".to_string(),
        HookAction::Unchanged => "unchanged".to_string(),
        HookAction::Migrated { from } => format!("migrated from {from}"),
        HookAction::SkippedForeign => "skipped (user hook)".to_string(),
        HookAction::SkippedLegacy { tool } => format!("skipped ({tool} hook)"),
        HookAction::Removed => "removed".to_string(),
        HookAction::Absent => "absent".to_string(),
        HookAction::Failed { error } => format!("failed: {error}"),
    }
}
