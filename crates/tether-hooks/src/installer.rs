//! Install, migrate and remove hook scripts.
//!
//! Each hook name is handled on its own: a failure on one file is recorded in
//! the report and the next name is processed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::HookError;
use crate::hooks::{HookSpec, default_hooks};
use crate::marker::{HookState, LEGACY_MARKERS, LegacyMarker};
use crate::precondition::{Preconditions, Proceed, SkipReason};
use crate::resolver::{InstallContext, hook_dir};
use crate::script::{RenderParams, VERSION};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HookAction {
    Created,
    /// An owned hook rewritten with the current template.
    Updated,
    Unchanged,
    Migrated { from: &'static str },
    SkippedForeign,
    /// A predecessor's hook left alone by uninstall.
    SkippedLegacy { tool: &'static str },
    Removed,
    Absent,
    Failed { error: String },
}

impl HookAction {
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Created | Self::Updated | Self::Migrated { .. } | Self::Removed
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HookOutcome {
    pub name: String,
    #[serde(flatten)]
    pub action: HookAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HookReport {
    pub hook_dir: PathBuf,
    pub skipped: Option<SkipReason>,
    pub hooks: Vec<HookOutcome>,
    /// Repository-level problems that do not fail any single hook.
    pub warnings: Vec<String>,
}

impl HookReport {
    const fn skipped(hook_dir: PathBuf, reason: SkipReason) -> Self {
        Self {
            hook_dir,
            skipped: Some(reason),
            hooks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    #[must_use]
    pub fn changed(&self) -> usize {
        self.hooks.iter().filter(|h| h.action.is_change()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.hooks
            .iter()
            .filter(|h| matches!(h.action, HookAction::Failed { .. }))
            .count()
    }

    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&HookAction> {
        self.hooks.iter().find(|h| h.name == name).map(|h| &h.action)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HookStatus {
    pub name: String,
    #[serde(flatten)]
    pub state: HookState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Applies the install/uninstall policy to a table of hooks.
#[derive(Clone, Debug)]
pub struct Reconciler {
    hooks: Vec<HookSpec>,
    legacy: Vec<LegacyMarker>,
    package_manager: String,
}

impl Reconciler {
    /// Reconciler for every known hook and predecessor format.
    #[must_use]
    pub fn new(package_manager: impl Into<String>) -> Self {
        Self {
            hooks: default_hooks(),
            legacy: LEGACY_MARKERS.to_vec(),
            package_manager: package_manager.into(),
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Vec<HookSpec>) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn with_legacy_markers(mut self, legacy: Vec<LegacyMarker>) -> Self {
        self.legacy = legacy;
        self
    }

    /// Create, update or migrate every hook; foreign hooks are left as they are.
    pub fn install(&self, ctx: &InstallContext, pre: &Preconditions<'_>) -> HookReport {
        if let Proceed::Skip(reason) = pre.check_install(ctx) {
            tracing::info!(?reason, "skipping git hooks installation");
            return HookReport::skipped(ctx.hook_dir.clone(), reason);
        }

        let dir_error = fs::create_dir_all(&ctx.hook_dir)
            .map_err(|source| HookError::CreateDir {
                path: ctx.hook_dir.clone(),
                source,
            })
            .err()
            .map(|error| error.to_string());

        let params = RenderParams {
            work_dir: &ctx.work_dir,
            package_manager: &self.package_manager,
            version: VERSION,
        };

        let hooks = self
            .hooks
            .iter()
            .map(|spec| {
                let action = match &dir_error {
                    Some(error) => HookAction::Failed {
                        error: error.clone(),
                    },
                    None => self
                        .install_one(&ctx.hook_dir, spec, &params)
                        .unwrap_or_else(|error| {
                            tracing::warn!(hook = spec.name, %error, "hook install failed");
                            HookAction::Failed {
                                error: error.to_string(),
                            }
                        }),
                };
                HookOutcome {
                    name: spec.name.to_string(),
                    action,
                }
            })
            .collect();

        HookReport {
            hook_dir: ctx.hook_dir.clone(),
            skipped: None,
            hooks,
            warnings: Vec::new(),
        }
    }

    /// Remove every hook carrying the ownership marker from `<common_dir>/hooks`.
    pub fn uninstall(&self, common_dir: &Path, pre: &Preconditions<'_>) -> HookReport {
        let dir = hook_dir(common_dir);
        if let Proceed::Skip(reason) = pre.check_uninstall() {
            tracing::info!(?reason, "skipping git hooks uninstallation");
            return HookReport::skipped(dir, reason);
        }

        let hooks = self
            .hooks
            .iter()
            .map(|spec| {
                let action = self.uninstall_one(&dir, spec.name).unwrap_or_else(|error| {
                    tracing::warn!(hook = spec.name, %error, "hook uninstall failed");
                    HookAction::Failed {
                        error: error.to_string(),
                    }
                });
                HookOutcome {
                    name: spec.name.to_string(),
                    action,
                }
            })
            .collect();

        HookReport {
            hook_dir: dir,
            skipped: None,
            hooks,
            warnings: Vec::new(),
        }
    }

    /// Classify every hook in `hook_dir` without changing anything.
    #[must_use]
    pub fn status(&self, hook_dir: &Path) -> Vec<HookStatus> {
        self.hooks
            .iter()
            .map(|spec| match self.inspect(&hook_dir.join(spec.name)) {
                Ok((state, _)) => HookStatus {
                    name: spec.name.to_string(),
                    state,
                    error: None,
                },
                // Unreadable files are never ours to touch.
                Err(error) => HookStatus {
                    name: spec.name.to_string(),
                    state: HookState::Foreign,
                    error: Some(error.to_string()),
                },
            })
            .collect()
    }

    fn install_one(
        &self,
        dir: &Path,
        spec: &HookSpec,
        params: &RenderParams<'_>,
    ) -> Result<HookAction, HookError> {
        let path = dir.join(spec.name);
        let (state, existing) = self.inspect(&path)?;
        let script = spec.render(params);

        let action = match state {
            HookState::Absent => HookAction::Created,
            HookState::Owned if existing.as_deref() == Some(script.as_bytes()) => {
                tracing::debug!(hook = spec.name, "hook already up to date");
                make_executable(&path)?;
                return Ok(HookAction::Unchanged);
            }
            HookState::Owned => HookAction::Updated,
            HookState::Legacy { tool } => HookAction::Migrated { from: tool },
            HookState::Foreign => {
                tracing::warn!(
                    hook = spec.name,
                    path = %path.display(),
                    "skipping existing user hook"
                );
                return Ok(HookAction::SkippedForeign);
            }
        };

        write_hook(&path, &script)?;
        tracing::info!(hook = spec.name, ?action, "wrote hook");
        Ok(action)
    }

    fn uninstall_one(&self, dir: &Path, name: &str) -> Result<HookAction, HookError> {
        let path = dir.join(name);
        let (state, _) = self.inspect(&path)?;

        match state {
            HookState::Absent => Ok(HookAction::Absent),
            HookState::Owned => {
                fs::remove_file(&path).map_err(|source| HookError::Remove {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!(hook = name, "removed hook");
                Ok(HookAction::Removed)
            }
            HookState::Legacy { tool } => Ok(HookAction::SkippedLegacy { tool }),
            HookState::Foreign => Ok(HookAction::SkippedForeign),
        }
    }

    /// Read and classify `path`, returning the raw bytes for later comparison.
    fn inspect(&self, path: &Path) -> Result<(HookState, Option<Vec<u8>>), HookError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(error) if error.kind() == ErrorKind::NotFound => None,
            Err(source) => {
                return Err(HookError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let text = bytes.as_deref().map(String::from_utf8_lossy);
        let state = HookState::classify(text.as_deref(), &self.legacy);
        tracing::debug!(path = %path.display(), ?state, "classified hook");
        Ok((state, bytes))
    }
}

fn write_hook(path: &Path, script: &str) -> Result<(), HookError> {
    fs::write(path, script).map_err(|source| HookError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    make_executable(path)
}

/// Set mode `0o755` unless the file already has it.
#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), HookError> {
    use std::os::unix::fs::PermissionsExt;

    let write_error = |source| HookError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut perms = fs::metadata(path).map_err(write_error)?.permissions();
    if perms.mode() & 0o777 == 0o755 {
        return Ok(());
    }
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).map_err(write_error)
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn make_executable(_path: &Path) -> Result<(), HookError> {
    Ok(())
}
