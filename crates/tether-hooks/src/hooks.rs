//! The fixed table of git hook names tether manages.

use crate::script::{RenderParams, TRAMPOLINE, escape_double_quoted};

/// Every client- and server-side hook git invokes by name.
pub const HOOK_NAMES: [&str; 20] = [
    "applypatch-msg",
    "pre-applypatch",
    "post-applypatch",
    "pre-commit",
    "pre-merge-commit",
    "prepare-commit-msg",
    "commit-msg",
    "post-commit",
    "pre-rebase",
    "post-checkout",
    "post-merge",
    "pre-push",
    "pre-receive",
    "update",
    "post-receive",
    "post-update",
    "push-to-checkout",
    "pre-auto-gc",
    "post-rewrite",
    "sendemail-validate",
];

/// A hook name paired with the script template written for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookSpec {
    pub name: &'static str,
    template: &'static str,
}

impl HookSpec {
    #[must_use]
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    /// Render the script for this hook.
    ///
    /// Placeholders are `{{hook_name}}`, `{{work_dir}}`,
    /// `{{package_manager}}` and `{{version}}`. The work dir is escaped for a
    /// double-quoted shell string. Rendering is pure, so the same parameters
    /// always yield the same bytes.
    #[must_use]
    pub fn render(&self, params: &RenderParams<'_>) -> String {
        self.template
            .replace("{{hook_name}}", self.name)
            .replace("{{work_dir}}", &escape_double_quoted(params.work_dir))
            .replace("{{package_manager}}", params.package_manager)
            .replace("{{version}}", params.version)
    }
}

/// One [`HookSpec`] per entry of [`HOOK_NAMES`], all using the trampoline script.
#[must_use]
pub fn default_hooks() -> Vec<HookSpec> {
    HOOK_NAMES
        .iter()
        .map(|name| HookSpec::new(name, TRAMPOLINE))
        .collect()
}
