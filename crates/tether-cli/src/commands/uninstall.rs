use tether_hooks::{Preconditions, Reconciler};

use crate::cli::GlobalFlags;
use crate::commands::shared::Invocation;
use crate::output::output;

/// Handle `tether uninstall`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let invocation = Invocation::gather(flags)?;
    let Some(repo) = invocation.repo(flags)? else {
        return Ok(());
    };

    let pre = Preconditions {
        has_manifest: invocation.manifest.is_some(),
        manifest_dir: &invocation.manifest_dir,
        skip_segments: &invocation.config.install.skip_segments,
    };

    let report = Reconciler::new(invocation.package_manager())
        .uninstall(&repo.common_dir, &pre)
        .with_warnings(repo.warnings());
    output(&report, flags.format)
}
