use tether_hooks::{Preconditions, Reconciler};

use crate::cli::GlobalFlags;
use crate::commands::shared::Invocation;
use crate::output::output;

/// Handle `tether install`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let invocation = Invocation::gather(flags)?;
    let Some(repo) = invocation.repo(flags)? else {
        return Ok(());
    };

    let manifest_skip_ci = invocation
        .manifest
        .as_ref()
        .is_none_or(|manifest| manifest.tether.skip_ci);

    let ctx = repo
        .install_context(&invocation.manifest_dir, invocation.env.is_ci)
        .with_skip_ci(invocation.config.install.skip_ci_or(manifest_skip_ci));

    let pre = Preconditions {
        has_manifest: invocation.manifest.is_some(),
        manifest_dir: &invocation.manifest_dir,
        skip_segments: &invocation.config.install.skip_segments,
    };

    let report = Reconciler::new(invocation.package_manager())
        .install(&ctx, &pre)
        .with_warnings(repo.warnings());
    output(&report, flags.format)
}
