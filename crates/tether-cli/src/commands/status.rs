use tether_hooks::Reconciler;
use tether_hooks::resolver::hook_dir;

use crate::cli::GlobalFlags;
use crate::commands::shared::Invocation;
use crate::output::{StatusReport, output};

/// Handle `tether status`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let invocation = Invocation::gather(flags)?;
    let Some(repo) = invocation.repo(flags)? else {
        return Ok(());
    };

    let dir = hook_dir(&repo.common_dir);
    let hooks = Reconciler::new(invocation.package_manager()).status(&dir);
    output(
        &StatusReport {
            hook_dir: dir,
            core_hooks_path: repo.core_hooks_path,
            hooks,
        },
        flags.format,
    )
}
