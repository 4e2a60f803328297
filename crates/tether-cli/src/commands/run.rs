use std::process::Command;

use anyhow::Context;
use tether_config::Manifest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::shared::package_dir;

/// Handle `tether run <hook> [args...]`: run the manifest's command for the hook.
///
/// Returns the command's exit status; a hook with nothing configured exits 0.
pub fn handle(args: &RunArgs, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let dir = package_dir(flags)?;
    let Some(manifest) = Manifest::read(&dir)? else {
        tracing::debug!(dir = %dir.display(), "no manifest, nothing to run");
        return Ok(0);
    };
    let Some(command) = manifest.hook_command(&args.hook) else {
        tracing::debug!(hook = %args.hook, "no command configured for hook");
        return Ok(0);
    };

    if !flags.quiet {
        eprintln!("tether > {} ({command})", args.hook);
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(&dir)
        .env("TETHER_GIT_PARAMS", args.args.join(" "))
        .status()
        .with_context(|| format!("failed to run {} hook command", args.hook))?;

    let code = status.code().unwrap_or(1);
    if code != 0 && !flags.quiet {
        eprintln!("tether > {} hook failed (add --no-verify to bypass)", args.hook);
    }
    Ok(code)
}
