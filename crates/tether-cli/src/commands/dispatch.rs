use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command; the result is the process exit code.
pub fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<i32> {
    match command {
        Commands::Install => commands::install::handle(flags).map(|()| 0),
        Commands::Uninstall => commands::uninstall::handle(flags).map(|()| 0),
        Commands::Status => commands::status::handle(flags).map(|()| 0),
        Commands::Run(args) => commands::run::handle(&args, flags),
    }
}
