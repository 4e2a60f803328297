use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write hook scripts into the repository's hook directory.
    Install,
    /// Remove the hook scripts tether wrote.
    Uninstall,
    /// Show how each hook file is classified.
    Status,
    /// Run the command configured for a hook (called by the hook scripts).
    Run(RunArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Hook name, e.g. `pre-commit`.
    pub hook: String,

    /// Arguments git passed to the hook.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
