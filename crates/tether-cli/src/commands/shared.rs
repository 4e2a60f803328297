use std::path::PathBuf;

use anyhow::Context;
use tether_config::{Manifest, TetherConfig};
use tether_hooks::HookError;

use crate::cli::GlobalFlags;
use crate::env_probe::EnvProbe;
use crate::output::{NotARepository, output};
use crate::repo::{RepoLocation, discover_repo};

/// Everything gathered about the invoking package before touching hooks.
pub struct Invocation {
    pub manifest_dir: PathBuf,
    pub manifest: Option<Manifest>,
    pub config: TetherConfig,
    pub env: EnvProbe,
}

impl Invocation {
    pub fn gather(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let manifest_dir = package_dir(flags)?;
        let manifest = Manifest::read(&manifest_dir)?;
        let config = TetherConfig::load_for(&manifest_dir)
            .context("failed to load tether configuration")?;
        let env = EnvProbe::from_env();

        tracing::debug!(
            manifest_dir = %manifest_dir.display(),
            has_manifest = manifest.is_some(),
            is_ci = env.is_ci,
            init_cwd = ?env.init_cwd,
            "gathered invocation"
        );

        Ok(Self {
            manifest_dir,
            manifest,
            config,
            env,
        })
    }

    pub fn package_manager(&self) -> String {
        self.env
            .package_manager(self.config.install.package_manager.as_deref())
    }

    /// Locate the repository, printing a notice and returning `None` outside of one.
    pub fn repo(&self, flags: &GlobalFlags) -> anyhow::Result<Option<RepoLocation>> {
        match discover_repo(&self.manifest_dir) {
            Ok(repo) => {
                for warning in repo.warnings() {
                    tracing::warn!(%warning, "repository warning");
                }
                Ok(Some(repo))
            }
            Err(HookError::NotGitRepo(path)) => {
                tracing::info!(path = %path.display(), "not a git repository");
                output(&NotARepository { path }, flags.format)?;
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }
}

/// `--project`, or the current directory, made absolute.
pub fn package_dir(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    let dir = match flags.project.as_deref() {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    std::fs::canonicalize(&dir)
        .with_context(|| format!("invalid --project '{}': directory does not exist", dir.display()))
}
