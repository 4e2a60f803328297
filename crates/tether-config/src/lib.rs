//! # tether-config
//!
//! Layered configuration loading for tether using figment, plus the reader
//! for the invoking package's manifest.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TETHER_*` prefix, `__` as separator)
//! 2. Project-level `.tether.toml` next to the manifest
//! 3. User-level `~/.config/tether/config.toml`
//! 4. Built-in defaults
//!
//! `TETHER_INSTALL__PACKAGE_MANAGER=pnpm` maps to `install.package_manager`.

mod error;
mod install;
mod manifest;

pub use error::ConfigError;
pub use install::InstallConfig;
pub use manifest::{HookSettings, MANIFEST_FILE, Manifest};

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const PROJECT_CONFIG_FILE: &str = ".tether.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TetherConfig {
    #[serde(default)]
    pub install: InstallConfig,
}

impl TetherConfig {
    /// Load and validate configuration for the package in `project_dir`.
    pub fn load_for(project_dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_dir).extract()?;
        config.install.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment_for(project_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = project_dir.join(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TETHER_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tether").join("config.toml"))
    }
}
