//! Reading the invoking package's `package.json`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

pub const MANIFEST_FILE: &str = "package.json";

const fn default_skip_ci() -> bool {
    true
}

/// The `"tether"` object of a manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookSettings {
    /// Skip installation when running on CI.
    #[serde(default = "default_skip_ci")]
    pub skip_ci: bool,

    /// Hook name to shell command, run by `tether run <hook>`.
    #[serde(default)]
    pub hooks: BTreeMap<String, String>,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            skip_ci: default_skip_ci(),
            hooks: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tether: HookSettings,
    #[serde(skip)]
    pub path: PathBuf,
}

impl Manifest {
    /// Read `<dir>/package.json`. `Ok(None)` when there is no manifest.
    pub fn read(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(MANIFEST_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::ManifestIo { path, source }),
        };

        let mut manifest: Self = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::ManifestParse {
                path: path.clone(),
                source,
            })?;
        manifest.path = path;
        Ok(Some(manifest))
    }

    /// Command configured for `hook`, if any.
    #[must_use]
    pub fn hook_command(&self, hook: &str) -> Option<&str> {
        self.tether
            .hooks
            .get(hook)
            .map(String::as_str)
            .filter(|command| !command.trim().is_empty())
    }
}
