//! Hook installation settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_skip_segments() -> Vec<String> {
    vec!["node_modules".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstallConfig {
    /// Path segments marking a dependency directory; installs from inside one are skipped.
    #[serde(default = "default_skip_segments")]
    pub skip_segments: Vec<String>,

    /// Package manager token written into hooks (`npm`, `pnpm`, `yarn`).
    /// Detected from the environment when unset.
    #[serde(default)]
    pub package_manager: Option<String>,

    /// Overrides the manifest's `skipCI` setting.
    #[serde(default)]
    pub skip_ci: Option<bool>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            skip_segments: default_skip_segments(),
            package_manager: None,
            skip_ci: None,
        }
    }
}

impl InstallConfig {
    /// Effective skip-on-CI flag given the manifest's own setting.
    #[must_use]
    pub fn skip_ci_or(&self, manifest_skip_ci: bool) -> bool {
        self.skip_ci.unwrap_or(manifest_skip_ci)
    }

    /// Reject values that cannot be embedded in a hook script or matched as a segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(segment) = self
            .skip_segments
            .iter()
            .find(|s| s.is_empty() || s.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidValue {
                field: "install.skip_segments".to_string(),
                reason: format!("'{segment}' is not a single path segment"),
            });
        }

        if let Some(pm) = &self.package_manager {
            let valid = !pm.is_empty()
                && pm
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
            if !valid {
                return Err(ConfigError::InvalidValue {
                    field: "install.package_manager".to_string(),
                    reason: format!("'{pm}' is not a package manager name"),
                });
            }
        }

        Ok(())
    }
}
