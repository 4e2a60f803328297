//! What the process environment says about this invocation.

use std::path::PathBuf;

/// Variables set by common CI providers.
const CI_VARS: [&str; 11] = [
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "TRAVIS",
    "CIRCLECI",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

const DEFAULT_PACKAGE_MANAGER: &str = "npm";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvProbe {
    pub is_ci: bool,
    /// Directory the package manager was started from; only used in messages.
    pub init_cwd: Option<PathBuf>,
    /// `npm_config_user_agent`, e.g. `pnpm/8.6.0 npm/? node/v18.16.0 linux x64`.
    pub user_agent: Option<String>,
}

impl EnvProbe {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_ci = CI_VARS
            .iter()
            .any(|&key| lookup(key).is_some_and(|value| is_truthy(&value)));

        Self {
            is_ci,
            init_cwd: lookup("INIT_CWD")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            user_agent: lookup("npm_config_user_agent").filter(|value| !value.is_empty()),
        }
    }

    /// Package manager token for generated hooks: configuration, then user agent, then `npm`.
    pub fn package_manager(&self, configured: Option<&str>) -> String {
        if let Some(configured) = configured {
            return configured.to_string();
        }

        self.user_agent
            .as_deref()
            .and_then(|agent| agent.split_whitespace().next())
            .and_then(|product| product.split('/').next())
            .filter(|name| matches!(*name, "npm" | "pnpm" | "yarn"))
            .unwrap_or(DEFAULT_PACKAGE_MANAGER)
            .to_string()
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}
