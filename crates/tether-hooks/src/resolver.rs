//! Where hooks go, and which directory they run from.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// Everything the reconciler needs to know about one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstallContext {
    /// `<common_dir>/hooks`; may not exist yet.
    pub hook_dir: PathBuf,
    /// Directory the generated scripts `cd` into, relative to the working tree root.
    pub work_dir: String,
    pub skip_ci: bool,
    pub is_ci: bool,
}

impl InstallContext {
    /// Override the default of skipping installation on CI.
    #[must_use]
    pub const fn with_skip_ci(mut self, skip_ci: bool) -> Self {
        self.skip_ci = skip_ci;
        self
    }
}

/// Build the [`InstallContext`] for a repository and the invoking package.
///
/// `relative_manifest_dir` is the package directory relative to the working
/// tree root as the caller knows it. When present and non-empty it is used
/// verbatim, trailing separator and all. Otherwise the working tree root is
/// derived from `common_dir` and the relative path to `manifest_dir` is
/// computed, with `"."` for the root itself.
#[must_use]
pub fn resolve(
    common_dir: &Path,
    relative_manifest_dir: Option<&str>,
    manifest_dir: &Path,
    is_ci: bool,
) -> InstallContext {
    let work_dir = match relative_manifest_dir {
        Some(relative) if !relative.is_empty() => relative.to_string(),
        _ => relative_work_dir(&worktree_root(common_dir), manifest_dir),
    };

    InstallContext {
        hook_dir: hook_dir(common_dir),
        work_dir,
        skip_ci: true,
        is_ci,
    }
}

#[must_use]
pub fn hook_dir(common_dir: &Path) -> PathBuf {
    common_dir.join("hooks")
}

/// Working tree root for a repository common directory.
///
/// - `<root>/.git` gives `<root>`
/// - `<root>/.git/modules/a/modules/b` (nested submodules) gives `<root>/a/b`
/// - anything without a `.git` segment gives the parent directory
#[must_use]
pub fn worktree_root(common_dir: &Path) -> PathBuf {
    let components: Vec<Component<'_>> = common_dir.components().collect();
    let Some(git_index) = components
        .iter()
        .rposition(|component| component.as_os_str() == OsStr::new(".git"))
    else {
        return common_dir
            .parent()
            .map_or_else(|| common_dir.to_path_buf(), Path::to_path_buf);
    };

    let mut root: PathBuf = components[..git_index].iter().collect();
    let rest = &components[git_index + 1..];
    if rest.first().map(|component| component.as_os_str()) == Some(OsStr::new("modules")) {
        for component in &rest[1..] {
            if component.as_os_str() != OsStr::new("modules") {
                root.push(component);
            }
        }
    }
    root
}

fn relative_work_dir(root: &Path, manifest_dir: &Path) -> String {
    let Ok(relative) = manifest_dir.strip_prefix(root) else {
        tracing::debug!(
            root = %root.display(),
            manifest_dir = %manifest_dir.display(),
            "package directory is outside the working tree, using '.'"
        );
        return ".".to_string();
    };

    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
