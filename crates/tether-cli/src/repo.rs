use std::path::{Component, Path, PathBuf};

use tether_hooks::{HookError, InstallContext, resolve};

/// The parts of a discovered repository the hook commands need.
#[derive(Debug, Clone)]
pub struct RepoLocation {
    /// Shared metadata directory (`.git`, or `.git/modules/<name>` for submodules).
    pub common_dir: PathBuf,
    pub work_dir: Option<PathBuf>,
    /// `core.hooksPath`; when set, git ignores `<common_dir>/hooks`.
    pub core_hooks_path: Option<String>,
}

impl RepoLocation {
    /// Resolve hook and work directories for a package inside this repository.
    #[must_use]
    pub fn install_context(&self, manifest_dir: &Path, is_ci: bool) -> InstallContext {
        let relative = self
            .work_dir
            .as_deref()
            .and_then(|work_dir| relative_to_worktree(work_dir, manifest_dir));
        resolve(&self.common_dir, relative.as_deref(), manifest_dir, is_ci)
    }

    /// Problems with the repository that make installed hooks ineffective.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.core_hooks_path
            .iter()
            .map(|path| {
                format!(
                    "core.hooksPath is set to '{path}', \
                     git will not run hooks from the hook directory"
                )
            })
            .collect()
    }
}

pub fn discover_repo(start: &Path) -> Result<RepoLocation, HookError> {
    let repo = gix::discover(start).map_err(|error| match error {
        gix::discover::Error::Discover(_) => HookError::NotGitRepo(start.to_path_buf()),
        other => HookError::Discover {
            path: start.to_path_buf(),
            source: Box::new(other),
        },
    })?;

    let common_dir = canonical(repo.common_dir());
    let work_dir = repo.work_dir().map(canonical);
    let core_hooks_path = repo
        .config_snapshot()
        .string("core.hooksPath")
        .map(|v| v.to_string())
        .filter(|v| !v.trim().is_empty());

    Ok(RepoLocation {
        common_dir,
        work_dir,
        core_hooks_path,
    })
}

/// `manifest_dir` relative to the working tree: `"."` at its root, `None` outside it.
///
/// A linked worktree has its own root, which is not the parent of the shared
/// common directory, so this is the only reliable source for its packages.
pub fn relative_to_worktree(work_dir: &Path, manifest_dir: &Path) -> Option<String> {
    let relative = manifest_dir.strip_prefix(work_dir).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
