//! Checks that decide whether an install or uninstall should touch anything.
//!
//! None of these are errors: a skipped run exits successfully.

use std::path::{Component, Path};

use serde::Serialize;

use crate::resolver::InstallContext;

/// Why a whole install or uninstall was skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Running on CI and the package did not opt in.
    Ci,
    /// No manifest at the package directory.
    MissingManifest,
    /// The package lives inside a dependency directory such as `node_modules`.
    DependencyDirectory { segment: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proceed {
    Continue,
    Skip(SkipReason),
}

impl Proceed {
    #[must_use]
    pub const fn should_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Facts about the invoking package gathered by the caller.
#[derive(Clone, Copy, Debug)]
pub struct Preconditions<'a> {
    pub has_manifest: bool,
    pub manifest_dir: &'a Path,
    /// Path segments that mark a dependency directory (`node_modules`, ...).
    pub skip_segments: &'a [String],
}

impl Preconditions<'_> {
    /// CI is checked first, then manifest presence, then the dependency denylist.
    #[must_use]
    pub fn check_install(&self, ctx: &InstallContext) -> Proceed {
        if ctx.is_ci && ctx.skip_ci {
            return Proceed::Skip(SkipReason::Ci);
        }
        if !self.has_manifest {
            return Proceed::Skip(SkipReason::MissingManifest);
        }
        self.check_location()
    }

    /// Uninstall only refuses to run from inside a dependency directory.
    #[must_use]
    pub fn check_uninstall(&self) -> Proceed {
        self.check_location()
    }

    fn check_location(&self) -> Proceed {
        let hit = self.manifest_dir.components().find_map(|component| {
            let Component::Normal(part) = component else {
                return None;
            };
            self.skip_segments
                .iter()
                .find(|segment| part == segment.as_str())
        });

        match hit {
            Some(segment) => Proceed::Skip(SkipReason::DependencyDirectory {
                segment: segment.clone(),
            }),
            None => Proceed::Continue,
        }
    }
}
