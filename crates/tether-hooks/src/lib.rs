//! # tether-hooks
//!
//! Git hook reconciliation for tether.
//!
//! - [`resolver`] turns a repository's common directory and the invoking
//!   package's location into an [`InstallContext`]
//! - [`marker`] classifies existing hook files as owned, legacy or foreign
//! - [`installer`] installs, migrates and removes hook scripts without
//!   touching hooks it does not own
//!
//! Nothing in this crate reads process environment; callers pass CI state,
//! package-manager identity and manifest facts in explicitly.

pub mod error;
pub mod hooks;
pub mod installer;
pub mod marker;
pub mod precondition;
pub mod resolver;
pub mod script;

pub use error::HookError;
pub use hooks::{HOOK_NAMES, HookSpec, default_hooks};
pub use installer::{HookAction, HookOutcome, HookReport, HookStatus, Reconciler};
pub use marker::{HookState, LEGACY_MARKERS, LegacyMarker, OWN_MARKER};
pub use precondition::{Preconditions, Proceed, SkipReason};
pub use resolver::{InstallContext, resolve};
