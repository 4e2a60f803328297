//! Ownership markers and hook-file classification.

use serde::Serialize;

/// First line of every hook tether writes.
///
/// Stable across releases: older installs are recognised (and upgraded) by
/// this line alone.
pub const OWN_MARKER: &str = "# tether";

/// A string that identifies a hook generated by a predecessor hook manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LegacyMarker {
    pub pattern: &'static str,
    pub tool: &'static str,
}

/// Predecessor formats, checked in order; the first match wins.
pub const LEGACY_MARKERS: &[LegacyMarker] = &[
    LegacyMarker {
        pattern: "# husky",
        tool: "husky",
    },
    LegacyMarker {
        pattern: "#husky",
        tool: "husky",
    },
    LegacyMarker {
        pattern: "#yorkie",
        tool: "yorkie",
    },
    LegacyMarker {
        pattern: "// Generated by ghooks. Do not edit this file.",
        tool: "ghooks",
    },
    LegacyMarker {
        pattern: "./node_modules/pre-commit/hook",
        tool: "pre-commit",
    },
];

/// What is currently at `hooks/<name>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HookState {
    Absent,
    Owned,
    Legacy { tool: &'static str },
    Foreign,
}

impl HookState {
    /// Classify the content of a hook file (`None` when the file is absent).
    ///
    /// Ownership requires a line that is exactly [`OWN_MARKER`], so a user who
    /// deletes that line takes the file over for good. Legacy patterns are
    /// substring matches anywhere in the file.
    #[must_use]
    pub fn classify(content: Option<&str>, legacy: &[LegacyMarker]) -> Self {
        let Some(content) = content else {
            return Self::Absent;
        };

        if content.lines().any(|line| line.trim_end() == OWN_MARKER) {
            return Self::Owned;
        }

        legacy
            .iter()
            .find(|marker| content.contains(marker.pattern))
            .map_or(Self::Foreign, |marker| Self::Legacy { tool: marker.tool })
    }
}
