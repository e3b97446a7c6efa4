// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stderr phrase table for failure classification.
//!
//! ```text
//! PATTERNS: FailureKind -> [phrases]   (lowercase, substring match)
//! classify(stdout + stderr, &[Conflict, Connectivity]) -> first match
//! ```
//!
//! Wording comes from English-locale git/OpenSSH and may drift between
//! versions. Callers choose which kinds to test and in what order.

use super::FailureKind;

/// Lowercase phrases that identify each failure kind.
pub const PATTERNS: &[(FailureKind, &[&str])] = &[
    (
        FailureKind::Connectivity,
        &[
            "could not resolve",
            "name or service not known",
            "connection refused",
            "connection timed out",
            "network is unreachable",
        ],
    ),
    (FailureKind::Conflict, &["conflict", "merge"]),
    (FailureKind::Rejected, &["rejected", "non-fast-forward"]),
    (FailureKind::PermissionDenied, &["permission denied"]),
];

/// Phrases git prints when a commit had nothing to record.
pub const NOTHING_TO_COMMIT: &[&str] =
    &["nothing to commit", "nothing added", "working tree clean"];

/// Phrases hosting services print on a successful `ssh -T` handshake.
pub const SSH_BANNER: &[&str] = &["welcome", "successfully"];

/// DNS failures only, used to tell "unknown host" apart from "refused".
pub const HOST_UNRESOLVABLE: &[&str] = &["could not resolve", "name or service not known"];

/// Connection refused by the remote port.
pub const CONNECTION_REFUSED: &[&str] = &["connection refused"];

/// Joins stdout and stderr into one lowercase haystack.
#[must_use]
pub fn combined(stdout: &str, stderr: &str) -> String {
    format!("{stdout}\n{stderr}").to_lowercase()
}

/// Returns true if `haystack` (already lowercase) contains any phrase.
#[must_use]
pub fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| haystack.contains(p))
}

/// Phrases registered for `kind`, empty if none.
#[must_use]
pub fn phrases_for(kind: FailureKind) -> &'static [&'static str] {
    PATTERNS
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(&[], |(_, phrases)| phrases)
}

/// Returns the first kind in `precedence` whose phrases occur in `haystack`.
#[must_use]
pub fn classify(haystack: &str, precedence: &[FailureKind]) -> Option<FailureKind> {
    precedence
        .iter()
        .copied()
        .find(|kind| contains_any(haystack, phrases_for(*kind)))
}
