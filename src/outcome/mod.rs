// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Uniform result of every user-facing operation.
//!
//! ```text
//! CommandResult --> patterns::classify(output, precedence)
//!                       |
//!                       v
//!               Outcome { success, kind, message }
//!                       |
//!                       v
//!               presenter renders summary()
//! ```
//!
//! [`FailureKind`] is the authoritative contract. The substring table in
//! [`patterns`] is a best-effort way of mapping tool output onto it.

pub mod patterns;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::core::process::builder::CommandResult;

/// Failure taxonomy shared by repository and SSH operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// git, ssh or ssh-keygen is not installed.
    ToolMissing,
    /// No repository path (or server host) in settings.
    NotConfigured,
    /// The configured path has no `.git` directory.
    NoRepository,
    /// The command exceeded its class-specific budget.
    Timeout,
    /// DNS failure, refused or unreachable server.
    Connectivity,
    /// Merge conflict; manual resolution required.
    Conflict,
    /// Push rejected as non-fast-forward.
    Rejected,
    /// Pull attempted with local modifications.
    DirtyWorkingTree,
    /// Push attempted while behind upstream.
    PushBlocked,
    /// Bad input: empty commit message, unusable URL, existing key.
    Validation,
    /// SSH key not authorized on the server.
    PermissionDenied,
    /// Anything else, carrying raw stderr.
    Generic,
}

impl FailureKind {
    /// Stable name used in summaries and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToolMissing => "ToolMissing",
            Self::NotConfigured => "NotConfigured",
            Self::NoRepository => "NoRepository",
            Self::Timeout => "Timeout",
            Self::Connectivity => "Connectivity",
            Self::Conflict => "Conflict",
            Self::Rejected => "Rejected",
            Self::DirtyWorkingTree => "DirtyWorkingTree",
            Self::PushBlocked => "PushBlocked",
            Self::Validation => "Validation",
            Self::PermissionDenied => "PermissionDenied",
            Self::Generic => "Generic",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success flag plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<FailureKind>,
    message: String,
}

impl Outcome {
    /// Successful outcome.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            kind: None,
            message: message.into(),
        }
    }

    /// Failed outcome of the given kind.
    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            kind: Some(kind),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Failure kind, `None` on success.
    #[must_use]
    pub const fn kind(&self) -> Option<FailureKind> {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `"<Kind>: <message>"` for failures, the bare message otherwise.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.kind {
            Some(kind) => format!("{kind}: {}", self.message),
            None => self.message.clone(),
        }
    }

    /// Splits into the `(success, message)` pair the presentation layer shows.
    #[must_use]
    pub fn into_pair(self) -> (bool, String) {
        let summary = self.summary();
        (self.success, summary)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.success { '\u{2713}' } else { '\u{2717}' };
        write!(f, "{mark} {}", self.summary())
    }
}

/// Kind of a failed command: sentinels first, then the phrase table in
/// `precedence` order, else [`FailureKind::Generic`].
#[must_use]
pub fn failure_kind(result: &CommandResult, precedence: &[FailureKind]) -> FailureKind {
    if result.is_not_found() {
        return FailureKind::ToolMissing;
    }
    if result.is_timed_out() {
        return FailureKind::Timeout;
    }
    let haystack = patterns::combined(result.stdout(), result.stderr());
    patterns::classify(&haystack, precedence).unwrap_or(FailureKind::Generic)
}

impl From<crate::error::KgError> for Outcome {
    fn from(err: crate::error::KgError) -> Self {
        Self::fail(FailureKind::Generic, err.to_string())
    }
}
