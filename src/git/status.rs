// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-tree state.
//!
//! ```text
//! git status --porcelain           XY path
//!   "??"                        -> untracked
//!   X in M A D R C              -> staged
//!   Y in M D                    -> modified
//!   unmerged (UU AA DD AU ...)  -> conflicted + staged + modified
//!
//! git rev-list --left-right --count HEAD...@{upstream}
//!   "<ahead>\t<behind>"
//!
//! Unconfigured -> NoRepo -> Clean <-> Dirty     x  SyncFlags { AHEAD, BEHIND }
//! ```

use std::collections::BTreeSet;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

/// Snapshot of the working tree, recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Current branch; `None` on detached HEAD or when there is no repository.
    #[serde(serialize_with = "branch_or_empty")]
    pub branch: Option<String>,
    pub modified: BTreeSet<String>,
    pub untracked: BTreeSet<String>,
    pub staged: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub conflicted: BTreeSet<String>,
    pub ahead: u32,
    pub behind: u32,
}

#[allow(clippy::ref_option)]
fn branch_or_empty<S: Serializer>(branch: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(branch.as_deref().unwrap_or(""))
}

impl RepoStatus {
    /// Records the entries of a `git status --porcelain` listing.
    pub fn apply_porcelain(&mut self, listing: &str) {
        for line in listing.lines() {
            if line.len() < 3 || !line.is_char_boundary(3) {
                continue;
            }
            let (code, path) = line.split_at(3);
            let mut code = code.chars();
            let (Some(x), Some(y)) = (code.next(), code.next()) else {
                continue;
            };
            let path = path.rsplit_once(" -> ").map_or(path, |(_, to)| to).to_string();

            if x == '?' && y == '?' {
                self.untracked.insert(path);
                continue;
            }
            if is_unmerged(x, y) {
                self.conflicted.insert(path.clone());
                self.staged.insert(path.clone());
                self.modified.insert(path);
                continue;
            }
            if matches!(x, 'M' | 'A' | 'D' | 'R' | 'C') {
                self.staged.insert(path.clone());
            }
            if matches!(y, 'M' | 'D') {
                self.modified.insert(path);
            }
        }
    }

    /// Local edits that a fast-forward pull must not run over.
    #[must_use]
    pub fn has_local_edits(&self) -> bool {
        !self.modified.is_empty() || !self.staged.is_empty()
    }

    /// No modified, staged or untracked entries.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.has_local_edits() && self.untracked.is_empty()
    }

    #[must_use]
    pub fn sync_flags(&self) -> SyncFlags {
        let mut flags = SyncFlags::empty();
        flags.set(SyncFlags::AHEAD, self.ahead > 0);
        flags.set(SyncFlags::BEHIND, self.behind > 0);
        flags
    }

    /// One-line summary for the status bar.
    #[must_use]
    pub fn summary(&self) -> String {
        let branch = self.branch.as_deref().unwrap_or("(detached)");
        let mut parts = vec![format!("branch {branch}")];
        if self.is_clean() {
            parts.push("clean".to_string());
        } else {
            for (count, label) in [
                (self.staged.len(), "staged"),
                (self.modified.len(), "modified"),
                (self.untracked.len(), "untracked"),
                (self.conflicted.len(), "conflicted"),
            ] {
                if count > 0 {
                    parts.push(format!("{count} {label}"));
                }
            }
        }
        if self.ahead > 0 {
            parts.push(format!("\u{2191}{}", self.ahead));
        }
        if self.behind > 0 {
            parts.push(format!("\u{2193}{}", self.behind));
        }
        parts.join(", ")
    }
}

const fn is_unmerged(x: char, y: char) -> bool {
    matches!(
        (x, y),
        ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D')
    )
}

/// Parses `rev-list --left-right --count` output into `(ahead, behind)`.
#[must_use]
pub fn parse_ahead_behind(output: &str) -> Option<(u32, u32)> {
    let mut parts = output.split_whitespace();
    let ahead = parts.next()?.parse().ok()?;
    let behind = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((ahead, behind))
}

bitflags! {
    /// Position relative to upstream, orthogonal to [`RepoState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SyncFlags: u8 {
        const AHEAD = 1 << 0;
        const BEHIND = 1 << 1;
    }
}

/// Lifecycle of the configured working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepoState {
    /// No repository path in settings.
    Unconfigured,
    /// Path set but it has no `.git` directory.
    NoRepo,
    Clean,
    Dirty,
}

impl RepoState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::NoRepo => "no repository",
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        }
    }
}

impl std::fmt::Display for RepoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
