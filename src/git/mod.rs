// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          Repository (repo.rs)
//!   status fetch pull commit push sync
//!   apply/remove credentials, remote type
//!        |             |            |
//!        v             v            v
//!   status.rs      remote.rs    outcome::patterns
//!   porcelain,     URL shapes,  stderr -> FailureKind
//!   ahead/behind   userinfo
//!        |
//!        v
//!   backend::GitBackend --> ShellBackend --> git CLI
//! ```

pub mod backend;
pub mod remote;
pub mod repo;
pub mod status;

pub use backend::{GitBackend, ShellBackend};
pub use remote::RemoteType;
pub use repo::{Repository, SyncStatus};
pub use status::{RepoState, RepoStatus, SyncFlags};

#[cfg(test)]
mod tests;
