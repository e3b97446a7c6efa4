// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository operations over the configured working tree.
//!
//! ```text
//! every operation
//!   repo_path unset ---------> NotConfigured   (no subprocess)
//!   no .git directory -------> NoRepository    (no subprocess)
//!        |
//!        v
//!   preconditions            commit: message, changes
//!        |                   pull:   no local edits
//!        v                   push:   behind == 0
//!   GitBackend::run
//!        |
//!        v
//!   Outcome (sentinel -> ToolMissing/Timeout, phrases -> kind, else Generic)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::backend::{GitBackend, GitInvocation, OpClass, ShellBackend};
use super::remote::{RemoteType, embed_credentials, strip_credentials};
use super::status::{RepoState, RepoStatus, parse_ahead_behind};
use crate::config::Settings;
use crate::core::process::builder::CommandResult;
use crate::logging::redact;
use crate::outcome::patterns::{self, NOTHING_TO_COMMIT};
use crate::outcome::{FailureKind, Outcome, failure_kind};

const MSG_NOT_CONFIGURED: &str = "Repository path is not set in settings.";
const MSG_CONNECTIVITY: &str = "Cannot reach the server. Check the network connection.";
const MSG_CONFLICT: &str =
    "Merge conflicts detected. Resolve them manually, then run git add and git commit.";
const MSG_REJECTED: &str = "Push was rejected. Pull first.";
const MSG_DIRTY: &str = "There are uncommitted changes. Commit before pulling.";
const MSG_NOTHING_TO_COMMIT: &str = "Nothing to commit.";

/// Result of fetch followed by an ahead/behind recount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub ahead: u32,
    pub behind: u32,
    pub outcome: Outcome,
}

/// Git operations on the repository named by a settings snapshot.
#[derive(Clone)]
pub struct Repository {
    settings: Settings,
    backend: Arc<dyn GitBackend>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.settings.repo_path())
            .finish_non_exhaustive()
    }
}

impl Repository {
    pub fn new(settings: Settings, backend: Arc<dyn GitBackend>) -> Self {
        Self { settings, backend }
    }

    /// Repository backed by the git CLI.
    #[must_use]
    pub fn with_shell(settings: Settings) -> Self {
        Self::new(settings, Arc::new(ShellBackend::new()))
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True if the configured path contains a `.git` directory.
    #[must_use]
    pub fn has_repository(&self) -> bool {
        self.settings
            .repo_path()
            .is_some_and(|dir| dir.join(".git").is_dir())
    }

    #[must_use]
    pub fn git_available(&self) -> bool {
        self.backend.available()
    }

    /// ToolMissing outcome when the backend cannot find `git`.
    #[must_use]
    pub fn missing_git(&self) -> Option<Outcome> {
        (!self.git_available())
            .then(|| Outcome::fail(FailureKind::ToolMissing, "git not found. Install git."))
    }

    /// NotConfigured or NoRepository outcome, `None` when operations may run.
    #[must_use]
    pub fn refusal(&self) -> Option<Outcome> {
        self.require_repo().err()
    }

    /// Working tree, or the refusal to return when there is none.
    fn require_repo(&self) -> Result<PathBuf, Outcome> {
        let Some(dir) = self.settings.repo_path() else {
            return Err(Outcome::fail(FailureKind::NotConfigured, MSG_NOT_CONFIGURED));
        };
        if !dir.join(".git").is_dir() {
            return Err(Outcome::fail(
                FailureKind::NoRepository,
                format!("No git repository found in {}", dir.display()),
            ));
        }
        Ok(dir)
    }

    /// Runs git, pinning the SSH identity for network commands on SSH remotes.
    async fn git<const N: usize>(&self, dir: &Path, args: [&str; N], class: OpClass) -> CommandResult {
        let mut invocation =
            GitInvocation::new(dir, args, class, self.settings.fetch_timeout());
        if class.is_network() {
            invocation = invocation.with_ssh_key(self.ssh_override(dir).await);
        }
        debug!(cmd = invocation.subcommand(), timeout = ?invocation.timeout, "git");
        self.backend.run(invocation).await
    }

    /// Identity for `GIT_SSH_COMMAND`: only for SSH remotes with an existing key.
    async fn ssh_override(&self, dir: &Path) -> Option<PathBuf> {
        let url = self.origin_url(dir).await;
        if RemoteType::classify(url.as_deref()) != RemoteType::Ssh {
            return None;
        }
        let key = self.settings.ssh_key_path();
        key.is_file().then_some(key)
    }

    async fn origin_url(&self, dir: &Path) -> Option<String> {
        let invocation = GitInvocation::new(
            dir,
            ["remote", "get-url", "origin"],
            OpClass::Lookup,
            self.settings.fetch_timeout(),
        );
        let result = self.backend.run(invocation).await;
        let url = result.stdout_trimmed();
        (result.success() && !url.is_empty()).then(|| url.to_string())
    }

    /// URL of the `origin` remote, `None` if it cannot be read.
    pub async fn remote_url(&self) -> Option<String> {
        let dir = self.require_repo().ok()?;
        self.origin_url(&dir).await
    }

    /// Transport of `origin`; unreadable URLs count as SSH.
    pub async fn remote_type(&self) -> RemoteType {
        RemoteType::classify(self.remote_url().await.as_deref())
    }

    /// Current branch, `None` on detached HEAD or failure.
    pub async fn branch(&self) -> Option<String> {
        let dir = self.require_repo().ok()?;
        self.branch_in(&dir).await
    }

    async fn branch_in(&self, dir: &Path) -> Option<String> {
        let result = self
            .git(dir, ["rev-parse", "--abbrev-ref", "HEAD"], OpClass::Local)
            .await;
        let branch = result.stdout_trimmed();
        (result.success() && !branch.is_empty() && branch != "HEAD").then(|| branch.to_string())
    }

    async fn ahead_behind(&self, dir: &Path) -> (u32, u32) {
        let result = self
            .git(
                dir,
                ["rev-list", "--left-right", "--count", "HEAD...@{upstream}"],
                OpClass::Local,
            )
            .await;
        if !result.success() {
            debug!(error = %result.error_text(), "no upstream counts");
            return (0, 0);
        }
        parse_ahead_behind(result.stdout()).unwrap_or((0, 0))
    }

    /// Working-tree snapshot; all-empty when there is no repository.
    pub async fn status(&self) -> RepoStatus {
        match self.require_repo() {
            Ok(dir) => self.status_in(&dir).await,
            Err(_) => RepoStatus::default(),
        }
    }

    async fn status_in(&self, dir: &Path) -> RepoStatus {
        let mut status = RepoStatus {
            branch: self.branch_in(dir).await,
            ..RepoStatus::default()
        };
        let listing = self.git(dir, ["status", "--porcelain"], OpClass::Local).await;
        if listing.success() {
            status.apply_porcelain(listing.stdout());
        } else {
            warn!(error = %listing.error_text(), "status failed");
        }
        (status.ahead, status.behind) = self.ahead_behind(dir).await;
        status
    }

    /// Lifecycle state of the configured working tree.
    pub async fn state(&self) -> RepoState {
        if !self.settings.is_configured() {
            return RepoState::Unconfigured;
        }
        let Ok(dir) = self.require_repo() else {
            return RepoState::NoRepo;
        };
        if self.status_in(&dir).await.has_local_edits() {
            RepoState::Dirty
        } else {
            RepoState::Clean
        }
    }

    /// `git fetch --all`.
    pub async fn fetch(&self) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        let result = self.git(&dir, ["fetch", "--all"], OpClass::NetworkRead).await;
        if result.success() {
            info!("fetch completed");
            return Outcome::ok("Fetch completed.");
        }
        failed(&result, &[FailureKind::Connectivity])
    }

    /// `git pull --ff-only`, refused over local edits.
    pub async fn pull(&self) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        if self.status_in(&dir).await.has_local_edits() {
            return Outcome::fail(FailureKind::DirtyWorkingTree, MSG_DIRTY);
        }
        let result = self.git(&dir, ["pull", "--ff-only"], OpClass::NetworkWrite).await;
        if result.success() {
            info!("pull completed");
            return Outcome::ok(non_empty_or(result.stdout_trimmed(), "Pull completed."));
        }
        failed(&result, &[FailureKind::Conflict, FailureKind::Connectivity])
    }

    /// Stages everything and commits; no changes is a successful no-op.
    pub async fn commit(&self, message: &str) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        if message.trim().is_empty() {
            return Outcome::fail(FailureKind::Validation, "Commit message cannot be empty.");
        }
        if self.status_in(&dir).await.is_clean() {
            return Outcome::ok(MSG_NOTHING_TO_COMMIT);
        }

        let added = self.git(&dir, ["add", "."], OpClass::Local).await;
        if !added.success() {
            return match failure_kind(&added, &[]) {
                FailureKind::Generic => Outcome::fail(
                    FailureKind::Generic,
                    format!("git add failed: {}", added.error_text()),
                ),
                kind => Outcome::fail(kind, added.error_text()),
            };
        }

        let result = self.git(&dir, ["commit", "-m", message], OpClass::Local).await;
        if result.success() {
            info!("commit created");
            return Outcome::ok(non_empty_or(result.stdout_trimmed(), "Commit created."));
        }
        let output = patterns::combined(result.stdout(), result.stderr());
        if result.exit_code() > 0 && patterns::contains_any(&output, NOTHING_TO_COMMIT) {
            return Outcome::ok(MSG_NOTHING_TO_COMMIT);
        }
        failed(&result, &[])
    }

    /// `git push`, never attempted while behind upstream.
    pub async fn push(&self) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        let (_, behind) = self.ahead_behind(&dir).await;
        if behind > 0 {
            return Outcome::fail(
                FailureKind::PushBlocked,
                format!("Local branch is {behind} commit(s) behind upstream. Pull first."),
            );
        }
        let result = self.git(&dir, ["push"], OpClass::NetworkWrite).await;
        if result.success() {
            info!("push completed");
            let text = non_empty_or(result.stdout_trimmed(), result.stderr_trimmed());
            return Outcome::ok(non_empty_or(&text, "Push completed."));
        }
        failed(&result, &[FailureKind::Rejected, FailureKind::Connectivity])
    }

    /// Fetch, then recount ahead/behind. A failed fetch reports 0/0.
    pub async fn sync_status(&self) -> SyncStatus {
        let outcome = self.fetch().await;
        if !outcome.success() {
            return SyncStatus {
                ahead: 0,
                behind: 0,
                outcome,
            };
        }
        let (ahead, behind) = match self.require_repo() {
            Ok(dir) => self.ahead_behind(&dir).await,
            Err(_) => (0, 0),
        };
        SyncStatus {
            ahead,
            behind,
            outcome,
        }
    }

    /// Embeds `username:token` into the HTTPS origin URL.
    pub async fn apply_credentials(&self) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        let Some(url) = self.origin_url(&dir).await else {
            return Outcome::fail(FailureKind::Validation, "Could not read the origin URL.");
        };
        if RemoteType::classify(Some(&url)) != RemoteType::Https {
            return Outcome::fail(
                FailureKind::Validation,
                "Remote is not HTTPS; a token is not needed.",
            );
        }
        let username = self.settings.credentials.username.trim();
        let token = self.settings.credentials.token.expose().trim();
        if username.is_empty() || token.is_empty() {
            return Outcome::fail(
                FailureKind::NotConfigured,
                "Username or token is not set in settings.",
            );
        }
        let Some(new_url) = embed_credentials(&url, username, token) else {
            return Outcome::fail(
                FailureKind::Validation,
                format!("Could not parse URL: {}", redact(&url)),
            );
        };

        let invocation = GitInvocation::new(
            &dir,
            ["remote", "set-url", "origin", new_url.as_str()],
            OpClass::Local,
            self.settings.fetch_timeout(),
        )
        .with_secret(token)
        .with_secret(urlencoding::encode(token));
        let result = self.backend.run(invocation).await;
        if result.success() {
            info!(url = %redact(&new_url), "credentials applied to origin");
            return Outcome::ok("Token applied to the remote URL.");
        }
        redacted(failed(&result, &[]))
    }

    /// Removes any `user:token@` from the origin URL.
    pub async fn remove_credentials(&self) -> Outcome {
        let dir = match self.require_repo() {
            Ok(dir) => dir,
            Err(refused) => return refused,
        };
        let Some(url) = self.origin_url(&dir).await else {
            return Outcome::fail(FailureKind::Validation, "Could not read the origin URL.");
        };
        let Some(clean) = strip_credentials(&url) else {
            return Outcome::fail(
                FailureKind::Validation,
                "Remote is not an HTTP(S) URL; there are no credentials to remove.",
            );
        };
        if clean == url {
            return Outcome::ok("Remote URL is already clean.");
        }

        let result = self
            .git(&dir, ["remote", "set-url", "origin", clean.as_str()], OpClass::Local)
            .await;
        if result.success() {
            info!(url = %clean, "credentials removed from origin");
            return Outcome::ok("Credentials removed from the remote URL.");
        }
        redacted(failed(&result, &[]))
    }
}

/// Maps a failed command to an outcome; matched kinds get a fixed message.
fn failed(result: &CommandResult, precedence: &[FailureKind]) -> Outcome {
    let kind = failure_kind(result, precedence);
    let message = match kind {
        FailureKind::Connectivity => MSG_CONNECTIVITY.to_string(),
        FailureKind::Conflict => MSG_CONFLICT.to_string(),
        FailureKind::Rejected => MSG_REJECTED.to_string(),
        _ => result.error_text(),
    };
    warn!(kind = %kind, exit_code = result.exit_code(), "git failed");
    Outcome::fail(kind, message)
}

fn redacted(outcome: Outcome) -> Outcome {
    match outcome.kind() {
        Some(kind) => Outcome::fail(kind, redact(outcome.message())),
        None => outcome,
    }
}

fn non_empty_or(text: &str, fallback: &str) -> String {
    if text.is_empty() { fallback } else { text }.to_string()
}
