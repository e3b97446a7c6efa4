// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Serialized action execution with event reporting.
//!
//! ```text
//! presenter / timer                 worker task (tokio::spawn)
//!   dispatch(Action) ------------>  gate.lock()        one action at a time
//!                                   Event::Started
//!                                   settings snapshot -> Repository / SshService
//!                                   Event::Status / Synced / PublicKey
//!   <---- flume::Receiver<Event> -- Event::Finished { outcome }
//! ```
//!
//! The presenter drains events and never waits on a subprocess. Actions
//! queue behind the gate, so a periodic fetch and a user pull never run
//! git in the same working tree at the same time.

pub mod auto_fetch;
pub mod presenter;


use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

pub use auto_fetch::AutoFetch;
pub use presenter::{ConsolePresenter, Presenter, drain, present};

use crate::config::Settings;
use crate::config::types::Secret;
use crate::git::{GitBackend, RepoStatus, Repository, ShellBackend, SyncStatus};
use crate::outcome::{FailureKind, Outcome};
use crate::ssh::SshService;

/// User-triggerable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Status,
    Fetch,
    Pull,
    Commit(String),
    Push,
    Sync,
    ApplyCredentials,
    RemoveCredentials,
    GenerateKey { passphrase: Secret, overwrite: bool },
    TestConnection,
    UpdateSshConfig,
}

impl Action {
    /// Short label used in events and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Fetch => "fetch",
            Self::Pull => "pull",
            Self::Commit(_) => "commit",
            Self::Push => "push",
            Self::Sync => "sync",
            Self::ApplyCredentials => "apply-credentials",
            Self::RemoveCredentials => "remove-credentials",
            Self::GenerateKey { .. } => "generate-key",
            Self::TestConnection => "test-connection",
            Self::UpdateSshConfig => "update-ssh-config",
        }
    }

    /// True for actions after which the working tree snapshot is stale.
    #[must_use]
    pub const fn refreshes_status(&self) -> bool {
        matches!(self, Self::Pull | Self::Commit(_) | Self::Push | Self::Sync)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress reported to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started { action: &'static str },
    Finished { action: &'static str, outcome: Outcome },
    Status(RepoStatus),
    Synced { ahead: u32, behind: u32 },
    PublicKey(String),
}

/// Shared handle that runs actions one at a time.
#[derive(Clone)]
pub struct Session {
    settings: Arc<RwLock<Settings>>,
    backend: Arc<dyn GitBackend>,
    gate: Arc<Mutex<()>>,
    events: flume::Sender<Event>,
    ssh_config_file: Option<PathBuf>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("ssh_config_file", &self.ssh_config_file)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session and the receiving end of its event stream.
    pub fn new(settings: Settings, backend: Arc<dyn GitBackend>) -> (Self, flume::Receiver<Event>) {
        let (events, receiver) = flume::unbounded();
        let session = Self {
            settings: Arc::new(RwLock::new(settings)),
            backend,
            gate: Arc::new(Mutex::new(())),
            events,
            ssh_config_file: None,
        };
        (session, receiver)
    }

    /// Session backed by the git CLI.
    #[must_use]
    pub fn with_shell(settings: Settings) -> (Self, flume::Receiver<Event>) {
        Self::new(settings, Arc::new(ShellBackend::new()))
    }

    /// Writes the SSH host block into `path` instead of `~/.ssh/config`.
    #[must_use]
    pub fn with_ssh_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_config_file = Some(path.into());
        self
    }

    /// Current settings snapshot.
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Swaps the settings used by subsequent actions.
    pub async fn replace_settings(&self, settings: Settings) {
        *self.settings.write().await = settings;
        debug!("session settings replaced");
    }

    /// Repository view over the current settings.
    pub async fn repository(&self) -> Repository {
        Repository::new(self.settings().await, Arc::clone(&self.backend))
    }

    /// SSH operations over the current settings.
    pub async fn ssh(&self) -> SshService {
        let service = SshService::new(self.settings().await);
        match &self.ssh_config_file {
            Some(path) => service.with_config_file(path),
            None => service,
        }
    }

    /// Runs `action` on a worker task.
    pub fn dispatch(&self, action: Action) -> JoinHandle<Outcome> {
        let session = self.clone();
        tokio::spawn(async move { session.run(action).await })
    }

    /// Runs `action` after every earlier action has finished.
    pub async fn run(&self, action: Action) -> Outcome {
        let name = action.name();
        let _turn = self.gate.lock().await;
        self.emit(Event::Started { action: name });

        let outcome = self.execute(action).await;

        info!(action = name, success = outcome.success(), "action finished");
        self.emit(Event::Finished {
            action: name,
            outcome: outcome.clone(),
        });
        outcome
    }

    async fn execute(&self, action: Action) -> Outcome {
        let repo = self.repository().await;
        let refresh = action.refreshes_status();
        let outcome = match action {
            Action::Status => {
                let status = repo.status().await;
                let outcome = repo
                    .refusal()
                    .or_else(|| repo.missing_git())
                    .unwrap_or_else(|| Outcome::ok(status.summary()));
                self.emit(Event::Status(status));
                return outcome;
            }
            Action::Fetch => repo.fetch().await,
            Action::Pull => repo.pull().await,
            Action::Commit(message) => repo.commit(&message).await,
            Action::Push => repo.push().await,
            Action::Sync => {
                let SyncStatus {
                    ahead,
                    behind,
                    outcome,
                } = repo.sync_status().await;
                if outcome.success() {
                    self.emit(Event::Synced { ahead, behind });
                }
                outcome
            }
            Action::ApplyCredentials => repo.apply_credentials().await,
            Action::RemoveCredentials => repo.remove_credentials().await,
            Action::GenerateKey {
                passphrase,
                overwrite,
            } => {
                let generated = self
                    .ssh()
                    .await
                    .generate_key(passphrase.expose(), overwrite)
                    .await;
                if let Some(key) = generated.public_key {
                    self.emit(Event::PublicKey(key));
                }
                generated.outcome
            }
            Action::TestConnection => self.ssh().await.test_connection().await,
            Action::UpdateSshConfig => {
                let ssh = self.ssh().await;
                tokio::task::spawn_blocking(move || ssh.update_ssh_config())
                    .await
                    .unwrap_or_else(|err| {
                        Outcome::fail(
                            FailureKind::Generic,
                            format!("SSH config update did not finish: {err}"),
                        )
                    })
            }
        };
        if refresh && repo.refusal().is_none() {
            self.emit(Event::Status(repo.status().await));
        }
        outcome
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            trace!("event dropped, no receiver");
        }
    }
}
