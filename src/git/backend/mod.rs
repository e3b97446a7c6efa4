// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! Repository --GitInvocation--> GitBackend
//!                                  |
//!                   +--------------+--------------+
//!                   v                             v
//!             ShellBackend                  (test doubles)
//!        git CLI via ProcessBuilder
//!        GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//!        GIT_SSH_COMMAND when an identity is pinned
//! ```
//!
//! Timeout budgets by operation class:
//!
//! ```text
//! Local         status, rev-parse, rev-list, add, commit, set-url   60 s
//! Lookup        remote get-url                                       5 s
//! NetworkRead   fetch, ls-remote                         fetch timeout
//! NetworkWrite  pull, push                   max(3 x fetch timeout, 30 s)
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::core::process::builder::{CommandResult, ProcessBuilder};

/// Budget for commands that only touch the local repository.
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(60);
/// Budget for reading the origin URL.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
/// Floor for pull/push budgets.
pub const MIN_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Operation class that selects the timeout budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Local,
    Lookup,
    NetworkRead,
    NetworkWrite,
}

impl OpClass {
    /// Timeout for this class given the configured fetch timeout.
    #[must_use]
    pub fn budget(self, fetch_timeout: Duration) -> Duration {
        match self {
            Self::Local => LOCAL_TIMEOUT,
            Self::Lookup => LOOKUP_TIMEOUT,
            Self::NetworkRead => fetch_timeout,
            Self::NetworkWrite => fetch_timeout.saturating_mul(3).max(MIN_WRITE_TIMEOUT),
        }
    }

    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::NetworkRead | Self::NetworkWrite)
    }
}

/// One git command to run inside a working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    /// Working tree the command runs in.
    pub cwd: PathBuf,
    /// Arguments after `git`.
    pub args: Vec<String>,
    pub class: OpClass,
    /// Resolved budget for `class`.
    pub timeout: Duration,
    /// Identity pinned through `GIT_SSH_COMMAND`, if any.
    pub ssh_key: Option<PathBuf>,
    /// Values masked in logged command lines.
    pub secrets: Vec<String>,
}

impl GitInvocation {
    pub fn new<I, S>(cwd: &Path, args: I, class: OpClass, fetch_timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cwd: cwd.to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
            class,
            timeout: class.budget(fetch_timeout),
            ssh_key: None,
            secrets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ssh_key(mut self, key: Option<PathBuf>) -> Self {
        self.ssh_key = key;
        self
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    /// First argument (`status`, `fetch`, ...), for logs and messages.
    #[must_use]
    pub fn subcommand(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    /// Ready-to-display message stored in stderr when the budget runs out.
    #[must_use]
    pub fn timeout_message(&self) -> String {
        let secs = self.timeout.as_secs();
        if self.class.is_network() {
            format!("Server unreachable (timed out after {secs} s)")
        } else {
            format!("git {} did not finish within {secs} s", self.subcommand())
        }
    }
}

/// `GIT_SSH_COMMAND` value pinning `key` and accepting new host keys.
#[must_use]
pub fn ssh_command(key: &Path) -> String {
    format!(
        "ssh -i \"{}\" -o StrictHostKeyChecking=accept-new",
        key.display()
    )
}

/// Executes git commands.
///
/// Methods return `BoxFuture` so the backend can be shared as
/// `Arc<dyn GitBackend>` between the session and its workers.
pub trait GitBackend: Send + Sync {
    /// Runs one git command. Never fails; see [`CommandResult`] sentinels.
    fn run(&self, invocation: GitInvocation) -> BoxFuture<'_, CommandResult>;

    /// Whether the git executable can be found right now.
    fn available(&self) -> bool;
}

/// Git CLI backend.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl ShellBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific git executable instead of the one on PATH.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the process for an invocation.
    ///
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so a missing
    /// credential fails instead of waiting on a prompt.
    #[must_use]
    pub fn command(&self, invocation: &GitInvocation) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&self.program)
            .name("git")
            .args(&invocation.args)
            .cwd(&invocation.cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .timeout(invocation.timeout)
            .timeout_message(invocation.timeout_message());
        if let Some(key) = &invocation.ssh_key {
            builder = builder.env("GIT_SSH_COMMAND", ssh_command(key));
        }
        for secret in &invocation.secrets {
            builder = builder.secret(secret.clone());
        }
        builder
    }
}

impl GitBackend for ShellBackend {
    fn run(&self, invocation: GitInvocation) -> BoxFuture<'_, CommandResult> {
        let builder = self.command(&invocation);
        Box::pin(builder.run())
    }

    fn available(&self) -> bool {
        let program = self.program.to_string_lossy();
        ProcessBuilder::exists(&program)
    }
}
