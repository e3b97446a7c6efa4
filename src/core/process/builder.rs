// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/find/exists
//!  • arg/args/cwd/env/timeout/name/secret/timeout_message
//!
//! CommandResult { exit_code, stdout, stderr }
//!   exit_code < 0 => sentinel (not found, timed out, spawn failed, signal)
//! ```

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// Executable could not be resolved from PATH.
pub const EXIT_NOT_FOUND: i32 = -1;
/// Process exceeded its timeout and was killed.
pub const EXIT_TIMED_OUT: i32 = -2;
/// OS refused to start the process.
pub const EXIT_SPAWN_FAILED: i32 = -3;
/// Process ended without an exit code (killed by a signal).
pub const EXIT_SIGNALED: i32 = -4;

/// Output of one external invocation.
///
/// Produced once per call and never mutated. Negative exit codes are
/// sentinels; for [`EXIT_TIMED_OUT`] the stderr already holds a message
/// that can be shown to the user as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CommandResult {
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Sentinel result for a missing executable.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(EXIT_NOT_FOUND, String::new(), message.into())
    }

    /// Sentinel result for a timeout; `message` is shown verbatim.
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::new(EXIT_TIMED_OUT, String::new(), message.into())
    }

    /// Sentinel result for an OS-level spawn failure.
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self::new(EXIT_SPAWN_FAILED, String::new(), message.into())
    }

    /// Returns the process exit code (0 = success, negative = sentinel).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns true if the process exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.exit_code == EXIT_NOT_FOUND
    }

    #[must_use]
    pub const fn is_timed_out(&self) -> bool {
        self.exit_code == EXIT_TIMED_OUT
    }

    /// Trimmed stdout.
    #[must_use]
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Trimmed stderr.
    #[must_use]
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }

    /// Human-readable failure text: timeout message verbatim, else stderr,
    /// else the exit code.
    #[must_use]
    pub fn error_text(&self) -> String {
        let text = self.stderr_trimmed();
        if self.is_timed_out() || !text.is_empty() {
            return text.to_string();
        }
        format!("Unknown error (exit code {})", self.exit_code)
    }
}

/// Builder for configuring and running a process.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    /// Executable name or path
    program: PathBuf,
    /// Command-line arguments
    args: Vec<String>,
    /// Working directory
    cwd: Option<PathBuf>,
    /// Variables layered over the inherited environment
    env: BTreeMap<String, String>,
    /// Display name for logging
    name: Option<String>,
    /// Timeout for the process
    timeout: Option<Duration>,
    /// Message stored in stderr when the timeout fires
    timeout_message: Option<String>,
    /// Substrings masked when the command line is logged
    secrets: Vec<String>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// A bare name is resolved via PATH when `run()` is called.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            name: None,
            timeout: None,
            timeout_message: None,
            secrets: Vec::new(),
        }
    }

    /// Finds the full path to an executable in PATH.
    ///
    /// Resolved on every call; nothing is cached.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    /// Checks if an executable exists in PATH.
    #[must_use]
    pub fn exists(program: &str) -> bool {
        Self::find(program).is_some()
    }

    /// Adds an argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Adds multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string_lossy().into_owned());
        }
        self
    }

    /// Sets the working directory for the process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Overrides one environment variable; the rest is inherited.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a timeout for the process.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Replaces the default timeout message.
    #[must_use]
    pub fn timeout_message(mut self, message: impl Into<String>) -> Self {
        self.timeout_message = Some(message.into());
        self
    }

    /// Masks `secret` in logged command lines. Empty strings are ignored.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    /// Returns a reference to the program path.
    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory, if set.
    #[must_use]
    pub const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    /// Returns the environment overrides.
    #[must_use]
    pub const fn env_overrides(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the timeout duration, if set.
    #[must_use]
    pub const fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(super) fn timeout_message_override(&self) -> Option<&str> {
        self.timeout_message.as_deref()
    }

    pub(super) fn secrets(&self) -> &[String] {
        &self.secrets
    }
}
