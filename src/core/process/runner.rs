// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//!          run()
//!            |
//!            v
//!     resolve program ---- not in PATH ----> EXIT_NOT_FOUND
//!            |
//!            v
//!     build_command()  args, cwd, env, piped stdio
//!            |
//!            v
//!         spawn() -------- io error -------> EXIT_SPAWN_FAILED
//!            |
//!            v
//!   wait_with_output (+ timeout) -- elapsed -> EXIT_TIMED_OUT
//!            |                                (child killed on drop)
//!            v
//!   CommandResult { exit_code, stdout, stderr }
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, trace, warn};

use super::builder::{CommandResult, EXIT_SIGNALED, ProcessBuilder};
use crate::error::ProcessError;
use crate::logging::redact;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging), secrets and
    /// URL credentials masked.
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            let mut shown = arg.clone();
            for secret in self.secrets() {
                shown = shown.replace(secret.as_str(), "[hidden]");
            }
            let shown = redact(&shown);
            if shown.contains(' ') {
                let _ = write!(cmd, " \"{shown}\"");
            } else {
                let _ = write!(cmd, " {shown}");
            }
        }
        cmd
    }

    /// Resolves a bare program name through PATH; paths are used as given.
    fn resolve_program(&self) -> Option<PathBuf> {
        let program = self.program();
        if program.components().count() > 1 || program.is_absolute() {
            return program.exists().then(|| program.clone());
        }
        which::which(program).ok()
    }

    /// Spawns the process and waits for it.
    ///
    /// Never fails: a missing executable, a spawn error, a timeout or a
    /// signal all come back as a [`CommandResult`] with a sentinel code.
    pub async fn run(self) -> CommandResult {
        let name = self.display_name();
        let cmd_line = self.command_line();

        let Some(program) = self.resolve_program() else {
            let err = ProcessError::ExecutableNotFound { name: name.clone() };
            debug!(error = %err, "lookup failed");
            return CommandResult::not_found(format!(
                "{name} not found. Install {name} and try again."
            ));
        };

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command(&program);
        let child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                let err = ProcessError::SpawnFailed {
                    command: cmd_line,
                    source,
                };
                warn!(error = %err, "spawn failed");
                return CommandResult::spawn_failed(err.to_string());
            }
        };
        trace!(process = %name, pid = ?child.id(), "spawned");

        let waited = match self.timeout_duration() {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    let err = ProcessError::Timeout {
                        command: name.clone(),
                        timeout_secs: limit.as_secs(),
                    };
                    warn!(process = %name, timeout = ?limit, "process timed out");
                    let message = self
                        .timeout_message_override()
                        .map_or_else(|| err.to_string(), String::from);
                    return CommandResult::timed_out(message);
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match waited {
            Ok(output) => output,
            Err(e) => {
                warn!(process = %name, error = %e, "wait failed");
                return CommandResult::spawn_failed(format!("{name}: {e}"));
            }
        };

        let result = CommandResult::new(
            output.status.code().unwrap_or(EXIT_SIGNALED),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        );

        if !result.stdout_trimmed().is_empty() {
            debug!(process = %name, stdout = %redact(result.stdout_trimmed()), "output");
        }
        if !result.stderr_trimmed().is_empty() {
            debug!(process = %name, stderr = %redact(result.stderr_trimmed()), "output");
        }
        trace!(process = %name, exit_code = result.exit_code(), "completed");
        result
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.env_overrides() {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        // A timed-out child is dropped with the future and must not linger.
        command.kill_on_drop(true);

        command
    }
}
