// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .timeout() .secret()
//!   .run()
//!       --> tokio::process::Command (piped stdio, kill_on_drop)
//!       --> CommandResult { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;
