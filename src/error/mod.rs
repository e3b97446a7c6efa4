// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            KgError (~24 bytes)
//!                  |
//!      +-------+---+----+-------+
//!      |       |        |       |
//!      v       v        v       v
//!    Config  Process   Ssh      Io
//!     Box     Box      Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Config  ParseError, InvalidValue, UnknownKey, WriteError
//!   Process ExecutableNotFound, SpawnFailed, Timeout
//!   Ssh     CreateDir, ReadFile, RemoveFile, WriteFile, Permissions, NoHome
//! ```
//!
//! These are plumbing errors. User-facing operations never return them;
//! they fold into an [`Outcome`](crate::outcome::Outcome) instead.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`KgError`].
pub type KgResult<T> = std::result::Result<T, KgError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum KgError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// SSH file management error.
    #[error("ssh error: {0}")]
    Ssh(#[from] Box<SshError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for KgError {
                fn from(err: $error) -> Self {
                    KgError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    SshError => Ssh,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse settings: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Unknown `section.key` in an override.
    #[error("unknown setting '{0}'")]
    UnknownKey(String),

    /// Failed to write configuration file.
    #[error("failed to write settings file '{path}': {message}")]
    WriteError { path: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
///
/// The runner itself never returns these; they describe the sentinel
/// results for logs and for the `Display` of a failed [`CommandResult`].
///
/// [`CommandResult`]: crate::core::process::builder::CommandResult
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- SSH Errors ---

/// SSH key and client-config file errors.
#[derive(Debug, Error)]
pub enum SshError {
    /// Could not create the key or config directory.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not read a file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not remove a file.
    #[error("failed to remove {path}: {source}")]
    RemoveFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not write a file.
    #[error("failed to write {path}: {message}")]
    WriteFile { path: String, message: String },

    /// Could not restrict file permissions.
    #[error("failed to set permissions on {path}: {source}")]
    Permissions {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Home directory could not be determined.
    #[error("home directory is not available")]
    NoHome,
}

#[cfg(test)]
mod tests;
