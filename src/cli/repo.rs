// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.
//!
//! # Subcommands
//!
//! ```text
//! commit -m MESSAGE
//!   → git add . && git commit -m MESSAGE
//! remote show
//!   → origin URL (credentials hidden) and transport
//! remote apply-credentials | remove-credentials
//!   → embed/strip username:token in the HTTPS origin URL
//! plugin-info [DIR]
//!   → descriptor for the plugin installed in DIR
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long, value_name = "MESSAGE")]
    pub message: String,
}

/// Arguments for the `remote` command.
#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    /// Remote subcommand.
    #[command(subcommand)]
    pub subcommand: RemoteSubcommand,
}

/// Remote subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum RemoteSubcommand {
    /// Shows the origin URL and its transport.
    Show,

    /// Embeds the configured username and token into the HTTPS origin URL.
    #[command(name = "apply-credentials")]
    ApplyCredentials,

    /// Strips embedded credentials from the origin URL.
    #[command(name = "remove-credentials")]
    RemoveCredentials,
}

/// Arguments for the `plugin-info` command.
#[derive(Debug, Clone, Args)]
pub struct PluginInfoArgs {
    /// Plugin install directory (default: directory of the executable).
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,
}
