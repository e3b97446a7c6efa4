// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for kicad-git using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! kicad-git [global options] <command>
//! status | fetch | pull | commit -m MSG | push | sync
//! remote {show|apply-credentials|remove-credentials}
//! ssh {key-status|generate|public-key|test|update-config}
//! config {show|set|path|files}
//! watch
//! plugin-info [DIR]
//! version
//! ```

pub mod config;
pub mod global;
pub mod repo;
pub mod ssh;


use clap::{Parser, Subcommand};

use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::repo::{CommitArgs, PluginInfoArgs, RemoteArgs};
use crate::cli::ssh::SshArgs;

/// Git integration for KiCad libraries.
#[derive(Debug, Parser)]
#[command(
    name = "kicad-git",
    author,
    version,
    about = "Git and SSH integration for KiCad libraries",
    long_about = "kicad-git Copyright (C) 2026 KiCad Git Integration Contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a KiCad library repository in sync with its git server.\n\
                  Run `kicad-git status` for an overview, `kicad-git watch` to\n\
                  fetch in the background. See `kicad-git <command> --help`.",
    after_help = "SETTINGS:\n\n\
                  Settings are read from <config dir>/kicad-git/settings.toml, or\n\
                  from the file given with --config. KIGIT_SECTION__KEY environment\n\
                  variables override the file, and --set section.key=value overrides\n\
                  both. `kicad-git config set` writes the settings file."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Shows branch, changes and ahead/behind counts.
    Status,

    /// Fetches all remotes.
    Fetch,

    /// Fast-forwards the branch; refused over local edits.
    Pull,

    /// Stages everything and commits.
    Commit(CommitArgs),

    /// Pushes the branch; refused while behind upstream.
    Push,

    /// Fetches, then reports ahead/behind counts.
    Sync,

    /// Inspects the origin remote and manages HTTPS credentials.
    Remote(RemoteArgs),

    /// Manages the SSH key, connection and client config.
    Ssh(SshArgs),

    /// Shows or edits settings.
    Config(ConfigArgs),

    /// Fetches periodically until interrupted.
    Watch,

    /// Prints the host registration descriptor.
    #[command(name = "plugin-info")]
    PluginInfo(PluginInfoArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
