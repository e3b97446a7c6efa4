// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.

use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config subcommand.
    #[command(subcommand)]
    pub subcommand: ConfigSubcommand,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigSubcommand {
    /// Lists all settings and their effective values.
    Show,

    /// Sets one setting and saves the settings file.
    Set {
        /// Setting name, such as 'server.host'.
        #[arg(value_name = "KEY")]
        key: String,

        /// New value.
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Prints the settings file path.
    Path,

    /// Lists the settings files that were loaded.
    Files,
}
