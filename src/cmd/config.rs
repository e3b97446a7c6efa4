// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for kicad-git.

use std::path::Path;

use anyhow::anyhow;

use crate::cli::config::{ConfigArgs, ConfigSubcommand};
use crate::cli::global::GlobalOptions;
use crate::config::Settings;
use crate::error::Result;

/// Main handler for the `config` command.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or saved.
pub fn run_config_command(args: &ConfigArgs, global: &GlobalOptions) -> Result<()> {
    match &args.subcommand {
        ConfigSubcommand::Show => {
            let settings = global.settings_loader()?.build()?;
            run_options_command(&settings);
            Ok(())
        }
        ConfigSubcommand::Set { key, value } => {
            let path = settings_path(global)?;
            set_and_save(&path, key, value)?;
            println!("Saved {key} to {}", path.display());
            Ok(())
        }
        ConfigSubcommand::Path => {
            println!("{}", settings_path(global)?.display());
            Ok(())
        }
        ConfigSubcommand::Files => {
            run_files_command(&global.settings_loader()?.format_loaded_files());
            Ok(())
        }
    }
}

/// Display current settings.
pub fn run_options_command(settings: &Settings) {
    for line in settings.format_options() {
        println!("{line}");
    }
}

/// Display loaded settings files.
pub fn run_files_command(files: &[String]) {
    if files.is_empty() {
        println!("No settings files loaded");
    } else {
        for line in files {
            println!("{line}");
        }
    }
}

fn settings_path(global: &GlobalOptions) -> Result<std::path::PathBuf> {
    global
        .settings_file()
        .ok_or_else(|| anyhow!("no user config directory; pass --config FILE"))
}

/// Loads the file at `path` (defaults if absent), sets one key and saves.
///
/// Environment and `--set` overrides are not written back.
///
/// # Errors
///
/// Returns an error for an unknown key, a bad value or a failed write.
pub fn set_and_save(path: &Path, key: &str, value: &str) -> Result<Settings> {
    let mut settings = Settings::builder().add_toml_file_optional(path).build()?;
    settings.set(key, value)?;
    settings.save(path)?;
    Ok(settings)
}
