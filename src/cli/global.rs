// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← settings file (default <config dir>/kicad-git/settings.toml)
//! --set KEY=VALUE     ← direct override (can repeat)
//! --log-level N       ← console verbosity (0-5)
//! --file-log-level N  ← file verbosity
//! --log-file FILE     ← log file (default ~/.kicad_git_plugin.log)
//! --json              ← machine-readable output
//!
//! Precedence: --set > KIGIT_* env > settings file > defaults
//! ```

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Args;

use crate::config::loader::SettingsLoader;
use crate::config::paths::default_settings_file;
use crate::config::{ENV_PREFIX, Settings};
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Settings file to read (and write with `config set`).
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "KICAD_GIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides a setting, such as 'server.port=2222'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// File log level (default 4).
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Prints results as JSON lines.
    #[arg(long)]
    pub json: bool,
}

impl GlobalOptions {
    /// Settings file in effect, `None` when no config directory exists.
    #[must_use]
    pub fn settings_file(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_settings_file)
    }

    /// `--set` values split into `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error for an entry without `=`.
    pub fn overrides(&self) -> Result<Vec<(String, String)>> {
        self.options
            .iter()
            .map(|option| {
                option
                    .split_once('=')
                    .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                    .ok_or_else(|| anyhow!("invalid --set '{option}', expected KEY=VALUE"))
            })
            .collect()
    }

    /// Loader for settings file, environment and `--set` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed or unknown `--set` key.
    pub fn settings_loader(&self) -> Result<SettingsLoader> {
        let mut loader = Settings::builder();
        if let Some(path) = self.settings_file() {
            loader = loader.add_toml_file_optional(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);
        for (key, value) in self.overrides()? {
            loader = loader
                .set(&key, &value)
                .with_context(|| format!("invalid --set {key}"))?;
        }
        Ok(loader)
    }

    /// Loads and validates the effective settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value is out of range.
    pub fn load_settings(&self) -> Result<Settings> {
        let settings = self.settings_loader()?.build()?;
        settings.validate()?;
        Ok(settings)
    }
}
