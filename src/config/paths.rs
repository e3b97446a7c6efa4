// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Well-known locations.
//!
//! ```text
//! <config_dir>/kicad-git/settings.toml   settings file
//! ~/.kicad_git_plugin.log                diagnostic log
//! ~/.ssh/config                          SSH client config
//! ```

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
///
/// Returns the input unchanged when there is no `~` prefix or no home.
#[must_use]
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Expands `~` and makes the path absolute against the current directory.
#[must_use]
pub fn absolutize(raw: &str) -> PathBuf {
    let expanded = expand_home(raw);
    std::path::absolute(&expanded).unwrap_or(expanded)
}

/// Default settings file location.
#[must_use]
pub fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kicad-git").join("settings.toml"))
}

/// Default append-only diagnostic log.
#[must_use]
pub fn default_log_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kicad_git_plugin.log"))
}

/// Default SSH client configuration file.
#[must_use]
pub fn default_ssh_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

/// Public key path for a private key (`<key>.pub`).
#[must_use]
pub fn public_key_path(private_key: &Path) -> PathBuf {
    let mut name = private_key.as_os_str().to_owned();
    name.push(".pub");
    PathBuf::from(name)
}
