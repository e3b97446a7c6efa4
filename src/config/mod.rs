// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent plugin settings.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. settings.toml (<config_dir>/kicad-git or --config)
//! 3. KIGIT_* env vars
//! 4. --set overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! KIGIT_SERVER__HOST=git.example.org   → server.host
//! KIGIT_FETCH__INTERVAL_SEC=600        → fetch.interval_sec
//! KIGIT_REPOSITORY__PATH=~/kicad-libs  → repository.path
//! ```
//!
//! Readers get a consistent snapshot; a save replaces the file atomically.

pub mod loader;
pub mod paths;
pub mod types;


use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, KgResult};

use loader::SettingsLoader;
use types::{
    CredentialsConfig, FetchConfig, MAX_FETCH_TIMEOUT_SECS, MIN_FETCH_INTERVAL_SECS,
    RepositoryConfig, Secret,
    ServerConfig, SshConfig,
};

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "KIGIT";

/// Complete plugin settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub server: ServerConfig,
    pub repository: RepositoryConfig,
    pub ssh: SshConfig,
    pub credentials: CredentialsConfig,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Every settable `section.key`.
    pub const KEYS: &'static [&'static str] = &[
        "server.host",
        "server.port",
        "server.user",
        "repository.path",
        "ssh.key_path",
        "credentials.username",
        "credentials.token",
        "fetch.interval_sec",
        "fetch.timeout_sec",
    ];

    /// Creates a new settings loader.
    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Loads settings from a file (missing file = defaults) plus the
    /// `KIGIT_*` environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid settings TOML.
    pub fn load(path: &Path) -> KgResult<Self> {
        Self::builder()
            .add_toml_file_optional(path)
            .with_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or has unknown keys.
    pub fn parse(content: &str) -> KgResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Absolute, `~`-expanded repository path; `None` when unset.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        let raw = self.repository.path.trim();
        (!raw.is_empty()).then(|| paths::absolutize(raw))
    }

    /// `~`-expanded private key path.
    #[must_use]
    pub fn ssh_key_path(&self) -> PathBuf {
        paths::expand_home(self.ssh.key_path.trim())
    }

    /// Network read timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_sec)
    }

    /// Background fetch period.
    #[must_use]
    pub const fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch.interval_sec)
    }

    /// True once a repository path is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.repository.path.trim().is_empty()
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first field out of range.
    pub fn validate(&self) -> KgResult<()> {
        let invalid = |section: &str, key: &str, message: String| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message,
        };
        if !(1..=65535).contains(&self.server.port) {
            return Err(invalid(
                "server",
                "port",
                format!("{} is not in 1-65535", self.server.port),
            )
            .into());
        }
        if self.fetch.interval_sec < MIN_FETCH_INTERVAL_SECS {
            return Err(invalid(
                "fetch",
                "interval_sec",
                format!(
                    "{} is below the minimum of {MIN_FETCH_INTERVAL_SECS}",
                    self.fetch.interval_sec
                ),
            )
            .into());
        }
        if self.fetch.timeout_sec == 0 {
            return Err(invalid("fetch", "timeout_sec", "must be at least 1".to_string()).into());
        }
        if self.fetch.timeout_sec > MAX_FETCH_TIMEOUT_SECS {
            return Err(invalid(
                "fetch",
                "timeout_sec",
                format!(
                    "{} is above the maximum of {MAX_FETCH_TIMEOUT_SECS}",
                    self.fetch.timeout_sec
                ),
            )
            .into());
        }
        Ok(())
    }

    /// Sets one `section.key` from its string form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for an unknown key and
    /// `ConfigError::InvalidValue` when a number does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> KgResult<()> {
        fn number<T: std::str::FromStr>(key: &str, value: &str) -> KgResult<T> {
            let (section, field) = key.split_once('.').unwrap_or(("", key));
            value.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: field.to_string(),
                    message: format!("'{value}' is not a number"),
                }
                .into()
            })
        }

        match key {
            "server.host" => self.server.host = value.to_string(),
            "server.port" => self.server.port = number(key, value)?,
            "server.user" => self.server.user = value.to_string(),
            "repository.path" => self.repository.path = value.to_string(),
            "ssh.key_path" => self.ssh.key_path = value.to_string(),
            "credentials.username" => self.credentials.username = value.to_string(),
            "credentials.token" => self.credentials.token = Secret::new(value),
            "fetch.interval_sec" => self.fetch.interval_sec = number(key, value)?,
            "fetch.timeout_sec" => self.fetch.timeout_sec = number(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }

    /// Validates and writes the settings as TOML.
    ///
    /// The file is written to a temporary sibling and renamed into place,
    /// so readers never see a partial file. On Unix the file is owner-only.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> KgResult<()> {
        self.validate()?;
        let write_error = |message: String| ConfigError::WriteError {
            path: path.display().to_string(),
            message,
        };

        let content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| write_error(e.to_string()))?;
        tmp.persist(path)
            .map_err(|e| write_error(e.error.to_string()))?;

        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Format settings for display, token hidden, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("server.host", self.server.host.clone());
        options.insert("server.port", self.server.port.to_string());
        options.insert("server.user", self.server.user.clone());
        options.insert("repository.path", self.repository.path.clone());
        options.insert("ssh.key_path", self.ssh.key_path.clone());
        options.insert("credentials.username", self.credentials.username.clone());
        if !self.credentials.token.is_empty() {
            options.insert("credentials.token", "[hidden]".to_string());
        }
        options.insert("fetch.interval_sec", self.fetch.interval_sec.to_string());
        options.insert("fetch.timeout_sec", self.fetch.timeout_sec.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
