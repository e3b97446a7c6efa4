// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! SettingsLoader::new()          (serde defaults)
//!   .add_toml_file_optional()    missing file tolerated
//!   .add_toml_str()
//!   .with_env_prefix("KIGIT")    KIGIT_SERVER__HOST=...
//!   .set("server.port", "2222")
//!        |
//!        v
//!    build() --> Settings
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::Settings;
use crate::error::{ConfigError, KgResult};

/// Builder for loading settings from multiple sources.
pub struct SettingsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            info!(path = %p.display(), "loading settings");
            self.files.push(("optional".to_string(), p.to_path_buf()));
        } else {
            info!(path = %p.display(), "settings file not found, using defaults");
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a `section.key` override.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::UnknownKey` if the key is not a known setting.
    pub fn set(mut self, key: &str, value: &str) -> KgResult<Self> {
        if !Settings::KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()).into());
        }
        self.builder = self.builder.set_override(key, value).map_err(|e| {
            ConfigError::ParseError {
                message: e.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Builds the settings from all added sources.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required file is missing, a file has
    /// invalid TOML, or the merged values do not fit the `Settings` types.
    pub fn build(self) -> KgResult<Settings> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let parse_error = |e: config::ConfigError| ConfigError::ParseError {
            message: e.to_string(),
        };
        let cfg = builder.build().map_err(parse_error)?;
        let settings: Settings = cfg.try_deserialize().map_err(parse_error)?;
        debug!(configured = settings.is_configured(), "settings loaded");
        Ok(settings)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
