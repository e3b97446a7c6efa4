// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSH key, connection and client-config operations.
//!
//! ```text
//! SshService (settings snapshot)
//!   keys.rs         key_exists, public_key, generate_key   ssh-keygen -t ed25519
//!   probe.rs        test_connection                        ssh -T user@host -p port
//!   host_config.rs  update_ssh_config                      marked Host block upsert
//! ```

pub mod host_config;
pub mod keys;
pub mod probe;


use std::path::PathBuf;

use serde::Serialize;

use crate::config::Settings;
use crate::config::paths::{default_ssh_config_file, public_key_path};
use crate::outcome::Outcome;

/// Outcome of key generation plus the new public key on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyOutcome {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl KeyOutcome {
    pub(crate) const fn failed(outcome: Outcome) -> Self {
        Self {
            outcome,
            public_key: None,
        }
    }
}

/// SSH operations for the configured server and identity.
#[derive(Debug, Clone)]
pub struct SshService {
    settings: Settings,
    config_file: Option<PathBuf>,
    ssh_program: PathBuf,
    keygen_program: PathBuf,
}

impl SshService {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            config_file: None,
            ssh_program: PathBuf::from("ssh"),
            keygen_program: PathBuf::from("ssh-keygen"),
        }
    }

    /// Writes the host block into `path` instead of `~/.ssh/config`.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Uses specific `ssh` and `ssh-keygen` executables.
    #[must_use]
    pub fn with_programs(mut self, ssh: impl Into<PathBuf>, keygen: impl Into<PathBuf>) -> Self {
        self.ssh_program = ssh.into();
        self.keygen_program = keygen.into();
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Expanded private key path.
    #[must_use]
    pub fn key_path(&self) -> PathBuf {
        self.settings.ssh_key_path()
    }

    /// Sibling `.pub` path.
    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        public_key_path(&self.key_path())
    }

    /// Client config file the host block goes into.
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config_file.clone().or_else(default_ssh_config_file)
    }
}
