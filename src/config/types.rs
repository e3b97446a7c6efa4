// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings section types.
//!
//! ```text
//! [server]       host, port (1-65535), user
//! [repository]   path
//! [ssh]          key_path
//! [credentials]  username, token (Secret)
//! [fetch]        interval_sec (>= 10), timeout_sec (1-3600)
//! ```

use serde::{Deserialize, Serialize};

/// Default SSH identity used for the plugin's host.
pub const DEFAULT_KEY_PATH: &str = "~/.ssh/kicad_forgejo_ed25519";

/// Shortest allowed background fetch interval.
pub const MIN_FETCH_INTERVAL_SECS: u64 = 10;

/// Longest allowed network read timeout.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 3600;

/// Git server the SSH probe and host block point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Server hostname (empty = not set).
    pub host: String,
    /// SSH port.
    pub port: u32,
    /// SSH login user.
    pub user: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 22,
            user: "git".to_string(),
        }
    }
}

/// Local working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Path to the library checkout (empty = unconfigured).
    pub path: String,
}

/// SSH identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SshConfig {
    /// Private key path, `~` allowed.
    pub key_path: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            key_path: DEFAULT_KEY_PATH.to_string(),
        }
    }
}

/// A string that never shows up in `Debug` output or logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(\"\")")
        } else {
            f.write_str("Secret([hidden])")
        }
    }
}

/// HTTPS credentials embedded into the origin URL on request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsConfig {
    pub username: String,
    pub token: Secret,
}

/// Background fetch cadence and network timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Seconds between background fetches.
    pub interval_sec: u64,
    /// Seconds allowed for network reads (fetch, ls-remote, ssh probe).
    pub timeout_sec: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            interval_sec: 300,
            timeout_sec: 10,
        }
    }
}
