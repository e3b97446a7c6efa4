// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key pair management.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use super::{KeyOutcome, SshService};
use crate::core::process::builder::ProcessBuilder;
use crate::error::SshError;
use crate::outcome::{FailureKind, Outcome};

/// Comment embedded in generated public keys.
pub const KEY_COMMENT: &str = "kicad-git-plugin";

const KEYGEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Deletes `path` if present.
///
/// # Errors
///
/// Returns `SshError::RemoveFile` if an existing file cannot be removed.
fn remove_if_present(path: &Path) -> Result<(), SshError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SshError::RemoveFile {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Creates `dir` (and parents) readable by the owner only.
///
/// # Errors
///
/// Returns `SshError::CreateDir` if the directory cannot be created.
pub fn create_private_dir(dir: &Path) -> Result<(), SshError> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(0o700);
    }
    builder.create(dir).map_err(|source| SshError::CreateDir {
        path: dir.display().to_string(),
        source,
    })
}

impl SshService {
    /// True if the private key file exists.
    #[must_use]
    pub fn key_exists(&self) -> bool {
        self.key_path().is_file()
    }

    /// Contents of the `.pub` file, `None` on any I/O failure.
    #[must_use]
    pub fn public_key(&self) -> Option<String> {
        let path = self.public_key_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text.trim().to_string()).filter(|key| !key.is_empty()),
            Err(source) => {
                if path.exists() {
                    let err = SshError::ReadFile {
                        path: path.display().to_string(),
                        source,
                    };
                    warn!(error = %err, "cannot read public key");
                }
                None
            }
        }
    }

    /// Generates an ed25519 key pair at the configured path.
    ///
    /// An existing key is refused unless `overwrite` is set, in which case
    /// both halves of the old pair are removed first.
    pub async fn generate_key(&self, passphrase: &str, overwrite: bool) -> KeyOutcome {
        let key_path = self.key_path();
        if key_path.exists() {
            if !overwrite {
                return KeyOutcome::failed(Outcome::fail(
                    FailureKind::Validation,
                    format!(
                        "A key already exists at {}. Use --force to replace it.",
                        key_path.display()
                    ),
                ));
            }
            if let Err(err) = remove_if_present(&key_path)
                .and_then(|()| remove_if_present(&self.public_key_path()))
            {
                return KeyOutcome::failed(Outcome::fail(FailureKind::Generic, err.to_string()));
            }
            warn!(path = %key_path.display(), "existing ssh key removed for regeneration");
        }
        if let Some(dir) = key_path.parent().filter(|d| !d.as_os_str().is_empty())
            && let Err(err) = create_private_dir(dir)
        {
            return KeyOutcome::failed(Outcome::fail(FailureKind::Generic, err.to_string()));
        }

        let result = ProcessBuilder::new(&self.keygen_program)
            .name("ssh-keygen")
            .args(["-t", "ed25519", "-f"])
            .arg(&key_path)
            .args(["-N", passphrase, "-C", KEY_COMMENT])
            .secret(passphrase)
            .timeout(KEYGEN_TIMEOUT)
            .timeout_message("ssh-keygen timed out.")
            .run()
            .await;

        if result.is_not_found() {
            return KeyOutcome::failed(Outcome::fail(
                FailureKind::ToolMissing,
                "ssh-keygen not found. Install OpenSSH.",
            ));
        }
        if result.is_timed_out() {
            return KeyOutcome::failed(Outcome::fail(FailureKind::Timeout, result.error_text()));
        }
        if !result.success() {
            let detail = match result.stderr_trimmed() {
                "" => "unknown error",
                text => text,
            };
            return KeyOutcome::failed(Outcome::fail(
                FailureKind::Generic,
                format!("ssh-keygen failed: {detail}"),
            ));
        }

        match self.public_key() {
            Some(public_key) => {
                info!(path = %key_path.display(), "ssh key generated");
                KeyOutcome {
                    outcome: Outcome::ok(format!("Key created: {}", key_path.display())),
                    public_key: Some(public_key),
                }
            }
            None => KeyOutcome::failed(Outcome::fail(
                FailureKind::Generic,
                "Key created, but the .pub file could not be read.",
            )),
        }
    }
}
