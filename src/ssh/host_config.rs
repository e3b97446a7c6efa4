// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Marked host block in the SSH client configuration.
//!
//! ```text
//! # KiCad Git Integration Plugin      <- marker
//! Host kicad-forgejo
//!     HostName <host>
//!     Port <port>
//!     User <user>
//!     IdentityFile <key path as configured>
//!     IdentitiesOnly yes
//!                                     <- block ends at a blank line,
//! Host other                          <- the next Host/Match entry, or EOF
//! ```

use std::io::Write as _;
use std::path::Path;

use tracing::info;

use super::SshService;
use super::keys::create_private_dir;
use crate::config::Settings;
use crate::error::SshError;
use crate::outcome::{FailureKind, Outcome};

/// Comment line that owns the plugin's host block.
pub const MARKER: &str = "# KiCad Git Integration Plugin";

/// Host alias the block defines.
pub const HOST_ALIAS: &str = "kicad-forgejo";

/// Renders the plugin's host block, newline-terminated.
#[must_use]
pub fn render_block(settings: &Settings) -> String {
    format!(
        "{MARKER}\nHost {HOST_ALIAS}\n    HostName {}\n    Port {}\n    User {}\n    IdentityFile {}\n    IdentitiesOnly yes\n",
        settings.server.host.trim(),
        settings.server.port,
        settings.server.user,
        settings.ssh.key_path,
    )
}

fn starts_entry(line: &str) -> bool {
    let lower = line.trim_start().to_ascii_lowercase();
    lower.starts_with("host ") || lower.starts_with("match ")
}

/// Removes every marked block, keeping the rest of the file.
#[must_use]
pub fn remove_block(existing: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut lines = existing.lines().peekable();
    while let Some(line) = lines.next() {
        if line.trim() != MARKER {
            kept.push(line);
            continue;
        }
        while kept.last().is_some_and(|l| l.trim().is_empty()) {
            kept.pop();
        }
        if lines.peek().is_some_and(|l| starts_entry(l)) {
            lines.next();
        }
        while lines
            .peek()
            .is_some_and(|l| !l.trim().is_empty() && !starts_entry(l))
        {
            lines.next();
        }
    }
    kept.join("\n")
}

/// Replaces any marked block in `existing` with `block`, appended at the end.
#[must_use]
pub fn upsert_block(existing: &str, block: &str) -> String {
    let kept = remove_block(existing);
    let kept = kept.trim_matches(|c: char| c == '\n' || c == '\r');
    if kept.trim().is_empty() {
        block.to_string()
    } else {
        format!("{kept}\n\n{block}")
    }
}

/// Writes `content` to `path`, readable and writable by the owner only.
///
/// A new file is created with mode 0600. An existing file is narrowed to
/// 0600 before its contents are replaced.
///
/// # Errors
///
/// Returns an `SshError` if the file cannot be written or its permissions set.
pub fn write_private_file(path: &Path, content: &str) -> Result<(), SshError> {
    let write_error = |e: std::io::Error| SshError::WriteFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|source| SshError::Permissions {
                path: path.display().to_string(),
                source,
            })?;
    }
    file.set_len(0).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    file.sync_all().map_err(write_error)
}

impl SshService {
    /// Upserts the plugin's host block into the SSH client configuration.
    pub fn update_ssh_config(&self) -> Outcome {
        if self.settings.server.host.trim().is_empty() {
            return Outcome::fail(
                FailureKind::NotConfigured,
                "Server host is not set in settings.",
            );
        }
        match self.write_host_block() {
            Ok(path) => {
                info!(path = %path.display(), "ssh config updated");
                Outcome::ok(format!("SSH config updated: {}", path.display()))
            }
            Err(err) => Outcome::fail(FailureKind::Generic, err.to_string()),
        }
    }

    fn write_host_block(&self) -> Result<std::path::PathBuf, SshError> {
        let path = self.config_file().ok_or(SshError::NoHome)?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir)?;
        }
        let existing = if path.is_file() {
            std::fs::read_to_string(&path).map_err(|source| SshError::ReadFile {
                path: path.display().to_string(),
                source,
            })?
        } else {
            String::new()
        };
        let content = upsert_block(&existing, &render_block(&self.settings));
        write_private_file(&path, &content)?;
        Ok(path)
    }
}
