// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Non-interactive connection probe.
//!
//! ```text
//! ssh -T -i KEY -o StrictHostKeyChecking=accept-new -o BatchMode=yes
//!     -o ConnectTimeout=T -p PORT USER@HOST          (process budget T + 5 s)
//!
//! exit 0 or banner ("welcome", "successfully")  -> success
//! "permission denied"                           -> PermissionDenied
//! DNS failure                                   -> Connectivity (host)
//! "connection refused"                          -> Connectivity (host:port)
//! otherwise                                     -> Generic (output)
//! ```
//!
//! Git hosts reject shell sessions with exit code 1 but still greet the
//! user, so the banner wins over the exit code.

use std::time::Duration;

use tracing::{debug, info};

use super::SshService;
use crate::core::process::builder::{CommandResult, ProcessBuilder};
use crate::outcome::patterns::{
    self, CONNECTION_REFUSED, HOST_UNRESOLVABLE, SSH_BANNER, contains_any,
};
use crate::outcome::{FailureKind, Outcome};

/// Extra process budget on top of the SSH connect timeout.
const PROBE_GRACE: Duration = Duration::from_secs(5);

impl SshService {
    /// Opens `ssh -T` to the configured server and classifies the answer.
    pub async fn test_connection(&self) -> Outcome {
        let server = &self.settings.server;
        let host = server.host.trim();
        if host.is_empty() {
            return Outcome::fail(
                FailureKind::NotConfigured,
                "Server host is not set in settings.",
            );
        }
        let connect = self.settings.fetch.timeout_sec;

        let builder = ProcessBuilder::new(&self.ssh_program)
            .name("ssh")
            .arg("-T")
            .arg("-i")
            .arg(self.key_path())
            .args(["-o", "StrictHostKeyChecking=accept-new"])
            .args(["-o", "BatchMode=yes"])
            .arg("-o")
            .arg(format!("ConnectTimeout={connect}"))
            .arg("-p")
            .arg(server.port.to_string())
            .arg(format!("{}@{host}", server.user))
            .timeout(Duration::from_secs(connect).saturating_add(PROBE_GRACE))
            .timeout_message(format!("Server unreachable (timed out after {connect} s)."));
        debug!(cmd = %builder.command_line(), "ssh probe");

        let result = builder.run().await;
        let outcome = classify_probe(&result, host, server.port);
        info!(success = outcome.success(), "ssh probe finished");
        outcome
    }
}

/// Maps an `ssh -T` result to an outcome.
#[must_use]
pub fn classify_probe(result: &CommandResult, host: &str, port: u32) -> Outcome {
    if result.is_not_found() {
        return Outcome::fail(FailureKind::ToolMissing, "ssh not found. Install OpenSSH.");
    }
    if result.is_timed_out() {
        return Outcome::fail(FailureKind::Timeout, result.error_text());
    }

    let output = format!("{}\n{}", result.stdout(), result.stderr());
    let output = output.trim();
    let haystack = patterns::combined(result.stdout(), result.stderr());

    if result.success() || contains_any(&haystack, SSH_BANNER) {
        return Outcome::ok(if output.is_empty() {
            "Connection established."
        } else {
            output
        });
    }
    if contains_any(&haystack, patterns::phrases_for(FailureKind::PermissionDenied)) {
        return Outcome::fail(
            FailureKind::PermissionDenied,
            "Access denied. Check that the public key is added on the server.",
        );
    }
    if contains_any(&haystack, HOST_UNRESOLVABLE) {
        return Outcome::fail(
            FailureKind::Connectivity,
            format!("Could not resolve host name: {host}"),
        );
    }
    if contains_any(&haystack, CONNECTION_REFUSED) {
        return Outcome::fail(
            FailureKind::Connectivity,
            format!("Connection refused ({host}:{port})."),
        );
    }
    if output.is_empty() {
        return Outcome::fail(
            FailureKind::Generic,
            format!("SSH connection failed (exit code {}).", result.exit_code()),
        );
    }
    Outcome::fail(FailureKind::Generic, output)
}
