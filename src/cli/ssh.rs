// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSH command arguments.
//!
//! ```text
//! ssh key-status               key and .pub paths, existence
//! ssh generate [-p PASS]       ssh-keygen -t ed25519 (refuses an existing key)
//! ssh generate --force         replaces both halves of an existing pair
//! ssh public-key               prints the .pub contents
//! ssh test                     ssh -T user@host -p port
//! ssh update-config [--file]   upserts the kicad-forgejo Host block
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the `ssh` command.
#[derive(Debug, Clone, Args)]
pub struct SshArgs {
    /// SSH subcommand.
    #[command(subcommand)]
    pub subcommand: SshSubcommand,
}

/// SSH subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SshSubcommand {
    /// Shows whether the configured key pair exists.
    #[command(name = "key-status")]
    KeyStatus,

    /// Generates an ed25519 key pair at the configured path.
    Generate(GenerateArgs),

    /// Prints the public key.
    #[command(name = "public-key")]
    PublicKey,

    /// Tests the SSH connection to the configured server.
    Test,

    /// Writes the server's Host block into the SSH client config.
    #[command(name = "update-config")]
    UpdateConfig(UpdateConfigArgs),
}

/// Arguments for `ssh generate`.
#[derive(Clone, Args)]
pub struct GenerateArgs {
    /// Key passphrase (empty for none).
    #[arg(short = 'p', long, value_name = "PASSPHRASE", env = "KICAD_GIT_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Replace an existing key pair.
    #[arg(long)]
    pub force: bool,
}

impl std::fmt::Debug for GenerateArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateArgs")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[hidden]"))
            .field("force", &self.force)
            .finish()
    }
}

/// Arguments for `ssh update-config`.
#[derive(Debug, Clone, Args)]
pub struct UpdateConfigArgs {
    /// Client config to edit (default ~/.ssh/config).
    #[arg(long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,
}
