// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSH command implementation.

use std::io::Write;

use super::run_action;
use crate::cli::ssh::{SshArgs, SshSubcommand};
use crate::config::Settings;
use crate::config::types::Secret;
use crate::error::Result;
use crate::session::{Action, ConsolePresenter, Session};
use crate::ssh::SshService;

/// Main handler for the `ssh` command.
///
/// # Errors
///
/// Returns `ActionFailed` for a failed outcome, or an error for a missing
/// public key.
pub async fn run_ssh_command(args: &SshArgs, settings: Settings, json: bool) -> Result<()> {
    let mut stdout = std::io::stdout();
    match &args.subcommand {
        SshSubcommand::KeyStatus => key_status(&SshService::new(settings), &mut stdout, json),
        SshSubcommand::PublicKey => print_public_key(&SshService::new(settings), &mut stdout),
        SshSubcommand::Generate(generate) => {
            let action = Action::GenerateKey {
                passphrase: Secret::new(generate.passphrase.clone().unwrap_or_default()),
                overwrite: generate.force,
            };
            run_in_session(action, settings, None, json).await
        }
        SshSubcommand::Test => run_in_session(Action::TestConnection, settings, None, json).await,
        SshSubcommand::UpdateConfig(update) => {
            run_in_session(Action::UpdateSshConfig, settings, update.file.clone(), json).await
        }
    }
}

async fn run_in_session(
    action: Action,
    settings: Settings,
    ssh_config_file: Option<std::path::PathBuf>,
    json: bool,
) -> Result<()> {
    let (mut session, events) = Session::with_shell(settings);
    if let Some(path) = ssh_config_file {
        session = session.with_ssh_config_file(path);
    }
    let mut presenter = ConsolePresenter::stdout(json);
    run_action(session, events, action, &mut presenter).await
}

/// Writes the key paths and whether each half of the pair exists.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn key_status(ssh: &SshService, out: &mut impl Write, json: bool) -> Result<()> {
    let key = ssh.key_path();
    let public = ssh.public_key_path();
    let state = |present: bool| if present { "present" } else { "missing" };

    if json {
        let value = serde_json::json!({
            "key_path": key,
            "key_exists": ssh.key_exists(),
            "public_key_path": public,
            "public_key": ssh.public_key(),
        });
        writeln!(out, "{value}")?;
    } else {
        writeln!(out, "private  {} ({})", key.display(), state(ssh.key_exists()))?;
        writeln!(out, "public   {} ({})", public.display(), state(public.is_file()))?;
    }
    Ok(())
}

/// Writes the public key, ready to paste into the git server.
///
/// # Errors
///
/// Returns an error if the `.pub` file cannot be read.
pub fn print_public_key(ssh: &SshService, out: &mut impl Write) -> Result<()> {
    let Some(key) = ssh.public_key() else {
        anyhow::bail!(
            "No public key at {}. Run `kicad-git ssh generate` first.",
            ssh.public_key_path().display()
        );
    };
    writeln!(out, "{key}")?;
    Ok(())
}
