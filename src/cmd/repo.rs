// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command implementations.

use std::io::Write;

use super::run_action;
use crate::cli::repo::{RemoteArgs, RemoteSubcommand};
use crate::config::Settings;
use crate::error::Result;
use crate::git::{RemoteType, Repository};
use crate::logging::redact;
use crate::session::{Action, ConsolePresenter, Session};

/// Runs a repository action against the git CLI and prints its events.
///
/// # Errors
///
/// Returns `ActionFailed` if the outcome is a failure.
pub async fn run_repo_command(action: Action, settings: Settings, json: bool) -> Result<()> {
    let (session, events) = Session::with_shell(settings);
    let mut presenter = ConsolePresenter::stdout(json);
    run_action(session, events, action, &mut presenter).await
}

/// Main handler for the `remote` command.
///
/// # Errors
///
/// Returns an error if the repository is missing or the action fails.
pub async fn run_remote_command(args: &RemoteArgs, settings: Settings, json: bool) -> Result<()> {
    match args.subcommand {
        RemoteSubcommand::Show => {
            let repo = Repository::with_shell(settings);
            show_remote(&repo, &mut std::io::stdout(), json).await
        }
        RemoteSubcommand::ApplyCredentials => {
            run_repo_command(Action::ApplyCredentials, settings, json).await
        }
        RemoteSubcommand::RemoveCredentials => {
            run_repo_command(Action::RemoveCredentials, settings, json).await
        }
    }
}

/// Writes the origin URL, credentials hidden, and its transport.
///
/// # Errors
///
/// Returns an error when there is no repository or `out` cannot be written.
pub async fn show_remote(repo: &Repository, out: &mut impl Write, json: bool) -> Result<()> {
    if let Some(refused) = repo.refusal() {
        anyhow::bail!("{}", refused.summary());
    }
    let url = repo.remote_url().await;
    let kind = RemoteType::classify(url.as_deref());
    let shown = url.as_deref().map(|u| redact(u).into_owned());

    if json {
        let value = serde_json::json!({ "url": shown, "type": kind });
        writeln!(out, "{value}")?;
    } else {
        writeln!(out, "origin  {}", shown.as_deref().unwrap_or("(none)"))?;
        writeln!(out, "type    {kind}")?;
    }
    Ok(())
}
