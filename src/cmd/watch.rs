// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Standalone session and host descriptor commands.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::repo::PluginInfoArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::plugin;
use crate::session::ConsolePresenter;

/// Shows status, then fetches every `fetch.interval_sec` until Ctrl-C.
///
/// Failed fetches are reported by the presenter; the next tick tries again.
pub async fn run_watch_command(settings: Settings, json: bool) {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received"),
            Err(err) => warn!(error = %err, "cannot listen for Ctrl-C"),
        }
        trigger.cancel();
    });

    let mut presenter = ConsolePresenter::stdout(json);
    let runs = plugin::run_standalone(settings, &mut presenter, cancel).await;
    info!(runs, "watch finished");
}

/// Prints the host registration descriptor as JSON.
///
/// # Errors
///
/// Returns an error if the executable path is unknown or serialization fails.
pub fn run_plugin_info_command(args: &PluginInfoArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_exe()?
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf),
    };
    let descriptor = plugin::descriptor(&dir);
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}
