// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host registration data and the standalone entry point.
//!
//! ```text
//! KiCad host  --> descriptor(plugin_dir)   name, category, toolbar icon
//! binary      --> run_standalone()         status, then auto fetch until cancelled
//! ```


use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Settings;
use crate::session::{Action, AutoFetch, Event, Presenter, Session, drain};

pub const PLUGIN_NAME: &str = "Git Integration for KiCad Libraries";
pub const PLUGIN_CATEGORY: &str = "Version Control";
pub const PLUGIN_DESCRIPTION: &str =
    "Git integration for KiCad libraries: pull, commit, push, SSH setup and automatic fetch.";
pub const ICON_FILE: &str = "icon.png";

/// What the host needs to list the plugin as an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub show_toolbar_button: bool,
    /// Toolbar icon; `None` when `icon.png` is missing from the plugin dir.
    pub icon_file: Option<PathBuf>,
}

/// Descriptor for a plugin installed in `plugin_dir`.
#[must_use]
pub fn descriptor(plugin_dir: &Path) -> PluginDescriptor {
    let icon = plugin_dir.join(ICON_FILE);
    PluginDescriptor {
        name: PLUGIN_NAME,
        category: PLUGIN_CATEGORY,
        description: PLUGIN_DESCRIPTION,
        show_toolbar_button: true,
        icon_file: icon.is_file().then_some(icon),
    }
}

/// Runs the plugin outside the host: one status refresh, then periodic
/// fetches until `cancel` fires. Returns the number of background syncs.
pub async fn run_standalone<P: Presenter + ?Sized>(
    settings: Settings,
    presenter: &mut P,
    cancel: CancellationToken,
) -> u64 {
    let (session, events) = Session::with_shell(settings);
    run_session(session, events, presenter, cancel).await
}

pub(crate) async fn run_session<P: Presenter + ?Sized>(
    session: Session,
    events: flume::Receiver<Event>,
    presenter: &mut P,
    cancel: CancellationToken,
) -> u64 {
    info!("plugin launched");
    let initial = session.dispatch(Action::Status);
    let timer = tokio::spawn(AutoFetch::new(session, cancel).run());

    drain(events, presenter).await;

    if let Err(err) = initial.await {
        warn!(error = %err, "initial status task failed");
    }
    match timer.await {
        Ok(runs) => runs,
        Err(err) => {
            warn!(error = %err, "auto fetch task failed");
            0
        }
    }
}
