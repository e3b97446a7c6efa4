// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   repo (status, fetch, pull, commit, push, sync, remote)
//!   ssh, config, watch, plugin-info
//! ```
//!
//! A failed outcome has already been shown by the presenter when it comes
//! back as [`ActionFailed`]; callers only turn it into the exit code.

pub mod config;
pub mod repo;
pub mod ssh;
pub mod watch;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::error::Result;
use crate::outcome::Outcome;
use crate::session::{Action, Event, Presenter, Session, drain};

/// An action finished with a failure outcome.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ActionFailed(pub String);

/// `Ok` for a successful outcome, [`ActionFailed`] otherwise.
///
/// # Errors
///
/// Returns `ActionFailed` carrying the outcome summary.
pub fn check(outcome: &Outcome) -> Result<()> {
    if outcome.success() {
        Ok(())
    } else {
        Err(ActionFailed(outcome.summary()).into())
    }
}

/// Runs one action on `session` and presents every event it produced.
///
/// # Errors
///
/// Returns `ActionFailed` if the action's outcome is a failure.
pub async fn run_action<P: Presenter + ?Sized>(
    session: Session,
    events: flume::Receiver<Event>,
    action: Action,
    presenter: &mut P,
) -> Result<()> {
    let outcome = session.run(action).await;
    drop(session);
    drain(events, presenter).await;
    check(&outcome)
}
