// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Presentation interface and its console implementation.

use std::io::Write;

use super::Event;
use crate::git::RepoStatus;
use crate::outcome::Outcome;

/// Front-end that renders session events.
///
/// A host UI implements this on its main thread; the CLI uses
/// [`ConsolePresenter`].
pub trait Presenter: Send {
    /// Appends a line to the activity log.
    fn log_line(&mut self, line: &str);

    /// Disables or re-enables action controls while an action runs.
    fn set_busy(&mut self, busy: bool);

    /// Refreshes the status display.
    fn show_status(&mut self, status: &RepoStatus);

    /// Reports the outcome of a finished action.
    fn show_outcome(&mut self, action: &str, outcome: &Outcome) {
        let _ = action;
        self.log_line(&outcome.to_string());
    }
}

/// Routes one event to the presenter.
pub fn present<P: Presenter + ?Sized>(event: &Event, presenter: &mut P) {
    match event {
        Event::Started { action } => {
            presenter.set_busy(true);
            presenter.log_line(&format!("{action}..."));
        }
        Event::Finished { action, outcome } => {
            presenter.show_outcome(action, outcome);
            presenter.set_busy(false);
        }
        Event::Status(status) => presenter.show_status(status),
        Event::Synced { ahead, behind } => {
            presenter.log_line(&format!("ahead {ahead}, behind {behind}"));
        }
        Event::PublicKey(key) => presenter.log_line(key),
    }
}

/// Presents every event until all senders are gone.
pub async fn drain<P: Presenter + ?Sized>(events: flume::Receiver<Event>, presenter: &mut P) {
    while let Ok(event) = events.recv_async().await {
        present(&event, presenter);
    }
}

/// Line-oriented presenter for terminals and pipes.
///
/// In JSON mode only status snapshots and outcomes are printed, one
/// object per line.
#[derive(Debug)]
pub struct ConsolePresenter<W: Write + Send = std::io::Stdout> {
    out: W,
    json: bool,
    busy: bool,
}

impl ConsolePresenter {
    #[must_use]
    pub fn stdout(json: bool) -> Self {
        Self::new(std::io::stdout(), json)
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub const fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            busy: false,
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json(&mut self, value: &impl serde::Serialize) {
        if let Ok(text) = serde_json::to_string(value) {
            let _ = writeln!(self.out, "{text}");
        }
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn log_line(&mut self, line: &str) {
        if !self.json {
            let _ = writeln!(self.out, "{line}");
        }
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn show_status(&mut self, status: &RepoStatus) {
        if self.json {
            self.write_json(status);
        } else {
            let _ = writeln!(self.out, "{}", status.summary());
        }
    }

    fn show_outcome(&mut self, action: &str, outcome: &Outcome) {
        if self.json {
            self.write_json(&serde_json::json!({ "action": action, "outcome": outcome }));
        } else {
            let _ = writeln!(self.out, "{outcome}");
        }
    }
}
