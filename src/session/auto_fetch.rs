// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Periodic background fetch.
//!
//! ```text
//! every interval (>= 10 s):
//!   cancelled?            -> stop (a running sync completes first)
//!   no repository         -> skip tick
//!   Session::run(Sync)    queued behind any running action, never retried
//! ```

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Action, Session};
use crate::config::types::MIN_FETCH_INTERVAL_SECS;

/// Timer that runs [`Action::Sync`] until cancelled.
#[derive(Debug)]
pub struct AutoFetch {
    session: Session,
    cancel_token: CancellationToken,
    period: Option<Duration>,
}

impl AutoFetch {
    pub const fn new(session: Session, cancel_token: CancellationToken) -> Self {
        Self {
            session,
            cancel_token,
            period: None,
        }
    }

    /// Fixed period instead of `fetch.interval_sec`; the 10 s floor does not apply.
    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    async fn period(&self) -> Duration {
        if let Some(period) = self.period {
            return period;
        }
        let configured = self.session.settings().await.fetch_interval();
        configured.max(Duration::from_secs(MIN_FETCH_INTERVAL_SECS))
    }

    /// Ticks until the token is cancelled. Returns the number of syncs run.
    pub async fn run(self) -> u64 {
        let period = self.period().await;
        info!(period = ?period, "auto fetch started");

        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut runs = 0;
        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if self.session.repository().await.refusal().is_some() {
                debug!("auto fetch skipped, no repository");
                continue;
            }
            // An in-flight sync finishes so its Finished event is delivered.
            self.session.run(Action::Sync).await;
            runs += 1;
        }
        info!(runs, "auto fetch stopped");
        runs
    }
}
