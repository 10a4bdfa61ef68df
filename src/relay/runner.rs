//! Status relay runner.
//!
//! Every cycle follows the same steps:
//! 1. Fetch statuses changed since the poll cursor
//! 2. Check the response shape
//! 3. For each homework, in order: skip it if its `date_updated` matches
//!    the marker for that submission, otherwise record it, format it and
//!    send it to the chat
//! 4. Move the cursor to the current time
//!
//! Any error in steps 1-3 abandons the rest of the cycle and leaves the
//! cursor where it was. Failed sends are logged and do not stop the cycle.
//! The loop sleeps the same interval after every cycle, whatever its outcome.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::RelayState;
use super::state::now_unix;
use crate::error::RelayError;
use crate::homework::parse_status;
use crate::practicum::{HomeworkApi, check_response};
use crate::telegram::Notifier;

/// Messages that can be sent to a running relay.
#[derive(Debug, Clone)]
pub enum RelayMessage {
    /// Stop the relay.
    Shutdown,
}

/// Outcome of a cycle that reached the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Homework records in the response.
    pub received: usize,
    /// Notifications delivered.
    pub sent: usize,
    /// Records whose update time was already seen.
    pub skipped: usize,
    /// Notifications that could not be delivered.
    pub failed: usize,
}

/// Polls the review API and relays status changes to the chat.
pub struct StatusRelay {
    /// Review API client.
    api: Box<dyn HomeworkApi>,

    /// Chat notifier.
    notifier: Box<dyn Notifier>,

    /// Cursor and last-seen markers.
    state: RelayState,

    /// Pause between cycles.
    retry_time: Duration,
}

impl StatusRelay {
    /// Creates a relay whose cursor starts at the current time.
    #[must_use]
    pub fn new(api: Box<dyn HomeworkApi>, notifier: Box<dyn Notifier>, retry_time: Duration) -> Self {
        Self::with_state(api, notifier, retry_time, RelayState::starting_now())
    }

    /// Creates a relay resuming from an existing state.
    #[must_use]
    pub fn with_state(
        api: Box<dyn HomeworkApi>,
        notifier: Box<dyn Notifier>,
        retry_time: Duration,
        state: RelayState,
    ) -> Self {
        Self {
            api,
            notifier,
            state,
            retry_time,
        }
    }

    /// Runs the relay loop until [`RelayMessage::Shutdown`] arrives or the
    /// sender side is dropped.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<RelayMessage>) {
        info!(
            "Status relay started, polling every {} seconds",
            self.retry_time.as_secs()
        );

        loop {
            self.tick().await;

            tokio::select! {
                () = tokio::time::sleep(self.retry_time) => {}
                msg = rx.recv() => {
                    match msg {
                        Some(RelayMessage::Shutdown) | None => {
                            info!("Status relay shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Runs one cycle and logs its outcome.
    ///
    /// Returns the error kind label when the cycle failed.
    pub async fn tick(&mut self) -> Option<&'static str> {
        match self.run_cycle().await {
            Ok(report) => {
                info!(
                    "Cycle finished: {} received, {} sent, {} skipped, {} failed",
                    report.received, report.sent, report.skipped, report.failed
                );
                None
            }
            Err(e) => {
                let kind = e.kind();
                match &e {
                    RelayError::Api { .. } | RelayError::Connection(_) => {
                        error!(kind, "Review API request failed: {}", e);
                    }
                    RelayError::MalformedResponse(_) => {
                        error!(kind, "Review API response rejected: {}", e);
                    }
                    // Send failures are logged inside `run_cycle` and never
                    // returned; `Notify` is listed only for exhaustiveness.
                    RelayError::MissingField(_)
                    | RelayError::UnknownStatus { .. }
                    | RelayError::Notify(_) => {
                        error!(kind, "Homework record rejected: {}", e);
                    }
                }
                Some(kind)
            }
        }
    }

    /// Runs a single fetch, check and notify pass.
    ///
    /// # Errors
    ///
    /// Returns the first fetch, shape, or record error; the cursor is not
    /// advanced in that case.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, RelayError> {
        let from_date = self.state.poll_cursor();
        debug!("Polling review API, from_date={}", from_date);

        let response = self.api.fetch(from_date).await?;
        let homeworks = check_response(&response)?;

        let mut report = CycleReport {
            received: homeworks.len(),
            ..CycleReport::default()
        };

        for homework in &homeworks {
            if !self.state.record_update(homework) {
                debug!("No status change for {}", homework_label(homework));
                report.skipped += 1;
                continue;
            }

            let message = parse_status(homework)?;

            match self.notifier.send_message(&message).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    error!(kind = e.kind(), "Notification failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        self.state.advance_cursor(now_unix());
        Ok(report)
    }

    /// Gets a reference to the relay state.
    #[must_use]
    pub const fn state(&self) -> &RelayState {
        &self.state
    }
}

/// Name of a homework record for log lines.
fn homework_label(homework: &serde_json::Value) -> &str {
    homework
        .get("homework_name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<unnamed>")
}

impl std::fmt::Debug for StatusRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusRelay")
            .field("state", &self.state)
            .field("retry_time", &self.retry_time)
            .finish_non_exhaustive()
    }
}
