//! Polling loop: fetch → validate → extract → notify → sleep.
//!
//! One cycle runs strictly in sequence. Any error ends the loop after a
//! best-effort report to the chat and the regular sleep.

use std::time::Duration;
use tracing::{debug, error, info, warn};

use homework_rust_core::clients::{Notifier, StatusSource};
use homework_rust_core::{validation, verdict};
use homework_rust_core::{BotError, BotMainError, Cursor, SubmissionRecord};

use crate::config::Config;

/// Prefix of the message sent to the chat when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// State carried between cycles for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct PollState {
    last_cursor: Cursor,
    /// `None` until the first record has been reported
    last_seen: Option<SubmissionRecord>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_cursor(&self) -> Cursor {
        self.last_cursor
    }

    pub fn last_seen(&self) -> Option<&SubmissionRecord> {
        self.last_seen.as_ref()
    }

    /// Move the cursor forward. Never goes backwards.
    fn advance(&mut self, next: Cursor) {
        if next < self.last_cursor {
            warn!(
                "Ignoring cursor {} older than current {}",
                next, self.last_cursor
            );
            return;
        }
        self.last_cursor = next;
    }
}

/// What a successful cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Notified { message: String },
    Unchanged,
    NoSubmissions,
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    chat_id: String,
    retry_period: Duration,
    state: PollState,
}

impl<S, N> Poller<S, N>
where
    S: StatusSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, config: &Config) -> Self {
        Self::with_settings(
            source,
            notifier,
            config.telegram_chat_id.clone(),
            config.retry_period,
        )
    }

    pub fn with_settings(
        source: S,
        notifier: N,
        chat_id: impl Into<String>,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            chat_id: chat_id.into(),
            retry_period,
            state: PollState::new(),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// One fetch/validate/notify pass. The cursor only moves when the whole
    /// pass succeeds.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, BotError> {
        let cursor = self.state.last_cursor;
        let raw = self.source.fetch(cursor).await?;
        let response = validation::parse_response(&raw)?;

        let outcome = match response.latest() {
            None => {
                debug!("No homeworks since {}", cursor);
                CycleOutcome::NoSubmissions
            }
            Some(latest) if self.state.last_seen.as_ref() == Some(latest) => {
                debug!("Homework status unchanged");
                CycleOutcome::Unchanged
            }
            Some(latest) => {
                let message = verdict::parse_status(latest)?;
                self.notifier.deliver(&self.chat_id, &message).await?;
                info!("Notified: {}", message);
                self.state.last_seen = Some(latest.clone());
                CycleOutcome::Notified { message }
            }
        };

        self.state.advance(response.next_cursor);
        Ok(outcome)
    }

    /// Poll until a cycle fails. Only ever returns the fatal error, and only
    /// after the retry period has elapsed.
    pub async fn run(mut self) -> Result<(), BotMainError> {
        info!(
            "Polling homework statuses every {}s",
            self.retry_period.as_secs()
        );

        loop {
            let fatal = match self.run_cycle().await {
                Ok(outcome) => {
                    debug!(
                        "Cycle finished: {:?}, next from_date={}",
                        outcome, self.state.last_cursor
                    );
                    None
                }
                Err(err) => Some(self.report_failure(err).await),
            };

            tokio::time::sleep(self.retry_period).await;

            if let Some(fatal) = fatal {
                return Err(fatal);
            }
        }
    }

    async fn report_failure(&self, err: BotError) -> BotMainError {
        let message = format!("{}{}", FAILURE_PREFIX, err);
        // Best effort: a broken notifier must not hide the original error
        if let Err(send_err) = self.notifier.deliver(&self.chat_id, &message).await {
            error!("Could not report failure to chat: {}", send_err);
        }
        error!("{}", message);
        BotMainError {
            message,
            source: err,
        }
    }
}
