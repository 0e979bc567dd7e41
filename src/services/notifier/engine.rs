use std::time::Duration;

use crate::modules::homework::{EmptyHomeworksPolicy, HomeworkStatuses};
use crate::services::notifier::{CycleOutcome, ErrorKind, NotifierError, TickReport};
use crate::services::practicum::HomeworkSource;
use crate::services::telegram::MessageSender;

/// Polling loop: fetch, validate, notify, sleep.
///
/// Owns the poll cursor and the text of the last error a failure
/// notification went out for. Both live only in memory.
pub struct Notifier<S, M> {
    source: S,
    sender: M,
    retry_time: Duration,
    empty_homeworks: EmptyHomeworksPolicy,
    cursor: i64,
    last_error: Option<String>,
}

impl<S: HomeworkSource, M: MessageSender> Notifier<S, M> {
    pub fn new(source: S, sender: M, retry_time: Duration, cursor: i64) -> Self {
        Self {
            source,
            sender,
            retry_time,
            empty_homeworks: EmptyHomeworksPolicy::default(),
            cursor,
            last_error: None,
        }
    }

    pub fn with_empty_homeworks(mut self, policy: EmptyHomeworksPolicy) -> Self {
        self.empty_homeworks = policy;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run forever. Errors never stop the loop.
    pub async fn run(mut self) {
        tracing::info!(
            "Homework notifier started: interval={:?}, cursor={}",
            self.retry_time,
            self.cursor
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.retry_time).await;
        }
    }

    /// One iteration without the trailing sleep
    pub async fn tick(&mut self) -> TickReport {
        match self.poll_once().await {
            Ok(outcome) => TickReport {
                outcome: Ok(outcome),
                failure_notified: false,
            },
            Err(err) => {
                let failure_notified = self.handle_failure(&err).await;
                TickReport {
                    outcome: Err(err.to_string()),
                    failure_notified,
                }
            }
        }
    }

    /// Fetch, validate, deliver the newest status, then advance the cursor.
    /// The cursor only moves once every earlier step has succeeded.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, NotifierError> {
        let response = match self.source.homework_statuses(self.cursor).await {
            Ok(response) => response,
            Err(err) if err.kind() == ErrorKind::Transport => {
                tracing::warn!("Homework API unreachable, skipping cycle: {}", err);
                return Ok(CycleOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };

        let statuses = HomeworkStatuses::from_response(&response)?;

        let outcome = match statuses.latest()? {
            Some(homework) => {
                tracing::info!(
                    "Verdict for {}: {}",
                    homework.homework_name,
                    homework.status.verdict()
                );
                let message = homework.notification();
                self.sender.send_message(&message).await?;
                CycleOutcome::Notified(message)
            }
            None if self.empty_homeworks == EmptyHomeworksPolicy::Fail => {
                return Err(NotifierError::NoNewHomeworks);
            }
            None => {
                tracing::debug!("No new homework statuses");
                CycleOutcome::NoUpdates
            }
        };

        if let Some(current_date) = statuses.current_date {
            self.cursor = current_date;
        }

        Ok(outcome)
    }

    /// Log the error and notify the chat unless it repeats the last one.
    /// Returns whether a failure notification was delivered.
    async fn handle_failure(&mut self, err: &NotifierError) -> bool {
        let message = err.failure_message();
        tracing::error!("{}", message);

        let text = err.to_string();
        if self.last_error.as_deref() == Some(text.as_str()) {
            tracing::debug!("Same error as last notified, suppressing notification");
            return false;
        }
        self.last_error = Some(text);

        match self.sender.send_message(&message).await {
            Ok(()) => true,
            Err(send_err) => {
                tracing::error!("Failed to deliver failure notification: {}", send_err);
                false
            }
        }
    }
}
