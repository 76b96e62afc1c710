//! # Dispatch Loop
//!
//! Sends a batch of rendered messages strictly sequentially: one
//! message in flight at a time, in input order, never exceeding the
//! per-run cap, retrying a failed send after a fixed delay up to the
//! attempt ceiling.
//!
//! Per-message lifecycle:
//!
//! ```text
//! Pending -> Sending -> Sent
//!                    -> failed -> (delay) -> Sending   [attempts < ceiling]
//!                    -> PermanentlyFailed              [ceiling reached]
//! Pending -> NotAttempted                              [cap reached first]
//! ```
//!
//! The cap counts successful sends only; it models the provider quota,
//! not attempts. Reaching it is a normal stopping condition.

use std::time::Duration;

use mailr_common::config::RunConfig;
use mailr_common::message::Outbound;
use mailr_common::report::{Outcome, SendReport};
use mailr_common::{error, success, warn};

use crate::error::MailError;
use crate::transport::Transport;

/// Progress hook, invoked with the running sent-count after each
/// successful send.
pub type ProgressFn = Box<dyn Fn(usize) + Send + Sync>;

/// Counters owned by one run. Never shared, never persisted.
struct DispatchState {
    sent: usize,
    limit: usize,
}

impl DispatchState {
    fn capped(&self) -> bool {
        self.sent >= self.limit
    }
}

/// One dispatcher per run; create it, call [`Dispatcher::run`], read
/// the report.
pub struct Dispatcher {
    limit: usize,
    retry_delay: Duration,
    max_attempts: u32,
}

impl Dispatcher {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            limit: config.limit,
            retry_delay: config.retry_delay,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Verifies the transport, then works through `messages` in order.
    ///
    /// Fails only when the startup health check fails; everything after
    /// that is recorded per message in the report. The transport is
    /// closed on every exit path.
    pub async fn run<T: Transport>(
        &self,
        transport: &T,
        messages: &[Outbound],
        on_sent: Option<ProgressFn>,
    ) -> Result<SendReport, MailError> {
        if let Err(err) = transport.verify().await {
            transport.close().await;
            return Err(err);
        }

        let mut state = DispatchState {
            sent: 0,
            limit: self.limit,
        };
        let mut report = SendReport::default();

        for message in messages {
            if state.capped() {
                report.record(Outcome::NotAttempted {
                    to: message.to.clone(),
                });
                continue;
            }

            let outcome = self.send_with_retry(transport, message).await;
            if let Outcome::Sent { .. } = outcome {
                state.sent += 1;
                if let Some(callback) = on_sent.as_ref() {
                    callback(state.sent);
                }
            }
            report.record(outcome);
        }

        transport.close().await;
        Ok(report)
    }

    /// Attempts one message until it is accepted or the ceiling is hit.
    ///
    /// The descriptor is reused unchanged across attempts; an explicit
    /// bounded loop, no recursion.
    async fn send_with_retry<T: Transport>(&self, transport: &T, message: &Outbound) -> Outcome {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match transport.send(message).await {
                Ok(message_id) => {
                    success!("message sent to {}: {}", message.to, message_id);
                    return Outcome::Sent {
                        to: message.to.clone(),
                        message_id,
                        attempts: attempt,
                    };
                }
                Err(err) if attempt >= self.max_attempts => {
                    error!(
                        "giving up on {} after {} attempts: {}",
                        message.to, attempt, err
                    );
                    return Outcome::Failed {
                        to: message.to.clone(),
                        attempts: attempt,
                        cause: err.to_string(),
                    };
                }
                Err(err) => {
                    warn!(
                        "send to {} failed ({}), retrying in {}s [attempt {}/{}]",
                        message.to,
                        err,
                        self.retry_delay.as_secs(),
                        attempt,
                        self.max_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
