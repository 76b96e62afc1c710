#![cfg(test)]
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mailr_common::message::Outbound;
use mailr_core::transport::Transport;
use mailr_core::MailError;

/// Scripted stand-in for the SMTP sender.
///
/// Pops one scripted result per send attempt; once the script runs dry
/// every further attempt is accepted. Records every interaction so
/// tests can assert on attempt counts, payloads, and the
/// acquire/release discipline.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<String, String>>>,
    verify_error: Option<String>,
    verifies: AtomicUsize,
    closes: AtomicUsize,
    attempts: Mutex<Vec<Outbound>>,
}

impl MockTransport {
    /// Accepts everything.
    pub fn accepting() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            verify_error: None,
            verifies: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Fails the startup health check.
    pub fn rejecting_verify(cause: &str) -> Self {
        Self {
            verify_error: Some(cause.to_string()),
            ..Self::accepting()
        }
    }

    pub fn verify_count(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Every payload handed to `send`, in attempt order.
    pub fn attempts(&self) -> Vec<Outbound> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn verify(&self) -> Result<(), MailError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        match &self.verify_error {
            Some(cause) => Err(MailError::Transport(cause.clone())),
            None => Ok(()),
        }
    }

    async fn send(&self, message: &Outbound) -> Result<String, MailError> {
        self.attempts.lock().unwrap().push(message.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(id)) => Ok(id),
            Some(Err(cause)) => Err(MailError::Transport(cause)),
            None => Ok("250 2.0.0 OK".to_string()),
        }
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn outbound(to: &str) -> Outbound {
    Outbound {
        to: to.to_string(),
        subject: "Welcome".to_string(),
        text: "Hello".to_string(),
        html: "<p>Hello</p>".to_string(),
        unsubscribe_url: String::new(),
    }
}
