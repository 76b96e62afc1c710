//! Fully rendered outbound email, ready for the transport.

use serde::Serialize;

/// One rendered message. Built once per recipient, consumed exactly
/// once by the dispatcher; its content never changes between retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outbound {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Per-recipient unsubscribe link. Empty when the language metadata
    /// does not configure one.
    pub unsubscribe_url: String,
}
