use std::time::Duration;

/// How a malformed roster row is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Log the row with its cause and keep going.
    #[default]
    Skip,
    /// Abort the whole run on the first bad row.
    Strict,
}

/// Knobs for one dispatch run.
///
/// Owned by the command layer, passed by reference down the pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of sends in this run.
    ///
    /// Models the provider's daily quota. Reaching it stops the run; it
    /// is not an error.
    pub limit: usize,
    /// Wait between attempts at the same message.
    pub retry_delay: Duration,
    /// Attempts per message, the first one included.
    pub max_attempts: u32,
    pub row_policy: RowPolicy,
    /// Development mode: debug-level logging and verbose transport.
    pub dev: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            limit: 450,
            retry_delay: Duration::from_secs(60),
            max_attempts: 5,
            row_policy: RowPolicy::default(),
            dev: false,
        }
    }
}

/// SMTP connection parameters, fixed for the run's duration.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Address the messages are sent from; doubles as the login user.
    pub sender: String,
    pub password: String,
    /// Human-readable sender name shown next to the address.
    pub display_name: String,
    /// Keep one pooled connection for the whole run.
    pub pooled: bool,
    pub verbose: bool,
}
