use thiserror::Error;

/// Failure classes of a mail run.
///
/// `Config` and `Template` are fatal before any send. `Roster` is fatal
/// only under the strict row policy. `Transport` is handled per message
/// by the dispatcher's retry loop. Reaching the send cap is not an
/// error and never surfaces here.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("roster error: {0}")]
    Roster(String),

    #[error("transport error: {0}")]
    Transport(String),
}
