//! Core pipeline of the batch mailer: roster in, rendered messages out,
//! sequential dispatch through an SMTP transport.
//!
//! High-level modules depend on the [`transport::Transport`] abstraction
//! rather than the concrete SMTP sender, so the dispatch loop can be
//! exercised without a mail server.

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod roster;
pub mod template;
pub mod transport;

pub use error::MailError;
