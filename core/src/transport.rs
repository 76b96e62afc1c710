//! # Mail Transport
//!
//! The seam between the dispatch loop and the outside world. The
//! dispatcher depends on the [`Transport`] trait only; [`SmtpSender`]
//! is the production implementation over a pooled lettre SMTP
//! connection.
//!
//! Lifecycle: one connection pool per run. [`Transport::verify`] must
//! pass before the first send; [`Transport::close`] is invoked by the
//! dispatcher on every exit path.

use async_trait::async_trait;
use lettre::message::header::{Header, HeaderName, HeaderValue};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use mailr_common::config::SmtpSettings;
use mailr_common::message::Outbound;
use tracing::debug;

use crate::error::MailError;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Connection health check. A failure here aborts the run before
    /// any send is attempted.
    async fn verify(&self) -> Result<(), MailError>;

    /// Delivers one message, returning the provider's acknowledgment.
    async fn send(&self, message: &Outbound) -> Result<String, MailError>;

    /// Releases the transport's connection resources.
    async fn close(&self);
}

/// `List-Unsubscribe` is not among lettre's typed headers.
#[derive(Debug, Clone)]
struct ListUnsubscribe(String);

impl Header for ListUnsubscribe {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("List-Unsubscribe")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// SMTP sender over `lettre`, STARTTLS with credentials.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    verbose: bool,
}

impl SmtpSender {
    /// Configures the relay and the connection pool. No connection is
    /// opened until [`Transport::verify`] or the first send.
    pub fn connect(settings: &SmtpSettings) -> Result<Self, MailError> {
        let from_header = if settings.display_name.is_empty() {
            settings.sender.clone()
        } else {
            format!("{} <{}>", settings.display_name, settings.sender)
        };
        let from: Mailbox = from_header
            .parse()
            .map_err(|_| MailError::Config(format!("invalid sender address: {}", settings.sender)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.sender.clone(),
                settings.password.clone(),
            ));

        if settings.pooled {
            builder = builder.pool_config(PoolConfig::new());
        }

        Ok(Self {
            transport: builder.build(),
            from,
            verbose: settings.verbose,
        })
    }

    fn assemble(&self, outbound: &Outbound) -> Result<Message, MailError> {
        let to: Mailbox = outbound
            .to
            .parse()
            .map_err(|_| MailError::Config(format!("invalid recipient address: {}", outbound.to)))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&outbound.subject);

        if !outbound.unsubscribe_url.is_empty() {
            builder = builder.header(ListUnsubscribe(format!("<{}>", outbound.unsubscribe_url)));
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                outbound.text.clone(),
                outbound.html.clone(),
            ))
            .map_err(|e| MailError::Transport(format!("cannot assemble message: {e}")))
    }
}

#[async_trait]
impl Transport for SmtpSender {
    async fn verify(&self) -> Result<(), MailError> {
        let ready = self
            .transport
            .test_connection()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if ready {
            Ok(())
        } else {
            Err(MailError::Transport(
                "SMTP server rejected the connection check".to_string(),
            ))
        }
    }

    async fn send(&self, message: &Outbound) -> Result<String, MailError> {
        let assembled = self.assemble(message)?;

        if self.verbose {
            debug!("submitting message for {}", message.to);
        }

        let response = self
            .transport
            .send(assembled)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(response.first_line().unwrap_or_default().to_string())
    }

    async fn close(&self) {
        // The pooled connections are torn down when the transport drops;
        // nothing to flush beyond that.
        debug!("closing SMTP connection pool");
    }
}
