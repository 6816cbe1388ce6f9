//! Outbound email.
//!
//! [`Mailer`] is the single seam between the notification dispatcher
//! and the outside world: one fully-rendered message to one address.
//! [`smtp::SmtpMailer`] delivers over SMTP via `lettre`;
//! [`LogMailer`] stands in when SMTP is not configured and in local
//! development, writing the message to the log instead.
//!
//! [`template`] renders the notification subject/body as a pure
//! function of project and recipient type.

pub mod smtp;
pub mod template;

use async_trait::async_trait;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Sends one rendered message to one recipient.
///
/// Implementations must not retry internally; the caller records the
/// outcome of every individual attempt.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Fallback mailer used when SMTP is not configured: logs the message
/// and reports success.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to, subject, body_len = body.len(), "SMTP not configured, logging email");
        Ok(())
    }
}
