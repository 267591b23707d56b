//! The seam between composition and delivery
//!
//! SMTP, SES or any other transport lives in the application. It implements
//! [`EmailSender`] and is handed to the
//! [`Notifier`](crate::notification::Notifier).

use async_trait::async_trait;

use super::{Email, EmailError};

/// Hands composed notification emails to a delivery backend
///
/// # Examples
///
/// ```rust
/// use parish_notify::email::{ConsoleBackend, Email, EmailSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = ConsoleBackend::new();
///
/// let email = Email::new()
///     .to("office@example.org")
///     .from("forms@example.org")
///     .subject("New work request")
///     .text("A new request was submitted.");
///
/// sender.send(email).await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the message is invalid or the backend
    /// refuses it
    async fn send(&self, email: Email) -> Result<(), EmailError>;

    /// Deliver several messages in order, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] raised by [`Self::send`]
    async fn send_batch(&self, emails: Vec<Email>) -> Result<(), EmailError> {
        for email in emails {
            self.send(email).await?;
        }
        Ok(())
    }
}
