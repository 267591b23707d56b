//! Recording email sender for assertions

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::email::{Email, EmailError, EmailSender};

/// Email sender that keeps every message in memory
///
/// Clones share the same record, so a clone handed to a
/// [`Notifier`](crate::notification::Notifier) can be inspected afterwards.
///
/// # Examples
///
/// ```rust
/// use parish_notify::email::{Email, EmailSender};
/// use parish_notify::testing::RecordingEmailSender;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let recorder = RecordingEmailSender::new();
///
/// recorder
///     .send(
///         Email::new()
///             .to("office@example.org")
///             .from("forms@example.org")
///             .subject("Test")
///             .text("Hello"),
///     )
///     .await?;
///
/// assert_eq!(recorder.sent_count(), 1);
/// assert!(recorder.was_sent_to("office@example.org"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<Email>>>,
}

impl RecordingEmailSender {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emails sent
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// All sent emails, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn sent_emails(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    /// Forget every recorded email
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Whether any email went to `address` as To, CC or BCC
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|email| email.recipients().any(|recipient| recipient == address))
    }

    /// Whether any email had exactly this subject
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn was_sent_with_subject(&self, subject: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|email| email.subject.as_deref() == Some(subject))
    }

    /// Most recently sent email
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn last_sent(&self) -> Option<Email> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        email.validate()?;
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(subject: &str) -> Email {
        Email::new()
            .to("office@example.org")
            .bcc("archive@example.org")
            .from("forms@example.org")
            .subject(subject)
            .text("body")
    }

    #[tokio::test]
    async fn test_records_and_clears() {
        let recorder = RecordingEmailSender::new();
        let shared = recorder.clone();

        recorder.send(email("one")).await.unwrap();
        recorder.send(email("two")).await.unwrap();

        assert_eq!(shared.sent_count(), 2);
        assert!(shared.was_sent_with_subject("one"));
        assert!(shared.was_sent_to("archive@example.org"));
        assert_eq!(shared.last_sent().unwrap().subject.as_deref(), Some("two"));
        assert_eq!(shared.sent_emails().len(), 2);

        shared.clear();
        assert_eq!(recorder.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_email_not_recorded() {
        let recorder = RecordingEmailSender::new();
        let result = recorder.send(Email::new().subject("x")).await;

        assert!(matches!(result, Err(EmailError::NoRecipients)));
        assert_eq!(recorder.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_send_batch_records_all() {
        let recorder = RecordingEmailSender::new();
        recorder
            .send_batch(vec![email("a"), email("b"), email("c")])
            .await
            .unwrap();
        assert_eq!(recorder.sent_count(), 3);
    }
}
