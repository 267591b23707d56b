//! Sends the notifications configured for a submission

use tracing::{debug, info};

use crate::email::EmailSender;
use crate::error::NotifyError;
use crate::template::NotificationContext;

use super::{FormMeta, NotificationComposer, Submission, TemplateRegistry};

/// What happened when a submission was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Nothing was sent, usually because the form has no enabled template
    Skipped,
    /// At least one message was handed to the sender
    Sent {
        /// Number of emails sent, staff notification and confirmation
        messages: usize,
    },
}

/// Composes and sends notification emails for form submissions
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use parish_notify::email::ConsoleBackend;
/// use parish_notify::notification::{
///     FormKind, FormMeta, NotificationComposer, NotificationTemplate, Notifier, NotifyOutcome,
///     Submission, TemplateRegistry,
/// };
///
/// # async fn example() -> Result<(), parish_notify::error::NotifyError> {
/// let mut registry = TemplateRegistry::new();
/// registry.register(
///     "work-request",
///     NotificationTemplate::new("Request #{{entry.id}}", "", "{{payload.details}}")
///         .recipient("facilities@example.org"),
/// );
/// let notifier = Notifier::new(registry, NotificationComposer::default(), ConsoleBackend::new());
///
/// let form = FormMeta::new("work-request", "Work Request", FormKind::WorkRequest);
/// let submission = Submission {
///     id: 1,
///     form_slug: "work-request".into(),
///     first_name: "Jane".into(),
///     last_name: "Doe".into(),
///     email: "jane@example.com".into(),
///     phone: None,
///     submitted_at: Utc::now(),
///     payload: Default::default(),
/// };
///
/// assert_eq!(notifier.notify(&form, &submission).await?, NotifyOutcome::Sent { messages: 1 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Notifier<S> {
    registry: TemplateRegistry,
    composer: NotificationComposer,
    sender: S,
}

impl<S: EmailSender> Notifier<S> {
    /// Create a notifier
    #[must_use]
    pub const fn new(registry: TemplateRegistry, composer: NotificationComposer, sender: S) -> Self {
        Self {
            registry,
            composer,
            sender,
        }
    }

    /// Templates this notifier sends from
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Underlying email sender
    #[must_use]
    pub const fn sender(&self) -> &S {
        &self.sender
    }

    /// Compose and send every message configured for `submission`
    ///
    /// A template without staff recipients only sends the confirmation. When
    /// nothing ends up being sent the outcome is [`NotifyOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// - [`NotifyError::FormMismatch`] if the submission was made to another form
    /// - [`NotifyError::Email`] if a message cannot be composed or sent. When
    ///   the staff notification fails, no confirmation is attempted.
    pub async fn notify(&self, form: &FormMeta, submission: &Submission) -> Result<NotifyOutcome, NotifyError> {
        if submission.form_slug != form.slug {
            return Err(NotifyError::FormMismatch {
                submission: submission.id,
                expected: form.slug.clone(),
                actual: submission.form_slug.clone(),
            });
        }

        let Some(template) = self.registry.active(&form.slug) else {
            debug!(form = %form.slug, submission = submission.id, "No active notification template");
            return Ok(NotifyOutcome::Skipped);
        };

        let context = NotificationContext::for_submission(form, submission);

        let mut messages = 0;
        if template.recipients.is_empty() {
            debug!(form = %form.slug, "Template has no staff recipients");
        } else {
            let notification = self.composer.compose(template, &context)?;
            let recipients = notification.recipients().count();
            self.sender.send(notification).await?;
            messages += 1;
            info!(
                form = %form.slug,
                submission = submission.id,
                recipients,
                "Notification sent"
            );
        }

        if let Some(confirmation) = self.composer.compose_confirmation(template, &context)? {
            self.sender.send(confirmation).await?;
            messages += 1;
            info!(form = %form.slug, submission = submission.id, "Confirmation sent");
        }

        if messages == 0 {
            return Ok(NotifyOutcome::Skipped);
        }
        Ok(NotifyOutcome::Sent { messages })
    }
}
