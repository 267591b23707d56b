//! Notification emails for form submissions
//!
//! Each form may have one [`NotificationTemplate`], kept in a
//! [`TemplateRegistry`] under the form's slug. When a submission arrives the
//! [`Notifier`] builds a [`NotificationContext`](crate::template::NotificationContext)
//! from the form and submission, lets the [`NotificationComposer`] render the
//! template, and hands the resulting emails to an
//! [`EmailSender`](crate::email::EmailSender).

mod composer;
mod form;
mod notifier;
mod registry;
mod template;

pub use composer::{NotificationComposer, RenderedNotification, FORM_HEADER, SUBMISSION_HEADER};
pub use form::{FormKind, FormMeta, Submission};
pub use notifier::{Notifier, NotifyOutcome};
pub use registry::TemplateRegistry;
pub use template::NotificationTemplate;
