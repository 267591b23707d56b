//! parish-notify: notification emails for parish office forms
//!
//! Staff at a parish office collect work requests and seasonal service-time
//! sign-ups through web forms. For each form they configure an email that
//! goes out when someone submits it. Those emails are written with
//! `{{namespace.key}}` placeholders, filled from three namespaces:
//!
//! - `entry.*`: the submission (`entry.id`, `entry.first_name`, `entry.email`, ...)
//! - `form.*`: the form (`form.title`, `form.season`, ...)
//! - `payload.*`: the form-specific answers stored with the submission
//!
//! Placeholders without a value render as empty text and never fail a send.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parish_notify::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = NotifyConfig::load()?;
//!     parish_notify::observability::init(&config.observability())?;
//!
//!     let notifier = Notifier::new(
//!         config.registry(),
//!         NotificationComposer::new(config.mail.clone()),
//!         ConsoleBackend::new(),
//!     );
//!
//!     let form = config
//!         .form("work-request")
//!         .ok_or_else(|| anyhow::anyhow!("work-request form is not configured"))?;
//!     let submission: Submission = serde_json::from_str(&std::fs::read_to_string("submission.json")?)?;
//!
//!     notifier.notify(&form, &submission).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`template`]: placeholder resolution and HTML body presentation
//! - [`notification`]: forms, templates, composition and sending
//! - [`email`]: email messages and the [`EmailSender`](email::EmailSender) seam
//! - [`config`]: layered configuration
//! - [`observability`]: logging setup

pub mod config;
pub mod email;
pub mod error;
pub mod notification;
pub mod observability;
pub mod template;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use parish_notify::prelude::*;
    //! ```

    pub use crate::config::{MailSettings, NotifyConfig};
    pub use crate::email::{ConsoleBackend, Email, EmailError, EmailSender};
    pub use crate::error::NotifyError;
    pub use crate::notification::{
        FormKind, FormMeta, NotificationComposer, NotificationTemplate, Notifier, NotifyOutcome,
        Submission, TemplateRegistry,
    };
    pub use crate::template::{
        render_body, resolve, ContextValue, Namespace, NotificationContext, TemplateResolver,
    };
}
