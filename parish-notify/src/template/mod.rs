//! Placeholder templates for notification emails
//!
//! Staff configure the subject, heading and body of each form's
//! notification as text containing `{{namespace.key}}` placeholders. This
//! module turns such text plus a [`NotificationContext`] into the final
//! strings.
//!
//! # Examples
//!
//! ```rust
//! use parish_notify::template::{resolve, NotificationContext};
//!
//! let context = NotificationContext::new()
//!     .with_entry("id", 1042)
//!     .with_form("title", "Building Work Request");
//!
//! let subject = resolve("[{{form.title}}] Request #{{entry.id}}", &context);
//! assert_eq!(subject, "[Building Work Request] Request #1042");
//! ```

mod context;
mod html;
mod placeholder;
mod resolver;
mod value;

pub use context::{Fields, Namespace, NotificationContext, UnknownNamespace};
pub use html::{escape_html, looks_like_html, nl2br, render_body, render_body_with_report};
pub use placeholder::{has_placeholders, placeholders, Placeholder};
pub use resolver::{resolve, resolve_with_report, Escape, Resolution, TemplateResolver};
pub use value::ContextValue;
