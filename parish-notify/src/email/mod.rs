//! Outgoing email messages and the sender seam
//!
//! This module provides:
//! - A fluent [`Email`] builder with validation
//! - The [`EmailSender`] trait implemented by delivery backends
//! - A [`ConsoleBackend`] that prints messages during development
//!
//! # Examples
//!
//! ```rust
//! use parish_notify::email::{ConsoleBackend, Email, EmailSender};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = ConsoleBackend::new();
//!
//! let email = Email::new()
//!     .to("facilities@example.org")
//!     .from("forms@example.org")
//!     .subject("Work request #12")
//!     .text("The boiler in the parish hall needs servicing.")
//!     .html("<p>The boiler in the parish hall needs servicing.</p>");
//!
//! backend.send(email).await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod builder;
mod error;
mod sender;

pub use backend::console::ConsoleBackend;
pub use builder::{is_valid_address, Email};
pub use error::EmailError;
pub use sender::EmailSender;

#[cfg(test)]
pub use sender::MockEmailSender;
