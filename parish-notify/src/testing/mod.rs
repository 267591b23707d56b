//! Testing utilities
//!
//! Available to this crate's tests and, with the `testing` feature, to
//! applications testing their own notification flows.

mod email;

pub use email::RecordingEmailSender;
