//! Email backend implementations
//!
//! Only the development console backend ships with this crate. Production
//! transports implement [`EmailSender`](super::EmailSender) in the host
//! application.

pub mod console;
