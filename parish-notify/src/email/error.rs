//! Email error types

use thiserror::Error;

/// Why a notification email could not be built or handed off
#[derive(Debug, Error)]
pub enum EmailError {
    /// No To, CC or BCC address survived
    #[error("no recipients to notify")]
    NoRecipients,

    /// No From address
    #[error("no sender address")]
    NoSender,

    /// No subject line
    #[error("no subject")]
    NoSubject,

    /// Neither a text nor an HTML body
    #[error("no text or HTML body")]
    NoContent,

    /// An address failed the syntax check
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The HTML layout failed to render
    #[error("failed to render notification layout: {0}")]
    Layout(#[from] askama::Error),

    /// The sending backend could not deliver the message
    #[error("transport error: {0}")]
    Transport(String),
}

impl EmailError {
    /// Transport failure with a backend-supplied message
    #[must_use]
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        Self::Transport(msg.into())
    }
}
