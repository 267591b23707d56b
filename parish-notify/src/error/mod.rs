//! Error types and error handling

use thiserror::Error;

use crate::config::ConfigError;
use crate::email::EmailError;

/// Errors raised while turning a submission into notification emails
///
/// Unresolved placeholders are never errors; they render as empty text.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The email could not be built, rendered or sent
    #[error("email error: {0}")]
    Email(#[from] EmailError),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The submission does not belong to the form it was reported against
    #[error("submission {submission} belongs to form {actual:?}, not {expected:?}")]
    FormMismatch {
        /// Submission identifier
        submission: u64,
        /// Slug of the form the caller passed
        expected: String,
        /// Slug recorded on the submission
        actual: String,
    },

    /// No form with this slug is configured
    #[error("unknown form: {0}")]
    UnknownForm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_error_converts() {
        let error = NotifyError::from(EmailError::NoRecipients);
        assert_eq!(
            error.to_string(),
            "email error: no recipients to notify"
        );
    }

    #[test]
    fn test_form_mismatch_message() {
        let error = NotifyError::FormMismatch {
            submission: 3,
            expected: "work-request".to_string(),
            actual: "service-times".to_string(),
        };
        assert_eq!(
            error.to_string(),
            r#"submission 3 belongs to form "service-times", not "work-request""#
        );
    }
}
