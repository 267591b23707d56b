//! Email builder with fluent API

use serde::{Deserialize, Serialize};

use super::EmailError;

/// An email message
///
/// ```rust
/// use parish_notify::email::Email;
///
/// let email = Email::new()
///     .to("office@example.org")
///     .from("forms@example.org")
///     .subject("New work request")
///     .text("A new request was submitted.")
///     .html("<p>A new request was submitted.</p>");
///
/// assert!(email.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Email recipients (To)
    pub to: Vec<String>,

    /// Email sender (From)
    pub from: Option<String>,

    /// Reply-To address
    pub reply_to: Option<String>,

    /// CC recipients
    pub cc: Vec<String>,

    /// BCC recipients
    pub bcc: Vec<String>,

    /// Email subject
    pub subject: Option<String>,

    /// Plain text body
    pub text: Option<String>,

    /// HTML body
    pub html: Option<String>,

    /// Custom headers
    pub headers: Vec<(String, String)>,
}

impl Email {
    /// Create a new empty email
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipient (To)
    #[must_use]
    pub fn to(mut self, address: &str) -> Self {
        self.to.push(address.to_string());
        self
    }

    /// Add multiple recipients (To)
    ///
    /// ```rust
    /// use parish_notify::email::Email;
    ///
    /// let email = Email::new()
    ///     .to_multiple(&["pastor@example.org", "facilities@example.org"]);
    /// assert_eq!(email.to.len(), 2);
    /// ```
    #[must_use]
    pub fn to_multiple<S: AsRef<str>>(mut self, addresses: &[S]) -> Self {
        self.to
            .extend(addresses.iter().map(|address| address.as_ref().to_string()));
        self
    }

    /// Set the sender (From)
    #[must_use]
    pub fn from(mut self, address: &str) -> Self {
        self.from = Some(address.to_string());
        self
    }

    /// Set the reply-to address
    #[must_use]
    pub fn reply_to(mut self, address: &str) -> Self {
        self.reply_to = Some(address.to_string());
        self
    }

    /// Add a CC recipient
    #[must_use]
    pub fn cc(mut self, address: &str) -> Self {
        self.cc.push(address.to_string());
        self
    }

    /// Add a BCC recipient
    #[must_use]
    pub fn bcc(mut self, address: &str) -> Self {
        self.bcc.push(address.to_string());
        self
    }

    /// Set the email subject
    #[must_use]
    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the plain text body
    #[must_use]
    pub fn text(mut self, body: &str) -> Self {
        self.text = Some(body.to_string());
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, body: &str) -> Self {
        self.html = Some(body.to_string());
        self
    }

    /// Add a custom header
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Every recipient across To, CC and BCC
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.bcc)
            .map(String::as_str)
    }

    /// Validate the email
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - No recipients
    /// - No sender
    /// - No subject
    /// - No content (text or HTML)
    /// - Any address is malformed
    pub fn validate(&self) -> Result<(), EmailError> {
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let Some(from) = &self.from else {
            return Err(EmailError::NoSender);
        };

        if self.subject.is_none() {
            return Err(EmailError::NoSubject);
        }

        if self.text.is_none() && self.html.is_none() {
            return Err(EmailError::NoContent);
        }

        let addresses = self
            .recipients()
            .chain(std::iter::once(from.as_str()))
            .chain(self.reply_to.as_deref());
        for address in addresses {
            if !is_valid_address(address) {
                return Err(EmailError::InvalidAddress(address.to_string()));
            }
        }

        Ok(())
    }
}

/// Loose syntactic check of a bare email address
///
/// Accepts `local@domain.tld`: exactly one `@`, a non-empty local part, a
/// domain with an inner `.`, and no whitespace.
///
/// ```rust
/// use parish_notify::email::is_valid_address;
///
/// assert!(is_valid_address("office@stmarys.example.org"));
/// assert!(!is_valid_address("office@localhost"));
/// assert!(!is_valid_address("not an address"));
/// ```
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
