//! Per-form notification template definitions

use serde::{Deserialize, Serialize};

use crate::template::placeholders;

/// What staff configured for a form's notification email
///
/// Every text field may contain `{{namespace.key}}` placeholders, including
/// the address lists, so a template can route a request to
/// `{{payload.coordinator_email}}` or reply to `{{entry.email}}`.
///
/// ```toml
/// [templates.work-request]
/// subject = "Work request #{{entry.id}}: {{payload.summary}}"
/// heading = "New request from {{entry.full_name}}"
/// body = """
/// Location: {{payload.location}}
/// Details: {{payload.details}}
/// """
/// recipients = ["facilities@example.org"]
/// reply_to = "{{entry.email}}"
/// send_confirmation = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    /// Subject line
    pub subject: String,

    /// Heading shown above the body
    #[serde(default)]
    pub heading: String,

    /// Message body, plain text or HTML
    pub body: String,

    /// Staff addresses that receive the notification
    #[serde(default)]
    pub recipients: Vec<String>,

    /// CC addresses
    #[serde(default)]
    pub cc: Vec<String>,

    /// BCC addresses
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Reply-To address, overriding the mail settings default
    #[serde(default)]
    pub reply_to: Option<String>,

    /// Also send a copy to the submitter's `entry.email`
    #[serde(default)]
    pub send_confirmation: bool,

    /// Disabled templates send nothing
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl NotificationTemplate {
    /// Create an enabled template with no recipients
    #[must_use]
    pub fn new(subject: impl Into<String>, heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            heading: heading.into(),
            body: body.into(),
            recipients: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            send_confirmation: false,
            enabled: true,
        }
    }

    /// Add a staff recipient
    #[must_use]
    pub fn recipient(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(address.into());
        self
    }

    /// Add a CC address
    #[must_use]
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a BCC address
    #[must_use]
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the Reply-To address
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Send a confirmation copy to the submitter
    #[must_use]
    pub const fn with_confirmation(mut self) -> Self {
        self.send_confirmation = true;
        self
    }

    /// Disable the template
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Distinct `namespace.key` paths referenced anywhere in the template
    ///
    /// ```rust
    /// use parish_notify::notification::NotificationTemplate;
    ///
    /// let template = NotificationTemplate::new(
    ///     "Request #{{entry.id}}",
    ///     "{{form.title}}",
    ///     "{{entry.id}}: {{payload.details}}",
    /// );
    /// assert_eq!(template.referenced_paths(), ["entry.id", "form.title", "payload.details"]);
    /// ```
    #[must_use]
    pub fn referenced_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .texts()
            .flat_map(placeholders)
            .map(|placeholder| placeholder.path())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    fn texts(&self) -> impl Iterator<Item = &str> {
        [self.subject.as_str(), self.heading.as_str(), self.body.as_str()]
            .into_iter()
            .chain(self.recipients.iter().map(String::as_str))
            .chain(self.cc.iter().map(String::as_str))
            .chain(self.bcc.iter().map(String::as_str))
            .chain(self.reply_to.as_deref())
    }
}
