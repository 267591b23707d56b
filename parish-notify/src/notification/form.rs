//! Forms and the submissions made to them

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::template::{ContextValue, NotificationContext};

/// Kind of form a submission belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormKind {
    /// Facilities and maintenance work requests
    #[default]
    WorkRequest,
    /// Seasonal service-time sign-up forms
    ServiceTime,
    /// Any other form, identified by its slug
    Other(String),
}

impl FormKind {
    /// Snake-case name used in configuration and templates
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::WorkRequest => "work_request",
            Self::ServiceTime => "service_time",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FormKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "work_request" => Self::WorkRequest,
            "service_time" => Self::ServiceTime,
            _ => Self::Other(kind),
        }
    }
}

impl From<FormKind> for String {
    fn from(kind: FormKind) -> Self {
        match kind {
            FormKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// Metadata describing a form, exposed to templates as `form.*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMeta {
    /// URL-safe identifier, also the key of the form's notification template
    pub slug: String,
    /// Human readable title
    pub title: String,
    /// Kind of form
    #[serde(default)]
    pub kind: FormKind,
    /// Season a service-time form applies to, e.g. "Advent 2026"
    #[serde(default)]
    pub season: Option<String>,
    /// Short description shown to submitters
    #[serde(default)]
    pub description: Option<String>,
}

impl FormMeta {
    /// Create form metadata with no season or description
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>, kind: FormKind) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            kind,
            season: None,
            description: None,
        }
    }

    /// Set the season
    #[must_use]
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A stored submission to a form, exposed to templates as `entry.*` and
/// `payload.*`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission identifier
    pub id: u64,
    /// Slug of the form this was submitted to
    pub form_slug: String,
    /// Submitter's first name
    pub first_name: String,
    /// Submitter's last name
    pub last_name: String,
    /// Submitter's email address
    pub email: String,
    /// Submitter's phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// When the submission was received
    pub submitted_at: DateTime<Utc>,
    /// Free-form answers specific to the form
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Submission {
    /// First and last name joined by a space, trimmed
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

impl NotificationContext {
    /// Build the context for one submission to one form
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use parish_notify::notification::{FormKind, FormMeta, Submission};
    /// use parish_notify::template::{resolve, NotificationContext};
    ///
    /// let form = FormMeta::new("work-request", "Work Request", FormKind::WorkRequest);
    /// let submission = Submission {
    ///     id: 12,
    ///     form_slug: "work-request".into(),
    ///     first_name: "Jane".into(),
    ///     last_name: "Doe".into(),
    ///     email: "jane@example.com".into(),
    ///     phone: None,
    ///     submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    ///     payload: Default::default(),
    /// };
    ///
    /// let context = NotificationContext::for_submission(&form, &submission);
    /// assert_eq!(
    ///     resolve("{{form.title}} #{{entry.id}} from {{entry.full_name}} on {{entry.submitted_on}}", &context),
    ///     "Work Request #12 from Jane Doe on March 1, 2026"
    /// );
    /// ```
    #[must_use]
    pub fn for_submission(form: &FormMeta, submission: &Submission) -> Self {
        Self::new()
            .with_entry("id", submission.id)
            .with_entry("first_name", submission.first_name.as_str())
            .with_entry("last_name", submission.last_name.as_str())
            .with_entry("full_name", submission.full_name())
            .with_entry("email", submission.email.as_str())
            .with_entry("phone", submission.phone.clone())
            .with_entry("submitted_at", submission.submitted_at.to_rfc3339())
            .with_entry(
                "submitted_on",
                submission.submitted_at.format("%B %-d, %Y").to_string(),
            )
            .with_form("slug", form.slug.as_str())
            .with_form("title", form.title.as_str())
            .with_form("kind", form.kind.as_str())
            .with_form("season", form.season.clone())
            .with_form("description", form.description.clone())
            .with_payload_map(submission.payload.clone())
    }

    /// Submitter address from `entry.email`, when present and non-empty
    #[must_use]
    pub fn submitter_email(&self) -> Option<&str> {
        self.entry
            .get("email")
            .and_then(ContextValue::as_str)
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
