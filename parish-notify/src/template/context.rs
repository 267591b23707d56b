//! Namespaced values available to notification templates
//!
//! A [`NotificationContext`] is built once per outgoing message and thrown
//! away afterwards. Placeholders select one of three namespaces:
//!
//! - `entry.*`: fields of the submission being reported
//! - `form.*`: metadata of the form it was submitted to
//! - `payload.*`: the free-form answers stored with the submission

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContextValue;

/// Values of a single namespace, keyed by field name
pub type Fields = BTreeMap<String, ContextValue>;

/// Top-level grouping selected by the part of a placeholder before the `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Submission fields (`entry.*`)
    Entry,
    /// Form metadata (`form.*`)
    Form,
    /// Free-form submission answers (`payload.*`)
    Payload,
}

impl Namespace {
    /// All namespaces in lookup order
    pub const ALL: [Self; 3] = [Self::Entry, Self::Form, Self::Payload];

    /// Name as written in placeholders
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Form => "form",
            Self::Payload => "payload",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown namespace name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown placeholder namespace: {0:?}")]
pub struct UnknownNamespace(pub String);

impl FromStr for Namespace {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(Self::Entry),
            "form" => Ok(Self::Form),
            "payload" => Ok(Self::Payload),
            other => Err(UnknownNamespace(other.to_string())),
        }
    }
}

/// Per-send collection of namespaced values
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::{ContextValue, Namespace, NotificationContext};
///
/// let context = NotificationContext::new()
///     .with_entry("first_name", "Jane")
///     .with_payload("eventName", "Sunday Service");
///
/// assert_eq!(
///     context.get(Namespace::Entry, "first_name"),
///     Some(&ContextValue::from("Jane"))
/// );
/// assert!(context.lookup("bogus", "key").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationContext {
    /// Submission fields
    pub entry: Fields,
    /// Form metadata
    pub form: Fields,
    /// Free-form submission answers
    pub payload: Fields,
}

impl NotificationContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `entry.*` value
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(Namespace::Entry, key, value);
        self
    }

    /// Add a `form.*` value
    #[must_use]
    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(Namespace::Form, key, value);
        self
    }

    /// Add a `payload.*` value
    #[must_use]
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(Namespace::Payload, key, value);
        self
    }

    /// Replace the payload namespace with a stored key/value mapping
    #[must_use]
    pub fn with_payload_map(mut self, payload: serde_json::Map<String, serde_json::Value>) -> Self {
        self.payload = payload
            .into_iter()
            .map(|(key, value)| (key, ContextValue::from(value)))
            .collect();
        self
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(
        &mut self,
        namespace: Namespace,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) {
        self.fields_mut(namespace).insert(key.into(), value.into());
    }

    /// Values of one namespace
    #[must_use]
    pub const fn fields(&self, namespace: Namespace) -> &Fields {
        match namespace {
            Namespace::Entry => &self.entry,
            Namespace::Form => &self.form,
            Namespace::Payload => &self.payload,
        }
    }

    fn fields_mut(&mut self, namespace: Namespace) -> &mut Fields {
        match namespace {
            Namespace::Entry => &mut self.entry,
            Namespace::Form => &mut self.form,
            Namespace::Payload => &mut self.payload,
        }
    }

    /// Look up a value in a known namespace
    #[must_use]
    pub fn get(&self, namespace: Namespace, key: &str) -> Option<&ContextValue> {
        self.fields(namespace).get(key)
    }

    /// Look up a value by the namespace name written in a placeholder
    ///
    /// Unknown namespaces yield `None`, like missing keys.
    #[must_use]
    pub fn lookup(&self, namespace: &str, key: &str) -> Option<&ContextValue> {
        namespace
            .parse::<Namespace>()
            .ok()
            .and_then(|namespace| self.get(namespace, key))
    }

    /// Total number of values across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.entry.len() + self.form.len() + self.payload.len()
    }

    /// Whether no namespace holds a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_namespace_parse() {
        assert_eq!("entry".parse::<Namespace>(), Ok(Namespace::Entry));
        assert_eq!("form".parse::<Namespace>(), Ok(Namespace::Form));
        assert_eq!("payload".parse::<Namespace>(), Ok(Namespace::Payload));
        assert!("Entry".parse::<Namespace>().is_err());
        assert!(" entry".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_namespace_display_matches_parse() {
        for namespace in Namespace::ALL {
            assert_eq!(namespace.to_string().parse::<Namespace>(), Ok(namespace));
        }
    }

    #[test]
    fn test_builder_and_lookup() {
        let context = NotificationContext::new()
            .with_entry("id", 7)
            .with_form("title", "Work Request")
            .with_payload("room", "Fellowship Hall");

        assert_eq!(context.len(), 3);
        assert_eq!(context.lookup("entry", "id"), Some(&ContextValue::Integer(7)));
        assert_eq!(
            context.lookup("form", "title"),
            Some(&ContextValue::from("Work Request"))
        );
        assert!(context.lookup("payload", "missing").is_none());
        assert!(context.lookup("user", "id").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut context = NotificationContext::new();
        context.insert(Namespace::Entry, "email", "old@example.org");
        context.insert(Namespace::Entry, "email", "new@example.org");

        assert_eq!(context.entry.len(), 1);
        assert_eq!(
            context.get(Namespace::Entry, "email"),
            Some(&ContextValue::from("new@example.org"))
        );
    }

    #[test]
    fn test_payload_map() {
        let payload = json!({"eventName": "Advent Concert", "attendees": 120})
            .as_object()
            .cloned()
            .unwrap();

        let context = NotificationContext::new()
            .with_payload("stale", "value")
            .with_payload_map(payload);

        assert!(context.lookup("payload", "stale").is_none());
        assert_eq!(
            context.lookup("payload", "attendees"),
            Some(&ContextValue::Integer(120))
        );
    }

    #[test]
    fn test_deserialize_partial_context() {
        let context: NotificationContext =
            serde_json::from_value(json!({"entry": {"id": 3, "phone": null}})).unwrap();

        assert_eq!(context.entry.len(), 2);
        assert!(context.form.is_empty());
        assert!(context.payload.is_empty());
        assert_eq!(context.lookup("entry", "phone"), Some(&ContextValue::Null));
    }

    #[test]
    fn test_empty() {
        assert!(NotificationContext::new().is_empty());
        assert!(!NotificationContext::new().with_form("slug", "x").is_empty());
    }
}
