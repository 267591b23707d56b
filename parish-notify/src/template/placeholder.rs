//! Placeholder token scanning
//!
//! A placeholder is `{{namespace.key}}`. Braces never nest: the body of a
//! token may not contain `{` or `}`, so `{{a{{entry.id}}` yields the single
//! token `{{entry.id}}` and keeps `{{a` as literal text. An opening `{{`
//! without a matching `}}` is never a token.
//!
//! Namespace and key are trimmed around the first `.`, which makes
//! `{{ entry.id }}` equivalent to `{{entry.id}}`. Everything after the first
//! `.` is the key, so `{{payload.a.b}}` looks up the key `a.b`.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("placeholder pattern is valid"));

/// A placeholder token found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Token text as written, braces included
    pub raw: String,
    /// Trimmed namespace name (the whole body when it has no `.`)
    pub namespace: String,
    /// Trimmed key, empty when the body has no `.`
    pub key: String,
    /// Byte range of the token in the template
    pub span: Range<usize>,
}

impl Placeholder {
    fn from_body(raw: &str, body: &str, span: Range<usize>) -> Self {
        let (namespace, key) = body.split_once('.').unwrap_or((body, ""));
        Self {
            raw: raw.to_string(),
            namespace: namespace.trim().to_string(),
            key: key.trim().to_string(),
            span,
        }
    }

    /// Dotted `namespace.key` form without braces or padding
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.{}", self.namespace, self.key)
    }
}

/// List every placeholder token in `template`, in order of appearance
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::placeholders;
///
/// let found = placeholders("Hi {{entry.first_name}}, re: {{ form.title }}");
/// let paths: Vec<_> = found.iter().map(|p| p.path()).collect();
/// assert_eq!(paths, ["entry.first_name", "form.title"]);
/// ```
#[must_use]
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    TOKEN
        .captures_iter(template)
        .filter_map(|captures| {
            let token = captures.get(0)?;
            let body = captures.get(1)?;
            Some(Placeholder::from_body(
                token.as_str(),
                body.as_str(),
                token.range(),
            ))
        })
        .collect()
}

/// Whether `template` contains at least one placeholder token
#[must_use]
pub fn has_placeholders(template: &str) -> bool {
    TOKEN.is_match(template)
}
