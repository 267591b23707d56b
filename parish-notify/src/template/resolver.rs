//! Placeholder substitution
//!
//! Resolution never fails. A placeholder whose namespace is unknown, whose
//! key is missing, or whose body has no `.` is replaced by an empty string
//! and reported in [`Resolution::unresolved`]. A `null` value is present and
//! also renders as an empty string, but is not reported.

use super::html::escape_html;
use super::placeholder::placeholders;
use super::NotificationContext;

/// How substituted values are written into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Values are inserted as-is
    #[default]
    None,
    /// Values are HTML-escaped, template text is left untouched
    Html,
}

/// Output of a resolution together with the placeholders that fell back to
/// an empty string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Fully substituted text
    pub output: String,
    /// Raw text of each unresolved placeholder, in order of appearance
    pub unresolved: Vec<String>,
}

impl Resolution {
    /// Whether every placeholder found a value
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Substitutes `{{namespace.key}}` placeholders from a [`NotificationContext`]
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::{NotificationContext, TemplateResolver};
///
/// let context = NotificationContext::new().with_entry("first_name", "<Jane>");
///
/// let plain = TemplateResolver::plain().resolve("<b>{{entry.first_name}}</b>", &context);
/// assert_eq!(plain, "<b><Jane></b>");
///
/// let html = TemplateResolver::html().resolve("<b>{{entry.first_name}}</b>", &context);
/// assert_eq!(html, "<b>&lt;Jane&gt;</b>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver {
    escape: Escape,
}

impl TemplateResolver {
    /// Resolver that inserts values verbatim
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            escape: Escape::None,
        }
    }

    /// Resolver that HTML-escapes inserted values
    #[must_use]
    pub const fn html() -> Self {
        Self {
            escape: Escape::Html,
        }
    }

    /// Escape mode of this resolver
    #[must_use]
    pub const fn escape(&self) -> Escape {
        self.escape
    }

    /// Substitute every placeholder in `template`
    #[must_use]
    pub fn resolve(&self, template: &str, context: &NotificationContext) -> String {
        self.resolve_with_report(template, context).output
    }

    /// Substitute every placeholder and report the ones without a value
    #[must_use]
    pub fn resolve_with_report(&self, template: &str, context: &NotificationContext) -> Resolution {
        let mut output = String::with_capacity(template.len());
        let mut unresolved = Vec::new();
        let mut cursor = 0;

        for placeholder in placeholders(template) {
            output.push_str(&template[cursor..placeholder.span.start]);
            match context.lookup(&placeholder.namespace, &placeholder.key) {
                Some(value) => {
                    let text = value.to_string();
                    match self.escape {
                        Escape::None => output.push_str(&text),
                        Escape::Html => output.push_str(&escape_html(&text)),
                    }
                }
                None => unresolved.push(placeholder.raw),
            }
            cursor = placeholder.span.end;
        }
        output.push_str(&template[cursor..]);

        Resolution { output, unresolved }
    }
}

/// Substitute placeholders in `template`, inserting values verbatim
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::{resolve, NotificationContext};
///
/// let context = NotificationContext::new()
///     .with_entry("first_name", "Jane")
///     .with_payload("eventName", "Sunday Service");
///
/// assert_eq!(
///     resolve("Hello {{entry.first_name}} - {{payload.eventName}}", &context),
///     "Hello Jane - Sunday Service"
/// );
/// assert_eq!(resolve("{{bogus.key}}", &context), "");
/// ```
#[must_use]
pub fn resolve(template: &str, context: &NotificationContext) -> String {
    TemplateResolver::plain().resolve(template, context)
}

/// Like [`resolve`], also listing placeholders that had no value
#[must_use]
pub fn resolve_with_report(template: &str, context: &NotificationContext) -> Resolution {
    TemplateResolver::plain().resolve_with_report(template, context)
}
