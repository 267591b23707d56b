//! HTML presentation of notification bodies
//!
//! Staff write bodies either as HTML or as plain text. A body that already
//! contains markup is kept as written and only the substituted values are
//! escaped. Plain text is escaped as a whole and its line breaks become
//! `<br>` tags.

use once_cell::sync::Lazy;
use regex::Regex;

use super::resolver::{Resolution, TemplateResolver};
use super::NotificationContext;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?|/[A-Za-z][A-Za-z0-9-]*\s*)>")
        .expect("tag pattern is valid")
});

/// Escape a string for safe use in HTML content and attributes
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::escape_html;
///
/// assert_eq!(escape_html("<script>alert('x')</script>"),
///            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;");
/// assert_eq!(escape_html("Fish & Chips"), "Fish &amp; Chips");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Turn every line break (`\r\n`, `\n` or `\r`) into `<br>` followed by `\n`
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::nl2br;
///
/// assert_eq!(nl2br("one\r\ntwo\nthree"), "one<br>\ntwo<br>\nthree");
/// ```
#[must_use]
pub fn nl2br(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("<br>\n");
            }
            '\n' => out.push_str("<br>\n"),
            other => out.push(other),
        }
    }
    out
}

/// Whether `s` contains something that looks like an HTML tag
///
/// ```rust
/// use parish_notify::template::looks_like_html;
///
/// assert!(looks_like_html("<p>Hello</p>"));
/// assert!(looks_like_html("Line<br/>break"));
/// assert!(!looks_like_html("Budget < 500 and > 100"));
/// ```
#[must_use]
pub fn looks_like_html(s: &str) -> bool {
    TAG.is_match(s)
}

/// Resolve a body template into HTML, reporting unresolved placeholders
///
/// The markup check runs on the template, so values supplied by a submitter
/// never switch a plain-text body into HTML mode.
#[must_use]
pub fn render_body_with_report(template: &str, context: &NotificationContext) -> Resolution {
    if looks_like_html(template) {
        return TemplateResolver::html().resolve_with_report(template, context);
    }

    let Resolution { output, unresolved } =
        TemplateResolver::plain().resolve_with_report(template, context);
    Resolution {
        output: nl2br(&escape_html(&output)),
        unresolved,
    }
}

/// Resolve a body template into HTML
///
/// # Examples
///
/// ```rust
/// use parish_notify::template::{render_body, NotificationContext};
///
/// let context = NotificationContext::new().with_entry("first_name", "Jane");
///
/// assert_eq!(
///     render_body("Hi {{entry.first_name}},\nBring snacks & drinks", &context),
///     "Hi Jane,<br>\nBring snacks &amp; drinks"
/// );
/// assert_eq!(
///     render_body("<p>Hi {{entry.first_name}}</p>", &context),
///     "<p>Hi Jane</p>"
/// );
/// ```
#[must_use]
pub fn render_body(template: &str, context: &NotificationContext) -> String {
    render_body_with_report(template, context).output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Hello, world!"), "Hello, world!");
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html(r#"a="b""#), "a=&quot;b&quot;");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_nl2br_variants() {
        assert_eq!(nl2br("a\nb"), "a<br>\nb");
        assert_eq!(nl2br("a\r\nb"), "a<br>\nb");
        assert_eq!(nl2br("a\rb"), "a<br>\nb");
        assert_eq!(nl2br("a\n\nb"), "a<br>\n<br>\nb");
        assert_eq!(nl2br("no breaks"), "no breaks");
    }

    #[test]
    fn test_markup_detection() {
        assert!(looks_like_html("<p>"));
        assert!(looks_like_html("</strong>"));
        assert!(looks_like_html(r#"<a href="https://example.org">link</a>"#));
        assert!(looks_like_html("<br />"));
        assert!(!looks_like_html("plain text"));
        assert!(!looks_like_html("a <= b"));
        assert!(!looks_like_html("<3 from the office"));
        assert!(!looks_like_html("< p>"));
    }

    #[test]
    fn test_plain_body_is_escaped_and_wrapped() {
        let context = NotificationContext::new();
        assert_eq!(render_body("a<b\nc", &context), "a&lt;b<br>\nc");
    }

    #[test]
    fn test_html_body_kept_verbatim() {
        let template = "<h2>Request</h2>\n<p>Details below</p>";
        assert_eq!(render_body(template, &NotificationContext::new()), template);
    }

    #[test]
    fn test_html_body_escapes_values() {
        let context = NotificationContext::new().with_payload("details", "<script>x</script>");
        assert_eq!(
            render_body("<p>{{payload.details}}</p>", &context),
            "<p>&lt;script&gt;x&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_value_markup_does_not_switch_mode() {
        let context = NotificationContext::new().with_payload("details", "<b>bold</b>\nnext");
        assert_eq!(
            render_body("Details: {{payload.details}}", &context),
            "Details: &lt;b&gt;bold&lt;/b&gt;<br>\nnext"
        );
    }

    #[test]
    fn test_report_carries_unresolved() {
        let resolution = render_body_with_report("Hi {{entry.name}}\n", &NotificationContext::new());
        assert_eq!(resolution.output, "Hi <br>\n");
        assert_eq!(resolution.unresolved, ["{{entry.name}}"]);
    }
}
