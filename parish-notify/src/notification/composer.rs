//! Turns a notification template and a context into an email
//!
//! Subject and heading are resolved as plain text. The body follows the
//! HTML presentation rules in [`crate::template::render_body`] and is wrapped
//! in a small HTML layout. Plain-text bodies also travel as the text
//! alternative.

use askama::Template;
use tracing::{debug, warn};

use crate::config::MailSettings;
use crate::email::{is_valid_address, Email};
use crate::error::NotifyError;
use crate::template::{
    looks_like_html, render_body_with_report, resolve, resolve_with_report, ContextValue,
    Namespace, NotificationContext,
};

use super::NotificationTemplate;

/// Header naming the form a notification was sent for
pub const FORM_HEADER: &str = "X-Parish-Form";

/// Header naming the submission a notification was sent for
pub const SUBMISSION_HEADER: &str = "X-Parish-Submission";

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ subject }}</title>
</head>
<body style="font-family: Georgia, serif; color: #222; line-height: 1.5;">
{% if !heading.is_empty() %}<h1 style="font-size: 20px;">{{ heading }}</h1>
{% endif %}<div>{{ body|safe }}</div>
{% if let Some(footer) = footer %}<hr>
<p style="font-size: 12px; color: #666;">{{ footer }}</p>
{% endif %}</body>
</html>"#,
    ext = "html"
)]
struct NotificationLayout<'a> {
    subject: &'a str,
    heading: &'a str,
    body: &'a str,
    footer: Option<&'a str>,
}

/// Resolved pieces of a notification before they become an email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    /// Single-line subject, prefix applied
    pub subject: String,
    /// Heading as plain text
    pub heading: String,
    /// Body as HTML
    pub body_html: String,
    /// Body as plain text, absent for HTML bodies
    pub body_text: Option<String>,
    /// Placeholders that rendered as empty text, without duplicates
    pub unresolved: Vec<String>,
}

/// Builds notification emails from templates
#[derive(Debug, Clone, Default)]
pub struct NotificationComposer {
    mail: MailSettings,
}

impl NotificationComposer {
    /// Create a composer sending with the given mail settings
    #[must_use]
    pub const fn new(mail: MailSettings) -> Self {
        Self { mail }
    }

    /// Mail settings used for every message
    #[must_use]
    pub const fn mail(&self) -> &MailSettings {
        &self.mail
    }

    /// Resolve subject, heading and body
    ///
    /// # Examples
    ///
    /// ```rust
    /// use parish_notify::notification::{NotificationComposer, NotificationTemplate};
    /// use parish_notify::template::NotificationContext;
    ///
    /// let template = NotificationTemplate::new(
    ///     "Request #{{entry.id}}\nfrom {{entry.first_name}}",
    ///     "{{form.title}}",
    ///     "Room: {{payload.room}}\nWhen: {{payload.when}}",
    /// );
    /// let context = NotificationContext::new()
    ///     .with_entry("id", 5)
    ///     .with_entry("first_name", "Jane")
    ///     .with_form("title", "Hall Booking")
    ///     .with_payload("room", "Parish Hall");
    ///
    /// let rendered = NotificationComposer::default().render(&template, &context);
    /// assert_eq!(rendered.subject, "Request #5 from Jane");
    /// assert_eq!(rendered.heading, "Hall Booking");
    /// assert_eq!(rendered.body_html, "Room: Parish Hall<br>\nWhen: ");
    /// assert_eq!(rendered.unresolved, ["{{payload.when}}"]);
    /// ```
    #[must_use]
    pub fn render(&self, template: &NotificationTemplate, context: &NotificationContext) -> RenderedNotification {
        let subject = resolve_with_report(&template.subject, context);
        let heading = resolve_with_report(&template.heading, context);
        let body = render_body_with_report(&template.body, context);

        let body_text = if looks_like_html(&template.body) {
            None
        } else {
            Some(resolve(&template.body, context))
        };

        let mut unresolved: Vec<String> = Vec::new();
        for token in subject
            .unresolved
            .into_iter()
            .chain(heading.unresolved)
            .chain(body.unresolved)
        {
            if !unresolved.contains(&token) {
                unresolved.push(token);
            }
        }

        RenderedNotification {
            subject: self.subject_line(&subject.output),
            heading: heading.output.trim().to_string(),
            body_html: body.output,
            body_text,
            unresolved,
        }
    }

    fn subject_line(&self, resolved: &str) -> String {
        let subject = resolved.split_whitespace().collect::<Vec<_>>().join(" ");
        match self.mail.subject_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix} {subject}"),
            _ => subject,
        }
    }

    /// Build the staff notification
    ///
    /// Address entries are resolved like any other text. An entry may resolve
    /// to several addresses separated by `,` or `;`. Entries that resolve to
    /// nothing are skipped and malformed ones are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Email`] when the layout fails to render or the
    /// finished email is invalid, most often because no recipient survived.
    pub fn compose(&self, template: &NotificationTemplate, context: &NotificationContext) -> Result<Email, NotifyError> {
        let rendered = self.render(template, context);
        log_unresolved(&rendered, context);

        let mut email = self.envelope(&rendered, context)?;
        for address in resolve_addresses(&template.recipients, context) {
            email = email.to(&address);
        }
        for address in resolve_addresses(&template.cc, context) {
            email = email.cc(&address);
        }
        for address in resolve_addresses(&template.bcc, context) {
            email = email.bcc(&address);
        }

        let reply_to = first_address(template.reply_to.as_ref(), context)
            .or_else(|| first_address(self.mail.reply_to.as_ref(), context));
        if let Some(reply_to) = reply_to {
            email = email.reply_to(&reply_to);
        }

        email.validate()?;
        Ok(email)
    }

    /// Build the copy sent to the submitter, if the template asks for one
    ///
    /// Returns `Ok(None)` when confirmations are off or `entry.email` is
    /// missing or malformed.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Email`] when the layout fails to render or the
    /// finished email is invalid.
    pub fn compose_confirmation(
        &self,
        template: &NotificationTemplate,
        context: &NotificationContext,
    ) -> Result<Option<Email>, NotifyError> {
        if !template.send_confirmation {
            return Ok(None);
        }
        let Some(submitter) = context.submitter_email().filter(|email| is_valid_address(email)) else {
            debug!("No usable submitter address, skipping confirmation");
            return Ok(None);
        };

        let rendered = self.render(template, context);
        let mut email = self.envelope(&rendered, context)?.to(submitter);
        if let Some(reply_to) = first_address(self.mail.reply_to.as_ref(), context) {
            email = email.reply_to(&reply_to);
        }

        email.validate()?;
        Ok(Some(email))
    }

    /// Sender, subject, bodies and tracking headers shared by both messages
    fn envelope(&self, rendered: &RenderedNotification, context: &NotificationContext) -> Result<Email, NotifyError> {
        let layout = NotificationLayout {
            subject: &rendered.subject,
            heading: &rendered.heading,
            body: &rendered.body_html,
            footer: self.mail.footer.as_deref(),
        };
        let html = layout.render().map_err(crate::email::EmailError::from)?;

        let mut email = Email::new()
            .from(&self.mail.from_address)
            .subject(&rendered.subject)
            .html(&html);
        if let Some(text) = &rendered.body_text {
            email = email.text(text);
        }
        if let Some(form) = context.get(Namespace::Form, "slug").filter(|value| !value.is_null()) {
            email = email.header(FORM_HEADER, &form.to_string());
        }
        if let Some(id) = context.get(Namespace::Entry, "id").filter(|value| !value.is_null()) {
            email = email.header(SUBMISSION_HEADER, &id.to_string());
        }
        Ok(email)
    }
}

fn log_unresolved(rendered: &RenderedNotification, context: &NotificationContext) {
    if rendered.unresolved.is_empty() {
        return;
    }
    let form = context
        .get(Namespace::Form, "slug")
        .map(ContextValue::to_string)
        .unwrap_or_default();
    debug!(form = %form, unresolved = ?rendered.unresolved, "Placeholders rendered as empty text");
}

fn resolve_addresses(entries: &[String], context: &NotificationContext) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| {
            resolve(entry, context)
                .split([',', ';'])
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|address| {
            let valid = is_valid_address(address);
            if !valid {
                warn!(address = %address, "Dropping malformed notification address");
            }
            valid
        })
        .collect()
}

/// First usable address an optional entry resolves to
fn first_address(entry: Option<&String>, context: &NotificationContext) -> Option<String> {
    entry.and_then(|entry| resolve_addresses(std::slice::from_ref(entry), context).into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::EmailError;

    fn mail() -> MailSettings {
        MailSettings {
            from_address: "forms@stmarys.example.org".to_string(),
            reply_to: Some("office@stmarys.example.org".to_string()),
            subject_prefix: Some("[St. Mary's]".to_string()),
            footer: Some("St. Mary's Parish Office".to_string()),
        }
    }

    fn context() -> NotificationContext {
        NotificationContext::new()
            .with_entry("id", 31)
            .with_entry("first_name", "Jane")
            .with_entry("email", "jane@example.com")
            .with_form("slug", "work-request")
            .with_form("title", "Work Request")
            .with_payload("details", "Leaking tap\nin the vestry")
            .with_payload("coordinator", "sam@example.org; pat@example.org")
    }

    fn template() -> NotificationTemplate {
        NotificationTemplate::new(
            "{{form.title}} #{{entry.id}}",
            "New request from {{entry.first_name}}",
            "Details:\n{{payload.details}}",
        )
        .recipient("facilities@stmarys.example.org")
    }

    #[test]
    fn test_subject_prefix_and_single_line() {
        let composer = NotificationComposer::new(mail());
        let template = NotificationTemplate::new("  Hello\r\n  {{entry.first_name}} ", "", "");
        assert_eq!(composer.render(&template, &context()).subject, "[St. Mary's] Hello Jane");
    }

    #[test]
    fn test_blank_prefix_ignored() {
        let mut settings = mail();
        settings.subject_prefix = Some("  ".to_string());
        let rendered = NotificationComposer::new(settings).render(&template(), &context());
        assert_eq!(rendered.subject, "Work Request #31");
    }

    #[test]
    fn test_compose_plain_body() {
        let email = NotificationComposer::new(mail()).compose(&template(), &context()).unwrap();

        assert_eq!(email.to, ["facilities@stmarys.example.org"]);
        assert_eq!(email.from.as_deref(), Some("forms@stmarys.example.org"));
        assert_eq!(email.subject.as_deref(), Some("[St. Mary's] Work Request #31"));
        assert_eq!(email.reply_to.as_deref(), Some("office@stmarys.example.org"));
        assert_eq!(email.text.as_deref(), Some("Details:\nLeaking tap\nin the vestry"));

        let html = email.html.unwrap();
        assert!(html.contains("<h1 style=\"font-size: 20px;\">New request from Jane</h1>"));
        assert!(html.contains("<div>Details:<br>\nLeaking tap<br>\nin the vestry</div>"));
        assert!(html.contains("St. Mary&#x27;s Parish Office") || html.contains("St. Mary&#39;s Parish Office"));
        assert!(email
            .headers
            .contains(&(FORM_HEADER.to_string(), "work-request".to_string())));
        assert!(email
            .headers
            .contains(&(SUBMISSION_HEADER.to_string(), "31".to_string())));
    }

    #[test]
    fn test_compose_html_body_has_no_text_part() {
        let template = NotificationTemplate::new("s", "", "<p>{{payload.details}}</p>")
            .recipient("facilities@stmarys.example.org");
        let email = NotificationComposer::new(mail()).compose(&template, &context()).unwrap();

        assert!(email.text.is_none());
        assert!(email
            .html
            .unwrap()
            .contains("<div><p>Leaking tap\nin the vestry</p></div>"));
    }

    #[test]
    fn test_heading_is_escaped_by_layout() {
        let context = context().with_entry("first_name", "<b>Jane</b>");
        let email = NotificationComposer::new(mail()).compose(&template(), &context).unwrap();
        let html = email.html.unwrap();
        assert!(html.contains("&lt;b&gt;Jane&lt;"));
        assert!(!html.contains("<b>Jane</b>"));
    }

    #[test]
    fn test_empty_heading_omitted() {
        let template = NotificationTemplate::new("s", "  ", "b").recipient("a@example.org");
        let email = NotificationComposer::new(mail()).compose(&template, &context()).unwrap();
        assert!(!email.html.unwrap().contains("<h1"));
    }

    #[test]
    fn test_placeholder_addresses() {
        let template = template()
            .cc("{{payload.coordinator}}")
            .bcc("{{payload.missing}}")
            .reply_to("{{entry.email}}");
        let email = NotificationComposer::new(mail()).compose(&template, &context()).unwrap();

        assert_eq!(email.cc, ["sam@example.org", "pat@example.org"]);
        assert!(email.bcc.is_empty());
        assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_malformed_reply_to_falls_back() {
        let context = context().with_entry("email", "not-an-address");
        let template = template().reply_to("{{entry.email}}");
        let email = NotificationComposer::new(mail()).compose(&template, &context).unwrap();
        assert_eq!(email.reply_to.as_deref(), Some("office@stmarys.example.org"));
    }

    #[test]
    fn test_default_reply_to_placeholder_is_resolved() {
        let mut settings = mail();
        settings.reply_to = Some("{{entry.email}}".to_string());
        let composer = NotificationComposer::new(settings);

        let email = composer.compose(&template(), &context()).unwrap();
        assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));

        let confirmation = composer
            .compose_confirmation(&template().with_confirmation(), &context())
            .unwrap()
            .unwrap();
        assert_eq!(confirmation.reply_to.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_default_reply_to_unresolved_is_omitted() {
        let mut settings = mail();
        settings.reply_to = Some("{{payload.missing}}".to_string());
        let email = NotificationComposer::new(settings).compose(&template(), &context()).unwrap();
        assert!(email.reply_to.is_none());
    }

    #[test]
    fn test_no_surviving_recipient_is_an_error() {
        let template = NotificationTemplate::new("s", "", "b").recipient("{{payload.nobody}}");
        let result = NotificationComposer::new(mail()).compose(&template, &context());
        assert!(matches!(result, Err(NotifyError::Email(EmailError::NoRecipients))));
    }

    #[test]
    fn test_unresolved_deduplicated() {
        let template = NotificationTemplate::new("{{entry.x}}", "{{entry.x}}", "{{form.y}}");
        let rendered = NotificationComposer::default().render(&template, &context());
        assert_eq!(rendered.unresolved, ["{{entry.x}}", "{{form.y}}"]);
    }

    #[test]
    fn test_confirmation() {
        let composer = NotificationComposer::new(mail());

        assert!(composer.compose_confirmation(&template(), &context()).unwrap().is_none());

        let email = composer
            .compose_confirmation(&template().with_confirmation(), &context())
            .unwrap()
            .unwrap();
        assert_eq!(email.to, ["jane@example.com"]);
        assert!(email.cc.is_empty());
        assert_eq!(email.reply_to.as_deref(), Some("office@stmarys.example.org"));
        assert_eq!(email.subject.as_deref(), Some("[St. Mary's] Work Request #31"));
    }

    #[test]
    fn test_confirmation_without_submitter_address() {
        let composer = NotificationComposer::new(mail());
        let context = context().with_entry("email", "");
        let result = composer.compose_confirmation(&template().with_confirmation(), &context);
        assert!(result.unwrap().is_none());
    }
}
