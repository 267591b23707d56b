//! Console backend for development
//!
//! Prints notification emails instead of delivering them, so templates can be
//! previewed without a mail server.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::email::{Email, EmailError, EmailSender};

const WIDTH: usize = 51;

/// Console email backend for development
///
/// # Examples
///
/// ```rust
/// use parish_notify::email::{ConsoleBackend, Email, EmailSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = ConsoleBackend::new();
///
/// let email = Email::new()
///     .to("office@example.org")
///     .from("forms@example.org")
///     .subject("Hello!")
///     .text("Hello, World!");
///
/// backend.send(email).await?; // Prints to console
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleBackend {
    /// Print every line of the HTML body instead of the first few
    verbose: bool,
}

impl ConsoleBackend {
    /// Create a new console backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verbose console backend that prints full email content
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    fn render(&self, email: &Email, from: &str, subject: &str) -> String {
        let rule = "─".repeat(WIDTH + 2);
        let mut out = Vec::new();

        out.push(format!("╭{rule}╮"));
        out.push(row("📧 Console Email"));
        out.push(format!("├{rule}┤"));
        out.push(row(&format!("From:    {from}")));
        out.push(row(&format!("To:      {}", email.to.join(", "))));
        if !email.cc.is_empty() {
            out.push(row(&format!("CC:      {}", email.cc.join(", "))));
        }
        if !email.bcc.is_empty() {
            out.push(row(&format!("BCC:     {}", email.bcc.join(", "))));
        }
        if let Some(reply_to) = &email.reply_to {
            out.push(row(&format!("Reply-To: {reply_to}")));
        }
        out.push(row(&format!("Subject: {subject}")));
        out.push(format!("├{rule}┤"));

        if let Some(text) = &email.text {
            out.push(row("Plain Text Content:"));
            out.push(format!("├{rule}┤"));
            out.extend(text.lines().map(row));
            out.push(format!("├{rule}┤"));
        }

        if let Some(html) = &email.html {
            let limit = if self.verbose { usize::MAX } else { 5 };
            out.push(row("HTML Content:"));
            out.push(format!("├{rule}┤"));
            out.extend(html.lines().take(limit).map(row));
            if html.lines().count() > limit {
                out.push(row("... (truncated)"));
            }
            out.push(format!("├{rule}┤"));
        }

        out.push(format!("╰{rule}╯"));
        out.join("\n")
    }
}

/// Pad or truncate one line of the box, counting characters rather than bytes
fn row(line: &str) -> String {
    let shown = if line.chars().count() > WIDTH {
        let cut: String = line.chars().take(WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    };
    format!("│ {shown:<WIDTH$} │")
}

#[async_trait]
impl EmailSender for ConsoleBackend {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        email.validate()?;

        let from = email.from.as_deref().ok_or(EmailError::NoSender)?;
        let subject = email.subject.as_deref().ok_or(EmailError::NoSubject)?;

        info!(
            from = %from,
            to = ?email.to,
            cc = ?email.cc,
            bcc = ?email.bcc,
            subject = %subject,
            "Console email sent"
        );

        if self.verbose {
            debug!(
                reply_to = ?email.reply_to,
                has_html = email.html.is_some(),
                has_text = email.text.is_some(),
                headers = ?email.headers,
                "Email details"
            );
        }

        println!("\n{}\n", self.render(&email, from, subject));

        Ok(())
    }
}
