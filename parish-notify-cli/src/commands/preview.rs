//! Compose a form's notification for a stored submission and print it

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use parish_notify::config::NotifyConfig;
use parish_notify::email::ConsoleBackend;
use parish_notify::error::NotifyError;
use parish_notify::notification::{NotificationComposer, Notifier, NotifyOutcome};
use tracing::debug;

use crate::input::load_submission;

/// Preview the emails a submission would trigger
///
/// Messages go through the console backend, so nothing is delivered.
#[derive(Debug, Clone)]
pub struct PreviewCommand {
    form: String,
    submission: PathBuf,
    config: Option<PathBuf>,
}

impl PreviewCommand {
    /// Create a new command instance
    ///
    /// Without `config` the standard configuration locations are used.
    #[must_use]
    pub const fn new(form: String, submission: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            form,
            submission,
            config,
        }
    }

    /// Load configuration and submission, then compose and print
    ///
    /// # Errors
    ///
    /// Fails if configuration or submission cannot be loaded, the form is not
    /// configured, the submission belongs to another form, or a message is
    /// invalid once composed.
    pub async fn run(&self) -> Result<NotifyOutcome> {
        let config = match &self.config {
            Some(path) => NotifyConfig::load_from(path),
            None => NotifyConfig::load(),
        }
        .context("Failed to load configuration")?;

        let form = config
            .form(&self.form)
            .ok_or_else(|| NotifyError::UnknownForm(self.form.clone()))?;
        let submission = load_submission(&self.submission)?;
        debug!(form = %form.slug, submission = submission.id, "Previewing notification");

        let notifier = Notifier::new(
            config.registry(),
            NotificationComposer::new(config.mail.clone()),
            ConsoleBackend::verbose(),
        );

        Ok(notifier.notify(&form, &submission).await?)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub async fn execute(&self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Previewing").green().bold(),
            style("notification for form:").bold(),
            style(&self.form).cyan().bold()
        );
        println!();

        match self.run().await? {
            NotifyOutcome::Skipped => println!(
                "{} no enabled template or no recipients for this submission",
                style("Skipped:").yellow().bold()
            ),
            NotifyOutcome::Sent { messages } => println!(
                "{}",
                style(format!("✓ {messages} message(s) composed")).green().bold()
            ),
        }

        Ok(())
    }
}
