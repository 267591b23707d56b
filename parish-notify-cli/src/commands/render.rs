//! Resolve a template against a context file

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use parish_notify::template::{render_body_with_report, resolve_with_report, Resolution};

use crate::input::{load_context, TemplateInput};

/// Print a template with its placeholders filled in
#[derive(Debug, Clone)]
pub struct RenderCommand {
    template: TemplateInput,
    context: Option<PathBuf>,
    html: bool,
}

impl RenderCommand {
    /// Create a new command instance
    ///
    /// With `html` set the template is presented as an email body: values are
    /// escaped and plain text gets `<br>` line breaks.
    #[must_use]
    pub const fn new(template: TemplateInput, context: Option<PathBuf>, html: bool) -> Self {
        Self {
            template,
            context,
            html,
        }
    }

    /// Resolve without printing
    ///
    /// # Errors
    ///
    /// Fails if the template or context cannot be read.
    pub fn render(&self) -> Result<Resolution> {
        let template = self.template.read()?;
        let context = load_context(self.context.as_deref())?;

        Ok(if self.html {
            render_body_with_report(&template, &context)
        } else {
            resolve_with_report(&template, &context)
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Fails if the template or context cannot be read.
    pub fn execute(&self) -> Result<()> {
        let resolution = self.render()?;
        println!("{}", resolution.output);

        if !resolution.is_complete() {
            eprintln!();
            eprintln!(
                "{} {}",
                style("warning:").yellow().bold(),
                style(format!(
                    "{} placeholder(s) rendered as empty text",
                    resolution.unresolved.len()
                ))
                .bold()
            );
            for token in &resolution.unresolved {
                eprintln!("  {}", style(token).dim());
            }
        }

        Ok(())
    }
}
