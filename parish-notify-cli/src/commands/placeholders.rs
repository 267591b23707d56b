//! List the placeholders a template uses

use anyhow::Result;
use console::style;
use parish_notify::template::{placeholders, Namespace, Placeholder};

use crate::input::TemplateInput;

/// Print every placeholder token of a template
#[derive(Debug, Clone)]
pub struct PlaceholdersCommand {
    template: TemplateInput,
}

impl PlaceholdersCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(template: TemplateInput) -> Self {
        Self { template }
    }

    /// Tokens in order of appearance
    ///
    /// # Errors
    ///
    /// Fails if the template cannot be read.
    pub fn list(&self) -> Result<Vec<Placeholder>> {
        Ok(placeholders(&self.template.read()?))
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Fails if the template cannot be read.
    pub fn execute(&self) -> Result<()> {
        let found = self.list()?;
        if found.is_empty() {
            println!("{}", style("No placeholders").dim());
            return Ok(());
        }

        for placeholder in &found {
            let note = problem(placeholder).map_or_else(String::new, |problem| {
                format!("  {}", style(problem).red())
            });
            println!(
                "{:>6}  {}{note}",
                style(placeholder.span.start).dim(),
                style(placeholder.path()).cyan()
            );
        }
        println!();
        println!(
            "{} placeholder(s), namespaces: {}",
            style(found.len()).bold(),
            Namespace::ALL.map(Namespace::as_str).join(", ")
        );

        Ok(())
    }
}

/// Why a token can never resolve, if it cannot
fn problem(placeholder: &Placeholder) -> Option<&'static str> {
    if placeholder.namespace.parse::<Namespace>().is_err() {
        Some("unknown namespace")
    } else if placeholder.key.is_empty() {
        Some("missing key")
    } else {
        None
    }
}
