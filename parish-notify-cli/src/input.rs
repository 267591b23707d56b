//! Templates and JSON documents named on the command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parish_notify::notification::Submission;
use parish_notify::template::NotificationContext;

/// Where a template is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateInput {
    /// Template text given as an argument
    Inline(String),
    /// Template stored in a file
    File(PathBuf),
}

impl TemplateInput {
    /// Pick the template source from the positional argument and `--file`
    ///
    /// # Errors
    ///
    /// Fails unless exactly one of the two is given.
    pub fn from_args(inline: Option<String>, file: Option<PathBuf>) -> Result<Self> {
        match (inline, file) {
            (Some(template), None) => Ok(Self::Inline(template)),
            (None, Some(path)) => Ok(Self::File(path)),
            (Some(_), Some(_)) => anyhow::bail!("Give either a template or --file, not both"),
            (None, None) => anyhow::bail!("A template or --file is required"),
        }
    }

    /// Template text
    ///
    /// # Errors
    ///
    /// Fails if the template file cannot be read.
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Inline(template) => Ok(template.clone()),
            Self::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read template: {}", path.display())),
        }
    }
}

/// Read a notification context from a JSON file
///
/// Without a path the context is empty, so every placeholder renders as
/// empty text.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a context object.
pub fn load_context(path: Option<&Path>) -> Result<NotificationContext> {
    let Some(path) = path else {
        return Ok(NotificationContext::new());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read context: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid context JSON in {}", path.display()))
}

/// Read a stored submission from a JSON file
///
/// # Errors
///
/// Fails if the file cannot be read or does not describe a submission.
pub fn load_submission(path: &Path) -> Result<Submission> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read submission: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid submission JSON in {}", path.display()))
}
