//! Configuration management for parish-notify
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `PARISH_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/parish-notify/config.toml` (user config, XDG)
//! 4. `/etc/parish-notify/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! [mail]
//! from_address = "forms@stmarys.example.org"
//! reply_to = "office@stmarys.example.org"
//! subject_prefix = "[St. Mary's]"
//! footer = "St. Mary's Parish Office"
//!
//! [logging]
//! format = "json"
//!
//! [forms.work-request]
//! title = "Building Work Request"
//! kind = "work_request"
//!
//! [forms.christmas-services]
//! title = "Christmas Service Times"
//! kind = "service_time"
//! season = "Christmas 2026"
//!
//! [templates.work-request]
//! subject = "Work request #{{entry.id}}"
//! heading = "New request from {{entry.full_name}}"
//! body = "{{payload.details}}"
//! recipients = ["facilities@stmarys.example.org"]
//! reply_to = "{{entry.email}}"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email::is_valid_address;
use crate::notification::{FormKind, FormMeta, NotificationTemplate, TemplateRegistry};
use crate::observability::{LogFormat, ObservabilityConfig};
use crate::template::has_placeholders;

/// Directory name used for system and user configuration
pub const APP_NAME: &str = "parish-notify";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PARISH_";

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// Defaults could not be serialized as the base layer
    #[error("failed to serialize default configuration: {0}")]
    Defaults(#[from] toml::ser::Error),

    /// Values loaded but are not usable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Load(Box::new(error))
    }
}

/// Outgoing mail settings shared by every notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Sender address of every notification
    pub from_address: String,

    /// Default Reply-To when a template sets none, may hold placeholders
    pub reply_to: Option<String>,

    /// Text put in front of every subject, e.g. `[St. Mary's]`
    pub subject_prefix: Option<String>,

    /// Line shown at the bottom of every HTML email
    pub footer: Option<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from_address: "forms@example.org".to_string(),
            reply_to: None,
            subject_prefix: None,
            footer: None,
        }
    }
}

/// Form metadata as written in configuration, keyed by slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Human readable title
    pub title: String,
    /// Kind of form
    #[serde(default)]
    pub kind: FormKind,
    /// Season for service-time forms
    #[serde(default)]
    pub season: Option<String>,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    pub filter: Option<String>,
    /// Output format, build-dependent when unset
    pub format: Option<LogFormat>,
}

/// Complete parish-notify configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Outgoing mail settings
    #[serde(default)]
    pub mail: MailSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Forms keyed by slug
    #[serde(default)]
    pub forms: BTreeMap<String, FormSettings>,

    /// Notification templates keyed by form slug
    #[serde(default)]
    pub templates: BTreeMap<String, NotificationTemplate>,
}

impl NotifyConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if a present configuration file cannot be parsed,
    /// values have the wrong type, or the result fails [`Self::validate`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use parish_notify::config::NotifyConfig;
    ///
    /// # fn example() -> Result<(), parish_notify::config::ConfigError> {
    /// let config = NotifyConfig::load()?;
    /// println!("sending as {}", config.mail.from_address);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self, ConfigError> {
        let mut files = Vec::new();

        let system_config = PathBuf::from("/etc").join(APP_NAME).join("config.toml");
        if system_config.exists() {
            files.push(system_config);
        }

        let user_config = Self::recommended_path();
        if user_config.exists() {
            files.push(user_config);
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            files.push(local_config);
        }

        Self::extract(Self::layered(&files, ENV_PREFIX)?)
    }

    /// Load configuration from a specific file, with environment overrides
    ///
    /// A missing file leaves the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, values have the wrong
    /// type, or the result fails [`Self::validate`].
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::layered(&[path.as_ref()], ENV_PREFIX)?)
    }

    /// Defaults, then each file in order, then prefixed environment variables
    fn layered<P: AsRef<Path>>(files: &[P], env_prefix: &str) -> Result<Figment, ConfigError> {
        let figment = files.iter().fold(
            Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)),
            |figment, file| figment.merge(Toml::file(file.as_ref())),
        );
        Ok(figment.merge(Env::prefixed(env_prefix).split("__").lowercase(true)))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Recommended XDG config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join(APP_NAME).join("config.toml"),
        )
    }

    /// Check values that deserialization alone cannot
    ///
    /// Literal addresses (those without placeholders) must be well formed.
    /// Placeholder addresses are checked when a message is composed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let literal_invalid = |address: &&String| {
            !has_placeholders(address) && !is_valid_address(address.trim())
        };

        if !is_valid_address(&self.mail.from_address) {
            return Err(ConfigError::Invalid(format!(
                "mail.from_address {:?} is not an email address",
                self.mail.from_address
            )));
        }
        if let Some(reply_to) = self.mail.reply_to.iter().find(literal_invalid) {
            return Err(ConfigError::Invalid(format!(
                "mail.reply_to {reply_to:?} is not an email address"
            )));
        }

        for (slug, template) in &self.templates {
            let mut addresses = template
                .recipients
                .iter()
                .chain(&template.cc)
                .chain(&template.bcc)
                .chain(&template.reply_to);
            if let Some(address) = addresses.find(literal_invalid) {
                return Err(ConfigError::Invalid(format!(
                    "templates.{slug}: {address:?} is not an email address"
                )));
            }
            if template.enabled && template.recipients.is_empty() && !template.send_confirmation {
                return Err(ConfigError::Invalid(format!(
                    "templates.{slug}: enabled template has no recipients"
                )));
            }
        }

        Ok(())
    }

    /// Metadata of a configured form
    #[must_use]
    pub fn form(&self, slug: &str) -> Option<FormMeta> {
        self.forms.get(slug).map(|settings| FormMeta {
            slug: slug.to_string(),
            title: settings.title.clone(),
            kind: settings.kind.clone(),
            season: settings.season.clone(),
            description: settings.description.clone(),
        })
    }

    /// Registry holding every configured template
    #[must_use]
    pub fn registry(&self) -> TemplateRegistry {
        self.templates
            .iter()
            .map(|(slug, template)| (slug.clone(), template.clone()))
            .collect()
    }

    /// Observability settings for [`crate::observability::init`]
    #[must_use]
    pub fn observability(&self) -> ObservabilityConfig {
        let mut observability = ObservabilityConfig::new(APP_NAME);
        if let Some(format) = self.logging.format {
            observability = observability.with_format(format);
        }
        if let Some(filter) = &self.logging.filter {
            observability = observability.with_filter(filter);
        }
        observability
    }
}
