//! Lookup of notification templates by form slug

use std::collections::BTreeMap;

use super::NotificationTemplate;

/// Notification templates keyed by form slug
///
/// # Examples
///
/// ```rust
/// use parish_notify::notification::{NotificationTemplate, TemplateRegistry};
///
/// let mut registry = TemplateRegistry::new();
/// registry.register(
///     "work-request",
///     NotificationTemplate::new("Request #{{entry.id}}", "", "{{payload.details}}")
///         .recipient("facilities@example.org"),
/// );
///
/// assert!(registry.active("work-request").is_some());
/// assert!(registry.active("prayer-request").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, NotificationTemplate>,
}

impl TemplateRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the template for a form, returning the previous one
    pub fn register(
        &mut self,
        form_slug: impl Into<String>,
        template: NotificationTemplate,
    ) -> Option<NotificationTemplate> {
        self.templates.insert(form_slug.into(), template)
    }

    /// Template configured for a form, enabled or not
    #[must_use]
    pub fn get(&self, form_slug: &str) -> Option<&NotificationTemplate> {
        self.templates.get(form_slug)
    }

    /// Template for a form, only if it is enabled
    #[must_use]
    pub fn active(&self, form_slug: &str) -> Option<&NotificationTemplate> {
        self.get(form_slug).filter(|template| template.enabled)
    }

    /// Remove a form's template
    pub fn remove(&mut self, form_slug: &str) -> Option<NotificationTemplate> {
        self.templates.remove(form_slug)
    }

    /// Slugs of every form with a template, in sorted order
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of registered templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<(String, NotificationTemplate)> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = (String, NotificationTemplate)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}
