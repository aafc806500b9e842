//! Verb allow-list applied before statements reach the queue.

use std::collections::HashSet;

use crate::model::Statement;
use crate::settings::XapiSettings;

/// Drops statements whose verb the LRS is not configured to accept.
#[derive(Debug, Clone)]
pub struct VerbFilter {
    language: String,
    allowed: HashSet<String>,
}

impl VerbFilter {
    pub fn new<I, S>(language: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language: language.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_settings(settings: &XapiSettings) -> Self {
        Self::new(
            settings.default_language.clone(),
            settings.allowed_verbs.iter().cloned(),
        )
    }

    /// Whether the verb's display text in the default language is allowed.
    pub fn is_allowed(&self, statement: &Statement) -> bool {
        statement
            .verb
            .display_in(&self.language)
            .is_some_and(|display| self.allowed.contains(display))
    }
}
