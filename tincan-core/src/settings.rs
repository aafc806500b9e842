//! xAPI tracking settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::model::KnownVerb;

/// Default language for language maps.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Tracking settings as authored in the course template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XapiSettings {
    /// Language code used for every language map
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Verb display names the LRS accepts
    #[serde(default = "default_allowed_verbs")]
    pub allowed_verbs: Vec<String>,

    /// Verb reported when the learner completes the course
    #[serde(default)]
    pub positive_verb: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_allowed_verbs() -> Vec<String> {
    [
        KnownVerb::Started,
        KnownVerb::Stopped,
        KnownVerb::Experienced,
        KnownVerb::Mastered,
        KnownVerb::Answered,
        KnownVerb::Passed,
        KnownVerb::Failed,
    ]
    .iter()
    .map(|v| v.as_str().to_string())
    .collect()
}

impl Default for XapiSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            allowed_verbs: default_allowed_verbs(),
            positive_verb: None,
        }
    }
}

impl XapiSettings {
    /// Resolve the configured positive verb.
    pub fn positive_verb(&self) -> Result<KnownVerb, ConfigurationError> {
        let name = self
            .positive_verb
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigurationError::Missing("positive_verb"))?;

        KnownVerb::parse(name).ok_or_else(|| ConfigurationError::UnknownVerb(name.to_string()))
    }

    #[must_use]
    pub fn with_allowed_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_verbs = verbs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_positive_verb(mut self, verb: Option<&str>) -> Self {
        self.positive_verb = verb.map(str::to_string);
        self
    }
}
