//! Activities and interaction definitions.

use serde::{Deserialize, Serialize};

use super::LanguageMap;

/// Separates items inside a correct-response pattern.
pub const ITEM_SEPARATOR: &str = "[,]";

/// Separates the two halves of a pair inside one pattern item.
pub const PAIR_SEPARATOR: &str = "[.]";

/// Activity type IRI carried by every interaction definition.
pub const INTERACTION_ACTIVITY_TYPE: &str = "http://adlnet.gov/expapi/activities/cmi.interaction";

/// An addressable learning object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    object_type: String,
    pub id: String,
    pub definition: ActivityDefinition,
}

impl Activity {
    pub fn new(id: impl Into<String>, definition: ActivityDefinition) -> Self {
        Self {
            object_type: "Activity".to_string(),
            id: id.into(),
            definition,
        }
    }

    /// Activity with a display name and nothing else.
    pub fn named(id: impl Into<String>, language: &str, name: impl Into<String>) -> Self {
        Self::new(id, ActivityDefinition::named(language, name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDefinition {
    pub name: LanguageMap,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,

    #[serde(flatten)]
    pub interaction: Option<InteractionDefinition>,
}

impl ActivityDefinition {
    pub fn named(language: &str, name: impl Into<String>) -> Self {
        Self {
            name: LanguageMap::new(language, name),
            activity_type: None,
            interaction: None,
        }
    }

    /// Definition of an interactive activity.
    pub fn interaction(name: LanguageMap, interaction: InteractionDefinition) -> Self {
        Self {
            name,
            activity_type: Some(INTERACTION_ACTIVITY_TYPE.to_string()),
            interaction: Some(interaction),
        }
    }
}

/// xAPI interaction type of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionType {
    #[serde(rename = "choice")]
    Choice,
    #[serde(rename = "fill-in")]
    FillIn,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "other")]
    Other,
}

/// One selectable or matchable element of an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionComponent {
    pub id: String,
    pub description: LanguageMap,
}

impl InteractionComponent {
    pub fn new(id: impl Into<String>, language: &str, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: LanguageMap::new(language, description),
        }
    }
}

/// Interaction part of an activity definition.
///
/// `correct_responses_pattern` always holds a single pattern built with
/// [`ITEM_SEPARATOR`] and [`PAIR_SEPARATOR`]. The separators are not
/// escaped, so user text containing them produces an ambiguous pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionDefinition {
    pub interaction_type: InteractionType,

    pub correct_responses_pattern: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<InteractionComponent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<InteractionComponent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<InteractionComponent>,
}

impl InteractionDefinition {
    pub fn new(interaction_type: InteractionType, correct_pattern: impl Into<String>) -> Self {
        Self {
            interaction_type,
            correct_responses_pattern: vec![correct_pattern.into()],
            choices: Vec::new(),
            source: Vec::new(),
            target: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_choices(mut self, choices: Vec<InteractionComponent>) -> Self {
        self.choices = choices;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Vec<InteractionComponent>) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Vec<InteractionComponent>) -> Self {
        self.target = target;
        self
    }

    /// The single correct-response pattern.
    pub fn correct_pattern(&self) -> &str {
        self.correct_responses_pattern
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}
