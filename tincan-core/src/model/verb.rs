//! Verbs the course player reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LanguageMap;

/// xAPI verb: an IRI plus a localized display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub id: String,
    pub display: LanguageMap,
}

impl Verb {
    pub fn new(id: impl Into<String>, language: &str, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: LanguageMap::new(language, display),
        }
    }

    /// Display text in the given language.
    pub fn display_in(&self, language: &str) -> Option<&str> {
        self.display.get(language)
    }
}

/// The fixed vocabulary of verbs emitted by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownVerb {
    Started,
    Stopped,
    Passed,
    Failed,
    Experienced,
    Answered,
    Mastered,
    Completed,
}

impl KnownVerb {
    pub const ALL: [KnownVerb; 8] = [
        Self::Started,
        Self::Stopped,
        Self::Passed,
        Self::Failed,
        Self::Experienced,
        Self::Answered,
        Self::Mastered,
        Self::Completed,
    ];

    /// Verb IRI. `started` and `stopped` map onto ADL's launched/exited.
    pub fn iri(&self) -> &'static str {
        match self {
            Self::Started => "http://adlnet.gov/expapi/verbs/launched",
            Self::Stopped => "http://adlnet.gov/expapi/verbs/exited",
            Self::Passed => "http://adlnet.gov/expapi/verbs/passed",
            Self::Failed => "http://adlnet.gov/expapi/verbs/failed",
            Self::Experienced => "http://adlnet.gov/expapi/verbs/experienced",
            Self::Answered => "http://adlnet.gov/expapi/verbs/answered",
            Self::Mastered => "http://adlnet.gov/expapi/verbs/mastered",
            Self::Completed => "http://adlnet.gov/expapi/verbs/completed",
        }
    }

    /// Display text, also used as the allow-list key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Experienced => "experienced",
            Self::Answered => "answered",
            Self::Mastered => "mastered",
            Self::Completed => "completed",
        }
    }

    /// Parse from the display text.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.as_str() == s)
    }

    /// Build the verb value with its display text in `language`.
    pub fn verb(&self, language: &str) -> Verb {
        Verb::new(self.iri(), language, self.as_str())
    }
}

impl fmt::Display for KnownVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownVerb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown verb: {s}"))
    }
}
