//! Localized strings keyed by language code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// xAPI language map, e.g. `{"en-US": "started"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageMap(BTreeMap<String, String>);

impl LanguageMap {
    /// Map with a single entry.
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(language.into(), text.into());
        Self(entries)
    }

    /// Text for a language, if present.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
