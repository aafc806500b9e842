//! Learner identity.

use serde::{Deserialize, Serialize};

use crate::error::TincanError;

/// The learner a statement is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    object_type: String,
    name: String,
    mbox: String,
}

impl Actor {
    /// Build an agent from a display name and an email address.
    ///
    /// The email becomes a `mailto:` mailbox IRI.
    pub fn new(name: impl Into<String>, email: &str) -> Result<Self, TincanError> {
        let name = name.into();
        let email = email.trim();

        if name.trim().is_empty() || !is_email(email) {
            return Err(TincanError::InvalidActor {
                name,
                email: email.to_string(),
            });
        }

        Ok(Self {
            object_type: "Agent".to_string(),
            name,
            mbox: format!("mailto:{email}"),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mbox(&self) -> &str {
        &self.mbox
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbox_is_derived_from_email() {
        let actor = Actor::new("Ann", "ann@example.com").unwrap();
        assert_eq!(actor.mbox(), "mailto:ann@example.com");
        assert_eq!(actor.name(), "Ann");
    }

    #[test]
    fn serializes_as_agent() {
        let actor = Actor::new("Ann", "ann@example.com").unwrap();
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["objectType"], "Agent");
        assert_eq!(json["mbox"], "mailto:ann@example.com");
    }

    #[test]
    fn rejects_missing_name() {
        let err = Actor::new("  ", "ann@example.com").unwrap_err();
        assert!(matches!(err, TincanError::InvalidActor { .. }));
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(Actor::new("Ann", "ann.example.com").is_err());
        assert!(Actor::new("Ann", "@example.com").is_err());
        assert!(Actor::new("Ann", "ann@").is_err());
        assert!(Actor::new("Ann", "ann @example.com").is_err());
    }
}
