//! The atomic unit of record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Activity, Actor, Context, StatementResult, Verb};

/// A complete xAPI statement. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub actor: Actor,
    pub verb: Verb,
    pub object: Activity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<StatementResult>,
    pub context: Context,
    pub timestamp: DateTime<Utc>,
}

impl Statement {
    /// Assemble a statement stamped with a fresh id and the current time.
    pub fn new(
        actor: Actor,
        verb: Verb,
        object: Activity,
        result: Option<StatementResult>,
        context: Context,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor,
            verb,
            object,
            result,
            context,
            timestamp: Utc::now(),
        }
    }

    /// Response string of the result, if any.
    pub fn response(&self) -> Option<&str> {
        self.result.as_ref()?.response.as_deref()
    }

    /// Scaled score of the result, if any.
    pub fn scaled_score(&self) -> Option<f64> {
        self.result.as_ref()?.score.map(|s| s.value())
    }

    /// Correct-response pattern of the object's interaction, if any.
    pub fn correct_pattern(&self) -> Option<&str> {
        self.object
            .definition
            .interaction
            .as_ref()
            .map(|i| i.correct_pattern())
    }
}
