//! Course event definitions

use serde::{Deserialize, Serialize};

use crate::course::{Course, Question};

/// Learner actions the activity provider turns into statements.
///
/// Payloads are optional because the player may publish an event without
/// its object; the provider rejects such events through its guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum CourseEvent {
    CourseStarted,

    CourseFinished {
        #[serde(default)]
        course: Option<Course>,
    },

    LearningContentExperienced {
        #[serde(default)]
        question: Option<Question>,
        /// Milliseconds spent on the learning content
        #[serde(default)]
        spent_time: Option<f64>,
    },

    AnswersSubmitted {
        #[serde(default)]
        question: Option<Question>,
    },
}

impl CourseEvent {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CourseStarted => "courseStarted",
            Self::CourseFinished { .. } => "courseFinished",
            Self::LearningContentExperienced { .. } => "learningContentExperienced",
            Self::AnswersSubmitted { .. } => "answersSubmitted",
        }
    }
}
