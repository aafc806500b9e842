//! Course and question state supplied by the player UI.

pub mod repository;
pub mod types;

pub use repository::{InMemoryObjectiveRepository, ObjectiveRepository};
pub use types::{
    AnswerGroup, BlankAnswer, ChoiceAnswer, Course, DropAnswer, ImageAnswer, MatchingAnswer,
    Objective, ObjectiveResult, Point, Question, QuestionKind, TrueFalseStatement,
};
