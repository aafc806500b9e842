//! Domain payloads as delivered by the UI layer (`camelCase` JSON).

use serde::{Deserialize, Serialize};

/// Course state at the moment the learner finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Overall score, 0–100
    pub score: f64,
    pub is_completed: bool,
    #[serde(default)]
    pub objectives: Option<Vec<ObjectiveResult>>,
}

/// Scored objective inside a finished course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveResult {
    pub id: String,
    pub title: String,
    /// 0–100
    pub score: f64,
}

/// A scored grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A question with its current answer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub objective_id: String,
    #[serde(default)]
    pub title: String,
    /// 0–100
    #[serde(default)]
    pub score: f64,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Per-type answer state, tagged by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum QuestionKind {
    SingleSelectText {
        answers: Vec<ChoiceAnswer>,
    },
    MultipleSelect {
        answers: Vec<ChoiceAnswer>,
    },
    SingleSelectImage {
        answers: Vec<ImageAnswer>,
        correct_answer_id: String,
    },
    Statement {
        statements: Vec<TrueFalseStatement>,
    },
    FillInTheBlank {
        answer_groups: Vec<AnswerGroup>,
    },
    DragAndDrop {
        answers: Vec<DropAnswer>,
    },
    TextMatching {
        answers: Vec<MatchingAnswer>,
    },
    Hotspot {
        /// Each spot is a polygon
        spots: Vec<Vec<Point>>,
        #[serde(default)]
        placed_marks: Vec<Point>,
    },
}

impl QuestionKind {
    /// The `type` tag as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SingleSelectText { .. } => "singleSelectText",
            Self::MultipleSelect { .. } => "multipleSelect",
            Self::SingleSelectImage { .. } => "singleSelectImage",
            Self::Statement { .. } => "statement",
            Self::FillInTheBlank { .. } => "fillInTheBlank",
            Self::DragAndDrop { .. } => "dragAndDrop",
            Self::TextMatching { .. } => "textMatching",
            Self::Hotspot { .. } => "hotspot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceAnswer {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnswer {
    pub id: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub is_checked: bool,
}

/// One statement of a true/false statement set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseStatement {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// `None` until the learner picks true or false
    #[serde(default)]
    pub user_answer: Option<bool>,
    pub is_correct: bool,
}

/// A blank in a fill-in-the-blank question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerGroup {
    #[serde(default)]
    pub answered_text: String,
    #[serde(default)]
    pub answers: Vec<BlankAnswer>,
}

impl AnswerGroup {
    /// Texts accepted for this blank.
    pub fn correct_texts(&self) -> impl Iterator<Item = &str> {
        self.answers
            .iter()
            .filter(|a| a.is_correct)
            .map(|a| a.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankAnswer {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropAnswer {
    pub current_position: Point,
    pub correct_position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingAnswer {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub attempted_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn question_deserializes_by_type_tag() {
        let question: Question = serde_json::from_value(json!({
            "id": "q1",
            "objectiveId": "o1",
            "title": "Pick one",
            "score": 100,
            "type": "singleSelectText",
            "answers": [
                {"id": "a1", "isChecked": true, "isCorrect": true},
                {"id": "a2", "isChecked": false, "isCorrect": false}
            ]
        }))
        .unwrap();

        assert_eq!(question.objective_id, "o1");
        assert_eq!(question.kind.type_name(), "singleSelectText");
        match question.kind {
            QuestionKind::SingleSelectText { answers } => {
                assert_eq!(answers.len(), 2);
                assert!(answers[0].is_checked);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn variant_fields_are_camel_case() {
        let question: Question = serde_json::from_value(json!({
            "id": "q2",
            "objectiveId": "o1",
            "type": "hotspot",
            "spots": [[{"x": 0, "y": 0}, {"x": 1, "y": 1}]],
            "placedMarks": [{"x": 0, "y": 0}]
        }))
        .unwrap();

        match question.kind {
            QuestionKind::Hotspot {
                spots,
                placed_marks,
            } => {
                assert_eq!(spots[0].len(), 2);
                assert_eq!(placed_marks, vec![Point::new(0.0, 0.0)]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let result = serde_json::from_value::<Question>(json!({
            "id": "q3",
            "objectiveId": "o1",
            "type": "essay"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn correct_texts_skip_wrong_answers() {
        let group = AnswerGroup {
            answered_text: "cat".to_string(),
            answers: vec![
                BlankAnswer {
                    text: "cat".to_string(),
                    is_correct: true,
                },
                BlankAnswer {
                    text: "dog".to_string(),
                    is_correct: false,
                },
                BlankAnswer {
                    text: "kitten".to_string(),
                    is_correct: true,
                },
            ],
        };
        assert_eq!(group.correct_texts().collect::<Vec<_>>(), vec!["cat", "kitten"]);
    }
}
