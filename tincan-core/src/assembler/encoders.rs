//! Response and correct-pattern encoding per question type.
//!
//! | type | interaction | response | correct pattern |
//! |---|---|---|---|
//! | single/multiple select | choice | checked ids, `,` | correct ids, `[,]` |
//! | single select image | choice | checked ids, `,` | designated id |
//! | statement | choice | `id[.]answer`, `,` | `id[.]isCorrect`, `[,]` |
//! | fill in the blank | fill-in | answered texts, `,` | correct texts, `[,]` |
//! | drag and drop | other | `(x,y)`, `[,]` | `(x,y)`, `[,]` |
//! | text matching | matching | `key[.]attempt`, `[,]` | `key[.]value`, `[,]` |
//! | hotspot | other | `(x,y)`, `[,]` | `(x,y)[.](x,y)...`, `[,]` |

use crate::course::{
    AnswerGroup, ChoiceAnswer, DropAnswer, ImageAnswer, MatchingAnswer, Point, Question,
    QuestionKind, TrueFalseStatement,
};
use crate::model::{
    ActivityDefinition, ITEM_SEPARATOR, InteractionComponent, InteractionDefinition,
    InteractionType, LanguageMap, PAIR_SEPARATOR,
};

/// Plain comma used by the response side of choice and fill-in questions.
const RESPONSE_SEPARATOR: &str = ",";

/// Learner response plus the activity definition describing the question.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedInteraction {
    pub response: String,
    pub definition: ActivityDefinition,
}

/// Encode a question's state. Identical input always yields identical output.
pub fn encode(question: &Question, language: &str) -> EncodedInteraction {
    let (response, interaction) = match &question.kind {
        QuestionKind::SingleSelectText { answers } | QuestionKind::MultipleSelect { answers } => {
            select_text(answers, language)
        }
        QuestionKind::SingleSelectImage {
            answers,
            correct_answer_id,
        } => select_image(answers, correct_answer_id, language),
        QuestionKind::Statement { statements } => true_false(statements, language),
        QuestionKind::FillInTheBlank { answer_groups } => fill_in(answer_groups),
        QuestionKind::DragAndDrop { answers } => drag_and_drop(answers),
        QuestionKind::TextMatching { answers } => matching(answers, language),
        QuestionKind::Hotspot {
            spots,
            placed_marks,
        } => hotspot(spots, placed_marks),
    };

    EncodedInteraction {
        response,
        definition: ActivityDefinition::interaction(
            LanguageMap::new(language, question.title.as_str()),
            interaction,
        ),
    }
}

fn select_text(answers: &[ChoiceAnswer], language: &str) -> (String, InteractionDefinition) {
    let response = join(
        answers.iter().filter(|a| a.is_checked).map(|a| a.id.clone()),
        RESPONSE_SEPARATOR,
    );
    let pattern = join(
        answers.iter().filter(|a| a.is_correct).map(|a| a.id.clone()),
        ITEM_SEPARATOR,
    );
    let choices = answers
        .iter()
        .map(|a| InteractionComponent::new(a.id.as_str(), language, a.text.as_str()))
        .collect();

    (
        response,
        InteractionDefinition::new(InteractionType::Choice, pattern).with_choices(choices),
    )
}

fn select_image(
    answers: &[ImageAnswer],
    correct_answer_id: &str,
    language: &str,
) -> (String, InteractionDefinition) {
    let response = join(
        answers.iter().filter(|a| a.is_checked).map(|a| a.id.clone()),
        RESPONSE_SEPARATOR,
    );
    let choices = answers
        .iter()
        .map(|a| InteractionComponent::new(a.id.as_str(), language, a.image.as_str()))
        .collect();

    (
        response,
        InteractionDefinition::new(InteractionType::Choice, correct_answer_id)
            .with_choices(choices),
    )
}

fn true_false(
    statements: &[TrueFalseStatement],
    language: &str,
) -> (String, InteractionDefinition) {
    let response = join(
        statements.iter().filter_map(|s| {
            s.user_answer
                .map(|answer| pair(&s.id, &answer.to_string()))
        }),
        RESPONSE_SEPARATOR,
    );
    let pattern = join(
        statements
            .iter()
            .map(|s| pair(&s.id, &s.is_correct.to_string())),
        ITEM_SEPARATOR,
    );
    let choices = statements
        .iter()
        .map(|s| InteractionComponent::new(s.id.as_str(), language, s.text.as_str()))
        .collect();

    (
        response,
        InteractionDefinition::new(InteractionType::Choice, pattern).with_choices(choices),
    )
}

fn fill_in(groups: &[AnswerGroup]) -> (String, InteractionDefinition) {
    let response = join(
        groups.iter().map(|g| g.answered_text.clone()),
        RESPONSE_SEPARATOR,
    );
    let pattern = join(
        groups
            .iter()
            .flat_map(|g| g.correct_texts().map(str::to_string)),
        ITEM_SEPARATOR,
    );

    (
        response,
        InteractionDefinition::new(InteractionType::FillIn, pattern),
    )
}

fn drag_and_drop(answers: &[DropAnswer]) -> (String, InteractionDefinition) {
    let response = join(
        answers.iter().map(|a| coordinates(&a.current_position)),
        ITEM_SEPARATOR,
    );
    let pattern = join(
        answers.iter().map(|a| coordinates(&a.correct_position)),
        ITEM_SEPARATOR,
    );

    (
        response,
        InteractionDefinition::new(InteractionType::Other, pattern),
    )
}

fn matching(answers: &[MatchingAnswer], language: &str) -> (String, InteractionDefinition) {
    let response = join(
        answers.iter().map(|a| {
            let attempted = a.attempted_value.as_deref().unwrap_or_default();
            pair(&a.key.to_lowercase(), &attempted.to_lowercase())
        }),
        ITEM_SEPARATOR,
    );
    let pattern = join(
        answers
            .iter()
            .map(|a| pair(&a.key.to_lowercase(), &a.value.to_lowercase())),
        ITEM_SEPARATOR,
    );
    let source = answers
        .iter()
        .map(|a| InteractionComponent::new(a.key.to_lowercase(), language, a.key.as_str()))
        .collect();
    let target = answers
        .iter()
        .map(|a| InteractionComponent::new(a.value.to_lowercase(), language, a.value.as_str()))
        .collect();

    (
        response,
        InteractionDefinition::new(InteractionType::Matching, pattern)
            .with_source(source)
            .with_target(target),
    )
}

fn hotspot(spots: &[Vec<Point>], placed_marks: &[Point]) -> (String, InteractionDefinition) {
    let response = join(placed_marks.iter().map(coordinates), ITEM_SEPARATOR);
    let pattern = join(
        spots
            .iter()
            .map(|polygon| join(polygon.iter().map(coordinates), PAIR_SEPARATOR)),
        ITEM_SEPARATOR,
    );

    (
        response,
        InteractionDefinition::new(InteractionType::Other, pattern),
    )
}

fn join(items: impl Iterator<Item = String>, separator: &str) -> String {
    items.collect::<Vec<_>>().join(separator)
}

fn pair(left: &str, right: &str) -> String {
    format!("{left}{PAIR_SEPARATOR}{right}")
}

fn coordinates(point: &Point) -> String {
    format!("({},{})", js_number(point.x), js_number(point.y))
}

/// Render a number the way JavaScript's `Number#toString` does.
///
/// Shortest round-trip digits, no trailing `.0`, and exponent notation
/// (`1e+21`, `1e-7`) outside `1e-6 <= |v| < 1e21`.
fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::BlankAnswer;

    fn question(kind: QuestionKind) -> Question {
        Question {
            id: "q1".to_string(),
            objective_id: "o1".to_string(),
            title: "Question".to_string(),
            score: 0.0,
            kind,
        }
    }

    fn choice(id: &str, is_checked: bool, is_correct: bool) -> ChoiceAnswer {
        ChoiceAnswer {
            id: id.to_string(),
            text: format!("text {id}"),
            is_checked,
            is_correct,
        }
    }

    fn interaction(encoded: &EncodedInteraction) -> &InteractionDefinition {
        encoded.definition.interaction.as_ref().unwrap()
    }

    #[test]
    fn single_select_matches_reference_example() {
        let encoded = encode(
            &question(QuestionKind::SingleSelectText {
                answers: vec![choice("a1", true, true), choice("a2", false, false)],
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "a1");
        assert_eq!(interaction(&encoded).correct_pattern(), "a1");
        assert_eq!(interaction(&encoded).interaction_type, InteractionType::Choice);
        assert_eq!(interaction(&encoded).choices.len(), 2);
    }

    #[test]
    fn multiple_select_joins_response_with_comma_and_pattern_with_item_separator() {
        let encoded = encode(
            &question(QuestionKind::MultipleSelect {
                answers: vec![
                    choice("a1", true, true),
                    choice("a2", true, false),
                    choice("a3", false, true),
                ],
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "a1,a2");
        assert_eq!(interaction(&encoded).correct_pattern(), "a1[,]a3");
    }

    #[test]
    fn image_select_uses_designated_correct_id() {
        let encoded = encode(
            &question(QuestionKind::SingleSelectImage {
                answers: vec![
                    ImageAnswer {
                        id: "i1".to_string(),
                        image: "https://cdn/cat.png".to_string(),
                        is_checked: false,
                    },
                    ImageAnswer {
                        id: "i2".to_string(),
                        image: "https://cdn/dog.png".to_string(),
                        is_checked: true,
                    },
                ],
                correct_answer_id: "i1".to_string(),
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "i2");
        assert_eq!(interaction(&encoded).correct_pattern(), "i1");
        assert_eq!(
            interaction(&encoded).choices[1].description.get("en-US"),
            Some("https://cdn/dog.png")
        );
    }

    #[test]
    fn statement_skips_unanswered_in_response() {
        let statements = vec![
            TrueFalseStatement {
                id: "s1".to_string(),
                text: "Water is wet".to_string(),
                user_answer: Some(true),
                is_correct: true,
            },
            TrueFalseStatement {
                id: "s2".to_string(),
                text: "Fire is cold".to_string(),
                user_answer: None,
                is_correct: false,
            },
        ];

        let encoded = encode(&question(QuestionKind::Statement { statements }), "en-US");

        assert_eq!(encoded.response, "s1[.]true");
        assert_eq!(
            interaction(&encoded).correct_pattern(),
            "s1[.]true[,]s2[.]false"
        );
    }

    #[test]
    fn fill_in_flattens_correct_texts_of_all_groups() {
        let groups = vec![
            AnswerGroup {
                answered_text: "red".to_string(),
                answers: vec![
                    BlankAnswer {
                        text: "red".to_string(),
                        is_correct: true,
                    },
                    BlankAnswer {
                        text: "crimson".to_string(),
                        is_correct: true,
                    },
                ],
            },
            AnswerGroup {
                answered_text: String::new(),
                answers: vec![BlankAnswer {
                    text: "blue".to_string(),
                    is_correct: true,
                }],
            },
        ];

        let encoded = encode(
            &question(QuestionKind::FillInTheBlank {
                answer_groups: groups,
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "red,");
        assert_eq!(
            interaction(&encoded).correct_pattern(),
            "red[,]crimson[,]blue"
        );
        assert_eq!(interaction(&encoded).interaction_type, InteractionType::FillIn);
    }

    #[test]
    fn drag_and_drop_encodes_positions() {
        let answers = vec![
            DropAnswer {
                current_position: Point::new(10.0, 20.5),
                correct_position: Point::new(10.0, 20.0),
            },
            DropAnswer {
                current_position: Point::new(-1.0, -1.0),
                correct_position: Point::new(300.0, 40.0),
            },
        ];

        let encoded = encode(&question(QuestionKind::DragAndDrop { answers }), "en-US");

        assert_eq!(encoded.response, "(10,20.5)[,](-1,-1)");
        assert_eq!(
            interaction(&encoded).correct_pattern(),
            "(10,20)[,](300,40)"
        );
        assert_eq!(interaction(&encoded).interaction_type, InteractionType::Other);
    }

    #[test]
    fn matching_matches_reference_example() {
        let answers = vec![MatchingAnswer {
            key: "A".to_string(),
            value: "B".to_string(),
            attempted_value: Some("B".to_string()),
        }];

        let encoded = encode(&question(QuestionKind::TextMatching { answers }), "en-US");
        let interaction = interaction(&encoded);

        assert_eq!(encoded.response, "a[.]b");
        assert_eq!(interaction.correct_pattern(), "a[.]b");
        assert_eq!(interaction.source[0].id, "a");
        assert_eq!(interaction.source[0].description.get("en-US"), Some("A"));
        assert_eq!(interaction.target[0].id, "b");
    }

    #[test]
    fn matching_without_attempt_leaves_value_empty() {
        let answers = vec![
            MatchingAnswer {
                key: "Cat".to_string(),
                value: "Meow".to_string(),
                attempted_value: None,
            },
            MatchingAnswer {
                key: "Dog".to_string(),
                value: "Woof".to_string(),
                attempted_value: Some("Meow".to_string()),
            },
        ];

        let encoded = encode(&question(QuestionKind::TextMatching { answers }), "en-US");

        assert_eq!(encoded.response, "cat[.][,]dog[.]meow");
        assert_eq!(
            interaction(&encoded).correct_pattern(),
            "cat[.]meow[,]dog[.]woof"
        );
    }

    #[test]
    fn hotspot_matches_reference_example() {
        let encoded = encode(
            &question(QuestionKind::Hotspot {
                spots: vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]],
                placed_marks: vec![Point::new(0.0, 0.0)],
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "(0,0)");
        assert_eq!(interaction(&encoded).correct_pattern(), "(0,0)[.](1,1)");
    }

    #[test]
    fn hotspot_joins_multiple_spots() {
        let encoded = encode(
            &question(QuestionKind::Hotspot {
                spots: vec![
                    vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)],
                    vec![Point::new(10.0, 10.0), Point::new(12.0, 12.0)],
                ],
                placed_marks: vec![Point::new(1.0, 1.0), Point::new(11.0, 11.0)],
            }),
            "en-US",
        );

        assert_eq!(encoded.response, "(1,1)[,](11,11)");
        assert_eq!(
            interaction(&encoded).correct_pattern(),
            "(0,0)[.](5,0)[.](5,5)[,](10,10)[.](12,12)"
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let q = question(QuestionKind::MultipleSelect {
            answers: vec![choice("a1", true, true), choice("a2", true, true)],
        });
        assert_eq!(encode(&q, "en-US"), encode(&q, "en-US"));
    }

    #[test]
    fn fixture_fields_never_contain_item_separator() {
        let q = question(QuestionKind::TextMatching {
            answers: vec![MatchingAnswer {
                key: "Left".to_string(),
                value: "Right".to_string(),
                attempted_value: Some("Right".to_string()),
            }],
        });
        let encoded = encode(&q, "en-US");

        for item in interaction(&encoded).correct_pattern().split(ITEM_SEPARATOR) {
            for field in item.split(PAIR_SEPARATOR) {
                assert!(!field.contains(ITEM_SEPARATOR));
            }
        }
    }

    #[test]
    fn coordinates_follow_javascript_number_rendering() {
        let cases = [
            (Point { x: 3.0, y: 4.0 }, "(3,4)"),
            (Point { x: 1.5, y: -2.0 }, "(1.5,-2)"),
            (Point { x: -0.0, y: 0.000001 }, "(0,0.000001)"),
            (Point { x: 1e21, y: 1e-7 }, "(1e+21,1e-7)"),
            (Point { x: 1.5e300, y: -2.5e-8 }, "(1.5e+300,-2.5e-8)"),
            (Point { x: 123456789012345680000.0, y: 0.1 }, "(123456789012345680000,0.1)"),
        ];

        for (point, expected) in cases {
            assert_eq!(coordinates(&point), expected);
        }
    }

    #[test]
    fn definition_carries_question_title() {
        let encoded = encode(
            &question(QuestionKind::DragAndDrop { answers: Vec::new() }),
            "fr-FR",
        );
        assert_eq!(encoded.definition.name.get("fr-FR"), Some("Question"));
        assert_eq!(encoded.response, "");
    }
}
