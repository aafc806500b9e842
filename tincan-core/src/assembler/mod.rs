//! Builds verb-specific statements from course and question state.
//!
//! Every builder validates its payload first and only then constructs
//! statements, so a rejected payload yields nothing at all.

mod encoders;

use std::sync::Arc;

use crate::course::{Course, ObjectiveRepository, Question};
use crate::duration::time_to_iso_duration;
use crate::error::{DispatchError, PreconditionError};
use crate::guard;
use crate::model::{
    Activity, Context, ContextActivities, KnownVerb, Score, Statement, StatementResult, Verb,
};
use crate::session::Session;

pub use encoders::{EncodedInteraction, encode};

/// Statement factory bound to one activated session.
pub struct StatementAssembler {
    session: Arc<Session>,
    language: String,
    positive_verb: KnownVerb,
    objectives: Arc<dyn ObjectiveRepository>,
}

impl StatementAssembler {
    pub fn new(
        session: Arc<Session>,
        language: impl Into<String>,
        positive_verb: KnownVerb,
        objectives: Arc<dyn ObjectiveRepository>,
    ) -> Self {
        Self {
            session,
            language: language.into(),
            positive_verb,
            objectives,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Verb value in the session language.
    pub fn verb(&self, verb: KnownVerb) -> Verb {
        verb.verb(&self.language)
    }

    /// Activity named in the session language. An empty id falls back to
    /// the activity URL.
    pub fn activity(&self, id: &str, name: &str) -> Activity {
        let id = if id.is_empty() {
            self.session.activity_url.as_str()
        } else {
            id
        };
        Activity::named(id, &self.language, name)
    }

    /// Assemble a statement.
    ///
    /// `object` defaults to the course activity and `context` to an empty
    /// one; the course-id extension is always injected.
    pub fn build_statement(
        &self,
        verb: Verb,
        result: Option<StatementResult>,
        object: Option<Activity>,
        context: Option<Context>,
    ) -> Statement {
        let object = object.unwrap_or_else(|| self.activity("", &self.session.activity_name));
        let context = context.unwrap_or_default().for_course(&self.session.course_id);

        Statement::new(self.session.actor.clone(), verb, object, result, context)
    }

    pub fn course_started(&self) -> Statement {
        self.build_statement(self.verb(KnownVerb::Started), None, None, None)
    }

    /// Statements for a finished course, in emission order: one `mastered`
    /// per objective, the overall result, then `stopped`.
    pub fn course_finished(
        &self,
        course: Option<&Course>,
    ) -> Result<Vec<Statement>, PreconditionError> {
        let course = guard::require_object(course, "Course is not an object")?;

        let mut statements = Vec::new();

        for objective in course.objectives.iter().flatten() {
            let object =
                self.activity(&self.session.objective_url(&objective.id), &objective.title);
            let result = StatementResult::scored(Score::from_percent(objective.score));
            statements.push(self.build_statement(
                self.verb(KnownVerb::Mastered),
                Some(result),
                Some(object),
                None,
            ));
        }

        let result_verb = if course.is_completed {
            self.positive_verb
        } else {
            KnownVerb::Failed
        };
        let result = StatementResult::scored(Score::from_percent(course.score));
        statements.push(self.build_statement(self.verb(result_verb), Some(result), None, None));

        statements.push(self.build_statement(self.verb(KnownVerb::Stopped), None, None, None));

        Ok(statements)
    }

    pub fn learning_content_experienced(
        &self,
        question: Option<&Question>,
        spent_time: Option<f64>,
    ) -> Result<Statement, PreconditionError> {
        let question = guard::require_object(question, "Question is not an object")?;
        let spent_time = guard::require_number(spent_time, "SpentTime is not a number")?;
        let objective = guard::require_object(
            self.objectives.get(&question.objective_id),
            "Objective is not found",
        )?;

        let session = &self.session;
        let result = StatementResult::timed(time_to_iso_duration(spent_time));
        let object = self.activity(
            &session.learning_content_url(&objective.id, &question.id),
            &question.title,
        );
        let activities = ContextActivities::parent(self.activity(
            &session.question_url(&objective.id, &question.id),
            &question.title,
        ))
        .with_grouping(self.activity(&session.objective_url(&objective.id), &objective.title));

        Ok(self.build_statement(
            self.verb(KnownVerb::Experienced),
            Some(result),
            Some(object),
            Some(Context::with_activities(activities)),
        ))
    }

    /// `answered` statement for a submitted question.
    pub fn question_answered(
        &self,
        question: Option<&Question>,
    ) -> Result<Statement, DispatchError> {
        let question = guard::require_object(question, "Question is not an object")?;
        let objective = guard::require_object(
            self.objectives.get(&question.objective_id),
            "Objective is not found",
        )?;

        let encoded = encode(question, &self.language);
        let question_url = self
            .session
            .question_url(&question.objective_id, &question.id);

        let object = Activity::new(question_url, encoded.definition);
        let result =
            StatementResult::answered(Score::from_percent(question.score), encoded.response);
        let context = Context::with_activities(ContextActivities::parent(
            self.activity(&self.session.objective_url(&objective.id), &objective.title),
        ));

        Ok(self.build_statement(
            self.verb(KnownVerb::Answered),
            Some(result),
            Some(object),
            Some(context),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{
        ChoiceAnswer, InMemoryObjectiveRepository, Objective, ObjectiveResult, QuestionKind,
    };
    use crate::model::{Actor, COURSE_ID_EXTENSION};

    const ROOT: &str = "https://host/course/index.html";

    fn assembler() -> StatementAssembler {
        let actor = Actor::new("Ann", "ann@example.com").unwrap();
        let session = Session::activate(
            "course-1",
            actor,
            "Safety basics",
            Some("https://host/course/index.html?launch=1#intro"),
        );
        let objectives: InMemoryObjectiveRepository = [Objective {
            id: "o1".to_string(),
            title: "Objective one".to_string(),
        }]
        .into_iter()
        .collect();
        StatementAssembler::new(
            Arc::new(session),
            "en-US",
            KnownVerb::Passed,
            Arc::new(objectives),
        )
    }

    fn single_select(objective_id: &str) -> Question {
        Question {
            id: "q1".to_string(),
            objective_id: objective_id.to_string(),
            title: "Pick one".to_string(),
            score: 100.0,
            kind: QuestionKind::SingleSelectText {
                answers: vec![ChoiceAnswer {
                    id: "a1".to_string(),
                    text: "Yes".to_string(),
                    is_checked: true,
                    is_correct: true,
                }],
            },
        }
    }

    fn verbs(statements: &[Statement]) -> Vec<&str> {
        statements
            .iter()
            .map(|s| s.verb.display_in("en-US").unwrap())
            .collect()
    }

    #[test]
    fn default_object_is_course_activity() {
        let statement = assembler().course_started();

        assert_eq!(statement.object.id, "https://host/course/index.html?launch=1#intro");
        assert_eq!(
            statement.object.definition.name.get("en-US"),
            Some("Safety basics")
        );
        assert_eq!(statement.context.course_id(), Some("course-1"));
        assert!(statement.result.is_none());
    }

    #[test]
    fn build_statement_injects_course_id_into_given_context() {
        let assembler = assembler();
        let mut context = Context::default();
        context
            .extensions
            .insert(COURSE_ID_EXTENSION.to_string(), "other".into());

        let statement = assembler.build_statement(
            assembler.verb(KnownVerb::Completed),
            None,
            None,
            Some(context),
        );
        assert_eq!(statement.context.course_id(), Some("course-1"));
    }

    #[test]
    fn course_finished_emits_mastered_result_stopped() {
        let course = Course {
            score: 80.0,
            is_completed: true,
            objectives: Some(vec![
                ObjectiveResult {
                    id: "o1".to_string(),
                    title: "Objective one".to_string(),
                    score: 100.0,
                },
                ObjectiveResult {
                    id: "o2".to_string(),
                    title: "Objective two".to_string(),
                    score: 60.0,
                },
            ]),
        };

        let statements = assembler().course_finished(Some(&course)).unwrap();

        assert_eq!(
            verbs(&statements),
            vec!["mastered", "mastered", "passed", "stopped"]
        );
        assert_eq!(
            statements[0].object.id,
            format!("{ROOT}#objectives?objective_id=o1")
        );
        assert_eq!(statements[1].scaled_score(), Some(0.6));
        assert_eq!(statements[2].scaled_score(), Some(0.8));
        assert!(statements[3].result.is_none());
    }

    #[test]
    fn incomplete_course_fails() {
        let course = Course {
            score: 30.0,
            is_completed: false,
            objectives: None,
        };

        let statements = assembler().course_finished(Some(&course)).unwrap();
        assert_eq!(verbs(&statements), vec!["failed", "stopped"]);
    }

    #[test]
    fn course_finished_rejects_missing_course() {
        let err = assembler().course_finished(None).unwrap_err();
        assert_eq!(err.message, "Course is not an object");
    }

    #[test]
    fn experienced_statement_links_question_and_objective() {
        let question = single_select("o1");

        let statement = assembler()
            .learning_content_experienced(Some(&question), Some(90_500.0))
            .unwrap();

        assert_eq!(
            statement.object.id,
            format!("{ROOT}#objective/o1/question/q1?learningContents")
        );
        let result = statement.result.as_ref().unwrap();
        assert_eq!(result.duration.as_deref(), Some("PT0H1M30S"));
        assert!(result.score.is_none());

        let activities = statement.context.context_activities.as_ref().unwrap();
        assert_eq!(activities.parent[0].id, format!("{ROOT}#objective/o1/question/q1"));
        assert_eq!(
            activities.grouping[0].id,
            format!("{ROOT}#objectives?objective_id=o1")
        );
        assert_eq!(
            activities.grouping[0].definition.name.get("en-US"),
            Some("Objective one")
        );
    }

    #[test]
    fn experienced_requires_numeric_spent_time() {
        let question = single_select("o1");
        let err = assembler()
            .learning_content_experienced(Some(&question), None)
            .unwrap_err();
        assert_eq!(err.message, "SpentTime is not a number");
    }

    #[test]
    fn experienced_requires_known_objective() {
        let question = single_select("missing");
        let err = assembler()
            .learning_content_experienced(Some(&question), Some(10.0))
            .unwrap_err();
        assert_eq!(err.message, "Objective is not found");
    }

    #[test]
    fn answered_statement_uses_question_url_and_objective_parent() {
        let statement = assembler()
            .question_answered(Some(&single_select("o1")))
            .unwrap();

        assert_eq!(statement.verb.id, KnownVerb::Answered.iri());
        assert_eq!(statement.object.id, format!("{ROOT}#objective/o1/question/q1"));
        assert_eq!(statement.response(), Some("a1"));
        assert_eq!(statement.correct_pattern(), Some("a1"));
        assert_eq!(statement.scaled_score(), Some(1.0));

        let parent = &statement.context.context_activities.as_ref().unwrap().parent[0];
        assert_eq!(parent.id, format!("{ROOT}#objectives?objective_id=o1"));
    }

    #[test]
    fn answered_rejects_missing_question() {
        let err = assembler().question_answered(None).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Precondition(PreconditionError::new("Question is not an object"))
        );
    }

    #[test]
    fn answered_rejects_unknown_objective() {
        let err = assembler()
            .question_answered(Some(&single_select("o9")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Objective is not found");
    }
}
