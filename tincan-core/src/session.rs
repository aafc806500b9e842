//! Launch data fixed at activation.

use crate::model::Actor;

/// Identity and addressing for one course launch.
///
/// Created once when the provider is activated and shared read-only with
/// every builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub actor: Actor,
    pub course_id: String,
    pub activity_name: String,
    pub activity_url: String,
    /// Activity URL without query string or fragment
    pub root_course_url: String,
}

impl Session {
    pub fn activate(
        course_id: impl Into<String>,
        actor: Actor,
        activity_name: impl Into<String>,
        activity_url: Option<&str>,
    ) -> Self {
        let activity_url = activity_url.unwrap_or_default().to_string();
        let root_course_url = root_url(&activity_url);

        Self {
            actor,
            course_id: course_id.into(),
            activity_name: activity_name.into(),
            activity_url,
            root_course_url,
        }
    }

    /// `{root}#objectives?objective_id={objective}`
    pub fn objective_url(&self, objective_id: &str) -> String {
        format!(
            "{}#objectives?objective_id={}",
            self.root_course_url, objective_id
        )
    }

    /// `{root}#objective/{objective}/question/{question}`
    pub fn question_url(&self, objective_id: &str, question_id: &str) -> String {
        format!(
            "{}#objective/{}/question/{}",
            self.root_course_url, objective_id, question_id
        )
    }

    /// Question URL with a `?learningContents` suffix.
    pub fn learning_content_url(&self, objective_id: &str, question_id: &str) -> String {
        format!(
            "{}?learningContents",
            self.question_url(objective_id, question_id)
        )
    }
}

fn root_url(activity_url: &str) -> String {
    let without_query = activity_url.split('?').next().unwrap_or_default();
    without_query
        .split('#')
        .next()
        .unwrap_or_default()
        .to_string()
}
