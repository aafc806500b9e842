//! Statement context: where in the course an action happened.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Activity;

/// Extension key under which every statement carries the course id.
pub const COURSE_ID_EXTENSION: &str = "http://easygenerator/expapi/course/id";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextActivities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent: Vec<Activity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grouping: Vec<Activity>,
}

impl ContextActivities {
    pub fn parent(activity: Activity) -> Self {
        Self {
            parent: vec![activity],
            grouping: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_grouping(mut self, activity: Activity) -> Self {
        self.grouping.push(activity);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_activities: Option<ContextActivities>,

    #[serde(default)]
    pub extensions: BTreeMap<String, Value>,
}

impl Context {
    pub fn with_activities(activities: ContextActivities) -> Self {
        Self {
            context_activities: Some(activities),
            extensions: BTreeMap::new(),
        }
    }

    /// Set the course-id extension, replacing any existing value.
    #[must_use]
    pub fn for_course(mut self, course_id: &str) -> Self {
        self.extensions.insert(
            COURSE_ID_EXTENSION.to_string(),
            Value::String(course_id.to_string()),
        );
        self
    }

    pub fn course_id(&self) -> Option<&str> {
        self.extensions.get(COURSE_ID_EXTENSION).and_then(Value::as_str)
    }
}
