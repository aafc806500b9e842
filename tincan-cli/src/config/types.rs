use std::time::Duration;

use serde::{Deserialize, Serialize};
use tincan_core::XapiSettings;
use tincan_queue::QueueConfig;

/// Positive verb used when no layer configures one
pub const DEFAULT_POSITIVE_VERB: &str = "passed";

/// Course id used when no layer configures one
pub const DEFAULT_COURSE_ID: &str = "course";

/// Course title used when no layer configures one
pub const DEFAULT_COURSE_TITLE: &str = "Course";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTincanConfig {
    #[serde(default)]
    pub xapi: RawXapiConfig,

    #[serde(default)]
    pub queue: RawQueueConfig,

    #[serde(default)]
    pub course: RawCourseConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawXapiConfig {
    pub default_language: Option<String>,
    pub allowed_verbs: Option<Vec<String>>,
    pub positive_verb: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQueueConfig {
    pub max_attempts: Option<u32>,

    #[serde(default, with = "humantime_serde")]
    pub retry_backoff: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCourseConfig {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TincanConfig {
    #[serde(default)]
    pub xapi: XapiSettings,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub course: CourseConfig,
}

impl Default for TincanConfig {
    fn default() -> Self {
        Self {
            xapi: XapiSettings::default().with_positive_verb(Some(DEFAULT_POSITIVE_VERB)),
            queue: QueueConfig::default(),
            course: CourseConfig::default(),
        }
    }
}

/// Course launch data passed to the provider at init
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseConfig {
    pub id: String,

    /// Display name of the course activity
    pub title: String,

    /// Launch URL; statement ids are derived from it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_COURSE_ID.to_string(),
            title: DEFAULT_COURSE_TITLE.to_string(),
            url: None,
        }
    }
}
