use super::types::{
    CourseConfig, DEFAULT_COURSE_ID, DEFAULT_COURSE_TITLE, DEFAULT_POSITIVE_VERB,
    RawCourseConfig, RawQueueConfig, RawTincanConfig, RawXapiConfig, TincanConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tincan_core::XapiSettings;
use tincan_queue::QueueConfig;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<TincanConfig> {
        let mut layers = Vec::new();
        if let Some(user_path) = Self::user_config_path() {
            layers.push(user_path);
        }
        layers.push(Self::project_config_path());

        Self::load_layers(&layers)
    }

    /// Load and merge the given files in order; later files win.
    ///
    /// Missing files are skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<TincanConfig> {
        let mut raw = RawTincanConfig::default();

        for path in paths {
            if let Some(layer) = Self::read_raw(path)? {
                debug!(path = %path.display(), "loaded config layer");
                raw = Self::merge_raw(raw, layer);
            }
        }

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tincan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with TINCAN_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("TINCAN_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".tincan/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<Option<RawTincanConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(raw))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawTincanConfig, overlay: RawTincanConfig) -> RawTincanConfig {
        RawTincanConfig {
            xapi: RawXapiConfig {
                default_language: overlay.xapi.default_language.or(base.xapi.default_language),
                allowed_verbs: overlay.xapi.allowed_verbs.or(base.xapi.allowed_verbs),
                positive_verb: overlay.xapi.positive_verb.or(base.xapi.positive_verb),
            },
            queue: RawQueueConfig {
                max_attempts: overlay.queue.max_attempts.or(base.queue.max_attempts),
                retry_backoff: overlay.queue.retry_backoff.or(base.queue.retry_backoff),
            },
            course: RawCourseConfig {
                id: overlay.course.id.or(base.course.id),
                title: overlay.course.title.or(base.course.title),
                url: overlay.course.url.or(base.course.url),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawTincanConfig) -> TincanConfig {
        let defaults = XapiSettings::default();
        let mut xapi = XapiSettings {
            default_language: raw.xapi.default_language.unwrap_or(defaults.default_language),
            allowed_verbs: raw.xapi.allowed_verbs.unwrap_or(defaults.allowed_verbs),
            positive_verb: raw.xapi.positive_verb,
        };
        if xapi.positive_verb.is_none() {
            xapi = xapi.with_positive_verb(Some(DEFAULT_POSITIVE_VERB));
        }

        let mut queue = QueueConfig::default();
        if let Some(attempts) = raw.queue.max_attempts {
            queue = queue.with_max_attempts(attempts);
        }
        if let Some(backoff) = raw.queue.retry_backoff {
            queue = queue.with_retry_backoff(backoff);
        }

        TincanConfig {
            xapi,
            queue,
            course: CourseConfig {
                id: raw.course.id.unwrap_or_else(|| DEFAULT_COURSE_ID.to_string()),
                title: raw
                    .course
                    .title
                    .unwrap_or_else(|| DEFAULT_COURSE_TITLE.to_string()),
                url: raw.course.url,
            },
        }
    }
}
