//! Statement outcome: score, response and duration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    scaled: f64,
}

impl Score {
    /// Normalize a 0–100 percentage. Out-of-range input is clamped and a
    /// non-finite input scores zero.
    pub fn from_percent(percent: f64) -> Self {
        Self::scaled(percent / 100.0)
    }

    /// Wrap an already normalized value, clamped into `[0, 1]`.
    pub fn scaled(value: f64) -> Self {
        let scaled = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { scaled }
    }

    pub fn value(&self) -> f64 {
        self.scaled
    }
}

#[derive(Serialize, Deserialize)]
struct ScoreRepr {
    #[serde(serialize_with = "serialize_number")]
    scaled: f64,
}

// Whole values go out as integers so 0% and 100% read `0` and `1`.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ScoreRepr {
            scaled: self.scaled,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ScoreRepr::deserialize(deserializer)?;
        Ok(Self::scaled(repr.scaled))
    }
}

/// xAPI `result` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// ISO-8601 duration, e.g. `PT0H1M30S`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl StatementResult {
    pub fn scored(score: Score) -> Self {
        Self {
            score: Some(score),
            ..Default::default()
        }
    }

    pub fn answered(score: Score, response: impl Into<String>) -> Self {
        Self {
            score: Some(score),
            response: Some(response.into()),
            duration: None,
        }
    }

    pub fn timed(duration: impl Into<String>) -> Self {
        Self {
            duration: Some(duration.into()),
            ..Default::default()
        }
    }
}
