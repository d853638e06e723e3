use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ConfigError;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Point overrides for the series score table
    #[serde(default)]
    pub series_scores: ScoreOverrides,
    /// Point overrides for the movie score table
    #[serde(default)]
    pub movie_scores: ScoreOverrides,
    #[serde(default)]
    pub matching: MatchingConfig,
    /// User-defined bonus profiles
    #[serde(default)]
    pub custom_profiles: Vec<CustomProfileConfig>,
}

/// Flat mapping of attribute name to point value.
///
/// Anything that is not a flat `name -> integer` table fails to deserialize,
/// which is how malformed override shapes surface as [`ConfigError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreOverrides(BTreeMap<String, i64>);

impl ScoreOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests.
    pub fn with(mut self, attribute: impl Into<String>, points: i64) -> Self {
        self.0.insert(attribute.into(), points);
        self
    }

    pub fn insert(&mut self, attribute: impl Into<String>, points: i64) {
        self.0.insert(attribute.into(), points);
    }

    pub fn get(&self, attribute: &str) -> Option<i64> {
        self.0.get(attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ScoreOverrides {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl TryFrom<serde_json::Value> for ScoreOverrides {
    type Error = ConfigError;

    /// Accept untyped settings (e.g. from a settings API) and reject
    /// anything that is not a flat object of integers.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "score overrides must be a table, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut overrides = ScoreOverrides::new();
        for (key, value) in object {
            let points = value.as_i64().ok_or_else(|| {
                ConfigError::ParseError(format!(
                    "score override '{}' must be an integer, got {}",
                    key,
                    json_kind(&value)
                ))
            })?;
            overrides.insert(key, points);
        }
        Ok(overrides)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a non-integer number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "a table",
    }
}

/// Acceptance thresholds, in percent of the maximum attainable score.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    #[serde(default = "default_series_min_percent")]
    pub series_min_score_percent: f64,
    #[serde(default = "default_movie_min_percent")]
    pub movie_min_score_percent: f64,
    /// Overrides the minimum for hash-only matches when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_min_score_percent: Option<f64>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            series_min_score_percent: default_series_min_percent(),
            movie_min_score_percent: default_movie_min_percent(),
            hash_min_score_percent: None,
        }
    }
}

fn default_series_min_percent() -> f64 {
    90.0
}

fn default_movie_min_percent() -> f64 {
    70.0
}

/// A configured bonus profile
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomProfileConfig {
    pub name: String,
    /// Points added to the maximum score (and earned on a match)
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub conditions: Vec<ConditionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConditionConfig {
    pub kind: ConditionKind,
    pub value: String,
    /// Required conditions must all hold; optional ones need at least one hit.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub negate: bool,
}

/// What a profile condition looks at
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Provider,
    Uploader,
    Language,
    ReleaseRegex,
}
