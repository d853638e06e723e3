//! Shared types for scoring operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A subtitle candidate as seen by custom profiles.
///
/// Only the fields profiles can reason about; everything the metadata guesser
/// extracts from the release name arrives separately as matched attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    /// Provider the candidate was listed by (e.g. "zimuku").
    pub provider: String,
    /// Language code, e.g. "zho", "zho-TW", "eng".
    pub language: String,
    /// Release name the subtitle was made for.
    pub release_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(default)]
    pub hearing_impaired: bool,
}

impl SubtitleCandidate {
    pub fn new(provider: impl Into<String>, release_info: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            release_info: release_info.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_uploader(mut self, uploader: impl Into<String>) -> Self {
        self.uploader = Some(uploader.into());
        self
    }

    pub fn with_hearing_impaired(mut self, hearing_impaired: bool) -> Self {
        self.hearing_impaired = hearing_impaired;
        self
    }
}

/// Minimum acceptable score for a table, computed from a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    /// Minimum points a candidate needs.
    pub points: f64,
    /// Maximum attainable points (including loaded profiles).
    pub max_score: i64,
    /// Every attribute and profile name the table knows about.
    pub attributes: BTreeSet<String>,
}

/// Outcome of scoring one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvaluation {
    /// Matched attributes, including names added by custom profiles.
    pub matches: BTreeSet<String>,
    pub score: i64,
    pub max_score: i64,
    /// `score` as a percentage of `max_score`.
    pub percent: f64,
    pub threshold: f64,
    pub accepted: bool,
}
