//! Media kinds and their default point tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derived attribute: a content-hash match, worth every other attribute combined.
pub const HASH: &str = "hash";

/// Scored separately from the hash derivation; added on top of it for the maximum.
pub const HEARING_IMPAIRED: &str = "hearing_impaired";

const SERIES_DEFAULTS: &[(&str, i64)] = &[
    (HASH, 359),
    ("series", 180),
    ("year", 90),
    ("season", 30),
    ("episode", 30),
    ("release_group", 15),
    ("source", 7),
    ("audio_codec", 3),
    ("resolution", 2),
    ("video_codec", 2),
    (HEARING_IMPAIRED, 1),
    ("streaming_service", 0),
    ("edition", 0),
];

const MOVIE_DEFAULTS: &[(&str, i64)] = &[
    (HASH, 119),
    ("title", 60),
    ("year", 30),
    ("release_group", 15),
    ("source", 7),
    ("audio_codec", 3),
    ("resolution", 2),
    ("video_codec", 2),
    (HEARING_IMPAIRED, 1),
    ("streaming_service", 0),
    ("edition", 0),
];

/// The kind of media a score table ranks subtitles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// TV episodes.
    Series,
    /// Feature films.
    Movie,
}

impl MediaKind {
    /// Default point table for this media kind.
    pub fn defaults(&self) -> &'static [(&'static str, i64)] {
        match self {
            MediaKind::Series => SERIES_DEFAULTS,
            MediaKind::Movie => MOVIE_DEFAULTS,
        }
    }

    /// Whether `attribute` belongs to this kind's vocabulary.
    pub fn recognizes(&self, attribute: &str) -> bool {
        self.defaults().iter().any(|(name, _)| *name == attribute)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Series => "series",
            MediaKind::Movie => "movies",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "series" | "episode" | "tv" => Ok(MediaKind::Series),
            "movie" | "movies" | "film" => Ok(MediaKind::Movie),
            other => Err(format!("unknown media kind '{}'", other)),
        }
    }
}
