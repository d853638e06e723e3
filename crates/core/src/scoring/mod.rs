//! Weighted match scoring.
//!
//! Converts the set of attributes a subtitle matched (release group,
//! resolution, year, ...) into a single score and decides whether it clears
//! the configured threshold.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ScoreRegistry                        │
//! │   (built at startup, RwLock per table, no global state)   │
//! │                                                           │
//! │  ┌────────────────────────┐  ┌────────────────────────┐   │
//! │  │ ScoreTable (series)    │  │ ScoreTable (movies)    │   │
//! │  │  attribute -> points   │  │  attribute -> points   │   │
//! │  │  hash = Σ others       │  │  hash = Σ others       │   │
//! │  │  ProfileState          │  │  ProfileState          │   │
//! │  └───────────┬────────────┘  └───────────┬────────────┘   │
//! │              └──────────┬─────────────────┘               │
//! │                 ProfileSource trait                       │
//! │        NoProfiles | ConfiguredProfiles | custom           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The maximum attainable score is `hash + hearing_impaired` plus the score
//! of every loaded custom profile. Thresholds are a percentage of that
//! maximum.
//!
//! # Example
//!
//! ```ignore
//! use subrank_core::scoring::{MediaKind, ScoreRegistry, SubtitleCandidate};
//!
//! let registry = ScoreRegistry::from_config(&config)?;
//! let candidate = SubtitleCandidate::new("zimuku", "Show.S01E02.1080p.WEB-DL");
//! let evaluation = registry.evaluate(MediaKind::Series, &candidate, &guessed);
//! if evaluation.accepted {
//!     // download it
//! }
//! ```

mod matches;
mod media;
mod profile;
mod registry;
mod table;
mod types;

pub use matches::complete_year_match;
pub use media::{MediaKind, HASH, HEARING_IMPAIRED};
pub use profile::{
    Condition, ConditionProfile, ConfiguredProfiles, CustomProfile, NoProfiles, ProfileSource,
};
pub use registry::ScoreRegistry;
pub use table::{ProfileState, ScoreTable};
pub use types::{MatchEvaluation, SubtitleCandidate, Threshold};
