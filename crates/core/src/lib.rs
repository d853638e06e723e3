pub mod archive;
pub mod config;
pub mod metrics;
pub mod scoring;
pub mod testing;
pub mod text;

pub use archive::{extract_subtitle, select_best, Archive, ArchiveError, ArchiveOpener};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MatchingConfig,
    ScoreOverrides,
};
pub use scoring::{
    CustomProfile, MatchEvaluation, MediaKind, ProfileSource, ScoreRegistry, ScoreTable,
    SubtitleCandidate, Threshold,
};
pub use text::{extract_relevant_name, to_chinese_numeral, NumeralError};
