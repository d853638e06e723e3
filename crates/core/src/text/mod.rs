//! Text helpers for Chinese subtitle sites.
//!
//! - [`segment`]: pull the Latin release name out of a mixed-script title
//! - [`numeral`]: season numbers as Chinese numerals
//! - [`listing`]: season checks and cleanup for search listings

pub mod listing;
pub mod numeral;
pub mod segment;

pub use listing::{
    listing_release_name, search_keyword, season_marker, season_matches_title,
    show_year_from_title,
};
pub use numeral::{to_chinese_numeral, NumeralError};
pub use segment::{extract_relevant_name, extract_with, split_extension, NOISE_RANGE};
