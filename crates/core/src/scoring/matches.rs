//! Post-processing of matched attribute sets before scoring.

use std::collections::HashSet;

use crate::scoring::media::MediaKind;

/// Add `year` to `matches` where the guesser cannot.
///
/// - Both years known and equal: `year` matches.
/// - Episodes whose target has no year: `year` matches once `series`,
///   `season` and `episode` all matched, so year-less shows are not
///   penalized for the missing attribute.
pub fn complete_year_match(
    kind: MediaKind,
    target_year: Option<i32>,
    subtitle_year: Option<i32>,
    matches: &mut HashSet<String>,
) {
    if target_year.is_some() && target_year == subtitle_year {
        matches.insert("year".to_string());
    }

    if kind == MediaKind::Series
        && target_year.is_none()
        && ["series", "season", "episode"]
            .iter()
            .all(|attr| matches.contains(*attr))
    {
        matches.insert("year".to_string());
    }
}
