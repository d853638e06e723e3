//! Helpers for reading subtitle-site search listings.
//!
//! Listing titles look like `苍穹浩瀚 第二季 (2017)` and the download links
//! carry mixed-script names such as `苍穹浩瀚.The.Expanse.S02E01.zip`.

use tracing::debug;

use super::numeral::to_chinese_numeral;
use super::segment::{extract_relevant_name, split_extension};

/// Season numeral a listing title names, `一` when it names none.
pub fn season_marker(title: &str) -> String {
    regex_lite::Regex::new(r"第(.*)季")
        .ok()
        .and_then(|re| re.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "一".to_string())
}

/// Whether a listing title belongs to the wanted `season`.
pub fn season_matches_title(title: &str, season: u32) -> bool {
    let wanted = match to_chinese_numeral(season) {
        Ok(numeral) => numeral,
        Err(e) => {
            debug!("Cannot compare season title: {}", e);
            return false;
        }
    };

    let found = season_marker(title);
    if found != wanted {
        debug!("Skipping listing {:?}: season {} != {}", title, found, wanted);
        return false;
    }
    true
}

/// Show year derived from a season listing.
///
/// Sites date each season on its own, so the first four-digit number in the
/// title is the season's year; the show started `season - 1` years earlier.
pub fn show_year_from_title(title: &str, season: u32) -> Option<i32> {
    let re = regex_lite::Regex::new(r"\d{4}").ok()?;
    let season_year: i32 = re.find(title)?.as_str().parse().ok()?;
    let season = i32::try_from(season).ok()?;
    Some(season_year - season + 1)
}

/// Release name of a listing link: the Latin part of the text with its
/// (archive) extension dropped.
pub fn listing_release_name(link_text: &str) -> String {
    let name = extract_relevant_name(link_text);
    let (stem, _) = split_extension(&name);
    stem.to_string()
}

/// Search keyword for a title: `Title.S02` for a season, `Title 2019` for a
/// dated movie, the bare title otherwise.
pub fn search_keyword(title: &str, season: Option<u32>, year: Option<i32>) -> String {
    match (season, year) {
        (Some(season), _) if season > 0 => format!("{}.S{:02}", title, season),
        (_, Some(year)) => format!("{} {:4}", title, year),
        _ => title.to_string(),
    }
}
