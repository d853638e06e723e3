//! Pick the best subtitle out of a multi-file archive.
//!
//! Subtitle packs often bundle several variants (simplified, traditional,
//! bilingual, various formats). Each eligible member gets a small
//! preference score from its name and the first highest-scoring member wins.

use tracing::debug;

use crate::metrics;

use super::error::ArchiveError;
use super::traits::Archive;
use super::types::SUBTITLE_EXTENSIONS;

const FORMAT_MARKERS: &[&str] = &["ass", "ssa", "srt"];
const SIMPLIFIED_MARKERS: &[&str] = &["简体", "chs", ".gb."];
const TRADITIONAL_MARKERS: &[&str] = &["繁体", "cht", ".big5."];
const DUAL_TRACK_MARKERS: &[&str] = &["chs.eng", "chs&eng", "cht.eng", "cht&eng"];
const BILINGUAL_MARKERS: &[&str] = &["中英", "简英", "繁英", "双语", "简体&英文", "繁体&英文"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whether the member's base name is a dotfile.
pub fn is_hidden(name: &str) -> bool {
    name.rsplit(['/', '\\'])
        .next()
        .is_some_and(|base| base.starts_with('.'))
}

/// Whether the name ends with a known subtitle extension (case-insensitive).
pub fn has_subtitle_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUBTITLE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Preference score for a member name. All bonuses are additive.
///
/// Only the format check ignores case; language markers must appear as
/// written, so `movie.CHS.srt` earns the format point alone.
pub fn entry_score(name: &str) -> i32 {
    let mut score = 0;

    if contains_any(&name.to_lowercase(), FORMAT_MARKERS) {
        score += 1;
    }
    if contains_any(name, SIMPLIFIED_MARKERS) {
        score += 2;
    }
    if contains_any(name, TRADITIONAL_MARKERS) {
        score += 2;
    }
    if contains_any(name, DUAL_TRACK_MARKERS) {
        score += 2;
    }
    if contains_any(name, BILINGUAL_MARKERS) {
        score += 4;
    }

    score
}

/// Name of the best eligible member, `None` when nothing is eligible.
///
/// Ties keep the earliest member.
pub fn best_entry_name<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, i32)> = None;

    for name in names {
        if is_hidden(name) || !has_subtitle_extension(name) {
            continue;
        }

        let score = entry_score(name);
        debug!("subtitle {}, score: {}", name, score);

        if best.is_none_or(|(_, max)| score > max) {
            best = Some((name, score));
        }
    }

    best.map(|(name, _)| name)
}

/// Bytes of the best subtitle in `archive`, `None` when it holds no
/// eligible member.
pub fn select_best<A: Archive + ?Sized>(archive: &A) -> Result<Option<Vec<u8>>, ArchiveError> {
    let names = archive.names();

    match best_entry_name(names.iter().map(String::as_str)) {
        Some(name) => {
            metrics::ARCHIVE_SELECTIONS
                .with_label_values(&["selected"])
                .inc();
            archive.read(name).map(Some)
        }
        None => {
            debug!("No subtitle found among {} archive members", names.len());
            metrics::ARCHIVE_SELECTIONS.with_label_values(&["empty"]).inc();
            Ok(None)
        }
    }
}
