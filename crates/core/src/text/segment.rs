//! Isolate the Latin release name inside a mixed-script title.
//!
//! Chinese subtitle sites title their uploads like
//! `极速.Fast.and.Furious.2160p.mkv`; only the Latin part is useful to a
//! release-name guesser.

use std::ops::RangeInclusive;

/// CJK Unified Ideographs block, the characters discarded as noise.
pub const NOISE_RANGE: RangeInclusive<char> = '\u{4e00}'..='\u{9fff}';

/// Characters kept as the relevant name.
pub fn is_target_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_noise_char(c: char) -> bool {
    NOISE_RANGE.contains(&c)
}

/// Split off the final extension of the last path component, the way
/// `name.ext` is usually read. Leading dots of a dotfile are not an
/// extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    let base = &name[base_start..];

    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => {
            name.split_at(base_start + dot)
        }
        _ => (name, ""),
    }
}

/// Extract the relevant (Latin) run of `raw`, keeping its extension.
///
/// Returns an empty string when the stem has no Latin letters at all.
pub fn extract_relevant_name(raw: &str) -> String {
    extract_with(raw, is_target_char, is_noise_char)
}

/// [`extract_relevant_name`] with caller-supplied character classes.
pub fn extract_with<T, N>(raw: &str, is_target: T, is_noise: N) -> String
where
    T: Fn(char) -> bool,
    N: Fn(char) -> bool,
{
    let (stem, suffix) = split_extension(raw);
    let chars: Vec<char> = stem.chars().collect();

    let targets: Vec<usize> = positions(&chars, &is_target);
    let noise: Vec<usize> = positions(&chars, &is_noise);

    let (first_target, last_target) = match (targets.first(), targets.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return String::new(),
    };

    let (start, end) = match (noise.first(), noise.last()) {
        (None, _) | (_, None) => (first_target, chars.len()),
        (_, Some(&last_noise)) if last_noise < first_target => (first_target, chars.len()),
        (Some(&first_noise), _) if last_target < first_noise => (0, first_noise),
        _ => longest_clean_run(&chars, &is_target, &is_noise).unwrap_or((0, 0)),
    };

    let span: String = chars[start..end].iter().collect();
    format!("{}{}", span.trim(), suffix)
}

fn positions<F: Fn(char) -> bool>(chars: &[char], class: &F) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|(_, c)| class(**c))
        .map(|(i, _)| i)
        .collect()
}

/// Longest `[start, end)` span that begins at a target character and runs
/// up to (not including) the next noise character. Earliest wins on ties.
fn longest_clean_run<T, N>(chars: &[char], is_target: &T, is_noise: &N) -> Option<(usize, usize)>
where
    T: Fn(char) -> bool,
    N: Fn(char) -> bool,
{
    let len = chars.len();
    let mut best: Option<(usize, usize)> = None;
    let mut end = 0;

    while end < len {
        while end < len && !is_target(chars[end]) {
            end += 1;
        }
        if end == len {
            break;
        }

        let start = end;
        while end < len && !is_noise(chars[end]) {
            end += 1;
        }

        if best.is_none_or(|(s, e)| end - start > e - s) {
            best = Some((start, end));
        }

        // Step past the noise character that ended the run.
        end += 1;
    }

    best
}
