//! Score registry lifecycle integration tests.
//!
//! These tests drive the registry the way a subtitle search does:
//! - Build tables from a TOML configuration
//! - Score candidates with configured custom profiles
//! - Reapply configuration and reset tables between searches
//! - Share the registry across scoring threads

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::thread;

use tempfile::NamedTempFile;

use subrank_core::{
    load_config, load_config_from_str,
    scoring::{complete_year_match, HASH},
    testing::{fixtures, StaticProfile, StaticProfileSource},
    Config, ConfigError, MediaKind, ScoreRegistry, SubtitleCandidate,
};

const CONFIG: &str = r#"
[matching]
series_min_score_percent = 90
movie_min_score_percent = 70

[[custom_profiles]]
name = "trusted_provider"
score = 20

[[custom_profiles.conditions]]
kind = "provider"
value = "zimuku"
required = true
"#;

fn registry() -> ScoreRegistry {
    let config = load_config_from_str(CONFIG).expect("config should parse");
    ScoreRegistry::from_config(&config).expect("config should validate")
}

#[test]
fn test_registry_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    let registry = ScoreRegistry::from_config(&config).unwrap();

    // hash 359 + hearing_impaired 1 + trusted_provider 20
    assert_eq!(registry.read(MediaKind::Series).max_score(), 380);
    // hash 119 + hearing_impaired 1 + trusted_provider 20
    assert_eq!(registry.read(MediaKind::Movie).max_score(), 140);
}

#[test]
fn test_profile_decides_acceptance() {
    let registry = registry();
    let guessed = fixtures::matches(&["series", "year", "season", "episode"]);

    // 330 + 20 = 350 >= 342
    let trusted = registry.evaluate(
        MediaKind::Series,
        &fixtures::chinese_candidate("The.Expanse.S02E01.720p"),
        &guessed,
    );
    assert!(trusted.accepted);
    assert_eq!(trusted.score, 350);
    assert!(trusted.matches.contains("trusted_provider"));

    // 330 < 342
    let other = registry.evaluate(
        MediaKind::Series,
        &SubtitleCandidate::new("subhd", "The.Expanse.S02E01.720p"),
        &guessed,
    );
    assert!(!other.accepted);
    assert_eq!(other.score, 330);
    assert_eq!(other.threshold, 342.0);
}

#[test]
fn test_hash_match_scores_hash_only() {
    let registry = registry();
    let guessed = fixtures::matches(&[HASH, "series", "season", "episode"]);

    let evaluation = registry.evaluate(
        MediaKind::Series,
        &SubtitleCandidate::new("subhd", "x").with_hearing_impaired(true),
        &guessed,
    );

    assert_eq!(evaluation.score, 360);
    assert!(evaluation.accepted);
}

#[test]
fn test_year_completion_feeds_scoring() {
    let registry = registry();
    let mut guessed = fixtures::matches(&["series", "season", "episode", "release_group"]);
    complete_year_match(MediaKind::Series, None, Some(2016), &mut guessed);

    let evaluation = registry.evaluate(
        MediaKind::Series,
        &fixtures::chinese_candidate("The.Expanse.S02E01"),
        &guessed,
    );

    // 180 + 90 + 30 + 30 + 15 + 20
    assert_eq!(evaluation.score, 365);
    assert!(evaluation.matches.contains("year"));
}

#[test]
fn test_apply_config_then_reset() {
    let registry = registry();

    let mut update = Config::default();
    update.series_scores.insert("release_group", 40);
    registry.apply_config(&update).unwrap();

    {
        let series = registry.read(MediaKind::Series);
        assert_eq!(series.get(HASH), Some(384));
        assert!(!series.is_stale());
        // The new configuration has no profiles.
        assert_eq!(series.max_score(), 385);
    }
    assert_eq!(registry.read(MediaKind::Movie).max_score(), 120);

    registry.reset(MediaKind::Series);
    assert_eq!(registry.read(MediaKind::Series).get("release_group"), Some(15));
    assert_eq!(registry.read(MediaKind::Series).get(HASH), Some(359));
}

#[test]
fn test_invalid_config_leaves_registry_untouched() {
    let registry = registry();

    let mut bad = Config::default();
    bad.matching.movie_min_score_percent = 120.0;
    assert!(matches!(
        registry.apply_config(&bad),
        Err(ConfigError::ValidationError(_))
    ));
    assert_eq!(registry.read(MediaKind::Series).max_score(), 380);
}

#[test]
fn test_hash_threshold_override() {
    let config = load_config_from_str(
        r#"
[matching]
hash_min_score_percent = 50
"#,
    )
    .unwrap();
    let registry = ScoreRegistry::from_config(&config).unwrap();

    assert_eq!(registry.threshold(MediaKind::Movie, true).points, 60.0);
    assert_eq!(registry.threshold(MediaKind::Movie, false).points, 84.0);
}

#[test]
fn test_reload_picks_up_new_profiles() {
    let source = Arc::new(StaticProfileSource::new(Vec::new()));
    let registry = ScoreRegistry::with_source(&Config::default(), source.clone());
    assert_eq!(registry.read(MediaKind::Movie).max_score(), 120);

    source.set_profiles(vec![StaticProfile::always("bonus", 30)]);
    registry.reload_profiles();

    assert_eq!(registry.read(MediaKind::Movie).max_score(), 150);
    assert_eq!(registry.read(MediaKind::Series).max_score(), 390);
}

#[test]
fn test_concurrent_scoring() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let guessed: HashSet<String> = fixtures::matches(&["title", "year"]);
                let candidate = SubtitleCandidate::new("zimuku", format!("Heat.1995.{}", i));
                registry.evaluate(MediaKind::Movie, &candidate, &guessed).score
            })
        })
        .collect();

    for handle in handles {
        // 60 + 30 + 20
        assert_eq!(handle.join().unwrap(), 110);
    }
}
