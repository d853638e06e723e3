//! Weighted score table.
//!
//! Holds the attribute -> points mapping for one media kind plus the custom
//! profiles loaded for it. The `hash` entry is derived: it is the sum of all
//! other entries except `hearing_impaired`, so a content-hash match always
//! outranks any combination of individual attribute matches.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::{validate_config, Config, ConfigError, ScoreOverrides};
use crate::metrics;
use crate::scoring::media::{MediaKind, HASH, HEARING_IMPAIRED};
use crate::scoring::profile::{ConfiguredProfiles, CustomProfile, ProfileSource};
use crate::scoring::types::{SubtitleCandidate, Threshold};

/// Load state of a table's custom profiles.
#[derive(Debug, Default)]
pub enum ProfileState {
    #[default]
    Unloaded,
    Loaded(Vec<Box<dyn CustomProfile>>),
}

impl ProfileState {
    fn profiles(&self) -> &[Box<dyn CustomProfile>] {
        match self {
            ProfileState::Unloaded => &[],
            ProfileState::Loaded(profiles) => profiles,
        }
    }
}

/// Score table for one media kind.
pub struct ScoreTable {
    kind: MediaKind,
    data: BTreeMap<String, i64>,
    /// Set by `update`, cleared by `rebuild_derived_fields` and `reset`.
    hash_stale: bool,
    profiles: ProfileState,
    source: Arc<dyn ProfileSource>,
}

impl fmt::Debug for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreTable")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("hash_stale", &self.hash_stale)
            .field("profiles", &self.profiles)
            .field("source", &"<profile source>")
            .finish()
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} Score class>", self.kind)
    }
}

impl ScoreTable {
    /// Build a table from the kind's defaults and `overrides`.
    ///
    /// Override keys outside the kind's vocabulary are ignored, as is `hash`
    /// (it is always derived). Profiles are loaded now when
    /// `load_profiles` is set, otherwise on first use.
    pub fn new(
        kind: MediaKind,
        overrides: &ScoreOverrides,
        source: Arc<dyn ProfileSource>,
        load_profiles: bool,
    ) -> Self {
        let mut table = Self {
            kind,
            data: defaults_for(kind),
            hash_stale: false,
            profiles: ProfileState::Unloaded,
            source,
        };
        table.apply_overrides(overrides);
        table.rebuild_derived_fields();

        if load_profiles {
            table.load_profiles();
        }

        table
    }

    /// Build a table from the settings section for `kind`, with profiles
    /// from `custom_profiles` loaded eagerly.
    pub fn from_config(kind: MediaKind, config: &Config) -> Result<Self, ConfigError> {
        validate_config(config)?;

        let overrides = match kind {
            MediaKind::Series => &config.series_scores,
            MediaKind::Movie => &config.movie_scores,
        };
        let source = Arc::new(ConfiguredProfiles::new(config.custom_profiles.clone()));

        Ok(Self::new(kind, overrides, source, true))
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Points for a single attribute, `None` for names outside the table.
    pub fn get(&self, attribute: &str) -> Option<i64> {
        self.data.get(attribute).copied()
    }

    /// Whether `hash` may be out of date after an `update`.
    pub fn is_stale(&self) -> bool {
        self.hash_stale
    }

    /// Restore every value to the kind's defaults. Profiles are left alone.
    pub fn reset(&mut self) {
        self.data = defaults_for(self.kind);
        self.hash_stale = false;
    }

    /// Apply overrides over the current values.
    ///
    /// `hash` is not recomputed; call [`rebuild_derived_fields`] once all
    /// overrides are in.
    ///
    /// [`rebuild_derived_fields`]: ScoreTable::rebuild_derived_fields
    pub fn update(&mut self, overrides: &ScoreOverrides) {
        if self.apply_overrides(overrides) > 0 {
            self.hash_stale = true;
        }
    }

    /// Recompute `hash` from the current table.
    pub fn rebuild_derived_fields(&mut self) {
        let hash = self.hash_score();
        self.data.insert(HASH.to_string(), hash);
        self.hash_stale = false;
    }

    /// Replace the profile source. Takes effect on the next `load_profiles`.
    pub fn set_profile_source(&mut self, source: Arc<dyn ProfileSource>) {
        self.source = source;
    }

    /// (Re)load custom profiles from the profile source.
    pub fn load_profiles(&mut self) {
        let profiles = self.source.list_profiles();

        if profiles.is_empty() {
            debug!("No score profiles found for {}", self.kind);
        } else {
            debug!("Loaded profiles for {}: {:?}", self.kind, profiles);
        }

        metrics::PROFILE_LOADS
            .with_label_values(&[self.kind.as_str()])
            .inc();
        self.profiles = ProfileState::Loaded(profiles);
    }

    /// Load profiles unless they already are.
    pub fn ensure_profiles_loaded(&mut self) {
        if !self.profiles_loaded() {
            self.load_profiles();
        }
    }

    pub fn profiles_loaded(&self) -> bool {
        matches!(self.profiles, ProfileState::Loaded(_))
    }

    /// Loaded profiles; empty while unloaded.
    pub fn profiles(&self) -> &[Box<dyn CustomProfile>] {
        self.profiles.profiles()
    }

    /// Add the names of matching profiles to `matches`, loading profiles first
    /// if needed.
    pub fn check_custom_profiles(
        &mut self,
        candidate: &SubtitleCandidate,
        matches: &mut HashSet<String>,
    ) -> usize {
        self.ensure_profiles_loaded();
        self.apply_custom_profiles(candidate, matches)
    }

    /// Read-only variant of [`check_custom_profiles`] that uses whatever is
    /// loaded right now. Returns how many profiles matched.
    ///
    /// [`check_custom_profiles`]: ScoreTable::check_custom_profiles
    pub fn apply_custom_profiles(
        &self,
        candidate: &SubtitleCandidate,
        matches: &mut HashSet<String>,
    ) -> usize {
        let mut hits = 0;
        for profile in self.profiles() {
            if profile.matches(candidate) {
                debug!("Custom profile '{}' matched {:?}", profile.name(), candidate.release_info);
                metrics::PROFILE_HITS
                    .with_label_values(&[self.kind.as_str()])
                    .inc();
                matches.insert(profile.name().to_string());
                hits += 1;
            }
        }
        hits
    }

    /// Profile name -> profile score.
    pub fn custom_profile_scores(&self) -> BTreeMap<String, i64> {
        self.profiles()
            .iter()
            .map(|p| (p.name().to_string(), p.score()))
            .collect()
    }

    /// Profile scores merged with the base table. Base entries win on a
    /// name collision.
    pub fn scores(&self) -> BTreeMap<String, i64> {
        let mut scores = self.custom_profile_scores();
        scores.extend(self.data.iter().map(|(k, v)| (k.clone(), *v)));
        scores
    }

    /// `hash + hearing_impaired + sum(profile scores)`, saturating at
    /// `i64::MAX`.
    pub fn max_score(&self) -> i64 {
        let profile_total = saturating_total(self.profiles().iter().map(|p| p.score()));
        saturating_total([
            self.get(HASH).unwrap_or(0),
            self.get(HEARING_IMPAIRED).unwrap_or(0),
            profile_total,
        ])
    }

    /// Minimum points for acceptance at `special_percent` if given, else
    /// `min_percent`.
    pub fn compute_threshold(&self, min_percent: f64, special_percent: Option<f64>) -> Threshold {
        let max_score = self.max_score();
        let percent = special_percent.unwrap_or(min_percent);

        Threshold {
            points: max_score as f64 * percent / 100.0,
            max_score,
            attributes: self.scores().into_keys().collect(),
        }
    }

    /// Points earned by a matched attribute set.
    ///
    /// A `hash` match stands in for every individual attribute, so only
    /// `hash`, `hearing_impaired` and profile names count alongside it.
    /// Unknown names are worth nothing.
    pub fn score_matches<S: AsRef<str>>(&self, matches: &HashSet<S>) -> i64 {
        let scores = self.scores();
        let hash_match = matches.iter().any(|m| m.as_ref() == HASH);

        let matched = matches
            .iter()
            .map(|m| m.as_ref())
            .filter(|name| {
                !hash_match
                    || *name == HASH
                    || *name == HEARING_IMPAIRED
                    || !self.data.contains_key(*name)
            })
            .filter_map(|name| scores.get(name).copied());
        saturating_total(matched)
    }

    /// `score` as a percentage of [`max_score`](ScoreTable::max_score).
    pub fn percent(&self, score: i64) -> f64 {
        let max = self.max_score();
        if max <= 0 {
            return 0.0;
        }
        score as f64 * 100.0 / max as f64
    }

    /// Whether a matched set reaches the threshold.
    pub fn is_acceptable<S: AsRef<str>>(
        &self,
        matches: &HashSet<S>,
        min_percent: f64,
        special_percent: Option<f64>,
    ) -> bool {
        let threshold = self.compute_threshold(min_percent, special_percent);
        self.score_matches(matches) as f64 >= threshold.points
    }

    /// Apply recognized overrides; returns how many were applied.
    fn apply_overrides(&mut self, overrides: &ScoreOverrides) -> usize {
        let mut applied = 0;
        for (attribute, points) in overrides.iter() {
            if attribute == HASH {
                debug!("Ignoring {} override for derived '{}'", self.kind, HASH);
                continue;
            }
            if !self.kind.recognizes(attribute) {
                debug!("Ignoring unknown {} score attribute '{}'", self.kind, attribute);
                continue;
            }
            self.data.insert(attribute.to_string(), points);
            applied += 1;
        }
        applied
    }

    fn hash_score(&self) -> i64 {
        let points = self
            .data
            .iter()
            .filter(|(key, _)| key.as_str() != HASH && key.as_str() != HEARING_IMPAIRED)
            .map(|(_, points)| *points);
        saturating_total(points)
    }
}

/// Sum that clamps at the `i64` bounds instead of overflowing.
fn saturating_total(points: impl IntoIterator<Item = i64>) -> i64 {
    points.into_iter().fold(0i64, i64::saturating_add)
}

fn defaults_for(kind: MediaKind) -> BTreeMap<String, i64> {
    kind.defaults()
        .iter()
        .map(|(name, points)| (name.to_string(), *points))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::profile::NoProfiles;
    use crate::testing::{StaticProfile, StaticProfileSource};

    fn series() -> ScoreTable {
        ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), Arc::new(NoProfiles), false)
    }

    fn movie() -> ScoreTable {
        ScoreTable::new(MediaKind::Movie, &ScoreOverrides::new(), Arc::new(NoProfiles), false)
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_series_defaults() {
        let table = series();
        assert_eq!(table.get("hash"), Some(359));
        assert_eq!(table.get("hearing_impaired"), Some(1));
        assert_eq!(table.max_score(), 360);
        assert!(!table.is_stale());
    }

    #[test]
    fn test_movie_defaults() {
        let table = movie();
        assert_eq!(table.get("hash"), Some(119));
        assert_eq!(table.max_score(), 120);
        assert_eq!(table.get("season"), None);
    }

    #[test]
    fn test_overrides_recompute_hash() {
        let overrides = ScoreOverrides::new().with("release_group", 20).with("year", 100);
        let table = ScoreTable::new(MediaKind::Series, &overrides, Arc::new(NoProfiles), false);

        assert_eq!(table.get("release_group"), Some(20));
        assert_eq!(table.get("year"), Some(100));
        assert_eq!(table.get("hash"), Some(359 + 5 + 10));
        assert_eq!(table.max_score(), 375);
    }

    #[test]
    fn test_unknown_and_hash_overrides_ignored() {
        let overrides = ScoreOverrides::new()
            .with("season", 50)
            .with("bogus", 1000)
            .with("hash", 1);
        let table = ScoreTable::new(MediaKind::Movie, &overrides, Arc::new(NoProfiles), false);

        assert_eq!(table.get("season"), None);
        assert_eq!(table.get("bogus"), None);
        assert_eq!(table.get("hash"), Some(119));
    }

    #[test]
    fn test_huge_overrides_saturate() {
        let overrides = ScoreOverrides::new().with("series", i64::MAX).with("year", 1);
        let table = ScoreTable::new(MediaKind::Series, &overrides, Arc::new(NoProfiles), false);

        assert_eq!(table.get("hash"), Some(i64::MAX));
        assert_eq!(table.max_score(), i64::MAX);
        assert_eq!(table.score_matches(&set(&["series", "year", "season"])), i64::MAX);
        assert_eq!(table.percent(i64::MAX), 100.0);
    }

    #[test]
    fn test_hearing_impaired_not_in_hash() {
        let overrides = ScoreOverrides::new().with("hearing_impaired", 10);
        let table = ScoreTable::new(MediaKind::Series, &overrides, Arc::new(NoProfiles), false);
        assert_eq!(table.get("hash"), Some(359));
        assert_eq!(table.max_score(), 369);
    }

    #[test]
    fn test_update_leaves_hash_stale_until_rebuild() {
        let mut table = series();
        table.update(&ScoreOverrides::new().with("source", 17));

        assert_eq!(table.get("source"), Some(17));
        assert_eq!(table.get("hash"), Some(359));
        assert!(table.is_stale());

        table.rebuild_derived_fields();
        assert_eq!(table.get("hash"), Some(369));
        assert!(!table.is_stale());
    }

    #[test]
    fn test_update_with_only_unknown_keys_is_not_stale() {
        let mut table = series();
        table.update(&ScoreOverrides::new().with("title", 70));
        assert!(!table.is_stale());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut table = series();
        table.update(&ScoreOverrides::new().with("series", 1).with("episode", 2));
        table.rebuild_derived_fields();

        table.reset();
        let once = table.scores();
        table.reset();
        assert_eq!(table.scores(), once);
        assert_eq!(table.get("series"), Some(180));
        assert_eq!(table.get("hash"), Some(359));
        assert!(!table.is_stale());
    }

    #[test]
    fn test_reset_keeps_profiles() {
        let source = StaticProfileSource::new(vec![StaticProfile::always("bonus", 50)]);
        let mut table = ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), Arc::new(source), true);

        table.reset();
        assert!(table.profiles_loaded());
        assert_eq!(table.max_score(), 410);
    }

    #[test]
    fn test_compute_threshold() {
        let table = series();
        let threshold = table.compute_threshold(90.0, None);
        assert_eq!(threshold.points, 324.0);
        assert_eq!(threshold.max_score, 360);
        assert!(threshold.attributes.contains("hash"));
        assert!(threshold.attributes.contains("release_group"));
        assert_eq!(threshold.attributes.len(), 13);

        let special = table.compute_threshold(90.0, Some(50.0));
        assert_eq!(special.points, 180.0);
    }

    #[test]
    fn test_profiles_load_lazily() {
        let source = Arc::new(StaticProfileSource::new(vec![StaticProfile::always("bonus", 50)]));
        let mut table = ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), source.clone(), false);

        assert!(!table.profiles_loaded());
        assert_eq!(table.max_score(), 360);
        assert_eq!(source.load_count(), 0);

        let mut matches = set(&["series"]);
        let hits = table.check_custom_profiles(&SubtitleCandidate::default(), &mut matches);

        assert_eq!(hits, 1);
        assert!(matches.contains("bonus"));
        assert_eq!(table.max_score(), 410);
        assert_eq!(source.load_count(), 1);

        // Already loaded: no second load.
        table.check_custom_profiles(&SubtitleCandidate::default(), &mut matches);
        assert_eq!(source.load_count(), 1);
    }

    #[test]
    fn test_explicit_reload() {
        let source = Arc::new(StaticProfileSource::new(vec![StaticProfile::always("bonus", 50)]));
        let mut table = ScoreTable::new(MediaKind::Movie, &ScoreOverrides::new(), source.clone(), true);
        assert_eq!(source.load_count(), 1);

        table.load_profiles();
        table.load_profiles();
        assert_eq!(source.load_count(), 3);
        assert_eq!(table.profiles().len(), 1);
        assert_eq!(table.max_score(), 170);
    }

    #[test]
    fn test_non_matching_profile_still_raises_max() {
        let source = StaticProfileSource::new(vec![StaticProfile::never("picky", 30)]);
        let mut table = ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), Arc::new(source), true);

        let mut matches = HashSet::new();
        assert_eq!(table.check_custom_profiles(&SubtitleCandidate::default(), &mut matches), 0);
        assert!(matches.is_empty());
        assert_eq!(table.max_score(), 390);
    }

    #[test]
    fn test_scores_base_table_wins_collision() {
        let source = StaticProfileSource::new(vec![
            StaticProfile::always("year", 500),
            StaticProfile::always("bonus", 5),
        ]);
        let table = ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), Arc::new(source), true);

        let scores = table.scores();
        assert_eq!(scores.get("year"), Some(&90));
        assert_eq!(scores.get("bonus"), Some(&5));
    }

    #[test]
    fn test_score_matches() {
        let table = series();
        assert_eq!(table.score_matches(&set(&["series", "season", "episode"])), 240);
        assert_eq!(table.score_matches(&set(&["series", "unknown_attribute"])), 180);
        assert_eq!(table.score_matches(&HashSet::<String>::new()), 0);
    }

    #[test]
    fn test_hash_match_replaces_attributes() {
        let table = series();
        let matches = set(&["hash", "series", "year", "hearing_impaired"]);
        assert_eq!(table.score_matches(&matches), 360);
    }

    #[test]
    fn test_profile_name_scores_with_hash() {
        let source = StaticProfileSource::new(vec![StaticProfile::always("bonus", 40)]);
        let table = ScoreTable::new(MediaKind::Series, &ScoreOverrides::new(), Arc::new(source), true);
        assert_eq!(table.score_matches(&set(&["hash", "bonus"])), 399);
        assert_eq!(table.score_matches(&set(&["series", "bonus"])), 220);
    }

    #[test]
    fn test_percent_and_acceptance() {
        let table = series();
        assert_eq!(table.percent(360), 100.0);
        assert_eq!(table.percent(180), 50.0);

        let full = set(&[
            "series", "year", "season", "episode", "release_group", "source",
        ]);
        // 180 + 90 + 30 + 30 + 15 + 7 = 352 >= 324
        assert!(table.is_acceptable(&full, 90.0, None));
        assert!(!table.is_acceptable(&set(&["series", "season", "episode"]), 90.0, None));
        assert!(table.is_acceptable(&set(&["series", "season", "episode"]), 90.0, Some(50.0)));
    }

    #[test]
    fn test_from_config_loads_profiles() {
        let config: Config = toml::from_str(
            r#"
[movie_scores]
title = 70

[[custom_profiles]]
name = "zimuku_bonus"
score = 20

[[custom_profiles.conditions]]
kind = "provider"
value = "zimuku"
required = true
"#,
        )
        .unwrap();

        let table = ScoreTable::from_config(MediaKind::Movie, &config).unwrap();
        assert!(table.profiles_loaded());
        assert_eq!(table.get("title"), Some(70));
        assert_eq!(table.get("hash"), Some(129));
        assert_eq!(table.max_score(), 150);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = Config {
            series_scores: ScoreOverrides::new().with("series", -5),
            ..Default::default()
        };
        let err = ScoreTable::from_config(MediaKind::Series, &config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(series().to_string(), "<series Score class>");
        assert_eq!(movie().to_string(), "<movies Score class>");
    }
}
