//! Startup-built owner of the series and movie score tables.
//!
//! Mutations (`reset`, `update`, profile reloads, config reloads) take the
//! table's write lock; scoring only takes read locks, so many candidates can
//! be scored in parallel between mutation epochs.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::config::{validate_config, Config, ConfigError, MatchingConfig};
use crate::scoring::media::{MediaKind, HASH, HEARING_IMPAIRED};
use crate::scoring::profile::{ConfiguredProfiles, ProfileSource};
use crate::scoring::table::ScoreTable;
use crate::scoring::types::{MatchEvaluation, SubtitleCandidate, Threshold};

/// Series and movie score tables plus acceptance thresholds.
#[derive(Debug)]
pub struct ScoreRegistry {
    series: RwLock<ScoreTable>,
    movie: RwLock<ScoreTable>,
    matching: RwLock<MatchingConfig>,
}

impl ScoreRegistry {
    /// Build both tables from configuration, profiles loaded eagerly.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate_config(config)?;

        let source: Arc<dyn ProfileSource> =
            Arc::new(ConfiguredProfiles::new(config.custom_profiles.clone()));
        Ok(Self::with_source(config, source))
    }

    /// Build both tables with an externally supplied profile source.
    pub fn with_source(config: &Config, source: Arc<dyn ProfileSource>) -> Self {
        let series = ScoreTable::new(MediaKind::Series, &config.series_scores, source.clone(), true);
        let movie = ScoreTable::new(MediaKind::Movie, &config.movie_scores, source, true);

        info!(
            "Score tables ready: series max {}, movies max {}",
            series.max_score(),
            movie.max_score()
        );

        Self {
            series: RwLock::new(series),
            movie: RwLock::new(movie),
            matching: RwLock::new(config.matching.clone()),
        }
    }

    fn lock(&self, kind: MediaKind) -> &RwLock<ScoreTable> {
        match kind {
            MediaKind::Series => &self.series,
            MediaKind::Movie => &self.movie,
        }
    }

    /// Shared access to a table.
    pub fn read(&self, kind: MediaKind) -> RwLockReadGuard<'_, ScoreTable> {
        self.lock(kind)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to a table, for mutations.
    pub fn write(&self, kind: MediaKind) -> RwLockWriteGuard<'_, ScoreTable> {
        self.lock(kind)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn matching(&self) -> MatchingConfig {
        self.matching
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a new configuration over the current tables.
    ///
    /// Overrides are applied on top of current values, derived fields are
    /// rebuilt once per table, and profiles are reloaded from the new
    /// `custom_profiles` section.
    pub fn apply_config(&self, config: &Config) -> Result<(), ConfigError> {
        validate_config(config)?;

        let source: Arc<dyn ProfileSource> =
            Arc::new(ConfiguredProfiles::new(config.custom_profiles.clone()));

        for (kind, overrides) in [
            (MediaKind::Series, &config.series_scores),
            (MediaKind::Movie, &config.movie_scores),
        ] {
            let mut table = self.write(kind);
            table.update(overrides);
            table.rebuild_derived_fields();
            table.set_profile_source(source.clone());
            table.load_profiles();
            debug!("Reapplied {} scores, max now {}", kind, table.max_score());
        }

        *self
            .matching
            .write()
            .unwrap_or_else(PoisonError::into_inner) = config.matching.clone();

        Ok(())
    }

    /// Restore a table to its defaults.
    pub fn reset(&self, kind: MediaKind) {
        self.write(kind).reset();
    }

    /// Reload custom profiles for both tables.
    pub fn reload_profiles(&self) {
        for kind in [MediaKind::Series, MediaKind::Movie] {
            self.write(kind).load_profiles();
        }
    }

    /// Acceptance threshold for `kind`; hash matches use the hash percentage
    /// when one is configured.
    pub fn threshold(&self, kind: MediaKind, hash_match: bool) -> Threshold {
        let (min_percent, special) = self.percentages(kind, hash_match);
        self.read(kind).compute_threshold(min_percent, special)
    }

    /// Minimum and special acceptance percentages for `kind`.
    fn percentages(&self, kind: MediaKind, hash_match: bool) -> (f64, Option<f64>) {
        let matching = self.matching();
        let min_percent = match kind {
            MediaKind::Series => matching.series_min_score_percent,
            MediaKind::Movie => matching.movie_min_score_percent,
        };
        let special = if hash_match {
            matching.hash_min_score_percent
        } else {
            None
        };
        (min_percent, special)
    }

    /// Score one candidate given the attributes the metadata guesser matched.
    pub fn evaluate(
        &self,
        kind: MediaKind,
        candidate: &SubtitleCandidate,
        guessed: &HashSet<String>,
    ) -> MatchEvaluation {
        if !self.read(kind).profiles_loaded() {
            self.write(kind).ensure_profiles_loaded();
        }

        let mut matches = guessed.clone();
        if candidate.hearing_impaired {
            matches.insert(HEARING_IMPAIRED.to_string());
        }

        let (min_percent, special) = self.percentages(kind, matches.contains(HASH));

        // Threshold, profiles and score all come from this one guard.
        let table = self.read(kind);
        let threshold = table.compute_threshold(min_percent, special);
        table.apply_custom_profiles(candidate, &mut matches);

        let score = table.score_matches(&matches);
        let evaluation = MatchEvaluation {
            score,
            max_score: threshold.max_score,
            percent: table.percent(score),
            threshold: threshold.points,
            accepted: score as f64 >= threshold.points,
            matches: matches.into_iter().collect(),
        };

        debug!(
            "Scored {:?}: {} / {} ({:.1}%), accepted: {}",
            candidate.release_info,
            evaluation.score,
            evaluation.max_score,
            evaluation.percent,
            evaluation.accepted
        );

        evaluation
    }
}
