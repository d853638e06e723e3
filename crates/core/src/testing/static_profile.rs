//! Static custom profiles for testing.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::scoring::{CustomProfile, ProfileSource, SubtitleCandidate};

type Predicate = Arc<dyn Fn(&SubtitleCandidate) -> bool + Send + Sync>;

/// A profile with a fixed name, score and predicate.
#[derive(Clone)]
pub struct StaticProfile {
    name: String,
    score: i64,
    predicate: Predicate,
}

impl StaticProfile {
    pub fn new<F>(name: impl Into<String>, score: i64, predicate: F) -> Self
    where
        F: Fn(&SubtitleCandidate) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            score,
            predicate: Arc::new(predicate),
        }
    }

    /// Matches every candidate.
    pub fn always(name: impl Into<String>, score: i64) -> Self {
        Self::new(name, score, |_| true)
    }

    /// Matches nothing, but still counts toward the maximum.
    pub fn never(name: impl Into<String>, score: i64) -> Self {
        Self::new(name, score, |_| false)
    }
}

impl fmt::Debug for StaticProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticProfile")
            .field("name", &self.name)
            .field("score", &self.score)
            .finish()
    }
}

impl CustomProfile for StaticProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn matches(&self, candidate: &SubtitleCandidate) -> bool {
        (self.predicate)(candidate)
    }
}

/// Profile source backed by a replaceable list.
///
/// Counts how often profiles were listed so tests can assert lazy loading.
///
/// # Example
///
/// ```rust,ignore
/// use subrank_core::testing::{StaticProfile, StaticProfileSource};
///
/// let source = Arc::new(StaticProfileSource::new(vec![StaticProfile::always("bonus", 50)]));
/// let mut table = ScoreTable::new(MediaKind::Movie, &ScoreOverrides::default(), source.clone(), false);
/// assert_eq!(source.load_count(), 0);
/// table.max_score(); // read-only, never loads
/// assert_eq!(source.load_count(), 0);
/// table.ensure_profiles_loaded();
/// assert_eq!(source.load_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StaticProfileSource {
    profiles: RwLock<Vec<StaticProfile>>,
    loads: AtomicUsize,
}

impl StaticProfileSource {
    pub fn new(profiles: Vec<StaticProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            loads: AtomicUsize::new(0),
        }
    }

    /// Replace what the next listing returns.
    pub fn set_profiles(&self, profiles: Vec<StaticProfile>) {
        let mut guard = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        *guard = profiles;
    }

    /// Number of times profiles were listed.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ProfileSource for StaticProfileSource {
    fn list_profiles(&self) -> Vec<Box<dyn CustomProfile>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let guard = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        guard
            .iter()
            .cloned()
            .map(|p| Box::new(p) as Box<dyn CustomProfile>)
            .collect()
    }
}
