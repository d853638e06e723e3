//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Score tables (profile loads, profile hits)
//! - Archive extraction (selection outcomes)

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

// =============================================================================
// Scoring
// =============================================================================

/// Custom profile (re)loads by media kind.
pub static PROFILE_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "subrank_profile_loads_total",
            "Total custom profile loads",
        ),
        &["media"], // "series", "movies"
    )
    .unwrap()
});

/// Custom profile matches by media kind.
pub static PROFILE_HITS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "subrank_profile_hits_total",
            "Total candidates that matched a custom profile",
        ),
        &["media"],
    )
    .unwrap()
});

// =============================================================================
// Archive extraction
// =============================================================================

/// Archive subtitle selections by result.
pub static ARCHIVE_SELECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "subrank_archive_selections_total",
            "Total subtitle selections from downloaded archives",
        ),
        &["result"], // "selected", "empty"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Scoring
        Box::new(PROFILE_LOADS.clone()),
        Box::new(PROFILE_HITS.clone()),
        // Archive extraction
        Box::new(ARCHIVE_SELECTIONS.clone()),
    ]
}
