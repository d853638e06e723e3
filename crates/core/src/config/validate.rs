use std::collections::HashSet;

use super::{
    types::{Config, ConditionKind, ScoreOverrides},
    ConfigError,
};

/// Largest score an override or custom profile may carry. Keeps the sums
/// behind the hash score and the maximum score far from `i64` overflow.
pub const MAX_SCORE_POINTS: i64 = i32::MAX as i64;

/// Validate configuration
/// Currently validates:
/// - Score overrides are between 0 and `MAX_SCORE_POINTS`
/// - Threshold percentages are within 0-100
/// - Custom profile names are non-empty and unique, scores in the same range
/// - Release regex conditions compile
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_overrides("series_scores", &config.series_scores)?;
    validate_overrides("movie_scores", &config.movie_scores)?;

    validate_percent(
        "matching.series_min_score_percent",
        config.matching.series_min_score_percent,
    )?;
    validate_percent(
        "matching.movie_min_score_percent",
        config.matching.movie_min_score_percent,
    )?;
    if let Some(percent) = config.matching.hash_min_score_percent {
        validate_percent("matching.hash_min_score_percent", percent)?;
    }

    let mut seen = HashSet::new();
    for profile in &config.custom_profiles {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "custom profile name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate custom profile name '{}'",
                profile.name
            )));
        }
        if profile.score < 0 {
            return Err(ConfigError::ValidationError(format!(
                "custom profile '{}' has negative score {}",
                profile.name, profile.score
            )));
        }
        if profile.score > MAX_SCORE_POINTS {
            return Err(ConfigError::ValidationError(format!(
                "custom profile '{}' score cannot exceed {} (got {})",
                profile.name, MAX_SCORE_POINTS, profile.score
            )));
        }
        for condition in &profile.conditions {
            if condition.kind == ConditionKind::ReleaseRegex {
                regex_lite::Regex::new(&condition.value).map_err(|e| {
                    ConfigError::ValidationError(format!(
                        "custom profile '{}' has invalid regex '{}': {}",
                        profile.name, condition.value, e
                    ))
                })?;
            }
        }
    }

    Ok(())
}

fn validate_overrides(section: &str, overrides: &ScoreOverrides) -> Result<(), ConfigError> {
    for (attribute, points) in overrides.iter() {
        if points < 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}.{} cannot be negative (got {})",
                section, attribute, points
            )));
        }
        if points > MAX_SCORE_POINTS {
            return Err(ConfigError::ValidationError(format!(
                "{}.{} cannot exceed {} (got {})",
                section, attribute, MAX_SCORE_POINTS, points
            )));
        }
    }
    Ok(())
}

fn validate_percent(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be between 0 and 100, got {}",
            field, value
        )));
    }
    Ok(())
}
