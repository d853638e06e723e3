//! Custom scoring profiles.
//!
//! A profile is a named bonus: when its predicate accepts a candidate, the
//! profile name joins the candidate's matched attributes and its score is
//! earned. Loaded profiles always raise the table's maximum score.

use regex_lite::Regex;
use std::fmt;
use tracing::warn;

use crate::config::{ConditionConfig, ConditionKind, ConfigError, CustomProfileConfig};
use crate::scoring::types::SubtitleCandidate;

/// A pluggable bonus rule.
pub trait CustomProfile: Send + Sync {
    /// Unique name; added to the matched attribute set on a hit.
    fn name(&self) -> &str;

    /// Points contributed to the maximum score.
    fn score(&self) -> i64;

    /// Whether the candidate earns this profile's bonus.
    fn matches(&self, candidate: &SubtitleCandidate) -> bool;
}

impl fmt::Debug for dyn CustomProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomProfile")
            .field("name", &self.name())
            .field("score", &self.score())
            .finish()
    }
}

/// Supplies the currently configured profiles.
///
/// Every call returns a fresh list owned by the caller; score tables never
/// share profile instances.
pub trait ProfileSource: Send + Sync {
    fn list_profiles(&self) -> Vec<Box<dyn CustomProfile>>;
}

/// Profile source with nothing configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

impl ProfileSource for NoProfiles {
    fn list_profiles(&self) -> Vec<Box<dyn CustomProfile>> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
enum ConditionMatcher {
    /// Case-insensitive equality.
    Exact(String),
    Regex(Regex),
}

/// One compiled profile condition.
#[derive(Debug, Clone)]
pub struct Condition {
    kind: ConditionKind,
    matcher: ConditionMatcher,
    required: bool,
    negate: bool,
}

impl Condition {
    pub fn from_config(config: &ConditionConfig) -> Result<Self, ConfigError> {
        let matcher = match config.kind {
            ConditionKind::ReleaseRegex => {
                let regex = Regex::new(&config.value).map_err(|e| {
                    ConfigError::ValidationError(format!("invalid regex '{}': {}", config.value, e))
                })?;
                ConditionMatcher::Regex(regex)
            }
            _ => ConditionMatcher::Exact(config.value.clone()),
        };

        Ok(Self {
            kind: config.kind,
            matcher,
            required: config.required,
            negate: config.negate,
        })
    }

    fn field<'a>(&self, candidate: &'a SubtitleCandidate) -> Option<&'a str> {
        match self.kind {
            ConditionKind::Provider => Some(candidate.provider.as_str()),
            ConditionKind::Uploader => candidate.uploader.as_deref(),
            ConditionKind::Language => Some(candidate.language.as_str()),
            ConditionKind::ReleaseRegex => Some(candidate.release_info.as_str()),
        }
    }

    /// Evaluate the condition, with `negate` applied.
    pub fn check(&self, candidate: &SubtitleCandidate) -> bool {
        let hit = match (self.field(candidate), &self.matcher) {
            (Some(value), ConditionMatcher::Exact(expected)) => value.eq_ignore_ascii_case(expected),
            (Some(value), ConditionMatcher::Regex(regex)) => regex.is_match(value),
            (None, _) => false,
        };
        hit != self.negate
    }
}

/// Profile driven by a list of conditions.
///
/// Matches when every required condition holds and, if any optional
/// conditions exist, at least one of them holds. A profile without
/// conditions never matches.
#[derive(Debug, Clone)]
pub struct ConditionProfile {
    name: String,
    score: i64,
    conditions: Vec<Condition>,
}

impl ConditionProfile {
    pub fn new(name: impl Into<String>, score: i64, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            score,
            conditions,
        }
    }

    pub fn from_config(config: &CustomProfileConfig) -> Result<Self, ConfigError> {
        let conditions = config
            .conditions
            .iter()
            .map(Condition::from_config)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                ConfigError::ValidationError(format!("custom profile '{}': {}", config.name, e))
            })?;

        Ok(Self::new(config.name.clone(), config.score, conditions))
    }
}

impl CustomProfile for ConditionProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn matches(&self, candidate: &SubtitleCandidate) -> bool {
        if self.conditions.is_empty() {
            return false;
        }

        let (required, optional): (Vec<&Condition>, Vec<&Condition>) =
            self.conditions.iter().partition(|c| c.required);

        if !required.iter().all(|c| c.check(candidate)) {
            return false;
        }

        optional.is_empty() || optional.iter().any(|c| c.check(candidate))
    }
}

/// Profiles built from the `custom_profiles` configuration section.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredProfiles {
    configs: Vec<CustomProfileConfig>,
}

impl ConfiguredProfiles {
    pub fn new(configs: Vec<CustomProfileConfig>) -> Self {
        Self { configs }
    }
}

impl ProfileSource for ConfiguredProfiles {
    fn list_profiles(&self) -> Vec<Box<dyn CustomProfile>> {
        self.configs
            .iter()
            .filter_map(|config| match ConditionProfile::from_config(config) {
                Ok(profile) => Some(Box::new(profile) as Box<dyn CustomProfile>),
                Err(e) => {
                    warn!("Skipping custom profile: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(kind: ConditionKind, value: &str, required: bool, negate: bool) -> ConditionConfig {
        ConditionConfig {
            kind,
            value: value.to_string(),
            required,
            negate,
        }
    }

    fn profile(conditions: Vec<ConditionConfig>) -> ConditionProfile {
        ConditionProfile::from_config(&CustomProfileConfig {
            name: "test".to_string(),
            score: 10,
            conditions,
        })
        .unwrap()
    }

    fn candidate() -> SubtitleCandidate {
        SubtitleCandidate::new("zimuku", "Fast.and.Furious.2160p.WEB-DL")
            .with_language("zho")
            .with_uploader("alice")
    }

    #[test]
    fn test_required_condition() {
        let p = profile(vec![condition(ConditionKind::Uploader, "Alice", true, false)]);
        assert!(p.matches(&candidate()));

        let p = profile(vec![condition(ConditionKind::Uploader, "bob", true, false)]);
        assert!(!p.matches(&candidate()));
    }

    #[test]
    fn test_missing_uploader_does_not_match() {
        let p = profile(vec![condition(ConditionKind::Uploader, "alice", true, false)]);
        let anonymous = SubtitleCandidate::new("zimuku", "Fast.and.Furious");
        assert!(!p.matches(&anonymous));
    }

    #[test]
    fn test_negated_condition() {
        let p = profile(vec![condition(ConditionKind::Provider, "zimuku", true, true)]);
        assert!(!p.matches(&candidate()));

        let p = profile(vec![condition(ConditionKind::Provider, "other", true, true)]);
        assert!(p.matches(&candidate()));
    }

    #[test]
    fn test_optional_conditions_need_one_hit() {
        let p = profile(vec![
            condition(ConditionKind::Language, "eng", false, false),
            condition(ConditionKind::ReleaseRegex, "(?i)web-?dl", false, false),
        ]);
        assert!(p.matches(&candidate()));

        let p = profile(vec![
            condition(ConditionKind::Language, "eng", false, false),
            condition(ConditionKind::ReleaseRegex, "BluRay", false, false),
        ]);
        assert!(!p.matches(&candidate()));
    }

    #[test]
    fn test_required_and_optional_combined() {
        let p = profile(vec![
            condition(ConditionKind::Provider, "zimuku", true, false),
            condition(ConditionKind::Language, "eng", false, false),
        ]);
        assert!(!p.matches(&candidate()));

        let p = profile(vec![
            condition(ConditionKind::Provider, "zimuku", true, false),
            condition(ConditionKind::Language, "ZHO", false, false),
        ]);
        assert!(p.matches(&candidate()));
    }

    #[test]
    fn test_profile_without_conditions_never_matches() {
        assert!(!profile(Vec::new()).matches(&candidate()));
    }

    #[test]
    fn test_invalid_regex_fails() {
        let result = ConditionProfile::from_config(&CustomProfileConfig {
            name: "broken".to_string(),
            score: 1,
            conditions: vec![condition(ConditionKind::ReleaseRegex, "[", true, false)],
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_configured_profiles_skip_invalid() {
        let source = ConfiguredProfiles::new(vec![
            CustomProfileConfig {
                name: "good".to_string(),
                score: 5,
                conditions: vec![condition(ConditionKind::Provider, "zimuku", true, false)],
            },
            CustomProfileConfig {
                name: "bad".to_string(),
                score: 5,
                conditions: vec![condition(ConditionKind::ReleaseRegex, "(", true, false)],
            },
        ]);

        let profiles = source.list_profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name(), "good");
        assert_eq!(profiles[0].score(), 5);
    }

    #[test]
    fn test_no_profiles_source() {
        assert!(NoProfiles.list_profiles().is_empty());
    }
}
