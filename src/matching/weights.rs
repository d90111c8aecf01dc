use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightsError {
    #[error("missing weight key: {0}")]
    MissingKey(&'static str),
    #[error("unknown weight key: {0}")]
    UnknownKey(String),
}

/// Default blend, tuned on the original product's swipe funnel.
pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    semantic: 0.40,
    skills: 0.30,
    preferences: 0.20,
    experience: 0.10,
};

const WEIGHT_KEYS: [&str; 4] = ["semantic", "skills", "preferences", "experience"];

/// Scoring component weights, validated at engine construction.
///
/// Callers overriding the defaults are expected to keep the sum close to
/// 1.0; the engine does not enforce it, but overall scores lose their
/// [0, 1] bound otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub semantic: f64,
    pub skills: f64,
    pub preferences: f64,
    pub experience: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MatchWeights {
    /// Build from a caller-supplied override map. All four keys must be
    /// present and no others; a partial override is a configuration error,
    /// surfaced here rather than as a silently-zero component at call time.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, WeightsError> {
        for key in map.keys() {
            if !WEIGHT_KEYS.contains(&key.as_str()) {
                return Err(WeightsError::UnknownKey(key.clone()));
            }
        }

        let fetch = |key: &'static str| map.get(key).copied().ok_or(WeightsError::MissingKey(key));

        Ok(Self {
            semantic: fetch("semantic")?,
            skills: fetch("skills")?,
            preferences: fetch("preferences")?,
            experience: fetch("experience")?,
        })
    }

    /// Weight overrides from `TENDER_WEIGHT_*` environment variables.
    /// All four must be set and parseable to take effect; anything partial
    /// falls back to the defaults with a warning.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().and_then(|v| v.parse::<f64>().ok());

        match (
            read("TENDER_WEIGHT_SEMANTIC"),
            read("TENDER_WEIGHT_SKILLS"),
            read("TENDER_WEIGHT_PREFERENCES"),
            read("TENDER_WEIGHT_EXPERIENCE"),
        ) {
            (Some(semantic), Some(skills), Some(preferences), Some(experience)) => Self {
                semantic,
                skills,
                preferences,
                experience,
            },
            (None, None, None, None) => Self::default(),
            _ => {
                tracing::warn!(
                    "partial TENDER_WEIGHT_* override ignored; using default weights"
                );
                Self::default()
            }
        }
    }

    pub fn sum(&self) -> f64 {
        self.semantic + self.skills + self.preferences + self.experience
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn from_map_accepts_a_complete_override() {
        let map: HashMap<String, f64> = [
            ("semantic".to_string(), 0.25),
            ("skills".to_string(), 0.25),
            ("preferences".to_string(), 0.25),
            ("experience".to_string(), 0.25),
        ]
        .into();

        let weights = MatchWeights::from_map(&map).unwrap();

        assert_eq!(weights.skills, 0.25);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn from_map_rejects_missing_keys() {
        let map: HashMap<String, f64> = [
            ("semantic".to_string(), 0.5),
            ("skills".to_string(), 0.5),
        ]
        .into();

        assert_eq!(
            MatchWeights::from_map(&map),
            Err(WeightsError::MissingKey("preferences"))
        );
    }

    #[test]
    fn from_map_rejects_unknown_keys() {
        let map: HashMap<String, f64> = [("charisma".to_string(), 1.0)].into();

        assert_eq!(
            MatchWeights::from_map(&map),
            Err(WeightsError::UnknownKey("charisma".to_string()))
        );
    }
}
