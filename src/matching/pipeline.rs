use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use serde::Serialize;
use tracing::debug;

use super::{
    experience::score_experience,
    preferences::score_preferences,
    round3,
    skills::score_skills,
    weights::{MatchWeights, WeightsError},
};
use crate::{
    embedding::{
        build_opportunity_text, build_profile_text, cosine_similarity, cosine_similarity_batch,
        EmbeddingError, EmbeddingProvider,
    },
    Opportunity, UserPreferences, UserProfile,
};

/// Reasons shown on a swipe card; the most specific ones are prepended and
/// survive truncation.
const MAX_REASONS: usize = 5;
const MAX_SKILLS_IN_REASON: usize = 3;
const STRONG_SEMANTIC_THRESHOLD: f64 = 0.7;
const STRONG_SKILLS_THRESHOLD: f64 = 0.7;

/// One ranked opportunity with its interpretable score breakdown.
/// Constructed fresh per ranking call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub opportunity_id: i64,
    pub overall_score: f64,
    pub semantic_score: f64,
    pub skills_score: f64,
    pub preferences_score: f64,
    pub experience_score: f64,
    pub matched_skills: Vec<String>,
    pub match_reasons: Vec<String>,
}

/// Ranking orchestrator: blends semantic, skills, preference and
/// experience fit into one score per opportunity.
///
/// The embedding provider is injected and shared; construct it once at
/// process start (see [`crate::embedding::provider_from_env`]) and hand a
/// clone of the `Arc` to every engine. Weight validation happens here at
/// construction, never at call time.
///
/// Ranking is synchronous and CPU-bound while the model runs; async hosts
/// should call it from a blocking-work thread rather than on the request
/// event loop.
pub struct MatchingEngine {
    provider: Arc<dyn EmbeddingProvider>,
    weights: MatchWeights,
}

impl MatchingEngine {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, weights: MatchWeights) -> Self {
        Self { provider, weights }
    }

    pub fn with_default_weights(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(provider, MatchWeights::default())
    }

    /// Build from a caller-supplied weight override map; a missing or
    /// unknown key fails here, before any ranking runs.
    pub fn from_weight_map(
        provider: Arc<dyn EmbeddingProvider>,
        map: &HashMap<String, f64>,
    ) -> Result<Self, WeightsError> {
        Ok(Self::new(provider, MatchWeights::from_map(map)?))
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score a single opportunity against a user.
    ///
    /// An embedding failure aborts the call unchanged; callers wanting a
    /// degraded skills-only ranking must catch it themselves.
    pub fn match_opportunity(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        opportunity: &Opportunity,
    ) -> Result<MatchResult, EmbeddingError> {
        let profile_vector = self.provider.embed(&build_profile_text(profile))?;
        let opportunity_vector = self.provider.embed(&build_opportunity_text(opportunity))?;
        let semantic = normalize_cosine(cosine_similarity(&profile_vector, &opportunity_vector));

        Ok(self.build_result(profile, preferences, opportunity, semantic))
    }

    /// Rank a batch of opportunities, best first.
    ///
    /// The profile is embedded exactly once and the candidates go through
    /// one batched provider call; per-candidate scores are identical to
    /// the single form. An empty batch returns empty without touching the
    /// provider.
    pub fn match_opportunities(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        opportunities: &[Opportunity],
    ) -> Result<Vec<MatchResult>, EmbeddingError> {
        if opportunities.is_empty() {
            return Ok(vec![]);
        }

        let profile_vector = self.provider.embed(&build_profile_text(profile))?;
        let texts: Vec<String> = opportunities.iter().map(build_opportunity_text).collect();
        let vectors = self.provider.embed_batch(&texts)?;
        let similarities = cosine_similarity_batch(&profile_vector, &vectors);

        let mut results: Vec<MatchResult> = opportunities
            .iter()
            .zip(similarities)
            .map(|(opportunity, raw)| {
                self.build_result(profile, preferences, opportunity, normalize_cosine(raw))
            })
            .collect();

        results.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            user_id = profile.id,
            candidates = opportunities.len(),
            provider = self.provider.name(),
            "ranked opportunity batch"
        );

        Ok(results)
    }

    fn build_result(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        opportunity: &Opportunity,
        semantic_score: f64,
    ) -> MatchResult {
        let skills = score_skills(
            &profile.skills,
            &opportunity.required_skills,
            &opportunity.preferred_skills,
        );
        let preference_fit = score_preferences(preferences, opportunity);
        let experience_score = score_experience(profile, opportunity);

        let overall = self.weights.semantic * semantic_score
            + self.weights.skills * skills.score
            + self.weights.preferences * preference_fit.score
            + self.weights.experience * experience_score;

        let mut reasons = preference_fit.reasons;
        if semantic_score > STRONG_SEMANTIC_THRESHOLD {
            reasons.insert(0, "Strong profile match".to_string());
        }
        if skills.score > STRONG_SKILLS_THRESHOLD && !skills.matched_skills.is_empty() {
            let named = skills
                .matched_skills
                .iter()
                .take(MAX_SKILLS_IN_REASON)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            reasons.insert(0, format!("Skills match: {named}"));
        }
        reasons.truncate(MAX_REASONS);

        MatchResult {
            opportunity_id: opportunity.id,
            overall_score: round3(overall),
            semantic_score: round3(semantic_score),
            skills_score: skills.score,
            preferences_score: preference_fit.score,
            experience_score,
            matched_skills: skills.matched_skills,
            match_reasons: reasons,
        }
    }
}

/// Raw cosine lives in [-1, 1]; rescale so every component shares the
/// [0, 1] scale and the weighted sum stays bounded.
fn normalize_cosine(raw: f32) -> f64 {
    (raw as f64 + 1.0) / 2.0
}
