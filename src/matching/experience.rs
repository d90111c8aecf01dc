use std::str::FromStr;

use crate::{Opportunity, UserProfile};

/// Ordered seniority scale. Discriminants double as positions on the
/// scale for distance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExperienceTier {
    Entry = 0,
    Mid = 1,
    Senior = 2,
    Executive = 3,
}

/// Tenure credited per listed role. A crude proxy without end-date
/// awareness; thresholds are product policy, not calendar arithmetic.
const YEARS_PER_CURRENT_ROLE: f64 = 2.0;
const YEARS_PER_PAST_ROLE: f64 = 1.5;

/// Estimated cumulative years from the profile's work history.
pub fn estimated_years(profile: &UserProfile) -> f64 {
    profile
        .work_experiences
        .iter()
        .map(|exp| {
            if exp.is_current {
                YEARS_PER_CURRENT_ROLE
            } else {
                YEARS_PER_PAST_ROLE
            }
        })
        .sum()
}

/// Buckets estimated tenure into a tier.
pub fn inferred_tier(profile: &UserProfile) -> ExperienceTier {
    let years = estimated_years(profile);
    if years <= 2.0 {
        ExperienceTier::Entry
    } else if years <= 5.0 {
        ExperienceTier::Mid
    } else if years <= 10.0 {
        ExperienceTier::Senior
    } else {
        ExperienceTier::Executive
    }
}

/// Alignment between the user's inferred tier and the opportunity's stated
/// one, scored by distance on the ordered scale. An opportunity that does
/// not state a tier is treated as entry level; an unrecognized tier string
/// scores neutral 0.5 rather than failing the ranking.
pub fn score_experience(profile: &UserProfile, opportunity: &Opportunity) -> f64 {
    let stated = opportunity.experience_level.as_deref().unwrap_or("entry");
    let Ok(opportunity_tier) = ExperienceTier::from_str(stated.trim()) else {
        return 0.5;
    };

    let user_tier = inferred_tier(profile);
    let distance = (user_tier as i32 - opportunity_tier as i32).unsigned_abs();

    match distance {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.2,
    }
}
