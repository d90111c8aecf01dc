use crate::{Opportunity, RelocationWillingness, UserPreferences};

use super::round3;

pub const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesScore {
    /// Unweighted mean over the evaluated facets, rounded to 3 decimals.
    pub score: f64,
    /// Human-readable notes, appended as facets resolve positively. The
    /// pipeline keeps insertion order when truncating.
    pub reasons: Vec<String>,
}

/// Multi-facet preference fit: location, salary, work arrangement,
/// opportunity type, company size.
///
/// A user without a preference record scores a flat neutral 0.5 with no
/// reasons; absence of signal neither penalizes nor favors. The company
/// size facet only enters the average when both sides state one.
pub fn score_preferences(
    preferences: Option<&UserPreferences>,
    opportunity: &Opportunity,
) -> PreferencesScore {
    let Some(prefs) = preferences else {
        return PreferencesScore {
            score: NEUTRAL_SCORE,
            reasons: vec![],
        };
    };

    let mut facet_scores: Vec<f64> = Vec::new();
    let mut reasons: Vec<String> = Vec::new();

    facet_scores.push(location_facet(prefs, opportunity, &mut reasons));
    facet_scores.push(salary_facet(prefs, opportunity, &mut reasons));
    facet_scores.push(arrangement_facet(prefs, opportunity, &mut reasons));
    facet_scores.push(opportunity_type_facet(prefs, opportunity));
    if let Some(score) = company_size_facet(prefs, opportunity) {
        facet_scores.push(score);
    }

    let score = facet_scores.iter().sum::<f64>() / facet_scores.len() as f64;

    PreferencesScore {
        score: round3(score),
        reasons,
    }
}

/// Substring overlap (either direction) against any preferred location, or
/// a remote listing when the user accepts remote work. Misses scale by
/// relocation willingness; a user with no stated locations stays neutral.
fn location_facet(
    prefs: &UserPreferences,
    opportunity: &Opportunity,
    reasons: &mut Vec<String>,
) -> f64 {
    if prefs.preferred_locations.is_empty() {
        return NEUTRAL_SCORE;
    }

    let opp_location = opportunity
        .location
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut matched = false;
    for preferred in &prefs.preferred_locations {
        let wanted = preferred.search_text();
        if wanted.is_empty() || opp_location.is_empty() {
            continue;
        }
        if opp_location.contains(&wanted) || wanted.contains(&opp_location) {
            matched = true;
            reasons.push(format!("Location matches: {opp_location}"));
            break;
        }
    }

    if opportunity.is_remote && accepts_remote(prefs) {
        matched = true;
        reasons.push("Remote work available".to_string());
    }

    if matched {
        1.0
    } else {
        match prefs.willing_to_relocate {
            RelocationWillingness::Yes => 0.7,
            RelocationWillingness::Maybe => 0.5,
            RelocationWillingness::No => 0.2,
        }
    }
}

/// Compares the opportunity's best available figure (max, falling back to
/// min) against the user's stated minimum. Only evaluated when both sides
/// carry a figure; otherwise neutral.
fn salary_facet(
    prefs: &UserPreferences,
    opportunity: &Opportunity,
    reasons: &mut Vec<String>,
) -> f64 {
    let Some(user_min) = prefs.salary_min else {
        return NEUTRAL_SCORE;
    };
    if opportunity.salary_min.is_none() && opportunity.salary_max.is_none() {
        return NEUTRAL_SCORE;
    }

    let offered = opportunity
        .salary_max
        .or(opportunity.salary_min)
        .unwrap_or(0.0);

    if offered >= user_min {
        reasons.push("Salary meets expectations".to_string());
        1.0
    } else if offered >= user_min * 0.9 {
        0.8
    } else if offered >= user_min * 0.8 {
        0.6
    } else {
        0.3
    }
}

fn arrangement_facet(
    prefs: &UserPreferences,
    opportunity: &Opportunity,
    reasons: &mut Vec<String>,
) -> f64 {
    if prefs.work_arrangements.is_empty() {
        return NEUTRAL_SCORE;
    }

    let opp_arrangement = opportunity
        .work_arrangement
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    if !opp_arrangement.is_empty()
        && prefs
            .work_arrangements
            .iter()
            .any(|wanted| wanted.to_lowercase() == opp_arrangement)
    {
        reasons.push(format!("Work arrangement: {opp_arrangement}"));
        1.0
    } else if opportunity.is_remote && accepts_remote(prefs) {
        reasons.push("Remote work available".to_string());
        1.0
    } else {
        0.3
    }
}

/// Unstated opportunity types default to plain jobs.
fn opportunity_type_facet(prefs: &UserPreferences, opportunity: &Opportunity) -> f64 {
    if prefs.opportunity_types.is_empty() {
        return NEUTRAL_SCORE;
    }

    let opp_type = opportunity
        .opportunity_type
        .as_deref()
        .unwrap_or("job")
        .to_lowercase();

    if prefs
        .opportunity_types
        .iter()
        .any(|wanted| wanted.to_lowercase() == opp_type)
    {
        1.0
    } else {
        0.2
    }
}

/// Only contributes when the user stated sizes AND the opportunity has one.
fn company_size_facet(prefs: &UserPreferences, opportunity: &Opportunity) -> Option<f64> {
    let opp_size = opportunity.company_size.as_deref()?.to_lowercase();
    if prefs.company_sizes.is_empty() || opp_size.is_empty() {
        return None;
    }

    if prefs
        .company_sizes
        .iter()
        .any(|wanted| wanted.to_lowercase() == opp_size)
    {
        Some(1.0)
    } else {
        Some(0.5)
    }
}

fn accepts_remote(prefs: &UserPreferences) -> bool {
    prefs
        .work_arrangements
        .iter()
        .any(|arrangement| arrangement.eq_ignore_ascii_case("remote"))
}
