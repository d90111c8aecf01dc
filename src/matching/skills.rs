use std::collections::HashSet;

use super::round3;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsScore {
    /// Required/preferred-weighted overlap in [0, 1], rounded to 3 decimals.
    pub score: f64,
    /// The user's matching skills in their original casing and order,
    /// de-duplicated. Shown verbatim in the swipe UI.
    pub matched_skills: Vec<String>,
}

/// Required skills gate eligibility, preferred skills break ties: the
/// required overlap ratio carries 70% of the score, the preferred ratio 30%.
const REQUIRED_WEIGHT: f64 = 0.7;
const PREFERRED_WEIGHT: f64 = 0.3;

/// Case-insensitive skill overlap between a user and an opportunity.
///
/// An opportunity with no skill requirements at all is a perfect match
/// with an empty matched list. A ratio over an empty set counts as 1.0,
/// so an opportunity listing only preferred skills is not penalized on
/// the required side (and vice versa).
pub fn score_skills(
    user_skills: &[String],
    required_skills: &[String],
    preferred_skills: &[String],
) -> SkillsScore {
    let user_set = lowercase_set(user_skills);
    let required_set = lowercase_set(required_skills);
    let preferred_set = lowercase_set(preferred_skills);

    if required_set.is_empty() && preferred_set.is_empty() {
        return SkillsScore {
            score: 1.0,
            matched_skills: vec![],
        };
    }

    let required_match: HashSet<&String> = user_set.intersection(&required_set).collect();
    let preferred_match: HashSet<&String> = user_set.intersection(&preferred_set).collect();

    let required_ratio = if required_set.is_empty() {
        1.0
    } else {
        required_match.len() as f64 / required_set.len() as f64
    };
    let preferred_ratio = if preferred_set.is_empty() {
        1.0
    } else {
        preferred_match.len() as f64 / preferred_set.len() as f64
    };

    let score = REQUIRED_WEIGHT * required_ratio + PREFERRED_WEIGHT * preferred_ratio;

    // Re-scan the user's list so matched skills keep their original casing
    // and order; the normalized forms are for comparison only.
    let mut seen: HashSet<String> = HashSet::new();
    let mut matched_skills = Vec::new();
    for skill in user_skills {
        let lowered = skill.to_lowercase();
        if (required_match.contains(&lowered) || preferred_match.contains(&lowered))
            && seen.insert(lowered)
        {
            matched_skills.push(skill.clone());
        }
    }

    SkillsScore {
        score: round3(score),
        matched_skills,
    }
}

fn lowercase_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|skill| skill.to_lowercase()).collect()
}
