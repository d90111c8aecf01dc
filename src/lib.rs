//! Opportunity ranking engine for the TENDER matching platform.
//!
//! The surrounding CRUD/API layer supplies snapshots of the records below
//! and consumes the ranked [`matching::MatchResult`] output; this crate has
//! no network or storage boundary of its own.

pub mod embedding;
pub mod logging;
pub mod matching;

use serde::{Deserialize, Serialize};

// Input records for the ranking engine. Owned and populated by the external
// CRUD layer; the engine treats them as immutable snapshots and never
// persists them. Absent fields deserialize to empty collections.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i64,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub goals: Option<String>,
    pub skills: Vec<String>,
    /// Most recent first, as stored by the profile editor.
    pub work_experiences: Vec<WorkExperience>,
    pub education_entries: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub is_current: bool,
    pub description_bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree_type: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Optional per-user preference record. A user without one is scored
/// neutrally on the preference facet, never penalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub desired_job_titles: Vec<String>,
    pub preferred_locations: Vec<PreferredLocation>,
    pub willing_to_relocate: RelocationWillingness,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub job_levels: Vec<String>,
    pub work_arrangements: Vec<String>,
    pub opportunity_types: Vec<String>,
    pub preferred_industries: Vec<String>,
    pub company_sizes: Vec<String>,
}

/// A preferred location, either structured (`{city, country}`) or a free
/// string, depending on which client wrote the preference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferredLocation {
    Named {
        #[serde(default)]
        city: String,
        #[serde(default)]
        country: String,
    },
    Free(String),
}

impl PreferredLocation {
    /// Lowercase search string used for substring matching against an
    /// opportunity's location field.
    pub fn search_text(&self) -> String {
        match self {
            PreferredLocation::Named { city, country } => {
                format!("{city} {country}").trim().to_lowercase()
            }
            PreferredLocation::Free(text) => text.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelocationWillingness {
    Yes,
    #[default]
    No,
    Maybe,
}

/// A job/internship/scholarship/grant listing being ranked against a user.
/// Read-only input; lifecycle is the CRUD layer's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opportunity {
    pub id: i64,
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub work_arrangement: Option<String>,
    /// Raw tier string ("entry", "mid", "senior", "executive"); parsed
    /// leniently at scoring time so one bad value cannot abort a ranking.
    pub experience_level: Option<String>,
    pub opportunity_type: Option<String>,
    pub company_size: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
}
