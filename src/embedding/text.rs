use crate::{Opportunity, UserProfile};

/// Caps applied before embedding so boilerplate cannot dilute the signal.
const MAX_EXPERIENCES: usize = 3;
const MAX_BULLETS: usize = 2;
const MAX_EDUCATION: usize = 2;
const MAX_PROJECTS: usize = 2;
const MAX_PROJECT_DESC_CHARS: usize = 100;
const MAX_OPPORTUNITY_DESC_CHARS: usize = 500;

/// Deterministic text projection of a user profile for embedding.
///
/// Present fields are concatenated in a fixed order; missing or empty
/// fields are skipped outright, never rendered as placeholders.
pub fn build_profile_text(profile: &UserProfile) -> String {
    let mut parts: Vec<String> = Vec::new();

    push_labeled(&mut parts, "Name", profile.name.as_deref());
    push_labeled(&mut parts, "Headline", profile.headline.as_deref());
    push_labeled(&mut parts, "Bio", profile.bio.as_deref());
    push_labeled(&mut parts, "Career Goals", profile.goals.as_deref());

    if !profile.skills.is_empty() {
        parts.push(format!("Skills: {}", profile.skills.join(", ")));
    }

    if !profile.work_experiences.is_empty() {
        let entries: Vec<String> = profile
            .work_experiences
            .iter()
            .take(MAX_EXPERIENCES)
            .map(|exp| {
                let bullets = exp
                    .description_bullets
                    .iter()
                    .take(MAX_BULLETS)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ");
                format!(
                    "{} at {}. {}",
                    exp.title.as_deref().unwrap_or_default(),
                    exp.company.as_deref().unwrap_or_default(),
                    bullets
                )
            })
            .collect();
        parts.push(format!("Experience: {}", entries.join(" | ")));
    }

    if !profile.education_entries.is_empty() {
        let entries: Vec<String> = profile
            .education_entries
            .iter()
            .take(MAX_EDUCATION)
            .map(|edu| {
                format!(
                    "{} in {} from {}",
                    edu.degree_type.as_deref().unwrap_or_default(),
                    edu.field_of_study.as_deref().unwrap_or_default(),
                    edu.institution.as_deref().unwrap_or_default()
                )
            })
            .collect();
        parts.push(format!("Education: {}", entries.join(" | ")));
    }

    if !profile.projects.is_empty() {
        let entries: Vec<String> = profile
            .projects
            .iter()
            .take(MAX_PROJECTS)
            .map(|project| {
                format!(
                    "{}: {}",
                    project.name.as_deref().unwrap_or_default(),
                    truncate_chars(
                        project.description.as_deref().unwrap_or_default(),
                        MAX_PROJECT_DESC_CHARS
                    )
                )
            })
            .collect();
        parts.push(format!("Projects: {}", entries.join(" | ")));
    }

    if !profile.interests.is_empty() {
        parts.push(format!("Interests: {}", profile.interests.join(", ")));
    }

    parts.join(" ")
}

/// Deterministic text projection of an opportunity for embedding.
pub fn build_opportunity_text(opportunity: &Opportunity) -> String {
    let mut parts: Vec<String> = Vec::new();

    push_labeled(&mut parts, "Title", opportunity.title.as_deref());
    push_labeled(&mut parts, "Company", opportunity.company.as_deref());
    push_labeled(&mut parts, "Location", opportunity.location.as_deref());
    if opportunity.is_remote {
        parts.push("Remote work available".to_string());
    }

    if let Some(description) = opportunity.description.as_deref() {
        if !description.is_empty() {
            parts.push(format!(
                "Description: {}",
                truncate_chars(description, MAX_OPPORTUNITY_DESC_CHARS)
            ));
        }
    }

    if !opportunity.required_skills.is_empty() {
        parts.push(format!(
            "Required Skills: {}",
            opportunity.required_skills.join(", ")
        ));
    }
    if !opportunity.preferred_skills.is_empty() {
        parts.push(format!(
            "Preferred Skills: {}",
            opportunity.preferred_skills.join(", ")
        ));
    }

    push_labeled(&mut parts, "Job Type", opportunity.job_type.as_deref());
    push_labeled(
        &mut parts,
        "Experience Level",
        opportunity.experience_level.as_deref(),
    );
    push_labeled(
        &mut parts,
        "Opportunity Type",
        opportunity.opportunity_type.as_deref(),
    );
    push_labeled(&mut parts, "Category", opportunity.category.as_deref());

    parts.join(" ")
}

fn push_labeled(parts: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            parts.push(format!("{label}: {value}"));
        }
    }
}

/// Char-boundary-safe prefix; byte slicing would panic on multibyte text.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EducationEntry, ProjectEntry, WorkExperience};

    fn full_profile() -> UserProfile {
        UserProfile {
            name: Some("Ada Lovelace".into()),
            headline: Some("Backend engineer".into()),
            bio: Some("Building data platforms".into()),
            goals: Some("Lead a platform team".into()),
            skills: vec!["Python".into(), "Rust".into()],
            work_experiences: vec![
                WorkExperience {
                    title: Some("Engineer".into()),
                    company: Some("Initech".into()),
                    is_current: true,
                    description_bullets: vec![
                        "Built pipelines".into(),
                        "Ran migrations".into(),
                        "Wrote docs".into(),
                    ],
                },
                WorkExperience {
                    title: Some("Analyst".into()),
                    company: Some("Globex".into()),
                    ..WorkExperience::default()
                },
            ],
            education_entries: vec![EducationEntry {
                degree_type: Some("BSc".into()),
                field_of_study: Some("Mathematics".into()),
                institution: Some("UCL".into()),
            }],
            projects: vec![ProjectEntry {
                name: Some("engine".into()),
                description: Some("x".repeat(300)),
            }],
            interests: vec!["chess".into()],
            ..UserProfile::default()
        }
    }

    #[test]
    fn profile_text_contains_fields_in_fixed_order() {
        let text = build_profile_text(&full_profile());

        let name = text.find("Name: Ada Lovelace").unwrap();
        let headline = text.find("Headline: Backend engineer").unwrap();
        let skills = text.find("Skills: Python, Rust").unwrap();
        let experience = text.find("Experience: Engineer at Initech.").unwrap();
        let interests = text.find("Interests: chess").unwrap();

        assert!(name < headline && headline < skills);
        assert!(skills < experience && experience < interests);
    }

    #[test]
    fn profile_text_skips_absent_fields_silently() {
        let profile = UserProfile {
            skills: vec!["Go".into()],
            ..UserProfile::default()
        };

        let text = build_profile_text(&profile);

        assert_eq!(text, "Skills: Go");
        assert!(!text.contains("Name"));
        assert!(!text.contains("None"));
    }

    #[test]
    fn empty_profile_builds_empty_text() {
        assert_eq!(build_profile_text(&UserProfile::default()), "");
    }

    #[test]
    fn experience_bullets_are_capped_at_two() {
        let text = build_profile_text(&full_profile());

        assert!(text.contains("Built pipelines Ran migrations"));
        assert!(!text.contains("Wrote docs"));
    }

    #[test]
    fn only_three_most_recent_experiences_are_kept() {
        let mut profile = full_profile();
        profile.work_experiences = (0..5)
            .map(|i| WorkExperience {
                title: Some(format!("Role{i}")),
                company: Some("Acme".into()),
                ..WorkExperience::default()
            })
            .collect();

        let text = build_profile_text(&profile);

        assert!(text.contains("Role0") && text.contains("Role2"));
        assert!(!text.contains("Role3"));
    }

    #[test]
    fn project_descriptions_are_truncated() {
        let text = build_profile_text(&full_profile());
        assert!(text.contains(&"x".repeat(100)));
        assert!(!text.contains(&"x".repeat(101)));
    }

    #[test]
    fn opportunity_description_is_cut_to_500_chars() {
        let opportunity = Opportunity {
            title: Some("Data Engineer".into()),
            description: Some("d".repeat(900)),
            ..Opportunity::default()
        };

        let text = build_opportunity_text(&opportunity);

        assert!(text.contains(&"d".repeat(500)));
        assert!(!text.contains(&"d".repeat(501)));
    }

    #[test]
    fn opportunity_truncation_respects_char_boundaries() {
        let opportunity = Opportunity {
            description: Some("日".repeat(600)),
            ..Opportunity::default()
        };

        let text = build_opportunity_text(&opportunity);

        assert!(text.contains(&"日".repeat(500)));
        assert!(!text.contains(&"日".repeat(501)));
    }

    #[test]
    fn remote_flag_adds_fixed_phrase() {
        let opportunity = Opportunity {
            is_remote: true,
            ..Opportunity::default()
        };

        assert_eq!(build_opportunity_text(&opportunity), "Remote work available");
    }

    #[test]
    fn builders_are_deterministic() {
        let profile = full_profile();
        assert_eq!(build_profile_text(&profile), build_profile_text(&profile));

        let opportunity = Opportunity {
            title: Some("SRE".into()),
            required_skills: vec!["Linux".into()],
            ..Opportunity::default()
        };
        assert_eq!(
            build_opportunity_text(&opportunity),
            build_opportunity_text(&opportunity)
        );
    }
}
