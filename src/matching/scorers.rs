//! Sub-scorers for skill, experience, location and role fit

use crate::config::MatchingConfig;
use crate::input::listing::{ExperienceRange, JobListing, LocationFamily};
use crate::profile::model::{normalize_skill_name, LocationPreference, Skill};
use std::collections::HashSet;

const FULL_MARKS: f64 = 100.0;

/// Constants governing the experience, location and role sub-scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    pub under_experience_penalty: f64,
    pub under_experience_floor: f64,
    pub over_experience_penalty: f64,
    pub over_experience_floor: f64,
    pub experience_slack_years: f64,
    pub location_partial_credit: f64,
    pub role_partial_credit: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::from_config(&MatchingConfig::default())
    }
}

impl ScoringRules {
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            under_experience_penalty: config.under_experience_penalty,
            under_experience_floor: config.under_experience_floor,
            over_experience_penalty: config.over_experience_penalty,
            over_experience_floor: config.over_experience_floor,
            experience_slack_years: config.experience_slack_years,
            location_partial_credit: config.location_partial_credit,
            role_partial_credit: config.role_partial_credit,
        }
    }

    /// Score against a listing's experience range. A missing range, or a
    /// non-finite user value, is treated as no constraint.
    pub fn experience_match(&self, user_years: f64, range: Option<ExperienceRange>) -> f64 {
        let Some(range) = range else {
            return FULL_MARKS;
        };
        if !user_years.is_finite() {
            return FULL_MARKS;
        }
        let user_years = user_years.max(0.0);

        if user_years < range.min_years {
            let penalty = (range.min_years - user_years) * self.under_experience_penalty;
            return (FULL_MARKS - penalty).max(self.under_experience_floor).min(FULL_MARKS);
        }

        if let Some(max_years) = range.max_years {
            if user_years > max_years + self.experience_slack_years {
                let penalty = (user_years - max_years) * self.over_experience_penalty;
                return (FULL_MARKS - penalty).max(self.over_experience_floor).min(FULL_MARKS);
            }
        }

        FULL_MARKS
    }

    pub fn location_match(&self, preference: &LocationPreference, listing: &JobListing) -> f64 {
        let matched = match preference {
            LocationPreference::Remote => listing.location_family() == LocationFamily::Remote,
            LocationPreference::Hybrid => listing.location_family() == LocationFamily::Hybrid,
            LocationPreference::OnSite => listing.location_family() == LocationFamily::OnSite,
            LocationPreference::Other(text) => {
                !text.trim().is_empty() && text.trim().eq_ignore_ascii_case(listing.location.trim())
            }
        };
        if matched {
            FULL_MARKS
        } else {
            self.location_partial_credit
        }
    }

    /// Case-insensitive containment of the target role in the listing title
    pub fn role_match(&self, target_role: &str, title: &str) -> f64 {
        let role = target_role.trim().to_lowercase();
        if !role.is_empty() && title.to_lowercase().contains(&role) {
            FULL_MARKS
        } else {
            self.role_partial_credit
        }
    }
}

/// Normalized (trimmed, lowercase) profile skill names
pub fn skill_name_set(skills: &[Skill]) -> HashSet<String> {
    skills
        .iter()
        .map(Skill::normalized_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Share of the listing's skills the profile covers, plus the covered skills
/// in listing order. Blank listing entries are ignored; no skills scores 0.
pub fn skill_match(job_skills: &[String], profile_skills: &HashSet<String>) -> (f64, Vec<String>) {
    let mut total = 0usize;
    let mut matching = Vec::new();

    for skill in job_skills {
        let normalized = normalize_skill_name(skill);
        if normalized.is_empty() {
            continue;
        }
        total += 1;
        if profile_skills.contains(&normalized) {
            matching.push(skill.trim().to_string());
        }
    }

    if total == 0 {
        return (0.0, matching);
    }
    (matching.len() as f64 / total as f64 * FULL_MARKS, matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::SkillLevel;

    fn listing_at(location: &str) -> JobListing {
        JobListing {
            id: "x".into(),
            title: "Senior React Developer".into(),
            company: String::new(),
            location: location.into(),
            salary: None,
            job_type: String::new(),
            experience_range: None,
            skills: Vec::new(),
            posted_date: None,
            description: None,
        }
    }

    fn range(min: f64, max: Option<f64>) -> Option<ExperienceRange> {
        Some(ExperienceRange { min_years: min, max_years: max })
    }

    #[test]
    fn under_qualified_is_floored() {
        let rules = ScoringRules::default();
        assert_eq!(rules.experience_match(1.0, range(5.0, Some(8.0))), 85.0);
        // One year short: 100 - 15 = 85 exactly
        assert_eq!(rules.experience_match(4.0, range(5.0, Some(8.0))), 85.0);
    }

    #[test]
    fn under_penalty_above_floor_with_lower_floor() {
        let rules = ScoringRules {
            under_experience_floor: 0.0,
            ..ScoringRules::default()
        };
        assert_eq!(rules.experience_match(4.0, range(5.0, Some(8.0))), 85.0);
        assert_eq!(rules.experience_match(1.0, range(5.0, Some(8.0))), 40.0);
    }

    #[test]
    fn slack_band_above_max_is_not_penalized() {
        let rules = ScoringRules::default();
        assert_eq!(rules.experience_match(10.0, range(5.0, Some(8.0))), 100.0);
        assert_eq!(rules.experience_match(20.0, range(5.0, Some(8.0))), 90.0);
    }

    #[test]
    fn over_penalty_applies_past_slack() {
        let rules = ScoringRules {
            over_experience_floor: 0.0,
            ..ScoringRules::default()
        };
        // 11 years against max 8: (11 - 8) * 5 = 15
        assert_eq!(rules.experience_match(11.0, range(5.0, Some(8.0))), 85.0);
    }

    #[test]
    fn open_ended_and_missing_ranges() {
        let rules = ScoringRules::default();
        assert_eq!(rules.experience_match(30.0, range(10.0, None)), 100.0);
        assert_eq!(rules.experience_match(0.0, None), 100.0);
        assert_eq!(rules.experience_match(f64::NAN, range(5.0, Some(8.0))), 100.0);
    }

    #[test]
    fn location_partial_credit() {
        let rules = ScoringRules::default();
        assert_eq!(rules.location_match(&LocationPreference::Remote, &listing_at("Remote")), 100.0);
        assert_eq!(rules.location_match(&LocationPreference::Remote, &listing_at("Austin, TX")), 70.0);
        assert_eq!(
            rules.location_match(&LocationPreference::Hybrid, &listing_at("NYC (Hybrid)")),
            100.0
        );
        assert_eq!(
            rules.location_match(&LocationPreference::Other("austin, tx".into()), &listing_at("Austin, TX")),
            100.0
        );
    }

    #[test]
    fn role_containment_is_case_insensitive() {
        let rules = ScoringRules::default();
        assert_eq!(rules.role_match("react developer", "Senior React Developer"), 100.0);
        assert_eq!(rules.role_match("Data Scientist", "Senior React Developer"), 60.0);
        assert_eq!(rules.role_match("  ", "Senior React Developer"), 60.0);
    }

    #[test]
    fn skill_match_counts_listing_coverage() {
        let profile = skill_name_set(&[
            Skill::new("JavaScript", SkillLevel::Advanced, 3.0),
            Skill::new("React", SkillLevel::Intermediate, 2.0),
        ]);
        let job = vec!["javascript ".to_string(), "React".to_string(), "TypeScript".to_string()];
        let (score, matching) = skill_match(&job, &profile);
        assert!((score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(matching, vec!["javascript", "React"]);
    }

    #[test]
    fn empty_listing_skills_score_zero() {
        let profile = skill_name_set(&[Skill::new("Rust", SkillLevel::Expert, 5.0)]);
        assert_eq!(skill_match(&[], &profile).0, 0.0);
        assert_eq!(skill_match(&["  ".to_string()], &profile).0, 0.0);
    }
}
