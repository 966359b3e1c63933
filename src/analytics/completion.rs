use crate::profile::model::{Preferences, Skill, UserProfile, WorkExperience};

const NAME_WEIGHT: u8 = 15;
const EMAIL_WEIGHT: u8 = 15;
const LOCATION_WEIGHT: u8 = 10;
const EDUCATION_WEIGHT: u8 = 15;
const SKILLS_WEIGHT: u8 = 20;
const EXPERIENCE_WEIGHT: u8 = 15;
const TARGET_ROLE_WEIGHT: u8 = 10;

/// Weighted checklist of filled-in profile sections, 0-100
pub fn profile_completion(
    profile: &UserProfile,
    skills: &[Skill],
    experience: &[WorkExperience],
    preferences: &Preferences,
) -> u8 {
    let checks = [
        (!profile.name.trim().is_empty(), NAME_WEIGHT),
        (!profile.email.trim().is_empty(), EMAIL_WEIGHT),
        (!profile.location.trim().is_empty(), LOCATION_WEIGHT),
        (profile.education.is_set(), EDUCATION_WEIGHT),
        (!skills.is_empty(), SKILLS_WEIGHT),
        (!experience.is_empty(), EXPERIENCE_WEIGHT),
        (!preferences.target_role.trim().is_empty(), TARGET_ROLE_WEIGHT),
    ];

    let total: u32 = checks
        .iter()
        .filter(|(done, _)| *done)
        .map(|(_, weight)| *weight as u32)
        .sum();
    total.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::{Education, SkillLevel};
    use chrono::NaiveDate;

    #[test]
    fn empty_profile_counts_only_default_role() {
        let prefs = Preferences::default();
        assert_eq!(profile_completion(&UserProfile::default(), &[], &[], &prefs), 10);

        let prefs = Preferences {
            target_role: String::new(),
            ..Preferences::default()
        };
        assert_eq!(profile_completion(&UserProfile::default(), &[], &[], &prefs), 0);
    }

    #[test]
    fn full_profile_reaches_100() {
        let profile = UserProfile {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            location: "Austin, TX".into(),
            education: Education::Bachelors,
            ..UserProfile::default()
        };
        let skills = vec![Skill::new("Rust", SkillLevel::Advanced, 3.0)];
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let history = vec![WorkExperience::new("Engineer", "Acme", start, None)];

        assert_eq!(
            profile_completion(&profile, &skills, &history, &Preferences::default()),
            100
        );
    }
}
