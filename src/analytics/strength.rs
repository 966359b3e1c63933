//! Profile strength, market competitiveness and growth potential, with suggestions

use crate::analytics::completion::profile_completion;
use crate::profile::model::{Education, Preferences, Skill, SkillLevel, UserProfile, WorkExperience};
use serde::{Deserialize, Serialize};

const COMPETITIVE_SKILL_KEYWORDS: &[&str] = &["javascript", "react", "node.js", "python", "aws", "cloud"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStrength {
    pub profile_strength: u8,
    pub market_competitiveness: u8,
    pub growth_potential: u8,
    pub suggestions: StrengthSuggestions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthSuggestions {
    pub profile_strength: Vec<String>,
    pub market_competitiveness: Vec<String>,
    pub growth_potential: Vec<String>,
}

pub fn profile_strength(
    profile: &UserProfile,
    skills: &[Skill],
    experience: &[WorkExperience],
    preferences: &Preferences,
) -> ProfileStrength {
    ProfileStrength {
        profile_strength: profile_completion(profile, skills, experience, preferences),
        market_competitiveness: market_competitiveness(profile, skills, experience),
        growth_potential: growth_potential(profile, preferences),
        suggestions: StrengthSuggestions {
            profile_strength: profile_suggestions(profile, skills, experience),
            market_competitiveness: competitiveness_suggestions(skills),
            growth_potential: growth_suggestions(profile, skills, preferences),
        },
    }
}

pub fn market_competitiveness(profile: &UserProfile, skills: &[Skill], experience: &[WorkExperience]) -> u8 {
    let mut score = 50.0;

    if !skills.is_empty() {
        let in_demand = skills
            .iter()
            .filter(|skill| has_any(skill, COMPETITIVE_SKILL_KEYWORDS))
            .count();
        score += (in_demand as f64 * 5.0).min(20.0);

        let advanced = skills.iter().filter(|skill| skill.level >= SkillLevel::Advanced).count();
        score += (advanced as f64 * 3.0).min(15.0);
    }

    if !experience.is_empty() && profile.experience.is_finite() {
        score += (profile.experience.max(0.0) * 2.0).min(15.0);
    }

    score.min(100.0).round() as u8
}

pub fn growth_potential(profile: &UserProfile, preferences: &Preferences) -> u8 {
    let mut score: u32 = 60;

    score += match profile.education {
        Education::Masters | Education::PhD => 10,
        Education::Bachelors => 5,
        _ => 0,
    };

    let years = profile.experience;
    score += if years < 2.0 {
        15
    } else if years < 5.0 {
        10
    } else if years < 10.0 {
        5
    } else {
        0
    };

    if !preferences.target_role.trim().is_empty() {
        score += 5;
    }

    score.min(100) as u8
}

fn has_any(skill: &Skill, keywords: &[&str]) -> bool {
    let name = skill.normalized_name();
    keywords.iter().any(|k| name.contains(k))
}

fn profile_suggestions(profile: &UserProfile, skills: &[Skill], experience: &[WorkExperience]) -> Vec<String> {
    let mut suggestions = Vec::new();
    if profile.linkedin.as_deref().map_or(true, |url| url.trim().is_empty()) {
        suggestions.push("Add your LinkedIn profile".to_string());
    }
    if !profile.education.is_set() {
        suggestions.push("Add your education information".to_string());
    }
    if skills.len() < 5 {
        suggestions.push("Add more skills to your profile".to_string());
    }
    if experience.is_empty() {
        suggestions.push("Add your work experience details".to_string());
    }
    suggestions
}

fn competitiveness_suggestions(skills: &[Skill]) -> Vec<String> {
    let mut suggestions = Vec::new();
    if !skills.iter().any(|s| has_any(s, &["javascript"])) {
        suggestions.push("Add JavaScript to your skills".to_string());
    }
    if !skills.iter().any(|s| has_any(s, &["react", "angular", "vue"])) {
        suggestions.push("Learn a popular JavaScript framework like React, Angular, or Vue".to_string());
    }
    if !skills.iter().any(|s| has_any(s, &["node", "python", "java", ".net"])) {
        suggestions.push("Add backend development skills".to_string());
    }
    suggestions
}

fn growth_suggestions(profile: &UserProfile, skills: &[Skill], preferences: &Preferences) -> Vec<String> {
    let mut suggestions = vec!["Consider pursuing certifications in your field".to_string()];

    if !skills.iter().any(|s| has_any(s, &["cloud", "aws", "azure", "gcp"])) {
        suggestions.push("Learn cloud technologies (AWS, Azure, or GCP)".to_string());
    }

    let role = preferences.target_role.to_lowercase();
    let senior_track = ["senior", "lead", "manager"].iter().any(|k| role.contains(k));
    if profile.experience > 3.0 && !senior_track {
        suggestions.push("Consider targeting senior or leadership roles".to_string());
    }
    suggestions
}
