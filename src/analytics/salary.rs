use crate::config::AnalyticsConfig;
use crate::profile::model::{normalize_skill_name, Skill, UserProfile};

/// Estimated salary from experience plus a capped bonus for in-demand skills,
/// rounded to the configured step
pub fn salary_potential(profile: &UserProfile, skills: &[Skill], config: &AnalyticsConfig) -> u32 {
    let base = base_salary(profile.experience, config);
    let bonus = in_demand_bonus(skills, config);

    let step = config.salary_rounding_step.max(1) as f64;
    ((base + bonus) as f64 / step).round() as u32 * config.salary_rounding_step.max(1)
}

fn base_salary(experience: f64, config: &AnalyticsConfig) -> u32 {
    let years = if experience.is_finite() { experience.max(0.0) } else { 0.0 };
    config
        .salary_buckets
        .iter()
        .find(|bucket| years < bucket.below_years)
        .map_or(config.salary_top_base, |bucket| bucket.base_salary)
}

fn in_demand_bonus(skills: &[Skill], config: &AnalyticsConfig) -> u32 {
    let keywords: Vec<String> = config
        .in_demand_keywords
        .iter()
        .map(|k| normalize_skill_name(k))
        .filter(|k| !k.is_empty())
        .collect();

    let bonus: u32 = skills
        .iter()
        .filter(|skill| {
            let name = skill.normalized_name();
            keywords.iter().any(|k| name.contains(k.as_str()))
        })
        .map(|skill| config.skill_bonus_per_level * skill.level.index())
        .sum();

    bonus.min(config.skill_bonus_cap)
}
