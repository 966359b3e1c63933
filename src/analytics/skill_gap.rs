//! High-demand market skills the user does not yet have

use crate::analytics::market::MarketSkillDemand;
use crate::matching::scorers::skill_name_set;
use crate::profile::model::{normalize_skill_name, Skill};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub name: String,
    pub demand: u8,
    /// Always 0: only skills absent from the profile are reported
    pub user_level: u8,
    pub gap: u8,
}

/// Market skills with demand above `threshold` that the user lacks, largest gap first
pub fn skill_gaps(skills: &[Skill], market: &[MarketSkillDemand], threshold: u8) -> Vec<SkillGap> {
    let owned = skill_name_set(skills);

    let mut gaps: Vec<SkillGap> = market
        .iter()
        .filter(|entry| entry.demand > threshold)
        .filter(|entry| !owned.contains(&normalize_skill_name(&entry.name)))
        .map(|entry| SkillGap {
            name: entry.name.clone(),
            demand: entry.demand,
            user_level: 0,
            gap: entry.demand,
        })
        .collect();

    gaps.sort_by(|a, b| b.gap.cmp(&a.gap));
    gaps
}

/// One-line summary naming the two largest gaps
pub fn skill_gap_insight(skills: &[Skill], market: &[MarketSkillDemand], threshold: u8) -> String {
    if skills.is_empty() {
        return "Complete your profile to see skill gap insights.".to_string();
    }

    let missing: Vec<String> = skill_gaps(skills, market, threshold)
        .into_iter()
        .take(2)
        .map(|gap| gap.name)
        .collect();

    if missing.is_empty() {
        "Your skill set is well-aligned with current market demand. \
         Consider increasing your proficiency in your existing skills."
            .to_string()
    } else {
        format!(
            "Adding {} to your skill set could increase your job matches by up to 20%.",
            missing.join(" and ")
        )
    }
}
