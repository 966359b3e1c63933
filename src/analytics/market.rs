//! Market demand table lookups: average demand, skill value and trend insight

use crate::profile::model::{normalize_skill_name, Skill};
use serde::{Deserialize, Serialize};

/// Demand score used when none of the user's skills appear in the market table
pub const DEFAULT_MARKET_DEMAND: u8 = 50;
const DEFAULT_SKILL_VALUE: u8 = 50;
const DEFAULT_GROWTH: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSkillDemand {
    pub name: String,
    /// Relative demand, 0-100
    pub demand: u8,
    /// Expected growth, percent per year
    pub growth: i32,
}

/// A user skill annotated with its market data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMarketValue {
    pub name: String,
    pub level: String,
    pub demand: u8,
    pub growth: i32,
    pub value: u8,
}

impl MarketSkillDemand {
    pub fn new(name: impl Into<String>, demand: u8, growth: i32) -> Self {
        Self {
            name: name.into(),
            demand: demand.min(100),
            growth,
        }
    }
}

pub fn find_market_entry<'a>(market: &'a [MarketSkillDemand], skill_name: &str) -> Option<&'a MarketSkillDemand> {
    let wanted = normalize_skill_name(skill_name);
    market.iter().find(|entry| normalize_skill_name(&entry.name) == wanted)
}

/// Mean demand over the user's skills that appear in the market table
pub fn average_market_demand(skills: &[Skill], market: &[MarketSkillDemand]) -> u8 {
    let demands: Vec<u32> = skills
        .iter()
        .filter_map(|skill| find_market_entry(market, &skill.name))
        .map(|entry| entry.demand as u32)
        .collect();

    if demands.is_empty() {
        return DEFAULT_MARKET_DEMAND;
    }
    let total: u32 = demands.iter().sum();
    (total as f64 / demands.len() as f64).round() as u8
}

/// Blend of market demand, growth, proficiency and time spent with the skill
pub fn skill_value(skill: &Skill, market_entry: Option<&MarketSkillDemand>) -> u8 {
    let Some(entry) = market_entry else {
        return DEFAULT_SKILL_VALUE;
    };

    let level_factor = skill.level.index() as f64 / 4.0;
    let experience_factor = (skill.experience / 5.0).clamp(0.0, 1.0);

    let value = entry.demand as f64 * 0.6
        + entry.growth as f64 * 3.0 * 0.2
        + level_factor * 100.0 * 0.1
        + experience_factor * 100.0 * 0.1;

    value.round().clamp(0.0, 100.0) as u8
}

pub fn skill_market_values(skills: &[Skill], market: &[MarketSkillDemand]) -> Vec<SkillMarketValue> {
    skills
        .iter()
        .map(|skill| {
            let entry = find_market_entry(market, &skill.name);
            SkillMarketValue {
                name: skill.name.clone(),
                level: skill.level.label().to_string(),
                demand: entry.map_or(DEFAULT_MARKET_DEMAND, |e| e.demand),
                growth: entry.map_or(DEFAULT_GROWTH, |e| e.growth),
                value: skill_value(skill, entry),
            }
        })
        .collect()
}

/// Names the two fastest-growing skills in the table
pub fn market_trend_insight(market: &[MarketSkillDemand]) -> String {
    let mut growing: Vec<&MarketSkillDemand> = market.iter().collect();
    growing.sort_by(|a, b| b.growth.cmp(&a.growth));

    match growing.as_slice() {
        [] => "Complete your profile to see market trend insights.".to_string(),
        [only] => format!(
            "The demand for {} is growing rapidly, with a {}% increase expected this year.",
            only.name, only.growth
        ),
        [first, second, ..] => format!(
            "The demand for {} and {} is growing rapidly, with {}% and {}% increases expected this year.",
            first.name, second.name, first.growth, second.growth
        ),
    }
}
