//! Derived profile analytics
//! Completion, skill gaps, salary potential, market demand, profile strength and career roadmaps

pub mod completion;
pub mod market;
pub mod roadmap;
pub mod salary;
pub mod skill_gap;
pub mod strength;

pub use completion::profile_completion;
pub use market::{average_market_demand, market_trend_insight, skill_value, MarketSkillDemand, SkillMarketValue};
pub use roadmap::{career_roadmap, career_roadmap_for, CareerRoadmap, RoleTrack};
pub use salary::salary_potential;
pub use skill_gap::{skill_gap_insight, skill_gaps, SkillGap};
pub use strength::{profile_strength, ProfileStrength};

use crate::config::AnalyticsConfig;
use crate::profile::store::ProfileSnapshot;
use log::debug;
use serde::{Deserialize, Serialize};

/// Every dashboard metric for one profile snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    pub profile_completion: u8,
    pub average_market_demand: u8,
    pub salary_potential: u32,
    pub skill_gaps: Vec<SkillGap>,
    pub skill_values: Vec<SkillMarketValue>,
    pub strength: ProfileStrength,
    pub skill_gap_insight: String,
    pub market_trend_insight: String,
    pub roadmap: CareerRoadmap,
}

pub fn dashboard_analytics(
    snapshot: &ProfileSnapshot,
    market: &[MarketSkillDemand],
    config: &AnalyticsConfig,
) -> DashboardAnalytics {
    let ProfileSnapshot {
        profile,
        skills,
        preferences,
        experience,
    } = snapshot;
    let threshold = config.skill_gap_demand_threshold;

    let analytics = DashboardAnalytics {
        profile_completion: profile_completion(profile, skills, experience, preferences),
        average_market_demand: average_market_demand(skills, market),
        salary_potential: salary_potential(profile, skills, config),
        skill_gaps: skill_gaps(skills, market, threshold),
        skill_values: market::skill_market_values(skills, market),
        strength: profile_strength(profile, skills, experience, preferences),
        skill_gap_insight: skill_gap_insight(skills, market, threshold),
        market_trend_insight: market_trend_insight(market),
        roadmap: career_roadmap(profile, skills, preferences),
    };
    debug!(
        "Dashboard analytics: completion {}%, {} skill gaps",
        analytics.profile_completion,
        analytics.skill_gaps.len()
    );
    analytics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sample::market_demand;

    #[test]
    fn empty_snapshot_uses_defaults() {
        let snapshot = ProfileSnapshot::default();
        let analytics = dashboard_analytics(&snapshot, &market_demand(), &AnalyticsConfig::default());

        assert_eq!(analytics.average_market_demand, 50);
        assert_eq!(analytics.salary_potential, 65_000);
        assert_eq!(analytics.skill_gaps.len(), 5);
        assert!(analytics.skill_values.is_empty());
        // Default target role "Software Developer" maps onto the general track
        assert_eq!(analytics.roadmap.track, RoleTrack::Default);
        assert_eq!(analytics.roadmap.current_step().map(|s| s.step), Some(1));
    }
}
