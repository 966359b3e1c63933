//! Report structures handed to the formatters

use crate::analytics::{CareerRoadmap, DashboardAnalytics};
use crate::matching::engine::{MatchEngine, MatchResult, SkillProficiency};
use crate::matching::filter::Page;
use crate::profile::model::Skill;
use crate::profile::store::ProfileSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Ranked, filtered and paged match results
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub profile: ProfileSummary,
    /// Active filters, as human-readable labels
    pub filters: Vec<String>,
    pub page: Page<MatchResult>,
    /// Per-listing skill proficiency for the results on this page
    pub skill_breakdowns: Vec<ListingSkillBreakdown>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingSkillBreakdown {
    pub listing_id: String,
    pub skills: Vec<SkillProficiency>,
}

/// Dashboard: analytics, the best matches, and chart data as labelled series
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub profile: ProfileSummary,
    pub analytics: DashboardAnalytics,
    pub top_matches: Vec<MatchResult>,
    pub charts: Vec<ChartSeries>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub job_title: String,
    pub experience_years: f64,
    pub education: String,
    pub skill_count: usize,
    pub target_role: String,
    pub location_preference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    /// Listing file path, or "sample data"
    pub listing_source: String,
    pub demo_mode: bool,
}

impl ProfileSummary {
    pub fn from_snapshot(snapshot: &ProfileSnapshot) -> Self {
        Self {
            name: snapshot.profile.name.clone(),
            job_title: snapshot.profile.job_title.clone(),
            experience_years: snapshot.profile.experience,
            education: snapshot.profile.education.label().to_string(),
            skill_count: snapshot.skills.len(),
            target_role: snapshot.preferences.target_role.clone(),
            location_preference: snapshot.preferences.location_preference.label().to_string(),
        }
    }
}

impl ReportMetadata {
    pub fn new(listing_source: impl Into<String>, demo_mode: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listing_source: listing_source.into(),
            demo_mode,
        }
    }
}

impl MatchReport {
    pub fn new(
        engine: &MatchEngine,
        snapshot: &ProfileSnapshot,
        filters: Vec<String>,
        page: Page<MatchResult>,
        metadata: ReportMetadata,
    ) -> Self {
        let skill_breakdowns = page
            .items
            .iter()
            .map(|result| ListingSkillBreakdown {
                listing_id: result.listing.id.clone(),
                skills: engine.skill_breakdown(&result.listing, &snapshot.skills),
            })
            .collect();

        Self {
            profile: ProfileSummary::from_snapshot(snapshot),
            filters,
            page,
            skill_breakdowns,
            metadata,
        }
    }

    pub fn breakdown_for(&self, listing_id: &str) -> Option<&[SkillProficiency]> {
        self.skill_breakdowns
            .iter()
            .find(|b| b.listing_id == listing_id)
            .map(|b| b.skills.as_slice())
    }
}

impl DashboardReport {
    pub fn new(
        snapshot: &ProfileSnapshot,
        analytics: DashboardAnalytics,
        top_matches: Vec<MatchResult>,
        metadata: ReportMetadata,
    ) -> Self {
        let charts = vec![
            ChartSeries {
                title: "Skill market value".to_string(),
                points: analytics
                    .skill_values
                    .iter()
                    .map(|s| ChartPoint {
                        label: s.name.clone(),
                        value: s.value as f64,
                    })
                    .collect(),
            },
            ChartSeries {
                title: "Skill gaps".to_string(),
                points: analytics
                    .skill_gaps
                    .iter()
                    .map(|g| ChartPoint {
                        label: g.name.clone(),
                        value: g.gap as f64,
                    })
                    .collect(),
            },
            skills_by_level(&snapshot.skills),
            salary_by_experience(&analytics.roadmap),
        ];

        Self {
            profile: ProfileSummary::from_snapshot(snapshot),
            analytics,
            top_matches,
            charts,
            metadata,
        }
    }
}

fn salary_by_experience(roadmap: &CareerRoadmap) -> ChartSeries {
    ChartSeries {
        title: format!("Salary by experience ({})", roadmap.track.label()),
        points: roadmap
            .salary_curve
            .iter()
            .map(|p| ChartPoint {
                label: format!("{} yrs", p.years),
                value: p.salary as f64,
            })
            .collect(),
    }
}

fn skills_by_level(skills: &[Skill]) -> ChartSeries {
    use crate::profile::model::SkillLevel;

    ChartSeries {
        title: "Skills by level".to_string(),
        points: SkillLevel::ordered()
            .into_iter()
            .map(|level| ChartPoint {
                label: level.label().to_string(),
                value: skills.iter().filter(|s| s.level == level).count() as f64,
            })
            .collect(),
    }
}
