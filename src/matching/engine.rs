//! Match engine: scores job listings against a profile and ranks them

use crate::config::MatchingConfig;
use crate::error::Result;
use crate::input::listing::JobListing;
use crate::matching::cache::{listing_fingerprint, request_fingerprint, CachedScore, ScoreCache};
use crate::matching::scorers::{self, ScoringRules};
use crate::matching::weights::{MatchWeights, ScoreBreakdown};
use crate::profile::model::{normalize_skill_name, Preferences, Skill, UserProfile};
use crate::profile::store::ProfileSnapshot;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Pure, deterministic scorer. Holds only immutable constants, so one engine
/// can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEngine {
    weights: MatchWeights,
    rules: ScoringRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub listing: JobListing,
    /// Overall fit, 0-100
    pub match_score: u8,
    /// Listing skills present in the profile, in listing order
    pub matching_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// A listing's required skill with the user's proficiency in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProficiency {
    pub name: String,
    /// Level index * 25, or 0 when the user lacks the skill
    pub percentage: u8,
}

/// Profile data prepared once per request
struct ProfileContext<'a> {
    experience_years: f64,
    skill_names: HashSet<String>,
    preferences: &'a Preferences,
}

impl MatchEngine {
    pub fn new(weights: MatchWeights, rules: ScoringRules) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights, rules })
    }

    pub fn from_config(config: &MatchingConfig) -> Result<Self> {
        Self::new(config.weights, ScoringRules::from_config(config))
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score every listing and rank descending by score. Ties keep input order.
    pub fn compute_matches(
        &self,
        profile: &UserProfile,
        skills: &[Skill],
        preferences: &Preferences,
        listings: &[JobListing],
    ) -> Vec<MatchResult> {
        let context = Self::context(profile, skills, preferences);

        let mut results: Vec<MatchResult> = listings
            .iter()
            .map(|listing| self.score_with_context(&context, listing))
            .collect();

        // sort_by is stable, which keeps equal scores in input order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        debug!("Ranked {} listings", results.len());
        results
    }

    pub fn compute_matches_for(&self, snapshot: &ProfileSnapshot, listings: &[JobListing]) -> Vec<MatchResult> {
        self.compute_matches(&snapshot.profile, &snapshot.skills, &snapshot.preferences, listings)
    }

    /// Same ranking as [`compute_matches`](Self::compute_matches), reusing
    /// scores from `cache`. The cache is scoped to this engine's constants and
    /// the profile, and afterwards holds exactly the listings scored here.
    pub fn compute_matches_cached(
        &self,
        cache: &mut ScoreCache,
        profile: &UserProfile,
        skills: &[Skill],
        preferences: &Preferences,
        listings: &[JobListing],
    ) -> Vec<MatchResult> {
        let context = Self::context(profile, skills, preferences);
        cache.scope(&request_fingerprint(&self.weights, &self.rules, profile, skills, preferences));

        let mut seen = HashSet::with_capacity(listings.len());
        let mut hits = 0usize;
        let mut results: Vec<MatchResult> = listings
            .iter()
            .map(|listing| {
                let key = listing_fingerprint(listing);
                let result = match cache.get(&key) {
                    Some(cached) => {
                        hits += 1;
                        cached.clone().into_result(listing.clone())
                    }
                    None => {
                        let result = self.score_with_context(&context, listing);
                        cache.insert(key.clone(), CachedScore::from(&result));
                        result
                    }
                };
                seen.insert(key);
                result
            })
            .collect();
        cache.retain_listings(&seen);

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        debug!("Ranked {} listings ({} cached scores reused)", results.len(), hits);
        results
    }

    /// Score a single listing
    pub fn score_listing(
        &self,
        profile: &UserProfile,
        skills: &[Skill],
        preferences: &Preferences,
        listing: &JobListing,
    ) -> MatchResult {
        let context = Self::context(profile, skills, preferences);
        self.score_with_context(&context, listing)
    }

    /// Per-skill proficiency for a listing's requirements
    pub fn skill_breakdown(&self, listing: &JobListing, skills: &[Skill]) -> Vec<SkillProficiency> {
        let levels: HashMap<String, u8> = skills
            .iter()
            .map(|s| (s.normalized_name(), s.level.proficiency()))
            .collect();

        listing
            .skills
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| SkillProficiency {
                name: name.trim().to_string(),
                percentage: levels.get(&normalize_skill_name(name)).copied().unwrap_or(0),
            })
            .collect()
    }

    fn context<'a>(profile: &UserProfile, skills: &[Skill], preferences: &'a Preferences) -> ProfileContext<'a> {
        ProfileContext {
            experience_years: profile.experience,
            skill_names: scorers::skill_name_set(skills),
            preferences,
        }
    }

    fn score_with_context(&self, context: &ProfileContext<'_>, listing: &JobListing) -> MatchResult {
        let (skill_score, matching_skills) = scorers::skill_match(&listing.skills, &context.skill_names);

        let range = listing.experience();
        if range.is_none() && listing.experience_range.is_some() {
            debug!(
                "Listing {} has unparsable experience range {:?}, treating as no constraint",
                listing.id, listing.experience_range
            );
        }

        let breakdown = ScoreBreakdown {
            skills: skill_score,
            experience: self.rules.experience_match(context.experience_years, range),
            location: self.rules.location_match(&context.preferences.location_preference, listing),
            role: self.rules.role_match(&context.preferences.target_role, &listing.title),
        };

        MatchResult {
            listing: listing.clone(),
            match_score: self.weights.combine(&breakdown),
            matching_skills,
            breakdown,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            rules: ScoringRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sample::sample_listings;
    use crate::profile::model::{LocationPreference, SkillLevel};

    fn listing(id: &str, title: &str, location: &str, experience: &str, skills: &[&str]) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            salary: None,
            job_type: "Full-time".to_string(),
            experience_range: Some(experience.to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_date: None,
            description: None,
        }
    }

    fn profile(years: f64) -> UserProfile {
        UserProfile {
            experience: years,
            ..UserProfile::default()
        }
    }

    fn preferences(role: &str, location: LocationPreference) -> Preferences {
        Preferences {
            target_role: role.to_string(),
            location_preference: location,
            ..Preferences::default()
        }
    }

    fn js_react() -> Vec<Skill> {
        vec![
            Skill::new("JavaScript", SkillLevel::Advanced, 3.0),
            Skill::new("React", SkillLevel::Intermediate, 2.0),
        ]
    }

    #[test]
    fn partial_skill_coverage_scenario_scores_73() {
        let engine = MatchEngine::default();
        let job = listing("a", "Frontend Engineer", "Austin, TX", "2-5 years", &["JavaScript", "React", "TypeScript"]);
        let prefs = preferences("Data Scientist", LocationPreference::Remote);

        let results = engine.compute_matches(&profile(3.0), &js_react(), &prefs, &[job]);
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!((result.breakdown.skills - 66.666_666).abs() < 1e-3);
        assert_eq!(result.breakdown.experience, 100.0);
        assert_eq!(result.breakdown.location, 70.0);
        assert_eq!(result.breakdown.role, 60.0);
        assert_eq!(result.match_score, 73);
        assert_eq!(result.matching_skills, vec!["JavaScript", "React"]);
    }

    #[test]
    fn under_experienced_scenario_hits_floor() {
        let engine = MatchEngine::default();
        let job = listing("a", "Engineer", "Remote", "5-8 years", &["Rust"]);
        let result = engine.score_listing(&profile(1.0), &[], &Preferences::default(), &job);
        assert_eq!(result.breakdown.experience, 85.0);
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let engine = MatchEngine::default();
        let a = listing("A", "Engineer", "Remote", "2-5 years", &["JavaScript"]);
        let b = listing("B", "Engineer", "Remote", "2-5 years", &["React"]);
        let weaker = listing("C", "Engineer", "Austin, TX", "2-5 years", &["Go"]);
        let prefs = preferences("Engineer", LocationPreference::Remote);

        let results = engine.compute_matches(&profile(3.0), &js_react(), &prefs, &[weaker, a, b]);
        let ids: Vec<&str> = results.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(results[0].match_score, results[1].match_score);
    }

    #[test]
    fn subset_skills_score_full_marks() {
        let engine = MatchEngine::default();
        let job = listing("a", "Dev", "Remote", "1-3 years", &["react", "JAVASCRIPT", "React"]);
        let result = engine.score_listing(&profile(2.0), &js_react(), &Preferences::default(), &job);
        assert_eq!(result.breakdown.skills, 100.0);
    }

    #[test]
    fn empty_inputs_degrade_gracefully() {
        let engine = MatchEngine::default();
        assert!(engine
            .compute_matches(&profile(3.0), &js_react(), &Preferences::default(), &[])
            .is_empty());

        let results = engine.compute_matches(&profile(3.0), &[], &Preferences::default(), &sample_listings());
        assert!(results.iter().all(|r| r.breakdown.skills == 0.0));
    }

    #[test]
    fn ranking_is_deterministic_and_complete() {
        let engine = MatchEngine::default();
        let listings = sample_listings();
        let prefs = preferences("Frontend Developer", LocationPreference::Remote);

        let first = engine.compute_matches(&profile(4.0), &js_react(), &prefs, &listings);
        let second = engine.compute_matches(&profile(4.0), &js_react(), &prefs, &listings);

        assert_eq!(first, second);
        assert_eq!(first.len(), listings.len());
        assert!(first.windows(2).all(|w| w[0].match_score >= w[1].match_score));
        assert!(first.iter().all(|r| r.match_score <= 100));
    }

    #[test]
    fn listings_are_not_mutated() {
        let engine = MatchEngine::default();
        let listings = sample_listings();
        let before = listings.clone();
        let _ = engine.compute_matches(&profile(4.0), &js_react(), &Preferences::default(), &listings);
        assert_eq!(listings, before);
    }

    #[test]
    fn unparsable_range_is_no_constraint() {
        let engine = MatchEngine::default();
        let job = listing("a", "Dev", "Remote", "senior level", &["React"]);
        let result = engine.score_listing(&profile(0.0), &js_react(), &Preferences::default(), &job);
        assert_eq!(result.breakdown.experience, 100.0);
    }

    #[test]
    fn skill_breakdown_uses_level_index() {
        let engine = MatchEngine::default();
        let job = listing("a", "Dev", "Remote", "1-3 years", &["JavaScript", "React", "Go"]);
        let breakdown = engine.skill_breakdown(&job, &js_react());
        let percentages: Vec<u8> = breakdown.iter().map(|s| s.percentage).collect();
        assert_eq!(percentages, vec![75, 50, 0]);
    }

    #[test]
    fn rejects_invalid_weights() {
        let weights = MatchWeights {
            skills: 0.6,
            experience: 0.25,
            location: 0.15,
            role: 0.0,
        };
        assert!(MatchEngine::new(weights, ScoringRules::default()).is_ok());

        let weights = MatchWeights { role: 0.15, ..weights };
        assert!(MatchEngine::new(weights, ScoringRules::default()).is_err());
    }

    #[test]
    fn cached_matches_equal_uncached() {
        let engine = MatchEngine::default();
        let listings = sample_listings();
        let prefs = preferences("Developer", LocationPreference::Hybrid);
        let mut cache = ScoreCache::new();

        let direct = engine.compute_matches(&profile(4.0), &js_react(), &prefs, &listings);
        let cached_first = engine.compute_matches_cached(&mut cache, &profile(4.0), &js_react(), &prefs, &listings);
        let cached_second = engine.compute_matches_cached(&mut cache, &profile(4.0), &js_react(), &prefs, &listings);

        assert_eq!(direct, cached_first);
        assert_eq!(direct, cached_second);
        assert_eq!(cache.len(), listings.len());
    }

    #[test]
    fn cached_matches_handle_shared_listing_ids() {
        let engine = MatchEngine::default();
        let listings = vec![
            listing("dup", "Engineer", "Remote", "2-5 years", &["Go"]),
            listing("dup", "Engineer", "Remote", "2-5 years", &["Rust"]),
        ];
        let skills = vec![Skill::new("Rust", SkillLevel::Advanced, 3.0)];
        let prefs = preferences("Engineer", LocationPreference::Remote);
        let mut cache = ScoreCache::new();

        let direct = engine.compute_matches(&profile(3.0), &skills, &prefs, &listings);
        for _ in 0..2 {
            let cached = engine.compute_matches_cached(&mut cache, &profile(3.0), &skills, &prefs, &listings);
            assert_eq!(cached, direct);
        }
        assert_eq!(direct[0].matching_skills, vec!["Rust"]);
        assert!(direct[0].match_score > direct[1].match_score);
    }

    #[test]
    fn cache_is_not_shared_across_engine_configurations() {
        let listings = vec![listing("j1", "Data Analyst", "Austin, TX", "2-5 years", &["SQL", "Excel"])];
        let skills = vec![Skill::new("SQL", SkillLevel::Advanced, 3.0)];
        let prefs = preferences("Engineer", LocationPreference::Remote);
        let mut cache = ScoreCache::new();

        let default_engine = MatchEngine::default();
        let skill_heavy = MatchEngine::new(
            MatchWeights { skills: 0.7, experience: 0.1, location: 0.1, role: 0.1 },
            ScoringRules::default(),
        )
        .unwrap();

        let first = default_engine.compute_matches_cached(&mut cache, &profile(3.0), &skills, &prefs, &listings);
        let second = skill_heavy.compute_matches_cached(&mut cache, &profile(3.0), &skills, &prefs, &listings);

        assert_eq!(first, default_engine.compute_matches(&profile(3.0), &skills, &prefs, &listings));
        assert_eq!(second, skill_heavy.compute_matches(&profile(3.0), &skills, &prefs, &listings));
        assert_ne!(first[0].match_score, second[0].match_score);
    }
}
