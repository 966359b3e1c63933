//! Score cache keyed by listing content
//!
//! Scores live here rather than on the listings themselves. A cache is scoped
//! to one request key, a fingerprint of the engine's weights and rules plus the
//! scored profile fields; switching to another key empties it, so a score is
//! only ever served to the engine and profile that produced it.

use crate::input::listing::JobListing;
use crate::matching::engine::MatchResult;
use crate::matching::scorers::ScoringRules;
use crate::matching::weights::{MatchWeights, ScoreBreakdown};
use crate::profile::model::{Preferences, Skill, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedScore {
    pub match_score: u8,
    pub matching_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCache {
    request_key: Option<String>,
    entries: HashMap<String, CachedScore>,
}

impl CachedScore {
    pub fn into_result(self, listing: JobListing) -> MatchResult {
        MatchResult {
            listing,
            match_score: self.match_score,
            matching_skills: self.matching_skills,
            breakdown: self.breakdown,
        }
    }
}

impl From<&MatchResult> for CachedScore {
    fn from(result: &MatchResult) -> Self {
        Self {
            match_score: result.match_score,
            matching_skills: result.matching_skills.clone(),
            breakdown: result.breakdown,
        }
    }
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_key(&self) -> Option<&str> {
        self.request_key.as_deref()
    }

    /// Bind the cache to `request_key`, dropping entries scored under any other key
    pub fn scope(&mut self, request_key: &str) {
        if self.request_key.as_deref() != Some(request_key) {
            self.entries.clear();
            self.request_key = Some(request_key.to_string());
        }
    }

    pub fn get(&self, listing_key: &str) -> Option<&CachedScore> {
        self.entries.get(listing_key)
    }

    pub fn insert(&mut self, listing_key: String, score: CachedScore) {
        self.entries.insert(listing_key, score);
    }

    /// Keep only the given listing keys
    pub fn retain_listings(&mut self, keys: &HashSet<String>) {
        self.entries.retain(|key, _| keys.contains(key));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fingerprint of everything a score depends on besides the listing:
/// the engine constants and the scored profile fields.
pub fn request_fingerprint(
    weights: &MatchWeights,
    rules: &ScoringRules,
    profile: &UserProfile,
    skills: &[Skill],
    preferences: &Preferences,
) -> String {
    let mut hasher = DefaultHasher::new();
    for value in [weights.skills, weights.experience, weights.location, weights.role] {
        value.to_bits().hash(&mut hasher);
    }
    for value in [
        rules.under_experience_penalty,
        rules.under_experience_floor,
        rules.over_experience_penalty,
        rules.over_experience_floor,
        rules.experience_slack_years,
        rules.location_partial_credit,
        rules.role_partial_credit,
    ] {
        value.to_bits().hash(&mut hasher);
    }
    profile_fingerprint(profile, skills, preferences).hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Content-derived profile key: any edit to the scored fields yields a new key
pub fn profile_fingerprint(profile: &UserProfile, skills: &[Skill], preferences: &Preferences) -> String {
    let mut hasher = DefaultHasher::new();
    profile.experience.to_bits().hash(&mut hasher);
    for skill in skills {
        skill.normalized_name().hash(&mut hasher);
    }
    preferences.target_role.trim().to_lowercase().hash(&mut hasher);
    format!("{:?}", preferences.location_preference).hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Key for one listing's scored content. Two listings sharing an id but
/// differing in content get different keys.
pub fn listing_fingerprint(listing: &JobListing) -> String {
    let mut hasher = DefaultHasher::new();
    listing.id.hash(&mut hasher);
    listing.title.hash(&mut hasher);
    listing.location.hash(&mut hasher);
    listing.experience_range.hash(&mut hasher);
    listing.skills.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::SkillLevel;

    fn cached(score: u8) -> CachedScore {
        CachedScore {
            match_score: score,
            matching_skills: Vec::new(),
            breakdown: ScoreBreakdown::default(),
        }
    }

    fn job(id: &str, skills: &[&str]) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: "Developer".to_string(),
            company: String::new(),
            location: "Remote".to_string(),
            salary: None,
            job_type: String::new(),
            experience_range: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_date: None,
            description: None,
        }
    }

    #[test]
    fn rescoping_drops_entries() {
        let mut cache = ScoreCache::new();
        cache.scope("alice");
        cache.insert("job1".to_string(), cached(80));

        cache.scope("alice");
        assert_eq!(cache.get("job1").map(|c| c.match_score), Some(80));

        cache.scope("bob");
        assert!(cache.get("job1").is_none());
        assert_eq!(cache.request_key(), Some("bob"));
    }

    #[test]
    fn fingerprint_changes_with_skills() {
        let profile = UserProfile::default();
        let prefs = Preferences::default();
        let before = profile_fingerprint(&profile, &[], &prefs);
        let after = profile_fingerprint(&profile, &[Skill::new("Rust", SkillLevel::Expert, 4.0)], &prefs);
        assert_ne!(before, after);
        assert_eq!(before, profile_fingerprint(&profile, &[], &prefs));
    }

    #[test]
    fn request_fingerprint_covers_engine_constants() {
        let profile = UserProfile::default();
        let prefs = Preferences::default();
        let rules = ScoringRules::default();
        let default_key = request_fingerprint(&MatchWeights::default(), &rules, &profile, &[], &prefs);

        let skill_heavy = MatchWeights { skills: 0.7, experience: 0.1, location: 0.1, role: 0.1 };
        assert_ne!(default_key, request_fingerprint(&skill_heavy, &rules, &profile, &[], &prefs));

        let lenient = ScoringRules { role_partial_credit: 90.0, ..ScoringRules::default() };
        assert_ne!(default_key, request_fingerprint(&MatchWeights::default(), &lenient, &profile, &[], &prefs));
    }

    #[test]
    fn shared_id_with_different_content_gets_distinct_keys() {
        assert_ne!(listing_fingerprint(&job("dup", &["Go"])), listing_fingerprint(&job("dup", &["Rust"])));
        assert_eq!(listing_fingerprint(&job("dup", &["Go"])), listing_fingerprint(&job("dup", &["Go"])));
    }
}
