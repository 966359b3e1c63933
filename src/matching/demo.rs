//! Placeholder scoring for demonstrations before a real profile exists.
//!
//! Only reachable when demo mode is switched on explicitly; the regular
//! [`MatchEngine`](crate::matching::engine::MatchEngine) never draws random numbers.

use crate::input::listing::JobListing;
use crate::matching::engine::MatchResult;
use crate::matching::weights::ScoreBreakdown;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEMO_MIN_SCORE: u8 = 60;
const DEMO_MAX_SCORE: u8 = 99;

pub struct DemoScorer {
    rng: StdRng,
}

impl DemoScorer {
    /// Seeded scorers repeat their output; unseeded ones draw from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn score(&mut self, listings: &[JobListing]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = listings
            .iter()
            .map(|listing| {
                let match_score = self.rng.gen_range(DEMO_MIN_SCORE..=DEMO_MAX_SCORE);
                let matching_skills = listing
                    .skills
                    .iter()
                    .filter(|_| self.rng.gen_bool(0.5))
                    .cloned()
                    .collect();
                MatchResult {
                    listing: listing.clone(),
                    match_score,
                    matching_skills,
                    breakdown: ScoreBreakdown::default(),
                }
            })
            .collect();

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sample::sample_listings;

    #[test]
    fn seeded_demo_scores_repeat() {
        let listings = sample_listings();
        let first = DemoScorer::new(Some(7)).score(&listings);
        let second = DemoScorer::new(Some(7)).score(&listings);
        assert_eq!(first, second);
    }

    #[test]
    fn demo_scores_stay_in_range() {
        let listings = sample_listings();
        let results = DemoScorer::new(Some(42)).score(&listings);
        assert_eq!(results.len(), listings.len());
        assert!(results
            .iter()
            .all(|r| (DEMO_MIN_SCORE..=DEMO_MAX_SCORE).contains(&r.match_score)));
    }
}
