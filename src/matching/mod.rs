//! Job matching module
//! Scores listings against a profile, ranks, filters and pages the results

pub mod cache;
pub mod demo;
pub mod engine;
pub mod filter;
pub mod scorers;
pub mod weights;

pub use cache::{listing_fingerprint, profile_fingerprint, request_fingerprint, ScoreCache};
pub use demo::DemoScorer;
pub use engine::{MatchEngine, MatchResult, SkillProficiency};
pub use filter::{paginate, ExperienceBucket, JobFilter, Page, SalaryBand};
pub use scorers::ScoringRules;
pub use weights::{MatchWeights, ScoreBreakdown};
