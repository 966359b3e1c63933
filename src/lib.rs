//! Career matching library

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod output;
pub mod profile;

pub use config::Config;
pub use error::{CareerMatchError, Result};
pub use matching::engine::{MatchEngine, MatchResult};
