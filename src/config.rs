//! Configuration management for the career matcher

use crate::error::{CareerMatchError, Result};
use crate::matching::weights::MatchWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub analytics: AnalyticsConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: MatchWeights,
    /// Points lost per year below a listing's minimum experience
    pub under_experience_penalty: f64,
    pub under_experience_floor: f64,
    /// Points lost per year above a listing's maximum experience
    pub over_experience_penalty: f64,
    pub over_experience_floor: f64,
    /// Years above the maximum before overqualification counts
    pub experience_slack_years: f64,
    pub location_partial_credit: f64,
    pub role_partial_credit: f64,
    pub demo_mode: bool,
    pub demo_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub skill_gap_demand_threshold: u8,
    pub salary_buckets: Vec<SalaryBucket>,
    /// Base salary once experience exceeds every bucket
    pub salary_top_base: u32,
    pub in_demand_keywords: Vec<String>,
    pub skill_bonus_per_level: u32,
    pub skill_bonus_cap: u32,
    pub salary_rounding_step: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBucket {
    /// Upper bound (exclusive) on years of experience
    pub below_years: f64,
    pub base_salary: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            under_experience_penalty: 15.0,
            under_experience_floor: 85.0,
            over_experience_penalty: 5.0,
            over_experience_floor: 90.0,
            experience_slack_years: 2.0,
            location_partial_credit: 70.0,
            role_partial_credit: 60.0,
            demo_mode: false,
            demo_seed: None,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            skill_gap_demand_threshold: 80,
            salary_buckets: vec![
                SalaryBucket { below_years: 2.0, base_salary: 65_000 },
                SalaryBucket { below_years: 5.0, base_salary: 85_000 },
                SalaryBucket { below_years: 8.0, base_salary: 105_000 },
            ],
            salary_top_base: 125_000,
            in_demand_keywords: ["React", "TypeScript", "AWS", "Python", "DevOps", "Cloud", "Docker"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skill_bonus_per_level: 2_500,
            skill_bonus_cap: 20_000,
            salary_rounding_step: 5_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-match");

        Self {
            matching: MatchingConfig::default(),
            analytics: AnalyticsConfig::default(),
            storage: StorageConfig { data_dir },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                page_size: 9,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            log::debug!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            log::info!("Wrote default configuration to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-match")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> &Path {
        &self.storage.data_dir
    }

    pub fn validate(&self) -> Result<()> {
        self.matching.weights.validate()?;

        let m = &self.matching;
        let constants = [
            ("under_experience_penalty", m.under_experience_penalty),
            ("under_experience_floor", m.under_experience_floor),
            ("over_experience_penalty", m.over_experience_penalty),
            ("over_experience_floor", m.over_experience_floor),
            ("experience_slack_years", m.experience_slack_years),
            ("location_partial_credit", m.location_partial_credit),
            ("role_partial_credit", m.role_partial_credit),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(CareerMatchError::Configuration(format!(
                    "matching.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("under_experience_floor", m.under_experience_floor),
            ("over_experience_floor", m.over_experience_floor),
            ("location_partial_credit", m.location_partial_credit),
            ("role_partial_credit", m.role_partial_credit),
        ] {
            if value > 100.0 {
                return Err(CareerMatchError::Configuration(format!(
                    "matching.{} must not exceed 100, got {}",
                    name, value
                )));
            }
        }

        if self.analytics.salary_rounding_step == 0 {
            return Err(CareerMatchError::Configuration(
                "analytics.salary_rounding_step must be greater than zero".to_string(),
            ));
        }
        if self.output.page_size == 0 {
            return Err(CareerMatchError::Configuration(
                "output.page_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.under_experience_floor, 85.0);
        assert_eq!(config.analytics.skill_gap_demand_threshold, 80);
    }

    #[test]
    fn rejects_partial_credit_above_hundred() {
        let mut config = Config::default();
        config.matching.role_partial_credit = 120.0;
        assert!(matches!(
            config.validate(),
            Err(CareerMatchError::Configuration(_))
        ));
    }

    #[test]
    fn round_trips_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let second = Config::load_from(&path).unwrap();
        assert_eq!(first.matching.weights, second.matching.weights);
        assert_eq!(first.output.page_size, second.output.page_size);
    }

    #[test]
    fn invalid_weights_in_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.matching.weights.skills = 0.9;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
