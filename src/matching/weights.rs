//! Sub-score weights for the overall match score

use crate::error::{CareerMatchError, Result};
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub role: f64,
}

/// The four sub-scores of a listing, each in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub role: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.2,
            location: 0.15,
            role: 0.15,
        }
    }
}

impl MatchWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.location + self.role
    }

    /// Weights must be non-negative and sum to exactly 1.0
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("skills", self.skills),
            ("experience", self.experience),
            ("location", self.location),
            ("role", self.role),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CareerMatchError::Configuration(format!(
                    "Weight '{}' must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CareerMatchError::Configuration(format!(
                "Match weights must sum to 1.0, got {:.4}",
                total
            )));
        }
        Ok(())
    }

    /// Weighted sum rounded to the nearest integer and clamped to [0, 100]
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> u8 {
        let weighted = breakdown.skills * self.skills
            + breakdown.experience * self.experience
            + breakdown.location * self.location
            + breakdown.role * self.role;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(MatchWeights::default().validate().is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let weights = MatchWeights {
            skills: 0.6,
            experience: 0.25,
            location: 0.15,
            role: 0.15,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn rejects_negative_weight() {
        let weights = MatchWeights {
            skills: 1.2,
            experience: -0.2,
            location: 0.0,
            role: 0.0,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn combine_rounds_to_nearest() {
        let breakdown = ScoreBreakdown {
            skills: 200.0 / 3.0,
            experience: 100.0,
            location: 70.0,
            role: 60.0,
        };
        assert_eq!(MatchWeights::default().combine(&breakdown), 73);
    }
}
