//! Empirical constants of the risk engine.
//!
//! The defaults are the reviewed clinical values; change them only after
//! domain review.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category boundaries
// ---------------------------------------------------------------------------

/// Upper bound of `overallScore`.
pub const MAX_SCORE: u32 = 100;
/// Score at or above which the category is `critical`.
pub const CRITICAL_SCORE_MIN: u32 = 80;
/// Score at or above which the category is `high` (below critical).
pub const HIGH_SCORE_MIN: u32 = 55;
/// Score at or above which the category is `moderate` (below high).
pub const MODERATE_SCORE_MIN: u32 = 30;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PER_VITAL_CAP: u32 = 25;
pub const DEFAULT_TREND_DEAD_ZONE: f64 = 0.5;
pub const DEFAULT_TREND_PENALTY_CAP: u32 = 5;
pub const DEFAULT_TREND_SLOPE_SATURATION: f64 = 2.0;
pub const DEFAULT_TREND_MIN_POINTS: usize = 3;
pub const DEFAULT_COMPOUND_PAIR_BONUS: u32 = 5;
pub const DEFAULT_COMPOUND_MANY_BONUS: u32 = 10;
pub const DEFAULT_COMPOUND_MANY_THRESHOLD: usize = 3;

/// Tunable constants used by [`super::score::score_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTuning {
    /// Maximum weighted zone points a single vital can contribute.
    pub per_vital_cap: u32,
    /// `|slope|` below which a trend is `stable`.
    pub trend_dead_zone: f64,
    /// Maximum trend penalty for one vital.
    pub trend_penalty_cap: u32,
    /// `|slope|` at which the trend penalty reaches its cap.
    pub trend_slope_saturation: f64,
    /// History points required before a worsening trend is penalised.
    pub trend_min_points: usize,
    /// Bonus when exactly two vitals are outside their normal zone.
    pub compound_pair_bonus: u32,
    /// Bonus when `compound_many_threshold` or more vitals are abnormal.
    pub compound_many_bonus: u32,
    pub compound_many_threshold: usize,
}

impl Default for RiskTuning {
    fn default() -> Self {
        Self {
            per_vital_cap: DEFAULT_PER_VITAL_CAP,
            trend_dead_zone: DEFAULT_TREND_DEAD_ZONE,
            trend_penalty_cap: DEFAULT_TREND_PENALTY_CAP,
            trend_slope_saturation: DEFAULT_TREND_SLOPE_SATURATION,
            trend_min_points: DEFAULT_TREND_MIN_POINTS,
            compound_pair_bonus: DEFAULT_COMPOUND_PAIR_BONUS,
            compound_many_bonus: DEFAULT_COMPOUND_MANY_BONUS,
            compound_many_threshold: DEFAULT_COMPOUND_MANY_THRESHOLD,
        }
    }
}

impl RiskTuning {
    /// Reject values that would make scoring meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.per_vital_cap == 0 {
            return Err(CoreError::Validation(
                "per_vital_cap must be greater than 0".to_string(),
            ));
        }
        if !self.trend_dead_zone.is_finite() || self.trend_dead_zone < 0.0 {
            return Err(CoreError::Validation(format!(
                "trend_dead_zone must be a non-negative number, got {}",
                self.trend_dead_zone
            )));
        }
        if !self.trend_slope_saturation.is_finite() || self.trend_slope_saturation <= 0.0 {
            return Err(CoreError::Validation(format!(
                "trend_slope_saturation must be positive, got {}",
                self.trend_slope_saturation
            )));
        }
        for (name, value) in [
            ("per_vital_cap", self.per_vital_cap),
            ("trend_penalty_cap", self.trend_penalty_cap),
            ("compound_pair_bonus", self.compound_pair_bonus),
            ("compound_many_bonus", self.compound_many_bonus),
        ] {
            if value > MAX_SCORE {
                return Err(CoreError::Validation(format!(
                    "{name} must be at most {MAX_SCORE}, got {value}"
                )));
            }
        }
        if self.compound_many_threshold < 3 {
            return Err(CoreError::Validation(format!(
                "compound_many_threshold must be at least 3, got {}",
                self.compound_many_threshold
            )));
        }
        Ok(())
    }
}
