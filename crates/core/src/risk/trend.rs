//! Trend detection over a history window.
//!
//! The slope is an ordinary least-squares fit of value against sequence
//! index, so only ordering matters, not the spacing between readings.

use serde::{Deserialize, Serialize};

use super::tuning::RiskTuning;
use crate::vitals::{Direction, VitalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Worsening,
    Improving,
    Stable,
}

/// Trend classification and penalty for one vital.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAssessment {
    pub slope: f64,
    pub trend: Trend,
    pub penalty: u32,
    /// History points the slope was fitted on.
    pub points: usize,
}

/// OLS slope of `values` against their index. `0.0` for fewer than 2 points.
pub fn ols_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;
    let (mut num, mut den) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    if den.abs() > 1e-12 {
        num / den
    } else {
        0.0
    }
}

/// Map a slope to a clinical direction for `vital`.
pub fn classify_trend(vital: VitalKey, slope: f64, dead_zone: f64) -> Trend {
    if !slope.is_finite() || slope.abs() < dead_zone {
        return Trend::Stable;
    }
    let rising = slope > 0.0;
    match (vital.direction(), rising) {
        (Direction::HigherIsWorse, true) | (Direction::HigherIsBetter, false) => Trend::Worsening,
        _ => Trend::Improving,
    }
}

/// Classify the trend of `series` and compute its penalty.
///
/// Only a worsening trend fitted on at least `tuning.trend_min_points`
/// points is penalised, scaled linearly up to `tuning.trend_penalty_cap`.
pub fn assess_trend(vital: VitalKey, series: &[f64], tuning: &RiskTuning) -> TrendAssessment {
    let slope = ols_slope(series);
    let trend = classify_trend(vital, slope, tuning.trend_dead_zone);

    let penalty = if trend == Trend::Worsening && series.len() >= tuning.trend_min_points {
        let fraction = (slope.abs() / tuning.trend_slope_saturation).min(1.0);
        (fraction * f64::from(tuning.trend_penalty_cap)).round() as u32
    } else {
        0
    };

    TrendAssessment {
        slope,
        trend,
        penalty,
        points: series.len(),
    }
}
