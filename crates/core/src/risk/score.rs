//! Composite risk scoring.
//!
//! Combines weighted zone points, trend penalties and a compounding bonus
//! into a 0-100 score with a category and ranked explanatory factors.

use serde::{Deserialize, Serialize};

use super::conditions::{weight_for, ConditionSet};
use super::trend::{assess_trend, Trend, TrendAssessment};
use super::tuning::{
    RiskTuning, CRITICAL_SCORE_MIN, HIGH_SCORE_MIN, MAX_SCORE, MODERATE_SCORE_MIN,
};
use super::zones::{classify, Zone};
use crate::reading::{HistoryWindow, VitalReading};
use crate::vitals::VitalKey;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskCategory {
    pub fn from_score(score: u32) -> Self {
        if score >= CRITICAL_SCORE_MIN {
            Self::Critical
        } else if score >= HIGH_SCORE_MIN {
            Self::High
        } else if score >= MODERATE_SCORE_MIN {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// One vital's contribution to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub vital: VitalKey,
    /// Weighted, capped zone points plus trend penalty.
    pub score: u32,
    pub trend: Trend,
    pub zone: Zone,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResult {
    pub overall_score: u32,
    pub category: RiskCategory,
    /// Sorted by `score` descending; ties keep canonical vital order.
    pub factors: Vec<RiskFactor>,
}

impl RiskScoreResult {
    /// Result for a reading with no scored vitals.
    pub fn empty() -> Self {
        Self {
            overall_score: 0,
            category: RiskCategory::Low,
            factors: Vec::new(),
        }
    }

    /// Vitals currently outside their normal zone.
    pub fn abnormal_count(&self) -> usize {
        self.factors.iter().filter(|f| !f.zone.is_normal()).count()
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `latest` with the default tuning.
pub fn score(
    latest: &VitalReading,
    history: &HistoryWindow,
    conditions: &ConditionSet,
) -> RiskScoreResult {
    score_with(&RiskTuning::default(), latest, history, conditions)
}

/// Score `latest` against its trailing `history` and the patient's conditions.
///
/// Total over all inputs: absent vitals are skipped, short history yields a
/// stable trend, and an empty reading yields [`RiskScoreResult::empty`].
pub fn score_with(
    tuning: &RiskTuning,
    latest: &VitalReading,
    history: &HistoryWindow,
    conditions: &ConditionSet,
) -> RiskScoreResult {
    let mut factors: Vec<RiskFactor> = latest
        .present()
        .filter_map(|(vital, value)| score_vital(tuning, vital, value, history, conditions))
        .collect();

    if factors.is_empty() {
        return RiskScoreResult::empty();
    }

    let raw_total = factors
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.score));
    let abnormal = factors.iter().filter(|f| !f.zone.is_normal()).count();
    let overall_score = raw_total
        .saturating_add(compounding_bonus(tuning, abnormal))
        .min(MAX_SCORE);

    // Stable sort: equal scores keep canonical vital order.
    factors.sort_by(|a, b| b.score.cmp(&a.score));

    RiskScoreResult {
        overall_score,
        category: RiskCategory::from_score(overall_score),
        factors,
    }
}

fn score_vital(
    tuning: &RiskTuning,
    vital: VitalKey,
    value: f64,
    history: &HistoryWindow,
    conditions: &ConditionSet,
) -> Option<RiskFactor> {
    let zone = classify(vital, value)?;
    let weighted = weighted_points(tuning, zone.points, weight_for(conditions, vital));
    let trend = assess_trend(vital, &history.series(vital), tuning);

    Some(RiskFactor {
        vital,
        score: weighted.saturating_add(trend.penalty),
        trend: trend.trend,
        zone: zone.zone,
        explanation: explain(zone.explanation, &trend),
    })
}

/// Apply the condition multiplier, round, and cap.
pub fn weighted_points(tuning: &RiskTuning, points: u32, weight: f64) -> u32 {
    let weighted = (f64::from(points) * weight).round();
    (weighted.max(0.0) as u32).min(tuning.per_vital_cap)
}

/// Extra points when several vitals are abnormal at once.
pub fn compounding_bonus(tuning: &RiskTuning, abnormal: usize) -> u32 {
    if abnormal >= tuning.compound_many_threshold {
        tuning.compound_many_bonus
    } else if abnormal == 2 {
        tuning.compound_pair_bonus
    } else {
        0
    }
}

fn explain(zone_explanation: String, trend: &TrendAssessment) -> String {
    match trend.trend {
        Trend::Stable => zone_explanation,
        Trend::Worsening => format!(
            "{zone_explanation}; worsening over the last {} readings",
            trend.points
        ),
        Trend::Improving => format!(
            "{zone_explanation}; improving over the last {} readings",
            trend.points
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
