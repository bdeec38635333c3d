//! Caller-side composition of the alert evaluator and the risk engine.
//!
//! [`VitalsMonitor`] owns every piece of state the pure engine must not:
//! alert identity, repeat-alert cooldown and the per-patient score cache.
//! It is `Send + Sync` and is meant to be shared via `Arc<VitalsMonitor>`
//! across request handlers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitalwatch_core::alert::{rank_alerts, AlertRecord};
use vitalwatch_core::reading::{HistoryWindow, VitalReading};
use vitalwatch_core::risk::{score_with, ConditionSet, RiskScoreResult};
use vitalwatch_core::thresholds;
use vitalwatch_core::types::{DbId, Timestamp};
use vitalwatch_core::validation::{validate_history, validate_reading};

use crate::cache::RiskScoreCache;
use crate::config::MonitorConfig;
use crate::cooldown::AlertCooldownTracker;
use crate::error::{MonitorError, MonitorResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// An alert record with caller-assigned identity, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAlert {
    pub id: Uuid,
    pub patient_id: DbId,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub record: AlertRecord,
}

/// A risk score together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub result: RiskScoreResult,
    pub computed_at: Timestamp,
    /// `true` when served from the cache rather than recomputed.
    pub cached: bool,
}

/// Combined outcome of one monitoring pass for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub patient_id: DbId,
    /// Emitted alerts, most severe first.
    pub alerts: Vec<PatientAlert>,
    /// Alerts withheld by the cooldown.
    pub suppressed: usize,
    pub risk: RiskSnapshot,
}

// ---------------------------------------------------------------------------
// VitalsMonitor
// ---------------------------------------------------------------------------

pub struct VitalsMonitor {
    config: MonitorConfig,
    cooldown: Mutex<AlertCooldownTracker>,
    cache: Mutex<RiskScoreCache>,
}

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Both guarded structures stay consistent after any single operation, so
/// a poisoned lock carries no torn state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl VitalsMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            cooldown: Mutex::new(AlertCooldownTracker::new(config.alert_cooldown)),
            cache: Mutex::new(RiskScoreCache::new(config.risk_cache_ttl)),
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // -- parsing --------------------------------------------------------------

    /// Parse and validate a reading from a JSON object.
    pub fn parse_reading(json: &str) -> MonitorResult<VitalReading> {
        let reading: VitalReading = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "Rejected unparseable reading");
            MonitorError::BadRequest(format!("Invalid reading JSON: {e}"))
        })?;
        validate_reading(&reading)?;
        Ok(reading)
    }

    /// Parse and validate a history window from a JSON array of readings.
    pub fn parse_history(json: &str) -> MonitorResult<HistoryWindow> {
        let readings: Vec<VitalReading> = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "Rejected unparseable history");
            MonitorError::BadRequest(format!("Invalid history JSON: {e}"))
        })?;
        let history = HistoryWindow::new(readings);
        validate_history(&history)?;
        Ok(history)
    }

    // -- alerts ---------------------------------------------------------------

    /// Evaluate a reading and return the alerts that pass the cooldown.
    pub fn evaluate_reading(
        &self,
        patient_id: DbId,
        reading: &VitalReading,
    ) -> MonitorResult<Vec<PatientAlert>> {
        self.evaluate_reading_at(patient_id, reading, Utc::now())
            .map(|(alerts, _)| alerts)
    }

    /// [`Self::evaluate_reading`] with an explicit clock. Also returns the
    /// number of suppressed alerts.
    pub fn evaluate_reading_at(
        &self,
        patient_id: DbId,
        reading: &VitalReading,
        now: Timestamp,
    ) -> MonitorResult<(Vec<PatientAlert>, usize)> {
        validate_reading(reading).inspect_err(|e| {
            tracing::warn!(patient_id, error = %e, "Rejected invalid reading");
        })?;

        let records = rank_alerts(thresholds::evaluate(reading));
        let total = records.len();

        let emitted: Vec<PatientAlert> = {
            let mut cooldown = lock(&self.cooldown);
            cooldown.prune(now);
            records
                .into_iter()
                .filter(|r| {
                    let allowed = cooldown.should_alert(patient_id, r.vital_type, r.severity, now);
                    if !allowed {
                        tracing::debug!(
                            patient_id,
                            vital = %r.vital_type,
                            severity = r.severity.as_str(),
                            "Alert suppressed by cooldown"
                        );
                    }
                    allowed
                })
                .map(|record| PatientAlert {
                    id: Uuid::now_v7(),
                    patient_id,
                    created_at: now,
                    record,
                })
                .collect()
        };

        for alert in &emitted {
            tracing::info!(
                patient_id,
                alert_id = %alert.id,
                vital = %alert.record.vital_type,
                severity = alert.record.severity.as_str(),
                value = alert.record.vital_value,
                "Vital alert raised"
            );
        }

        let suppressed = total - emitted.len();
        Ok((emitted, suppressed))
    }

    // -- risk -----------------------------------------------------------------

    /// Risk score for a patient, served from cache unless stale or
    /// `force_refresh` is set.
    pub fn risk_score(
        &self,
        patient_id: DbId,
        latest: &VitalReading,
        history: &HistoryWindow,
        conditions: &ConditionSet,
        force_refresh: bool,
    ) -> MonitorResult<RiskSnapshot> {
        self.risk_score_at(patient_id, latest, history, conditions, force_refresh, Utc::now())
    }

    /// [`Self::risk_score`] with an explicit clock.
    pub fn risk_score_at(
        &self,
        patient_id: DbId,
        latest: &VitalReading,
        history: &HistoryWindow,
        conditions: &ConditionSet,
        force_refresh: bool,
        now: Timestamp,
    ) -> MonitorResult<RiskSnapshot> {
        validate_reading(latest)?;
        validate_history(history)?;

        if !force_refresh {
            if let Some((result, computed_at)) = lock(&self.cache).get(patient_id, now) {
                tracing::debug!(patient_id, overall_score = result.overall_score, "Risk score cache hit");
                return Ok(RiskSnapshot {
                    result,
                    computed_at,
                    cached: true,
                });
            }
        }

        let result = score_with(&self.config.tuning, latest, history, conditions);
        tracing::info!(
            patient_id,
            overall_score = result.overall_score,
            category = result.category.as_str(),
            abnormal = result.abnormal_count(),
            history_len = history.len(),
            force_refresh,
            "Risk score computed"
        );

        {
            let mut cache = lock(&self.cache);
            cache.prune(now);
            cache.insert(patient_id, result.clone(), now);
        }

        Ok(RiskSnapshot {
            result,
            computed_at: now,
            cached: false,
        })
    }

    /// Drop a patient's cached score, e.g. after their conditions change.
    pub fn invalidate_risk(&self, patient_id: DbId) {
        lock(&self.cache).invalidate(patient_id);
    }

    // -- combined -------------------------------------------------------------

    /// Evaluate alerts and score risk for the latest reading in one pass.
    pub fn assess(
        &self,
        patient_id: DbId,
        latest: &VitalReading,
        history: &HistoryWindow,
        conditions: &ConditionSet,
        force_refresh: bool,
    ) -> MonitorResult<Assessment> {
        self.assess_at(patient_id, latest, history, conditions, force_refresh, Utc::now())
    }

    /// [`Self::assess`] with an explicit clock.
    pub fn assess_at(
        &self,
        patient_id: DbId,
        latest: &VitalReading,
        history: &HistoryWindow,
        conditions: &ConditionSet,
        force_refresh: bool,
        now: Timestamp,
    ) -> MonitorResult<Assessment> {
        let (alerts, suppressed) = self.evaluate_reading_at(patient_id, latest, now)?;
        let risk = self.risk_score_at(patient_id, latest, history, conditions, force_refresh, now)?;
        Ok(Assessment {
            patient_id,
            alerts,
            suppressed,
            risk,
        })
    }
}

impl Default for VitalsMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}
