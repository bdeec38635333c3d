//! Alert types produced by the threshold evaluator, plus the ranking policy
//! used when a caller merges several alert lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vitals::VitalKey;

/// Severity tier of an alert.
///
/// Ordered `Info < Warning < Critical` so `max()` picks the most severe.
/// Threshold rules only emit `Warning` and `Critical`; `Info` is part of the
/// shared vocabulary for caller-generated notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// A single threshold breach for one vital.
///
/// Carries no identity; the caller assigns ids and timestamps on persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// The vital that breached a rule.
    pub vital_type: VitalKey,
    /// The observed value.
    pub vital_value: f64,
    /// The rule boundary that was crossed.
    pub threshold_value: f64,
    pub severity: AlertSeverity,
    /// Human label of the matching rule, e.g. "Critically High Heart Rate".
    pub title: String,
    /// Templated fallback description.
    pub message: String,
}

/// De-duplicate by vital (keeping the most severe record) and order the
/// result most severe first.
///
/// On a severity tie the earlier record wins. The sort is stable, so records
/// of equal severity keep their input order.
pub fn rank_alerts(alerts: Vec<AlertRecord>) -> Vec<AlertRecord> {
    let mut slot_by_vital: HashMap<VitalKey, usize> = HashMap::new();
    let mut kept: Vec<AlertRecord> = Vec::with_capacity(alerts.len());

    for alert in alerts {
        match slot_by_vital.get(&alert.vital_type) {
            Some(&slot) => {
                if alert.severity > kept[slot].severity {
                    kept[slot] = alert;
                }
            }
            None => {
                slot_by_vital.insert(alert.vital_type, kept.len());
                kept.push(alert);
            }
        }
    }

    kept.sort_by(|a, b| b.severity.cmp(&a.severity));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_alert(vital: VitalKey, severity: AlertSeverity, title: &str) -> AlertRecord {
        AlertRecord {
            vital_type: vital,
            vital_value: 0.0,
            threshold_value: 0.0,
            severity,
            title: title.to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::Warning);
        assert!(AlertSeverity::Warning > AlertSeverity::Info);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&AlertSeverity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn rank_orders_critical_first() {
        let ranked = rank_alerts(vec![
            make_alert(VitalKey::Glucose, AlertSeverity::Warning, "g"),
            make_alert(VitalKey::HeartRate, AlertSeverity::Critical, "hr"),
            make_alert(VitalKey::Temperature, AlertSeverity::Info, "t"),
        ]);
        let titles: Vec<_> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["hr", "g", "t"]);
    }

    #[test]
    fn rank_keeps_most_severe_per_vital() {
        let ranked = rank_alerts(vec![
            make_alert(VitalKey::HeartRate, AlertSeverity::Warning, "warn"),
            make_alert(VitalKey::HeartRate, AlertSeverity::Critical, "crit"),
        ]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "crit");
    }

    #[test]
    fn rank_tie_keeps_first_seen() {
        let ranked = rank_alerts(vec![
            make_alert(VitalKey::HeartRate, AlertSeverity::Warning, "first"),
            make_alert(VitalKey::HeartRate, AlertSeverity::Warning, "second"),
        ]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "first");
    }

    #[test]
    fn rank_is_stable_within_severity() {
        let ranked = rank_alerts(vec![
            make_alert(VitalKey::Glucose, AlertSeverity::Warning, "a"),
            make_alert(VitalKey::BpSystolic, AlertSeverity::Warning, "b"),
            make_alert(VitalKey::Temperature, AlertSeverity::Warning, "c"),
        ]);
        let titles: Vec<_> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn rank_empty() {
        assert!(rank_alerts(Vec::new()).is_empty());
    }
}
