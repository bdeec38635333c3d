//! Threshold alert evaluator for vital-sign readings.
//!
//! Pure logic, no database access. The caller is responsible for persisting
//! and broadcasting the returned alerts, and for assigning them identity.

use crate::alert::{AlertRecord, AlertSeverity};
use crate::reading::VitalReading;
use crate::vitals::VitalKey;

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// Which side of the boundary breaches the rule. Both sides are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Breached when `value > boundary`.
    Above,
    /// Breached when `value < boundary`.
    Below,
}

impl Comparison {
    pub fn breached(self, value: f64, boundary: f64) -> bool {
        match self {
            Self::Above => value > boundary,
            Self::Below => value < boundary,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Above => "exceeds",
            Self::Below => "is below",
        }
    }
}

/// One row of a vital's rule table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    pub comparison: Comparison,
    pub boundary: f64,
    pub severity: AlertSeverity,
    pub title: &'static str,
}

/// The ordered rule list for a single vital. First match wins.
#[derive(Debug)]
pub struct VitalRules {
    pub vital: VitalKey,
    pub rules: &'static [ThresholdRule],
}

const fn rule(
    comparison: Comparison,
    boundary: f64,
    severity: AlertSeverity,
    title: &'static str,
) -> ThresholdRule {
    ThresholdRule {
        comparison,
        boundary,
        severity,
        title,
    }
}

use AlertSeverity::{Critical, Warning};
use Comparison::{Above, Below};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Rule tables for every scored vital, most severe rule first within a vital.
pub const THRESHOLD_RULES: &[VitalRules] = &[
    VitalRules {
        vital: VitalKey::HeartRate,
        rules: &[
            rule(Above, 150.0, Critical, "Critically High Heart Rate"),
            rule(Above, 120.0, Warning, "High Heart Rate"),
            rule(Below, 40.0, Critical, "Critically Low Heart Rate"),
            rule(Below, 50.0, Warning, "Low Heart Rate"),
        ],
    },
    VitalRules {
        vital: VitalKey::BpSystolic,
        rules: &[
            rule(Above, 180.0, Critical, "Hypertensive Crisis"),
            rule(Above, 140.0, Warning, "High Systolic Blood Pressure"),
            rule(Below, 80.0, Critical, "Critically Low Systolic Blood Pressure"),
            rule(Below, 90.0, Warning, "Low Systolic Blood Pressure"),
        ],
    },
    VitalRules {
        vital: VitalKey::BpDiastolic,
        rules: &[
            rule(Above, 120.0, Critical, "Hypertensive Crisis (Diastolic)"),
            rule(Above, 90.0, Warning, "High Diastolic Blood Pressure"),
            rule(Below, 40.0, Critical, "Critically Low Diastolic Blood Pressure"),
            rule(Below, 60.0, Warning, "Low Diastolic Blood Pressure"),
        ],
    },
    VitalRules {
        vital: VitalKey::Glucose,
        rules: &[
            rule(Above, 300.0, Critical, "Critically High Blood Glucose"),
            rule(Above, 200.0, Warning, "High Blood Glucose"),
            rule(Below, 54.0, Critical, "Severe Hypoglycemia"),
            rule(Below, 70.0, Warning, "Low Blood Glucose"),
        ],
    },
    VitalRules {
        vital: VitalKey::OxygenSaturation,
        rules: &[
            rule(Below, 90.0, Critical, "Critically Low Oxygen Saturation"),
            rule(Below, 94.0, Warning, "Low Oxygen Saturation"),
        ],
    },
    VitalRules {
        vital: VitalKey::Temperature,
        rules: &[
            rule(Above, 103.0, Critical, "High Fever"),
            rule(Above, 100.4, Warning, "Fever"),
            rule(Below, 95.0, Critical, "Hypothermia"),
            rule(Below, 96.5, Warning, "Low Body Temperature"),
        ],
    },
];

/// Rule list for one vital. Every scored vital has a table.
pub fn rules_for(vital: VitalKey) -> &'static [ThresholdRule] {
    THRESHOLD_RULES
        .iter()
        .find(|t| t.vital == vital)
        .map(|t| t.rules)
        .unwrap_or(&[])
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate every present vital in a reading against its rule table.
///
/// Returns at most one alert per vital. Absent vitals are skipped. The order
/// of alerts across vitals is not part of the contract; use
/// [`crate::alert::rank_alerts`] when a severity ordering is needed.
pub fn evaluate(reading: &VitalReading) -> Vec<AlertRecord> {
    reading
        .present()
        .filter_map(|(vital, value)| check_threshold(vital, value, rules_for(vital)))
        .collect()
}

/// First rule in `rules` breached by `value`, as an alert.
fn check_threshold(vital: VitalKey, value: f64, rules: &[ThresholdRule]) -> Option<AlertRecord> {
    let rule = rules
        .iter()
        .find(|r| r.comparison.breached(value, r.boundary))?;

    Some(AlertRecord {
        vital_type: vital,
        vital_value: value,
        threshold_value: rule.boundary,
        severity: rule.severity,
        title: rule.title.to_string(),
        message: format_message(vital, rule, value),
    })
}

/// `"<title>: <value><unit> <exceeds|is below> the threshold of <boundary><unit>."`
pub fn format_message(vital: VitalKey, rule: &ThresholdRule, value: f64) -> String {
    format!(
        "{}: {} {} the threshold of {}.",
        rule.title,
        vital.format_value(value),
        rule.comparison.verb(),
        vital.format_value(rule.boundary),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_with(vital: VitalKey, value: f64) -> VitalReading {
        let mut r = VitalReading::default();
        match vital {
            VitalKey::HeartRate => r.heart_rate = Some(value as i32),
            VitalKey::BpSystolic => r.blood_pressure_systolic = Some(value as i32),
            VitalKey::BpDiastolic => r.blood_pressure_diastolic = Some(value as i32),
            VitalKey::Glucose => r.glucose = Some(value),
            VitalKey::OxygenSaturation => r.oxygen_saturation = Some(value),
            VitalKey::Temperature => r.temperature = Some(value),
        }
        r
    }

    /// A value one step past the boundary. Integer vitals step by 1.
    fn just_past(vital: VitalKey, rule: &ThresholdRule) -> f64 {
        let step = match vital {
            VitalKey::HeartRate | VitalKey::BpSystolic | VitalKey::BpDiastolic => 1.0,
            _ => 0.1,
        };
        match rule.comparison {
            Comparison::Above => rule.boundary + step,
            Comparison::Below => rule.boundary - step,
        }
    }

    // -- table shape ----------------------------------------------------------

    #[test]
    fn every_vital_has_a_table() {
        for vital in VitalKey::ALL {
            assert!(!rules_for(vital).is_empty(), "{vital} has no rules");
        }
    }

    #[test]
    fn critical_precedes_warning_on_the_same_side() {
        for table in THRESHOLD_RULES {
            for side in [Comparison::Above, Comparison::Below] {
                let severities: Vec<_> = table
                    .rules
                    .iter()
                    .filter(|r| r.comparison == side)
                    .map(|r| r.severity)
                    .collect();
                let mut sorted = severities.clone();
                sorted.sort_by(|a, b| b.cmp(a));
                assert_eq!(severities, sorted, "{} {side:?}", table.vital);
            }
        }
    }

    #[test]
    fn critical_boundaries_are_more_extreme() {
        for table in THRESHOLD_RULES {
            for r in table.rules.iter().filter(|r| r.severity == Critical) {
                for w in table
                    .rules
                    .iter()
                    .filter(|w| w.severity == Warning && w.comparison == r.comparison)
                {
                    match r.comparison {
                        Comparison::Above => assert!(r.boundary > w.boundary),
                        Comparison::Below => assert!(r.boundary < w.boundary),
                    }
                }
            }
        }
    }

    // -- per-rule behaviour ---------------------------------------------------

    #[test]
    fn every_rule_fires_just_past_its_boundary() {
        for table in THRESHOLD_RULES {
            for r in table.rules {
                let value = just_past(table.vital, r);
                let alerts = evaluate(&reading_with(table.vital, value));
                assert_eq!(alerts.len(), 1, "{} at {value}", table.vital);
                assert!(alerts[0].severity >= r.severity);
            }
        }
    }

    #[test]
    fn no_rule_fires_exactly_on_its_boundary() {
        for table in THRESHOLD_RULES {
            for r in table.rules {
                let alerts = evaluate(&reading_with(table.vital, r.boundary));
                assert!(
                    alerts.iter().all(|a| a.title != r.title),
                    "{} fired at its own boundary {}",
                    r.title,
                    r.boundary
                );
            }
        }
    }

    // -- heart rate -----------------------------------------------------------

    #[test]
    fn heart_rate_155_is_one_critical_alert() {
        let alerts = evaluate(&reading_with(VitalKey::HeartRate, 155.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Critical);
        assert_eq!(alerts[0].title, "Critically High Heart Rate");
        assert_eq!(alerts[0].threshold_value, 150.0);
        assert_eq!(alerts[0].vital_value, 155.0);
    }

    #[test]
    fn heart_rate_130_is_warning() {
        let alerts = evaluate(&reading_with(VitalKey::HeartRate, 130.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Warning);
        assert_eq!(alerts[0].threshold_value, 120.0);
    }

    #[test]
    fn heart_rate_45_is_low_warning() {
        let alerts = evaluate(&reading_with(VitalKey::HeartRate, 45.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Low Heart Rate");
    }

    #[test]
    fn heart_rate_150_is_warning_not_critical() {
        let alerts = evaluate(&reading_with(VitalKey::HeartRate, 150.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Warning);
    }

    #[test]
    fn heart_rate_120_does_not_alert() {
        assert!(evaluate(&reading_with(VitalKey::HeartRate, 120.0)).is_empty());
    }

    // -- whole readings -------------------------------------------------------

    #[test]
    fn normal_reading_has_no_alerts() {
        let reading = VitalReading {
            heart_rate: Some(72),
            blood_pressure_systolic: Some(118),
            blood_pressure_diastolic: Some(76),
            glucose: Some(95.0),
            oxygen_saturation: Some(98.0),
            temperature: Some(98.6),
            sleep_hours: Some(0.0),
            steps: Some(0),
            timestamp: None,
        };
        assert!(evaluate(&reading).is_empty());
    }

    #[test]
    fn empty_reading_has_no_alerts() {
        assert!(evaluate(&VitalReading::default()).is_empty());
    }

    #[test]
    fn multiple_vitals_alert_independently() {
        let reading = VitalReading {
            heart_rate: Some(160),
            oxygen_saturation: Some(92.0),
            temperature: Some(98.6),
            ..Default::default()
        };
        let alerts = evaluate(&reading);
        assert_eq!(alerts.len(), 2);
        assert!(alerts
            .iter()
            .any(|a| a.vital_type == VitalKey::HeartRate && a.severity == Critical));
        assert!(alerts
            .iter()
            .any(|a| a.vital_type == VitalKey::OxygenSaturation && a.severity == Warning));
    }

    // -- message templating ---------------------------------------------------

    #[test]
    fn message_above_template() {
        let alerts = evaluate(&reading_with(VitalKey::HeartRate, 155.0));
        assert_eq!(
            alerts[0].message,
            "Critically High Heart Rate: 155 BPM exceeds the threshold of 150 BPM."
        );
    }

    #[test]
    fn message_below_template_keeps_unit() {
        let alerts = evaluate(&reading_with(VitalKey::OxygenSaturation, 88.5));
        assert_eq!(
            alerts[0].message,
            "Critically Low Oxygen Saturation: 88.5% is below the threshold of 90%."
        );
    }

    #[test]
    fn message_units_per_vital() {
        let cases = [
            (VitalKey::BpSystolic, 190.0, "mmHg"),
            (VitalKey::Glucose, 250.0, "mg/dL"),
            (VitalKey::Temperature, 104.0, "°F"),
        ];
        for (vital, value, unit) in cases {
            let alerts = evaluate(&reading_with(vital, value));
            assert_eq!(alerts.len(), 1);
            assert_eq!(alerts[0].message.matches(unit).count(), 2, "{vital}");
        }
    }
}
