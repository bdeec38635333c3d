//! Vital-key vocabulary shared by the threshold evaluator and the risk engine.
//!
//! The string forms returned by [`VitalKey::as_str`] are the stable contract
//! with persistence and rendering layers; renaming one is a breaking change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Vital key constants
// ---------------------------------------------------------------------------

/// Heart rate in beats per minute.
pub const VITAL_HEART_RATE: &str = "heart_rate";
/// Systolic blood pressure in mmHg.
pub const VITAL_BP_SYSTOLIC: &str = "blood_pressure_systolic";
/// Diastolic blood pressure in mmHg.
pub const VITAL_BP_DIASTOLIC: &str = "blood_pressure_diastolic";
/// Blood glucose in mg/dL.
pub const VITAL_GLUCOSE: &str = "glucose";
/// Peripheral oxygen saturation (SpO2) in percent.
pub const VITAL_OXYGEN_SATURATION: &str = "oxygen_saturation";
/// Body temperature in degrees Fahrenheit.
pub const VITAL_TEMPERATURE: &str = "temperature";

// ---------------------------------------------------------------------------
// VitalKey
// ---------------------------------------------------------------------------

/// One of the six scored vitals.
///
/// Sleep hours and step counts are carried on [`crate::reading::VitalReading`]
/// but are never scored, so they have no key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKey {
    HeartRate,
    #[serde(rename = "blood_pressure_systolic")]
    BpSystolic,
    #[serde(rename = "blood_pressure_diastolic")]
    BpDiastolic,
    Glucose,
    OxygenSaturation,
    Temperature,
}

/// Whether rising values indicate clinical deterioration or improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsWorse,
    HigherIsBetter,
}

impl VitalKey {
    /// All scored vitals in canonical iteration order.
    ///
    /// Factor ranking ties fall back to this order.
    pub const ALL: [VitalKey; 6] = [
        VitalKey::HeartRate,
        VitalKey::BpSystolic,
        VitalKey::BpDiastolic,
        VitalKey::Glucose,
        VitalKey::OxygenSaturation,
        VitalKey::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeartRate => VITAL_HEART_RATE,
            Self::BpSystolic => VITAL_BP_SYSTOLIC,
            Self::BpDiastolic => VITAL_BP_DIASTOLIC,
            Self::Glucose => VITAL_GLUCOSE,
            Self::OxygenSaturation => VITAL_OXYGEN_SATURATION,
            Self::Temperature => VITAL_TEMPERATURE,
        }
    }

    /// Human-readable name used in explanations.
    pub fn label(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart rate",
            Self::BpSystolic => "Systolic blood pressure",
            Self::BpDiastolic => "Diastolic blood pressure",
            Self::Glucose => "Blood glucose",
            Self::OxygenSaturation => "Oxygen saturation",
            Self::Temperature => "Temperature",
        }
    }

    /// Display suffix appended directly after a value (`"155 BPM"`, `"92%"`).
    pub fn unit(self) -> &'static str {
        match self {
            Self::HeartRate => " BPM",
            Self::BpSystolic | Self::BpDiastolic => " mmHg",
            Self::Glucose => " mg/dL",
            Self::OxygenSaturation => "%",
            Self::Temperature => "°F",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::OxygenSaturation => Direction::HigherIsBetter,
            _ => Direction::HigherIsWorse,
        }
    }

    /// Render a value with this vital's unit, e.g. `"98.6°F"`.
    pub fn format_value(self, value: f64) -> String {
        format!("{value}{}", self.unit())
    }
}

impl fmt::Display for VitalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VitalKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVital(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_forms_round_trip() {
        for key in VitalKey::ALL {
            assert_eq!(key.as_str().parse::<VitalKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            "respiratory_rate".parse::<VitalKey>(),
            Err(CoreError::UnknownVital(_))
        ));
    }

    #[test]
    fn serde_names_match_vocabulary() {
        for key in VitalKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn only_spo2_is_higher_is_better() {
        let better: Vec<_> = VitalKey::ALL
            .into_iter()
            .filter(|k| k.direction() == Direction::HigherIsBetter)
            .collect();
        assert_eq!(better, vec![VitalKey::OxygenSaturation]);
    }

    #[test]
    fn format_value_appends_unit() {
        assert_eq!(VitalKey::HeartRate.format_value(155.0), "155 BPM");
        assert_eq!(VitalKey::OxygenSaturation.format_value(92.5), "92.5%");
        assert_eq!(VitalKey::Temperature.format_value(101.2), "101.2°F");
    }
}
