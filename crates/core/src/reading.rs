//! Vital-sign snapshot and trailing history window.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Timestamp;
use crate::vitals::VitalKey;

/// A snapshot of independently optional measurements taken together.
///
/// An absent field means "no evidence" and is never treated as zero.
/// The `validate` ranges are plausibility bounds for data arriving from
/// outside; the engine itself does not enforce them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct VitalReading {
    #[validate(range(min = 0, max = 300, message = "heart_rate must be between 0 and 300"))]
    pub heart_rate: Option<i32>,

    #[validate(range(
        min = 0,
        max = 300,
        message = "blood_pressure_systolic must be between 0 and 300"
    ))]
    pub blood_pressure_systolic: Option<i32>,

    #[validate(range(
        min = 0,
        max = 250,
        message = "blood_pressure_diastolic must be between 0 and 250"
    ))]
    pub blood_pressure_diastolic: Option<i32>,

    #[validate(range(min = 0.0, max = 1000.0, message = "glucose must be between 0 and 1000"))]
    pub glucose: Option<f64>,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "oxygen_saturation must be between 0 and 100"
    ))]
    pub oxygen_saturation: Option<f64>,

    #[validate(range(min = 70.0, max = 115.0, message = "temperature must be between 70 and 115"))]
    pub temperature: Option<f64>,

    #[validate(range(min = 0.0, max = 24.0, message = "sleep_hours must be between 0 and 24"))]
    pub sleep_hours: Option<f64>,

    #[validate(range(min = 0, message = "steps must not be negative"))]
    pub steps: Option<i64>,

    /// Only used to order readings inside a [`HistoryWindow`].
    pub timestamp: Option<Timestamp>,
}

impl VitalReading {
    /// Value of a scored vital as `f64`, or `None` when not measured.
    pub fn value(&self, key: VitalKey) -> Option<f64> {
        match key {
            VitalKey::HeartRate => self.heart_rate.map(f64::from),
            VitalKey::BpSystolic => self.blood_pressure_systolic.map(f64::from),
            VitalKey::BpDiastolic => self.blood_pressure_diastolic.map(f64::from),
            VitalKey::Glucose => self.glucose,
            VitalKey::OxygenSaturation => self.oxygen_saturation,
            VitalKey::Temperature => self.temperature,
        }
    }

    /// Present scored vitals in canonical order.
    pub fn present(&self) -> impl Iterator<Item = (VitalKey, f64)> + '_ {
        VitalKey::ALL
            .into_iter()
            .filter_map(|key| self.value(key).map(|v| (key, v)))
    }

    /// `true` when no scored vital is present. Sleep and steps do not count.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Trailing readings in ascending timestamp order, used for trend detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryWindow {
    readings: Vec<VitalReading>,
}

impl HistoryWindow {
    /// Build a window, stably sorting readings ascending by timestamp.
    ///
    /// Readings without a timestamp sort first and keep their relative order.
    pub fn new(mut readings: Vec<VitalReading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { readings }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VitalReading> {
        self.readings.iter()
    }

    /// Present values of one vital, oldest first. Gaps are skipped.
    pub fn series(&self, key: VitalKey) -> Vec<f64> {
        self.readings.iter().filter_map(|r| r.value(key)).collect()
    }
}

impl From<Vec<VitalReading>> for HistoryWindow {
    fn from(readings: Vec<VitalReading>) -> Self {
        Self::new(readings)
    }
}
