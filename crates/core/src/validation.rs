//! Boundary validation for readings arriving from outside the engine.
//!
//! The engine itself never validates; callers run these checks after parsing
//! persisted or transmitted data and before scoring it.

use validator::Validate;

use crate::error::CoreError;
use crate::reading::{HistoryWindow, VitalReading};

/// Validate that every decimal field is finite and every field is inside its
/// plausibility range.
///
/// Returns a `CoreError::Validation` listing every offending field.
pub fn validate_reading(reading: &VitalReading) -> Result<(), CoreError> {
    let decimals = [
        ("glucose", reading.glucose),
        ("oxygen_saturation", reading.oxygen_saturation),
        ("temperature", reading.temperature),
        ("sleep_hours", reading.sleep_hours),
    ];
    let mut problems: Vec<String> = decimals
        .iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_finite() => Some(format!("{name} must be a finite number")),
            _ => None,
        })
        .collect();

    if let Err(errors) = reading.validate() {
        problems.extend(
            errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                }),
        );
    }

    if problems.is_empty() {
        return Ok(());
    }
    problems.sort();
    problems.dedup();
    Err(CoreError::Validation(problems.join("; ")))
}

/// Validate every reading in a history window.
///
/// The error names the position of the first bad reading.
pub fn validate_history(history: &HistoryWindow) -> Result<(), CoreError> {
    for (index, reading) in history.iter().enumerate() {
        validate_reading(reading).map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("history[{index}]: {msg}"))
            }
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_reading() {
        assert!(validate_reading(&VitalReading::default()).is_ok());
    }

    #[test]
    fn accepts_typical_reading() {
        let r = VitalReading {
            heart_rate: Some(72),
            blood_pressure_systolic: Some(120),
            blood_pressure_diastolic: Some(80),
            glucose: Some(105.0),
            oxygen_saturation: Some(98.0),
            temperature: Some(98.6),
            sleep_hours: Some(7.0),
            steps: Some(9000),
            timestamp: None,
        };
        assert!(validate_reading(&r).is_ok());
    }

    #[test]
    fn accepts_boundary_values() {
        let r = VitalReading {
            oxygen_saturation: Some(100.0),
            heart_rate: Some(0),
            ..Default::default()
        };
        assert!(validate_reading(&r).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let r = VitalReading {
            oxygen_saturation: Some(101.0),
            ..Default::default()
        };
        let err = validate_reading(&r).unwrap_err();
        assert!(err.to_string().contains("oxygen_saturation"));
    }

    #[test]
    fn rejects_negative_steps() {
        let r = VitalReading {
            steps: Some(-1),
            ..Default::default()
        };
        assert!(validate_reading(&r).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        let r = VitalReading {
            temperature: Some(f64::INFINITY),
            ..Default::default()
        };
        let err = validate_reading(&r).unwrap_err();
        assert!(err.to_string().contains("temperature must be a finite number"));
    }

    #[test]
    fn reports_every_bad_field() {
        let r = VitalReading {
            heart_rate: Some(400),
            glucose: Some(-5.0),
            ..Default::default()
        };
        let msg = validate_reading(&r).unwrap_err().to_string();
        assert!(msg.contains("heart_rate"));
        assert!(msg.contains("glucose"));
    }

    #[test]
    fn history_error_names_position() {
        let history = HistoryWindow::new(vec![
            VitalReading::default(),
            VitalReading {
                heart_rate: Some(-3),
                ..Default::default()
            },
        ]);
        let msg = validate_history(&history).unwrap_err().to_string();
        assert!(msg.contains("history[1]"));
    }
}
