//! Condition-based weighting of per-vital risk points.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vitals::VitalKey;

/// Multiplier applied to one vital's zone points for a named condition.
#[derive(Debug)]
pub struct ConditionWeight {
    pub condition: &'static str,
    pub multipliers: &'static [(VitalKey, f64)],
}

/// Known conditions and the vitals they amplify.
pub const CONDITION_WEIGHTS: &[ConditionWeight] = &[
    ConditionWeight {
        condition: "Type 2 Diabetes",
        multipliers: &[(VitalKey::Glucose, 1.5)],
    },
    ConditionWeight {
        condition: "Hypertension",
        multipliers: &[(VitalKey::BpSystolic, 1.5), (VitalKey::BpDiastolic, 1.5)],
    },
    ConditionWeight {
        condition: "Heart Disease",
        multipliers: &[(VitalKey::HeartRate, 1.5), (VitalKey::OxygenSaturation, 1.2)],
    },
    ConditionWeight {
        condition: "COPD",
        multipliers: &[(VitalKey::OxygenSaturation, 1.5), (VitalKey::Temperature, 1.2)],
    },
];

/// A patient's condition names, normalized (trimmed, lowercase) and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ConditionSet {
    names: BTreeSet<String>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ConditionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { names }
    }
}

impl From<Vec<String>> for ConditionSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<ConditionSet> for Vec<String> {
    fn from(set: ConditionSet) -> Self {
        set.names.into_iter().collect()
    }
}

/// Largest multiplier any of the patient's conditions applies to `vital`.
///
/// Overlapping conditions do not stack. Unknown names have no effect; with
/// no matching condition the weight is `1.0`.
pub fn weight_for(conditions: &ConditionSet, vital: VitalKey) -> f64 {
    CONDITION_WEIGHTS
        .iter()
        .filter(|w| conditions.contains(w.condition))
        .flat_map(|w| w.multipliers.iter())
        .filter(|(key, _)| *key == vital)
        .map(|(_, m)| *m)
        .reduce(f64::max)
        .unwrap_or(1.0)
}
