//! Per-vital zone tables: value bands mapped to raw risk points.
//!
//! Each vital's bands partition the real line, so every finite value falls
//! into exactly one band.

use serde::{Deserialize, Serialize};

use crate::vitals::VitalKey;

/// Named severity band a single vital's value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Normal,
    Elevated,
    High,
    Crisis,
    Warning,
    Critical,
    Low,
    Fever,
}

impl Zone {
    pub fn is_normal(self) -> bool {
        self == Zone::Normal
    }
}

/// One end of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

/// A contiguous value range with its raw points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    /// `None` = unbounded below.
    pub lower: Option<Bound>,
    /// `None` = unbounded above.
    pub upper: Option<Bound>,
    pub points: u32,
    pub zone: Zone,
    /// Completes "`<label>` of `<value>` is ...".
    pub description: &'static str,
}

impl ZoneBand {
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = match self.lower {
            None => true,
            Some(Bound::Inclusive(b)) => value >= b,
            Some(Bound::Exclusive(b)) => value > b,
        };
        let below_upper = match self.upper {
            None => true,
            Some(Bound::Inclusive(b)) => value <= b,
            Some(Bound::Exclusive(b)) => value < b,
        };
        above_lower && below_upper
    }
}

#[derive(Debug)]
pub struct VitalZones {
    pub vital: VitalKey,
    pub bands: &'static [ZoneBand],
}

/// Classification of one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneAssessment {
    pub points: u32,
    pub zone: Zone,
    pub explanation: String,
}

const fn band(
    lower: Option<Bound>,
    upper: Option<Bound>,
    points: u32,
    zone: Zone,
    description: &'static str,
) -> ZoneBand {
    ZoneBand {
        lower,
        upper,
        points,
        zone,
        description,
    }
}

use Bound::{Exclusive as Ex, Inclusive as In};

// ---------------------------------------------------------------------------
// Zone tables
// ---------------------------------------------------------------------------

/// Zone tables for every scored vital, bands in ascending value order.
pub const ZONE_TABLES: &[VitalZones] = &[
    VitalZones {
        vital: VitalKey::HeartRate,
        bands: &[
            band(None, Some(Ex(50.0)), 22, Zone::Critical, "critically low (below 50 BPM)"),
            band(Some(In(50.0)), Some(Ex(60.0)), 10, Zone::Warning, "mildly low (50-59 BPM)"),
            band(Some(In(60.0)), Some(In(100.0)), 0, Zone::Normal, "within the normal range (60-100 BPM)"),
            band(Some(Ex(100.0)), Some(In(120.0)), 10, Zone::Warning, "mildly elevated (101-120 BPM)"),
            band(Some(Ex(120.0)), None, 22, Zone::Critical, "critically high (above 120 BPM)"),
        ],
    },
    VitalZones {
        vital: VitalKey::BpSystolic,
        bands: &[
            band(None, Some(Ex(120.0)), 0, Zone::Normal, "normal (below 120 mmHg)"),
            band(Some(In(120.0)), Some(Ex(130.0)), 8, Zone::Elevated, "elevated (120-129 mmHg)"),
            band(Some(In(130.0)), Some(Ex(140.0)), 14, Zone::High, "in the stage 1 hypertension range (130-139 mmHg)"),
            band(Some(In(140.0)), Some(Ex(180.0)), 18, Zone::High, "in the stage 2 hypertension range (140-179 mmHg)"),
            band(Some(In(180.0)), None, 25, Zone::Crisis, "in the hypertensive crisis range (180 mmHg or above)"),
        ],
    },
    VitalZones {
        vital: VitalKey::BpDiastolic,
        bands: &[
            band(None, Some(Ex(80.0)), 0, Zone::Normal, "normal (below 80 mmHg)"),
            band(Some(In(80.0)), Some(Ex(90.0)), 10, Zone::High, "in the stage 1 hypertension range (80-89 mmHg)"),
            band(Some(In(90.0)), Some(Ex(120.0)), 16, Zone::High, "in the stage 2 hypertension range (90-119 mmHg)"),
            band(Some(In(120.0)), None, 25, Zone::Crisis, "in the hypertensive crisis range (120 mmHg or above)"),
        ],
    },
    VitalZones {
        vital: VitalKey::Glucose,
        bands: &[
            band(None, Some(Ex(55.0)), 25, Zone::Critical, "critically low (below 55 mg/dL)"),
            band(Some(In(55.0)), Some(Ex(70.0)), 12, Zone::Warning, "below target (55-69 mg/dL)"),
            band(Some(In(70.0)), Some(In(140.0)), 0, Zone::Normal, "within the target range (70-140 mg/dL)"),
            band(Some(Ex(140.0)), Some(In(200.0)), 10, Zone::High, "above target (141-200 mg/dL)"),
            band(Some(Ex(200.0)), None, 22, Zone::Critical, "critically high (above 200 mg/dL)"),
        ],
    },
    VitalZones {
        vital: VitalKey::OxygenSaturation,
        bands: &[
            band(None, Some(Ex(90.0)), 25, Zone::Critical, "critically low (below 90%)"),
            band(Some(In(90.0)), Some(Ex(95.0)), 12, Zone::Low, "below normal (90-94%)"),
            band(Some(In(95.0)), None, 0, Zone::Normal, "normal (95% or above)"),
        ],
    },
    VitalZones {
        vital: VitalKey::Temperature,
        bands: &[
            band(None, Some(Ex(97.0)), 6, Zone::Warning, "below normal (under 97.0°F)"),
            band(Some(In(97.0)), Some(In(99.5)), 0, Zone::Normal, "normal (97.0-99.5°F)"),
            band(Some(Ex(99.5)), Some(In(103.0)), 10, Zone::Fever, "a fever (99.6-103°F)"),
            band(Some(Ex(103.0)), None, 22, Zone::Critical, "a dangerously high fever (above 103°F)"),
        ],
    },
];

pub fn bands_for(vital: VitalKey) -> &'static [ZoneBand] {
    ZONE_TABLES
        .iter()
        .find(|t| t.vital == vital)
        .map(|t| t.bands)
        .unwrap_or(&[])
}

/// Classify a value into its zone.
///
/// Returns `None` only for values no band contains (NaN), which callers
/// treat the same as an absent measurement.
pub fn classify(vital: VitalKey, value: f64) -> Option<ZoneAssessment> {
    let band = bands_for(vital).iter().find(|b| b.contains(value))?;
    Some(ZoneAssessment {
        points: band.points,
        zone: band.zone,
        explanation: format!(
            "{} of {} is {}",
            vital.label(),
            vital.format_value(value),
            band.description
        ),
    })
}
