//! Repeat-alert suppression across evaluations.

use std::collections::HashMap;

use chrono::Duration;
use vitalwatch_core::alert::AlertSeverity;
use vitalwatch_core::types::{DbId, Timestamp};
use vitalwatch_core::vitals::VitalKey;

/// Composite key for alert cooldown tracking: (patient_id, vital).
type CooldownKey = (DbId, VitalKey);

/// Tracks when the last alert was emitted per patient + vital to suppress
/// repeated alerts within the cooldown window.
///
/// An alert more severe than the last one emitted for the same key always
/// passes, so an escalation is never hidden by an earlier warning.
#[derive(Debug)]
pub struct AlertCooldownTracker {
    window: Duration,
    last_alert: HashMap<CooldownKey, (Timestamp, AlertSeverity)>,
}

impl AlertCooldownTracker {
    /// Create a new, empty cooldown tracker.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_alert: HashMap::new(),
        }
    }

    /// Check if an alert is allowed (not within cooldown) and record it if so.
    ///
    /// Returns `true` if the alert should be emitted.
    pub fn should_alert(
        &mut self,
        patient_id: DbId,
        vital: VitalKey,
        severity: AlertSeverity,
        now: Timestamp,
    ) -> bool {
        let key = (patient_id, vital);
        if let Some((last_at, last_severity)) = self.last_alert.get(&key) {
            let elapsed = now.signed_duration_since(*last_at);
            if elapsed < self.window && severity <= *last_severity {
                return false;
            }
        }
        self.last_alert.insert(key, (now, severity));
        true
    }

    /// Forget every entry older than the window.
    pub fn prune(&mut self, now: Timestamp) {
        let window = self.window;
        self.last_alert
            .retain(|_, (at, _)| now.signed_duration_since(*at) < window);
    }

    pub fn len(&self) -> usize {
        self.last_alert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_alert.is_empty()
    }
}
