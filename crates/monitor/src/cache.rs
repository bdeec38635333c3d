//! Per-patient risk score cache.

use std::collections::HashMap;

use chrono::Duration;
use vitalwatch_core::risk::RiskScoreResult;
use vitalwatch_core::types::{DbId, Timestamp};

#[derive(Debug, Clone)]
struct CachedScore {
    computed_at: Timestamp,
    result: RiskScoreResult,
}

/// Remembers the last computed score per patient for a fixed lifetime.
#[derive(Debug)]
pub struct RiskScoreCache {
    ttl: Duration,
    entries: HashMap<DbId, CachedScore>,
}

impl RiskScoreCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Cached score and its computation time, if younger than the TTL.
    pub fn get(&self, patient_id: DbId, now: Timestamp) -> Option<(RiskScoreResult, Timestamp)> {
        let entry = self.entries.get(&patient_id)?;
        if now.signed_duration_since(entry.computed_at) < self.ttl {
            Some((entry.result.clone(), entry.computed_at))
        } else {
            None
        }
    }

    pub fn insert(&mut self, patient_id: DbId, result: RiskScoreResult, now: Timestamp) {
        self.entries.insert(
            patient_id,
            CachedScore {
                computed_at: now,
                result,
            },
        );
    }

    /// Forget every entry at or past the TTL.
    pub fn prune(&mut self, now: Timestamp) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.computed_at) < ttl);
    }

    pub fn invalidate(&mut self, patient_id: DbId) {
        self.entries.remove(&patient_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn hit_within_ttl() {
        let mut cache = RiskScoreCache::new(Duration::minutes(10));
        let now = Utc::now();
        cache.insert(7, RiskScoreResult::empty(), now);
        let (result, at) = cache.get(7, now + Duration::minutes(9)).unwrap();
        assert_eq!(result, RiskScoreResult::empty());
        assert_eq!(at, now);
    }

    #[test]
    fn miss_after_ttl() {
        let mut cache = RiskScoreCache::new(Duration::minutes(10));
        let now = Utc::now();
        cache.insert(7, RiskScoreResult::empty(), now);
        assert!(cache.get(7, now + Duration::minutes(10)).is_none());
    }

    #[test]
    fn zero_ttl_never_hits() {
        let mut cache = RiskScoreCache::new(Duration::zero());
        let now = Utc::now();
        cache.insert(7, RiskScoreResult::empty(), now);
        assert!(cache.get(7, now).is_none());
    }

    #[test]
    fn prune_drops_expired_entries() {
        let mut cache = RiskScoreCache::new(Duration::minutes(10));
        let now = Utc::now();
        cache.insert(1, RiskScoreResult::empty(), now);
        cache.insert(2, RiskScoreResult::empty(), now + Duration::minutes(5));
        cache.prune(now + Duration::minutes(12));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(2, now + Duration::minutes(12)).is_some());
    }

    #[test]
    fn invalidate_removes_entry() {
        let mut cache = RiskScoreCache::new(Duration::minutes(10));
        let now = Utc::now();
        cache.insert(7, RiskScoreResult::empty(), now);
        cache.invalidate(7);
        assert!(cache.get(7, now).is_none());
        assert!(cache.is_empty());
    }
}
