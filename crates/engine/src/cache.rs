//! TTL-bounded LRU cache of check results, keyed by input fingerprint.
//!
//! Expiry is decided at read time by comparing the entry's `checked_at`
//! against the configured TTL, so a stale entry is never returned even if
//! it is still resident. Expired entries are popped on touch; everything
//! else is evicted by LRU capacity pressure.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use brandcheck_core::CheckResult;
use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use tracing::debug;

pub struct ResultCache {
    entries: Mutex<LruCache<String, CheckResult>>,
    ttl: Duration,
}

impl ResultCache {
    /// Capacity is clamped to at least one entry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        ResultCache {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).unwrap(),
            )),
            ttl,
        }
    }

    /// Fresh cached result for this fingerprint, if any.
    pub fn get(&self, fingerprint: &str) -> Option<CheckResult> {
        self.get_at(fingerprint, Utc::now())
    }

    pub(crate) fn get_at(&self, fingerprint: &str, now: DateTime<Utc>) -> Option<CheckResult> {
        let mut entries = self.entries.lock().expect("result cache lock poisoned");
        let expired = match entries.get(fingerprint) {
            Some(result) if now.signed_duration_since(result.checked_at) < self.ttl => {
                debug!(fingerprint = %fingerprint, "result cache hit");
                return Some(result.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(fingerprint);
            debug!(fingerprint = %fingerprint, "result cache entry expired");
        }
        None
    }

    pub fn put(&self, fingerprint: String, result: CheckResult) {
        let mut entries = self.entries.lock().expect("result cache lock poisoned");
        entries.put(fingerprint, result);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("result cache lock poisoned");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("result cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use brandcheck_core::AccessibilityCompliance;
    use indexmap::IndexMap;

    fn result_at(checked_at: DateTime<Utc>) -> CheckResult {
        CheckResult {
            overall_score: 90,
            compliant: true,
            critical_issues: vec![],
            high_issues: vec![],
            medium_issues: vec![],
            low_issues: vec![],
            category_summary: IndexMap::new(),
            accessibility: AccessibilityCompliance::default(),
            industry_standards: IndexMap::new(),
            guidelines: IndexMap::new(),
            rules_executed: 1,
            rules_passed: 1,
            checked_at,
            duration_ms: 2,
        }
    }

    #[test]
    fn fresh_entries_are_returned() {
        let cache = ResultCache::new(8, Duration::minutes(10));
        let now = Utc::now();
        cache.put("fp".into(), result_at(now));
        let hit = cache.get_at("fp", now + Duration::minutes(9)).unwrap();
        assert_eq!(hit.checked_at, now);
    }

    #[test]
    fn expired_entries_are_absent_and_popped() {
        let cache = ResultCache::new(8, Duration::minutes(10));
        let now = Utc::now();
        cache.put("fp".into(), result_at(now));
        assert!(cache.get_at("fp", now + Duration::minutes(11)).is_none());
        // Touching an expired entry removes it from the store.
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = ResultCache::new(2, Duration::minutes(10));
        let now = Utc::now();
        cache.put("a".into(), result_at(now));
        cache.put("b".into(), result_at(now));
        cache.put("c".into(), result_at(now));
        assert!(cache.get_at("a", now).is_none());
        assert!(cache.get_at("b", now).is_some());
        assert!(cache.get_at("c", now).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ResultCache::new(4, Duration::minutes(10));
        cache.put("a".into(), result_at(Utc::now()));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cache = ResultCache::new(0, Duration::minutes(10));
        let now = Utc::now();
        cache.put("a".into(), result_at(now));
        assert!(cache.get_at("a", now).is_some());
    }
}
