//! TTL-bounded LRU cache for derived read views.
//!
//! Keys carry the tenant, the operation, and its parameters, so each
//! view variant is cached independently. Recording a new result for a
//! tenant invalidates every key of that tenant.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use tracing::debug;

use crate::benchmark::BenchmarkComparison;
use crate::insights::Insights;
use crate::period::Period;
use crate::report::ComplianceReport;
use crate::trends::TrendAnalysis;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CacheOp {
    Trends(Period),
    Insights,
    Report(Period),
    Benchmark(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub tenant_id: String,
    pub op: CacheOp,
}

impl CacheKey {
    pub(crate) fn new(tenant_id: &str, op: CacheOp) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            op,
        }
    }
}

#[derive(Clone)]
pub(crate) enum CachedValue {
    Trends(TrendAnalysis),
    Insights(Insights),
    Report(ComplianceReport),
    Benchmark(BenchmarkComparison),
}

struct CachedEntry {
    value: CachedValue,
    cached_at: DateTime<Utc>,
}

pub(crate) struct AnalyticsCache {
    entries: Mutex<LruCache<CacheKey, CachedEntry>>,
    ttl: Duration,
}

impl AnalyticsCache {
    /// Capacity is clamped to at least one entry.
    pub(crate) fn new(capacity: usize, ttl: Duration) -> Self {
        AnalyticsCache {
            entries: Mutex::new(LruCache::new(NonZeroUsize::new(capacity.max(1)).unwrap())),
            ttl,
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        self.get_at(key, Utc::now())
    }

    pub(crate) fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CachedValue> {
        let mut entries = self.entries.lock().expect("analytics cache lock poisoned");
        let expired = match entries.get(key) {
            Some(entry) if now.signed_duration_since(entry.cached_at) < self.ttl => {
                debug!(tenant_id = %key.tenant_id, "analytics cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
            debug!(tenant_id = %key.tenant_id, "analytics cache entry expired");
        }
        None
    }

    pub(crate) fn put(&self, key: CacheKey, value: CachedValue) {
        self.put_at(key, value, Utc::now());
    }

    pub(crate) fn put_at(&self, key: CacheKey, value: CachedValue, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().expect("analytics cache lock poisoned");
        entries.put(
            key,
            CachedEntry {
                value,
                cached_at: now,
            },
        );
    }

    /// Drops every cached view derived from the tenant's history.
    pub(crate) fn invalidate_tenant(&self, tenant_id: &str) {
        let mut entries = self.entries.lock().expect("analytics cache lock poisoned");
        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(key, _)| key.tenant_id == tenant_id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        if !stale.is_empty() {
            debug!(tenant_id = %tenant_id, dropped = stale.len(), "analytics cache invalidated");
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("analytics cache lock poisoned")
            .len()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
