//! Per-tenant check history.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use brandcheck_core::CheckResult;
use chrono::{Duration, Utc};
use tracing::debug;

/// Bounded per-tenant history. Entries are kept oldest first; both the
/// retention window and the per-tenant cap are enforced on record.
pub struct HistoryStore {
    entries: RwLock<HashMap<String, VecDeque<CheckResult>>>,
    retention_days: i64,
    max_per_tenant: usize,
}

impl HistoryStore {
    pub fn new(retention_days: i64, max_per_tenant: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            retention_days,
            max_per_tenant: max_per_tenant.max(1),
        }
    }

    pub fn record(&self, tenant_id: &str, result: CheckResult) {
        let mut entries = self
            .entries
            .write()
            .expect("analytics history lock poisoned");
        let history = entries.entry(tenant_id.to_string()).or_default();
        history.push_back(result);

        let cutoff = Utc::now() - Duration::days(self.retention_days);
        history.retain(|entry| entry.checked_at >= cutoff);
        while history.len() > self.max_per_tenant {
            history.pop_front();
        }
        debug!(tenant_id = %tenant_id, entries = history.len(), "check recorded");
    }

    /// Full history for the tenant, oldest first.
    pub fn snapshot(&self, tenant_id: &str) -> Vec<CheckResult> {
        let entries = self.entries.read().expect("analytics history lock poisoned");
        entries
            .get(tenant_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Last `count` entries for the tenant, oldest first.
    pub fn recent(&self, tenant_id: &str, count: usize) -> Vec<CheckResult> {
        let entries = self.entries.read().expect("analytics history lock poisoned");
        match entries.get(tenant_id) {
            Some(history) => {
                let skip = history.len().saturating_sub(count);
                history.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    pub fn latest(&self, tenant_id: &str) -> Option<CheckResult> {
        let entries = self.entries.read().expect("analytics history lock poisoned");
        entries
            .get(tenant_id)
            .and_then(|history| history.back().cloned())
    }

    pub fn len(&self, tenant_id: &str) -> usize {
        let entries = self.entries.read().expect("analytics history lock poisoned");
        entries.get(tenant_id).map_or(0, VecDeque::len)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
