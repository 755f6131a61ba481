//! Bounded in-memory alert store.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use brandcheck_core::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// A threshold was crossed by a completed check.
    Violation,
    /// The overall score rose above the previous check for the tenant.
    Improvement,
    /// Critical issues were found.
    Critical,
}

/// A single raised alert. Alerts stay in the store until evicted by the
/// size cap; acknowledging one only flips its flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub tenant_id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        tenant_id: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            tenant_id: tenant_id.into(),
            severity,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            acknowledged: false,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// FIFO-bounded alert store shared between the service and its callers.
pub struct AlertStore {
    alerts: RwLock<VecDeque<Alert>>,
    max_alerts: usize,
}

impl AlertStore {
    pub fn new(max_alerts: usize) -> Self {
        Self {
            alerts: RwLock::new(VecDeque::new()),
            max_alerts: max_alerts.max(1),
        }
    }

    /// Appends an alert, evicting the oldest entries beyond the cap.
    pub fn push(&self, alert: Alert) {
        let mut alerts = self.alerts.write().expect("alert store lock poisoned");
        debug!(
            alert_id = %alert.id,
            tenant_id = %alert.tenant_id,
            kind = ?alert.kind,
            "alert raised"
        );
        alerts.push_back(alert);
        while alerts.len() > self.max_alerts {
            alerts.pop_front();
        }
    }

    /// Returns alerts newest-first, optionally filtered by tenant and by
    /// acknowledgement state.
    pub fn list(&self, tenant_id: Option<&str>, acknowledged: Option<bool>) -> Vec<Alert> {
        let alerts = self.alerts.read().expect("alert store lock poisoned");
        alerts
            .iter()
            .rev()
            .filter(|alert| tenant_id.map_or(true, |tenant| alert.tenant_id == tenant))
            .filter(|alert| acknowledged.map_or(true, |flag| alert.acknowledged == flag))
            .cloned()
            .collect()
    }

    /// Removes alerts, optionally scoped to one tenant. Returns how many
    /// were dropped.
    pub fn clear(&self, tenant_id: Option<&str>) -> usize {
        let mut alerts = self.alerts.write().expect("alert store lock poisoned");
        let before = alerts.len();
        match tenant_id {
            Some(tenant) => alerts.retain(|alert| alert.tenant_id != tenant),
            None => alerts.clear(),
        }
        let removed = before - alerts.len();
        if removed > 0 {
            debug!(removed, tenant_id = tenant_id.unwrap_or("*"), "alerts cleared");
        }
        removed
    }

    /// Marks the alert with the given id as acknowledged. Returns false
    /// when no such alert is stored.
    pub fn acknowledge(&self, id: Uuid) -> bool {
        let mut alerts = self.alerts.write().expect("alert store lock poisoned");
        match alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.read().expect("alert store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(tenant: &str) -> Alert {
        Alert::new(
            AlertKind::Violation,
            tenant,
            Severity::High,
            "test",
            "test alert",
        )
    }

    #[test]
    fn eviction_drops_oldest_first() {
        let store = AlertStore::new(2);
        let first = alert("a");
        let first_id = first.id;
        store.push(first);
        store.push(alert("b"));
        store.push(alert("c"));

        assert_eq!(store.len(), 2);
        let listed = store.list(None, None);
        assert_eq!(listed[0].tenant_id, "c");
        assert_eq!(listed[1].tenant_id, "b");
        assert!(!store.acknowledge(first_id));
    }

    #[test]
    fn list_filters_by_tenant_and_acknowledgement() {
        let store = AlertStore::new(10);
        let target = alert("a");
        let target_id = target.id;
        store.push(target);
        store.push(alert("a"));
        store.push(alert("b"));

        assert!(store.acknowledge(target_id));
        assert_eq!(store.list(Some("a"), None).len(), 2);
        assert_eq!(store.list(Some("a"), Some(true)).len(), 1);
        assert_eq!(store.list(Some("a"), Some(false)).len(), 1);
        assert_eq!(store.list(Some("missing"), None).len(), 0);
    }

    #[test]
    fn clear_scopes_to_the_given_tenant() {
        let store = AlertStore::new(10);
        store.push(alert("a"));
        store.push(alert("a"));
        store.push(alert("b"));

        assert_eq!(store.clear(Some("a")), 2);
        assert_eq!(store.list(None, None).len(), 1);
        assert_eq!(store.clear(Some("a")), 0);
        assert_eq!(store.clear(None), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn acknowledge_is_sticky() {
        let store = AlertStore::new(10);
        let entry = alert("a");
        let id = entry.id;
        store.push(entry);

        assert!(store.acknowledge(id));
        assert!(store.acknowledge(id));
        assert!(store.list(None, Some(true))[0].acknowledged);
    }
}
