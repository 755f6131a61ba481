//! Lifecycle events and listener fan-out.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    CheckStarted,
    CheckCompleted,
    ViolationDetected,
}

/// A recorded lifecycle event. `payload` carries kind-specific detail,
/// for a completed check either the score summary or the error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub tenant_id: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl MonitorEvent {
    pub fn new(kind: EventKind, tenant_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            tenant_id: tenant_id.into(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

/// Callback invoked for every event of the kind it was registered for.
///
/// Returning an error marks the listener invocation as failed. The
/// dispatcher logs the failure and carries on with the remaining
/// listeners.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &MonitorEvent) -> Result<(), String>;
}

impl<F> EventListener for F
where
    F: Fn(&MonitorEvent) -> Result<(), String> + Send + Sync,
{
    fn on_event(&self, event: &MonitorEvent) -> Result<(), String> {
        self(event)
    }
}

/// Fans events out to the listeners registered for their kind.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RwLock<HashMap<EventKind, Vec<Arc<dyn EventListener>>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for one event kind.
    pub fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) {
        let mut listeners = self
            .listeners
            .write()
            .expect("event listener lock poisoned");
        listeners.entry(kind).or_default().push(listener);
    }

    /// Invokes every listener registered for the event's kind. Listener
    /// failures are logged and do not stop the fan-out.
    pub fn dispatch(&self, event: &MonitorEvent) {
        let targets: Vec<Arc<dyn EventListener>> = {
            let listeners = self.listeners.read().expect("event listener lock poisoned");
            listeners.get(&event.kind).cloned().unwrap_or_default()
        };

        for (index, listener) in targets.iter().enumerate() {
            if let Err(error) = listener.on_event(event) {
                warn!(
                    kind = ?event.kind,
                    tenant_id = %event.tenant_id,
                    listener = index,
                    error = %error,
                    "event listener failed"
                );
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .expect("event listener lock poisoned")
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

/// FIFO-bounded log of recent lifecycle events.
pub struct EventLog {
    events: RwLock<VecDeque<MonitorEvent>>,
    max_events: usize,
}

impl EventLog {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            max_events: max_events.max(1),
        }
    }

    pub fn record(&self, event: MonitorEvent) {
        let mut events = self.events.write().expect("event log lock poisoned");
        debug!(kind = ?event.kind, tenant_id = %event.tenant_id, "event recorded");
        events.push_back(event);
        while events.len() > self.max_events {
            events.pop_front();
        }
    }

    /// Returns events newest-first, optionally filtered by tenant and
    /// truncated to `limit`.
    pub fn list(&self, tenant_id: Option<&str>, limit: Option<usize>) -> Vec<MonitorEvent> {
        let events = self.events.read().expect("event log lock poisoned");
        let iter = events
            .iter()
            .rev()
            .filter(|event| tenant_id.map_or(true, |tenant| event.tenant_id == tenant))
            .cloned();
        match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.read().expect("event log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
