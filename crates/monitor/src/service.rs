//! Monitoring service.
//!
//! Wraps a [`ComplianceEvaluator`] with tenant bookkeeping: bounded check
//! history, threshold alerting, lifecycle events, and an optional periodic
//! sweep over registered tenants.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use brandcheck_core::{BrandConfiguration, CheckResult, EvaluationContext, Severity};
use brandcheck_engine::{ComplianceEvaluator, EngineError};

use crate::alert::{Alert, AlertKind, AlertStore};
use crate::config::MonitorConfig;
use crate::event::{EventDispatcher, EventKind, EventListener, EventLog, MonitorEvent};

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("compliance evaluation failed: {0}")]
    Evaluation(#[from] EngineError),
}

/// Registered tenant plus the inputs used for its periodic checks.
#[derive(Clone)]
struct MonitorTarget {
    configuration: BrandConfiguration,
    context: EvaluationContext,
}

/// Point-in-time service counters.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStats {
    pub checks_performed: u64,
    pub checks_failed: u64,
    pub alerts_raised: u64,
    pub tenants_registered: usize,
    pub running: bool,
    pub last_check_at: Option<DateTime<Utc>>,
}

/// Per-tenant summary computed from recorded history and stored alerts.
#[derive(Debug, Clone, Serialize)]
pub struct TenantStats {
    pub tenant_id: String,
    pub checks_recorded: usize,
    pub latest_score: Option<u32>,
    pub average_score: f64,
    pub unacknowledged_alerts: usize,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Continuous compliance monitoring over a shared evaluator.
///
/// `perform_check` is safe to call concurrently with the periodic sweep;
/// all shared state sits behind its own lock.
pub struct MonitoringService {
    evaluator: Arc<ComplianceEvaluator>,
    config: MonitorConfig,
    targets: RwLock<IndexMap<String, MonitorTarget>>,
    history: RwLock<HashMap<String, VecDeque<CheckResult>>>,
    alerts: AlertStore,
    events: EventLog,
    dispatcher: EventDispatcher,
    checks_performed: AtomicU64,
    checks_failed: AtomicU64,
    alerts_raised: AtomicU64,
    last_check_at: RwLock<Option<DateTime<Utc>>>,
    running: AtomicBool,
    shutdown: Notify,
}

impl MonitoringService {
    pub fn new(evaluator: Arc<ComplianceEvaluator>, config: MonitorConfig) -> Self {
        Self {
            evaluator,
            alerts: AlertStore::new(config.max_alerts),
            events: EventLog::new(config.max_events),
            config,
            targets: RwLock::new(IndexMap::new()),
            history: RwLock::new(HashMap::new()),
            dispatcher: EventDispatcher::new(),
            checks_performed: AtomicU64::new(0),
            checks_failed: AtomicU64::new(0),
            alerts_raised: AtomicU64::new(0),
            last_check_at: RwLock::new(None),
            running: AtomicBool::new(false),
            shutdown: Notify::new(),
        }
    }

    // ── Checks ──────────────────────────────────────────────────────────

    /// Runs one compliance check for the tenant, records it in history,
    /// and raises whatever alerts the thresholds call for.
    ///
    /// An evaluator failure is recorded as a completed-with-error event
    /// and returned to the caller.
    pub fn perform_check(
        &self,
        tenant_id: &str,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
    ) -> Result<CheckResult, MonitorError> {
        self.emit(MonitorEvent::new(
            EventKind::CheckStarted,
            tenant_id,
            json!({ "strictness": context.strictness }),
        ));

        let result = match self.evaluator.evaluate(configuration, context) {
            Ok(result) => result,
            Err(error) => {
                self.checks_failed.fetch_add(1, Ordering::Relaxed);
                self.emit(MonitorEvent::new(
                    EventKind::CheckCompleted,
                    tenant_id,
                    json!({ "error": error.to_string() }),
                ));
                warn!(tenant_id = %tenant_id, error = %error, "compliance check failed");
                return Err(error.into());
            }
        };

        let previous_score = self.append_history(tenant_id, result.clone());
        self.raise_alerts(tenant_id, &result, previous_score);

        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        *self
            .last_check_at
            .write()
            .expect("monitor stats lock poisoned") = Some(result.checked_at);

        self.emit(MonitorEvent::new(
            EventKind::CheckCompleted,
            tenant_id,
            json!({
                "score": result.overall_score,
                "compliant": result.compliant,
                "duration_ms": result.duration_ms,
            }),
        ));
        debug!(
            tenant_id = %tenant_id,
            score = result.overall_score,
            compliant = result.compliant,
            "compliance check completed"
        );
        Ok(result)
    }

    /// Appends to the tenant's history and returns the score of the entry
    /// that was newest before the append. Entries older than the retention
    /// window are pruned here, as is anything beyond the per-tenant cap.
    fn append_history(&self, tenant_id: &str, result: CheckResult) -> Option<u32> {
        let mut history = self.history.write().expect("check history lock poisoned");
        let entries = history.entry(tenant_id.to_string()).or_default();
        let previous_score = entries.back().map(|entry| entry.overall_score);
        entries.push_back(result);

        let cutoff = Utc::now() - Duration::days(self.config.history_retention_days);
        entries.retain(|entry| entry.checked_at >= cutoff);
        while entries.len() > self.config.max_history_per_tenant {
            entries.pop_front();
        }
        previous_score
    }

    // ── Alerting ────────────────────────────────────────────────────────

    /// Every threshold is checked on its own, so one result can raise
    /// several alerts.
    fn raise_alerts(&self, tenant_id: &str, result: &CheckResult, previous_score: Option<u32>) {
        let thresholds = &self.config.thresholds;

        if result.critical_issues.len() >= thresholds.critical_issues {
            self.raise(
                Alert::new(
                    AlertKind::Critical,
                    tenant_id,
                    Severity::Critical,
                    "critical compliance issues",
                    format!(
                        "{} critical issue(s) detected",
                        result.critical_issues.len()
                    ),
                )
                .with_payload(json!({
                    "critical_issues": result.critical_issues.len(),
                    "score": result.overall_score,
                })),
            );
        }

        if result.high_issues.len() >= thresholds.high_priority_issues {
            self.raise(
                Alert::new(
                    AlertKind::Violation,
                    tenant_id,
                    Severity::High,
                    "high-priority issue buildup",
                    format!("{} high-priority issue(s) detected", result.high_issues.len()),
                )
                .with_payload(json!({ "high_issues": result.high_issues.len() })),
            );
        }

        if result.overall_score < thresholds.compliance_score {
            self.raise(
                Alert::new(
                    AlertKind::Violation,
                    tenant_id,
                    Severity::Medium,
                    "compliance score below minimum",
                    format!(
                        "score {} is below the configured minimum {}",
                        result.overall_score, thresholds.compliance_score
                    ),
                )
                .with_payload(json!({
                    "score": result.overall_score,
                    "minimum": thresholds.compliance_score,
                })),
            );
        }

        if let Some(previous) = previous_score {
            if result.overall_score > previous {
                self.raise(
                    Alert::new(
                        AlertKind::Improvement,
                        tenant_id,
                        Severity::Low,
                        "compliance score improved",
                        format!("score rose from {} to {}", previous, result.overall_score),
                    )
                    .with_payload(json!({
                        "from": previous,
                        "to": result.overall_score,
                    })),
                );
            }
        }
    }

    fn raise(&self, alert: Alert) {
        if matches!(alert.kind, AlertKind::Violation | AlertKind::Critical) {
            self.emit(MonitorEvent::new(
                EventKind::ViolationDetected,
                alert.tenant_id.clone(),
                json!({
                    "alert_id": alert.id,
                    "severity": alert.severity,
                    "title": alert.title,
                }),
            ));
        }
        self.alerts_raised.fetch_add(1, Ordering::Relaxed);
        self.alerts.push(alert);
    }

    fn emit(&self, event: MonitorEvent) {
        self.dispatcher.dispatch(&event);
        self.events.record(event);
    }

    // ── Tenant roster ───────────────────────────────────────────────────

    /// Adds the tenant to the periodic sweep, keyed by the configuration's
    /// tenant id. Registering the same tenant again replaces its inputs.
    pub fn register_tenant(&self, configuration: BrandConfiguration, context: EvaluationContext) {
        let tenant_id = configuration.tenant_id.clone();
        let mut targets = self.targets.write().expect("target roster lock poisoned");
        let replaced = targets
            .insert(
                tenant_id.clone(),
                MonitorTarget {
                    configuration,
                    context,
                },
            )
            .is_some();
        if replaced {
            debug!(tenant_id = %tenant_id, "monitoring target replaced");
        } else {
            info!(tenant_id = %tenant_id, "monitoring target registered");
        }
    }

    /// Removes the tenant from the periodic sweep. History, alerts, and
    /// events for the tenant stay queryable.
    pub fn deregister_tenant(&self, tenant_id: &str) -> bool {
        let mut targets = self.targets.write().expect("target roster lock poisoned");
        let removed = targets.shift_remove(tenant_id).is_some();
        if removed {
            info!(tenant_id = %tenant_id, "monitoring target removed");
        }
        removed
    }

    pub fn registered_tenants(&self) -> Vec<String> {
        self.targets
            .read()
            .expect("target roster lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    // ── Periodic sweep ──────────────────────────────────────────────────

    /// Starts the periodic sweep task. A second call while running is a
    /// no-op, so at most one sweep loop exists per service.
    pub fn start_monitoring(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("periodic monitoring already running");
            return;
        }
        let interval = self.config.check_interval();
        info!(interval_secs = interval.as_secs(), "periodic monitoring started");

        let service = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        if !service.running.load(Ordering::SeqCst) {
                            break;
                        }
                        service.run_sweep();
                    }
                    _ = service.shutdown.notified() => break,
                }
            }
            debug!("periodic monitoring loop exited");
        });
    }

    /// Signals the sweep loop to exit. An in-flight check finishes on its
    /// own. Stopping an already stopped service is a no-op.
    pub fn stop_monitoring(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            debug!("periodic monitoring already stopped");
            return;
        }
        self.shutdown.notify_waiters();
        info!("periodic monitoring stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// One pass over the registered tenants. A failing check is logged
    /// and never stops the sweep.
    fn run_sweep(&self) {
        let targets: Vec<(String, MonitorTarget)> = {
            let targets = self.targets.read().expect("target roster lock poisoned");
            targets
                .iter()
                .map(|(id, target)| (id.clone(), target.clone()))
                .collect()
        };
        if targets.is_empty() {
            debug!("periodic sweep skipped, no registered tenants");
            return;
        }

        debug!(tenants = targets.len(), "periodic sweep started");
        for (tenant_id, target) in targets {
            if let Err(error) =
                self.perform_check(&tenant_id, &target.configuration, &target.context)
            {
                error!(tenant_id = %tenant_id, error = %error, "periodic compliance check failed");
            }
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Check history for the tenant, newest first.
    pub fn get_history(&self, tenant_id: &str, limit: Option<usize>) -> Vec<CheckResult> {
        let history = self.history.read().expect("check history lock poisoned");
        match history.get(tenant_id) {
            Some(entries) => {
                let iter = entries.iter().rev().cloned();
                match limit {
                    Some(limit) => iter.take(limit).collect(),
                    None => iter.collect(),
                }
            }
            None => Vec::new(),
        }
    }

    pub fn get_alerts(&self, tenant_id: Option<&str>, acknowledged: Option<bool>) -> Vec<Alert> {
        self.alerts.list(tenant_id, acknowledged)
    }

    pub fn acknowledge_alert(&self, id: Uuid) -> bool {
        self.alerts.acknowledge(id)
    }

    /// Drops stored alerts, optionally only the given tenant's. Returns
    /// how many were removed.
    pub fn clear_alerts(&self, tenant_id: Option<&str>) -> usize {
        self.alerts.clear(tenant_id)
    }

    pub fn get_events(&self, tenant_id: Option<&str>, limit: Option<usize>) -> Vec<MonitorEvent> {
        self.events.list(tenant_id, limit)
    }

    pub fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) {
        self.dispatcher.subscribe(kind, listener);
    }

    pub fn evaluator(&self) -> &Arc<ComplianceEvaluator> {
        &self.evaluator
    }

    pub fn service_stats(&self) -> MonitorStats {
        MonitorStats {
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_failed: self.checks_failed.load(Ordering::Relaxed),
            alerts_raised: self.alerts_raised.load(Ordering::Relaxed),
            tenants_registered: self
                .targets
                .read()
                .expect("target roster lock poisoned")
                .len(),
            running: self.is_running(),
            last_check_at: *self
                .last_check_at
                .read()
                .expect("monitor stats lock poisoned"),
        }
    }

    /// Summary for one tenant, or `None` when the tenant is neither
    /// registered nor present in history.
    pub fn get_stats(&self, tenant_id: &str) -> Option<TenantStats> {
        let registered = self
            .targets
            .read()
            .expect("target roster lock poisoned")
            .contains_key(tenant_id);
        let history = self.history.read().expect("check history lock poisoned");
        let entries = history.get(tenant_id).filter(|entries| !entries.is_empty());
        if entries.is_none() && !registered {
            return None;
        }

        let unacknowledged_alerts = self.alerts.list(Some(tenant_id), Some(false)).len();
        let (checks_recorded, average_score, newest) = match entries {
            Some(entries) => {
                let sum: u64 = entries
                    .iter()
                    .map(|entry| u64::from(entry.overall_score))
                    .sum();
                let mean = (sum as f64 / entries.len() as f64 * 10.0).round() / 10.0;
                (entries.len(), mean, entries.back())
            }
            None => (0, 0.0, None),
        };

        Some(TenantStats {
            tenant_id: tenant_id.to_string(),
            checks_recorded,
            latest_score: newest.map(|entry| entry.overall_score),
            average_score,
            unacknowledged_alerts,
            last_checked_at: newest.map(|entry| entry.checked_at),
        })
    }
}
