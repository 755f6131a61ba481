//! Continuous brand compliance monitoring.
//!
//! - [`MonitoringService`] runs on-demand and periodic compliance checks
//!   against registered tenants, keeps bounded per-tenant check history,
//!   and raises [`Alert`]s when configured thresholds are crossed.
//! - Lifecycle [`MonitorEvent`]s (check started, check completed, violation
//!   detected) are recorded in a bounded log and fanned out to registered
//!   listeners. A failing listener never blocks the others.
//! - The `compliance-worker` binary wires a service to a tenant roster
//!   loaded from YAML and runs it until shutdown.

pub mod alert;
pub mod config;
pub mod event;
pub mod roster;
pub mod service;

pub use alert::{Alert, AlertKind, AlertStore};
pub use config::{AlertThresholds, MonitorConfig};
pub use event::{EventDispatcher, EventKind, EventListener, EventLog, MonitorEvent};
pub use roster::{load_roster, RosterError, TenantEntry, TenantRoster};
pub use service::{MonitorError, MonitorStats, MonitoringService, TenantStats};
