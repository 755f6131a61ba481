//! compliance-worker — periodic brand compliance monitoring.
//!
//! Loads a tenant roster from YAML, registers every tenant with a
//! [`MonitoringService`] backed by the built-in rule catalog, and runs
//! until Ctrl-C:
//! - the service sweeps the roster on its check interval and raises
//!   alerts on threshold crossings
//! - a slower report pass feeds results into the analytics engine and
//!   logs each tenant's status and risk

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use brandcheck_analytics::AnalyticsEngine;
use brandcheck_engine::{ComplianceEvaluator, RuleRegistry};
use brandcheck_monitor::roster::{load_roster, TenantEntry};
use brandcheck_monitor::{EventKind, MonitorEvent, MonitoringService};

// ── CLI ─────────────────────────────────────────────────────────────

/// Brand compliance worker — periodic checks, alerting, and analytics.
#[derive(Parser, Debug)]
#[command(name = "compliance-worker", version, about)]
struct Cli {
    /// Path to the tenant roster YAML file.
    #[arg(long, env = "BRANDCHECK_CONFIG", default_value = "config/tenants.yaml")]
    config: String,

    /// Override for the sweep interval in seconds.
    #[arg(long, env = "BRANDCHECK_CHECK_INTERVAL_SECS")]
    interval_secs: Option<u64>,

    /// Seconds between analytics report passes.
    #[arg(long, env = "BRANDCHECK_REPORT_INTERVAL_SECS", default_value_t = 21_600)]
    report_interval_secs: u64,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut roster = load_roster(&cli.config)
        .with_context(|| format!("loading tenant roster from {}", cli.config))?;
    if let Some(interval) = cli.interval_secs {
        roster.monitor.check_interval_secs = interval;
    }

    let registry = Arc::new(RuleRegistry::with_default_rules());
    let evaluator = Arc::new(ComplianceEvaluator::new(registry));
    let analytics = Arc::new(AnalyticsEngine::new(roster.analytics.clone()));
    let service = Arc::new(MonitoringService::new(evaluator, roster.monitor.clone()));

    service.subscribe(
        EventKind::ViolationDetected,
        Arc::new(|event: &MonitorEvent| {
            warn!(tenant_id = %event.tenant_id, detail = %event.payload, "violation detected");
            Ok(())
        }),
    );

    for entry in &roster.tenants {
        service.register_tenant(entry.configuration.clone(), entry.context.clone());
    }
    info!(
        path = %cli.config,
        tenants = roster.tenants.len(),
        rules = service.evaluator().registry().len(),
        interval_secs = roster.monitor.check_interval_secs,
        "compliance worker starting"
    );

    // First pass up front so alerts surface without waiting a full interval.
    run_report_pass(&service, &analytics, &roster.tenants);

    service.start_monitoring();

    let report_interval = std::time::Duration::from_secs(cli.report_interval_secs.max(60));
    let mut ticker = tokio::time::interval(report_interval);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_report_pass(&service, &analytics, &roster.tenants);
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(error) = result {
                    warn!(error = %error, "ctrl-c handler failed");
                }
                break;
            }
        }
    }

    service.stop_monitoring();
    info!("compliance worker exited cleanly");
    Ok(())
}

/// Checks every tenant once, records the results for analytics, and logs
/// a one-line status summary per tenant.
fn run_report_pass(
    service: &Arc<MonitoringService>,
    analytics: &Arc<AnalyticsEngine>,
    tenants: &[TenantEntry],
) {
    for entry in tenants {
        let tenant_id = entry.configuration.tenant_id.as_str();
        match service.perform_check(tenant_id, &entry.configuration, &entry.context) {
            Ok(result) => {
                let score = result.overall_score;
                let compliant = result.compliant;
                analytics.record(tenant_id, result);
                let insights = analytics.get_insights(tenant_id);
                info!(
                    tenant_id = %tenant_id,
                    score,
                    compliant,
                    status = ?insights.status,
                    risk = ?insights.risk,
                    "compliance report refreshed"
                );
            }
            Err(error) => {
                error!(tenant_id = %tenant_id, error = %error, "compliance check failed");
            }
        }
    }
}
