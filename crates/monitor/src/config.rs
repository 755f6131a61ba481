//! Monitoring service configuration.

use serde::{Deserialize, Serialize};

/// Thresholds that decide when a completed check raises an alert.
///
/// Every threshold is evaluated independently, so a single check can
/// raise several alerts at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Critical-issue count at or above which a critical alert is raised.
    #[serde(default = "default_critical_issues")]
    pub critical_issues: usize,
    /// High-issue count at or above which a violation alert is raised.
    #[serde(default = "default_high_priority_issues")]
    pub high_priority_issues: usize,
    /// Overall score below which a violation alert is raised.
    #[serde(default = "default_compliance_score")]
    pub compliance_score: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_issues: default_critical_issues(),
            high_priority_issues: default_high_priority_issues(),
            compliance_score: default_compliance_score(),
        }
    }
}

fn default_critical_issues() -> usize {
    1
}

fn default_high_priority_issues() -> usize {
    3
}

fn default_compliance_score() -> u32 {
    80
}

/// Tunables for [`MonitoringService`](crate::MonitoringService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between periodic sweeps over the registered tenants.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// History entries older than this many days are pruned on append.
    #[serde(default = "default_history_retention_days")]
    pub history_retention_days: i64,
    /// Hard cap on stored history entries per tenant.
    #[serde(default = "default_max_history_per_tenant")]
    pub max_history_per_tenant: usize,
    /// Hard cap on stored alerts across all tenants.
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
    /// Hard cap on stored lifecycle events across all tenants.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    #[serde(default)]
    pub thresholds: AlertThresholds,
}

impl MonitorConfig {
    pub fn check_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.check_interval_secs.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            history_retention_days: default_history_retention_days(),
            max_history_per_tenant: default_max_history_per_tenant(),
            max_alerts: default_max_alerts(),
            max_events: default_max_events(),
            thresholds: AlertThresholds::default(),
        }
    }
}

fn default_check_interval_secs() -> u64 {
    3600
}

fn default_history_retention_days() -> i64 {
    30
}

fn default_max_history_per_tenant() -> usize {
    500
}

fn default_max_alerts() -> usize {
    1000
}

fn default_max_events() -> usize {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = MonitorConfig::default();
        assert_eq!(config.check_interval_secs, 3600);
        assert_eq!(config.thresholds.critical_issues, 1);
        assert_eq!(config.thresholds.high_priority_issues, 3);
        assert_eq!(config.thresholds.compliance_score, 80);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: MonitorConfig =
            serde_yaml::from_str("check_interval_secs: 60\nthresholds:\n  compliance_score: 90\n")
                .unwrap();
        assert_eq!(config.check_interval_secs, 60);
        assert_eq!(config.thresholds.compliance_score, 90);
        assert_eq!(config.thresholds.critical_issues, 1);
        assert_eq!(config.max_history_per_tenant, 500);
    }

    #[test]
    fn interval_is_clamped_to_at_least_one_second() {
        let config = MonitorConfig {
            check_interval_secs: 0,
            ..MonitorConfig::default()
        };
        assert_eq!(config.check_interval(), std::time::Duration::from_secs(1));
    }
}
