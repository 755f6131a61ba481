//! Tenant roster file: the YAML document the worker binary runs from.
//!
//! A roster bundles the service and analytics tuning with the list of
//! tenants to monitor. Missing tuning sections fall back to defaults, so
//! a minimal roster is just a `tenants:` list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use brandcheck_analytics::AnalyticsConfig;
use brandcheck_core::{BrandConfiguration, EvaluationContext};

use crate::config::MonitorConfig;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid roster: {0}")]
    Validation(String),
}

/// Parsed roster document.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantRoster {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    pub tenants: Vec<TenantEntry>,
}

/// One tenant to monitor: its configuration plus the evaluation context
/// its checks run under.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantEntry {
    #[serde(default)]
    pub context: EvaluationContext,
    pub configuration: BrandConfiguration,
}

/// Loads and validates a roster file. The roster must list at least one
/// tenant, and tenant ids must be unique.
pub fn load_roster(path: impl AsRef<Path>) -> Result<TenantRoster, RosterError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let roster: TenantRoster = serde_yaml::from_str(&raw)?;

    if roster.tenants.is_empty() {
        return Err(RosterError::Validation(format!(
            "{} lists no tenants",
            path.display()
        )));
    }
    let mut seen = HashSet::new();
    for entry in &roster.tenants {
        let tenant_id = entry.configuration.tenant_id.as_str();
        if tenant_id.trim().is_empty() {
            return Err(RosterError::Validation("tenant id is empty".to_string()));
        }
        if !seen.insert(tenant_id) {
            return Err(RosterError::Validation(format!(
                "duplicate tenant id: {tenant_id}"
            )));
        }
    }

    info!(
        path = %path.display(),
        tenants = roster.tenants.len(),
        "tenant roster loaded"
    );
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID_ROSTER_YAML: &str = r##"
monitor:
  check_interval_secs: 600
  thresholds:
    compliance_score: 85
tenants:
  - configuration:
      tenant_id: acme
      brand:
        name: Acme
      palette:
        primary: "#1a73e8"
        secondary: "#174ea6"
        accent: "#fbbc04"
        background: "#ffffff"
        text: "#202124"
      typography:
        heading_font: Inter
        body_font: Georgia
        base_size_px: 16.0
        scale_ratio: 1.25
      logo:
        url: https://cdn.acme.test/logo.svg
        alt_text: Acme wordmark
  - context:
      strictness: strict
      industry: finance
    configuration:
      tenant_id: globex
      brand:
        name: Globex
      palette:
        primary: "#202124"
        secondary: "#5f6368"
        accent: "#d93025"
        background: "#ffffff"
        text: "#111111"
      typography:
        heading_font: Roboto
        body_font: Roboto
        base_size_px: 16.0
        scale_ratio: 1.2
      logo:
        url: https://cdn.globex.test/logo.svg
        alt_text: Globex mark
"##;

    fn write_roster(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("tenants.yaml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_tenants_and_overrides() {
        let dir = TempDir::new().expect("create tempdir");
        let roster = load_roster(write_roster(&dir, VALID_ROSTER_YAML)).unwrap();

        assert_eq!(roster.tenants.len(), 2);
        assert_eq!(roster.monitor.check_interval_secs, 600);
        assert_eq!(roster.monitor.thresholds.compliance_score, 85);
        // Unlisted threshold keeps its default.
        assert_eq!(roster.monitor.thresholds.critical_issues, 1);
        assert_eq!(roster.analytics.retention_days, 90);

        let globex = &roster.tenants[1];
        assert_eq!(globex.configuration.tenant_id, "globex");
        assert_eq!(globex.context.industry.as_deref(), Some("finance"));
    }

    #[test]
    fn empty_tenant_list_is_rejected() {
        let dir = TempDir::new().expect("create tempdir");
        let path = write_roster(&dir, "tenants: []\n");
        let err = load_roster(path).unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
        assert!(err.to_string().contains("lists no tenants"));
    }

    #[test]
    fn duplicate_tenant_ids_are_rejected() {
        let doubled = format!(
            "{}{}",
            VALID_ROSTER_YAML,
            r##"  - configuration:
      tenant_id: acme
      brand:
        name: Acme Again
      palette:
        primary: "#1a73e8"
        secondary: "#174ea6"
        accent: "#fbbc04"
        background: "#ffffff"
        text: "#202124"
      typography:
        heading_font: Inter
        body_font: Georgia
        base_size_px: 16.0
        scale_ratio: 1.25
      logo:
        url: https://cdn.acme.test/logo.svg
"##
        );
        let dir = TempDir::new().expect("create tempdir");
        let err = load_roster(write_roster(&dir, &doubled)).unwrap_err();
        assert!(err.to_string().contains("duplicate tenant id: acme"));
    }

    #[test]
    fn malformed_yaml_surfaces_as_parse_error() {
        let dir = TempDir::new().expect("create tempdir");
        let path = write_roster(&dir, "tenants: [not-a-tenant");
        assert!(matches!(load_roster(path), Err(RosterError::Parse(_))));
    }

    #[test]
    fn missing_file_surfaces_as_io_error() {
        let dir = TempDir::new().expect("create tempdir");
        let missing = dir.path().join("absent.yaml");
        assert!(matches!(load_roster(missing), Err(RosterError::Io(_))));
    }
}
