//! Shared test fixtures.

use brandcheck_core::{AccessibilityCompliance, CheckResult, RuleCategory, RuleResult, Severity};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub(crate) fn result_at(score: u32, checked_at: DateTime<Utc>) -> CheckResult {
    CheckResult {
        overall_score: score,
        compliant: true,
        critical_issues: vec![],
        high_issues: vec![],
        medium_issues: vec![],
        low_issues: vec![],
        category_summary: IndexMap::new(),
        accessibility: AccessibilityCompliance::default(),
        industry_standards: IndexMap::new(),
        guidelines: IndexMap::new(),
        rules_executed: 10,
        rules_passed: 9,
        checked_at,
        duration_ms: 3,
    }
}

pub(crate) fn issue(rule_id: &str, severity: Severity) -> RuleResult {
    RuleResult {
        rule_id: rule_id.to_string(),
        rule_name: format!("rule {rule_id}"),
        category: RuleCategory::BrandGuidelines,
        severity,
        weight: 5,
        passed: false,
        score: 0.0,
        message: "failed".to_string(),
        recommendation: None,
    }
}

pub(crate) fn result_with_issues(
    score: u32,
    critical: usize,
    high: usize,
    checked_at: DateTime<Utc>,
) -> CheckResult {
    let mut result = result_at(score, checked_at);
    result.compliant = critical == 0;
    result.critical_issues = (0..critical)
        .map(|i| issue(&format!("crit-{i}"), Severity::Critical))
        .collect();
    result.high_issues = (0..high)
        .map(|i| issue(&format!("high-{i}"), Severity::High))
        .collect();
    result
}
