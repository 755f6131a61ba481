//! Rule and check result types.
//!
//! A [`RuleResult`] is the outcome of one rule against one configuration.
//! A [`CheckResult`] aggregates every executed rule into the per-check
//! report consumed by monitoring and analytics.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::severity::{AccessibilityLevel, RuleCategory, Severity};

// ── Rule result ──────────────────────────────────────────────────────────────

/// Outcome of a single rule evaluation. Scores are always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub rule_name: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub weight: u32,
    pub passed: bool,
    pub score: f64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl RuleResult {
    /// Clamp a raw rule score into `0..=100`. Non-finite input collapses to 0.
    pub fn clamp_score(raw: f64) -> f64 {
        if raw.is_finite() {
            raw.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

// ── Check result ─────────────────────────────────────────────────────────────

/// Average score and pass counts for one rule category within a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub score: f64,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Per-WCAG-level compliance. `None` means no executed rule carried that
/// level tag, so nothing can be claimed either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityCompliance {
    pub level_a: Option<bool>,
    pub level_aa: Option<bool>,
    pub level_aaa: Option<bool>,
}

impl AccessibilityCompliance {
    pub fn level(&self, level: AccessibilityLevel) -> Option<bool> {
        match level {
            AccessibilityLevel::A => self.level_a,
            AccessibilityLevel::Aa => self.level_aa,
            AccessibilityLevel::Aaa => self.level_aaa,
        }
    }

    pub fn set_level(&mut self, level: AccessibilityLevel, met: bool) {
        match level {
            AccessibilityLevel::A => self.level_a = Some(met),
            AccessibilityLevel::Aa => self.level_aa = Some(met),
            AccessibilityLevel::Aaa => self.level_aaa = Some(met),
        }
    }

    /// True only when the level was assessed and every tagged rule passed.
    pub fn is_met(&self, level: AccessibilityLevel) -> bool {
        self.level(level) == Some(true)
    }

    /// True when the level was assessed and at least one tagged rule failed.
    pub fn failed(&self, level: AccessibilityLevel) -> bool {
        self.level(level) == Some(false)
    }
}

/// Aggregated outcome of evaluating every enabled rule once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Weighted average of all executed rule scores, rounded, in `0..=100`.
    pub overall_score: u32,
    /// No failed critical-severity rule.
    pub compliant: bool,
    pub critical_issues: Vec<RuleResult>,
    pub high_issues: Vec<RuleResult>,
    pub medium_issues: Vec<RuleResult>,
    pub low_issues: Vec<RuleResult>,
    pub category_summary: IndexMap<RuleCategory, CategorySummary>,
    pub accessibility: AccessibilityCompliance,
    pub industry_standards: IndexMap<String, bool>,
    pub guidelines: IndexMap<String, bool>,
    pub rules_executed: usize,
    pub rules_passed: usize,
    pub checked_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl CheckResult {
    /// All recorded issues, most severe group first.
    pub fn issues(&self) -> impl Iterator<Item = &RuleResult> {
        self.critical_issues
            .iter()
            .chain(&self.high_issues)
            .chain(&self.medium_issues)
            .chain(&self.low_issues)
    }

    pub fn total_issues(&self) -> usize {
        self.critical_issues.len()
            + self.high_issues.len()
            + self.medium_issues.len()
            + self.low_issues.len()
    }

    /// Number of recorded issues of the given severity. Info-severity rule
    /// failures are never recorded as issues, so `Info` always returns 0.
    pub fn issue_count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_issues.len(),
            Severity::High => self.high_issues.len(),
            Severity::Medium => self.medium_issues.len(),
            Severity::Low => self.low_issues.len(),
            Severity::Info => 0,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(rule_id: &str, severity: Severity) -> RuleResult {
        RuleResult {
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            category: RuleCategory::Accessibility,
            severity,
            weight: 1,
            passed: false,
            score: 0.0,
            message: "failed".to_string(),
            recommendation: None,
        }
    }

    #[test]
    fn clamp_score_bounds_and_non_finite() {
        assert_eq!(RuleResult::clamp_score(140.0), 100.0);
        assert_eq!(RuleResult::clamp_score(-3.0), 0.0);
        assert_eq!(RuleResult::clamp_score(55.5), 55.5);
        assert_eq!(RuleResult::clamp_score(f64::NAN), 0.0);
        assert_eq!(RuleResult::clamp_score(f64::INFINITY), 0.0);
    }

    #[test]
    fn issues_iterates_most_severe_first() {
        let result = CheckResult {
            overall_score: 50,
            compliant: false,
            critical_issues: vec![issue("a", Severity::Critical)],
            high_issues: vec![],
            medium_issues: vec![issue("b", Severity::Medium)],
            low_issues: vec![issue("c", Severity::Low)],
            category_summary: IndexMap::new(),
            accessibility: AccessibilityCompliance::default(),
            industry_standards: IndexMap::new(),
            guidelines: IndexMap::new(),
            rules_executed: 3,
            rules_passed: 0,
            checked_at: Utc::now(),
            duration_ms: 1,
        };
        let order: Vec<&str> = result.issues().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(result.total_issues(), 3);
        assert_eq!(result.issue_count(Severity::Critical), 1);
        assert_eq!(result.issue_count(Severity::Info), 0);
    }

    #[test]
    fn accessibility_compliance_tri_state() {
        let mut compliance = AccessibilityCompliance::default();
        assert_eq!(compliance.level(AccessibilityLevel::A), None);
        assert!(!compliance.is_met(AccessibilityLevel::A));
        assert!(!compliance.failed(AccessibilityLevel::A));

        compliance.set_level(AccessibilityLevel::A, true);
        compliance.set_level(AccessibilityLevel::Aa, false);
        assert!(compliance.is_met(AccessibilityLevel::A));
        assert!(compliance.failed(AccessibilityLevel::Aa));
        assert!(!compliance.is_met(AccessibilityLevel::Aaa));
    }
}
