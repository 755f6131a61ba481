//! Severity, category, and accessibility-level vocabulary shared by rules,
//! check results, and alerts.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Severity ─────────────────────────────────────────────────────────────────

/// Urgency of a rule or of the issue it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Numeric rank, higher means more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Info => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rule categories ──────────────────────────────────────────────────────────

/// Functional area a rule belongs to. Category scores are reported per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Accessibility,
    BrandGuidelines,
    DesignConsistency,
    Usability,
    IndustryStandards,
    Performance,
    Security,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 7] = [
        RuleCategory::Accessibility,
        RuleCategory::BrandGuidelines,
        RuleCategory::DesignConsistency,
        RuleCategory::Usability,
        RuleCategory::IndustryStandards,
        RuleCategory::Performance,
        RuleCategory::Security,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::Accessibility => "accessibility",
            RuleCategory::BrandGuidelines => "brand-guidelines",
            RuleCategory::DesignConsistency => "design-consistency",
            RuleCategory::Usability => "usability",
            RuleCategory::IndustryStandards => "industry-standards",
            RuleCategory::Performance => "performance",
            RuleCategory::Security => "security",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Accessibility levels ─────────────────────────────────────────────────────

/// WCAG conformance level a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessibilityLevel {
    A,
    Aa,
    Aaa,
}

impl AccessibilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibilityLevel::A => "A",
            AccessibilityLevel::Aa => "AA",
            AccessibilityLevel::Aaa => "AAA",
        }
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
