//! Rule model: identity, tags, weighting, and the evaluation capability.

use std::fmt;
use std::sync::Arc;

use brandcheck_core::{
    AccessibilityLevel, BrandConfiguration, EvaluationContext, RuleCategory, RuleResult, Severity,
};
use serde::Serialize;

// ── Evaluation capability ────────────────────────────────────────────────────

/// What a rule's check function reports back, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub passed: bool,
    /// Raw score, clamped into `0..=100` during aggregation.
    pub score: f64,
    pub message: String,
    pub recommendation: Option<String>,
}

impl RuleOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        RuleOutcome {
            passed: true,
            score: 100.0,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn fail(score: f64, message: impl Into<String>) -> Self {
        RuleOutcome {
            passed: false,
            score,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// A unit of compliance checking that the evaluator can execute.
///
/// Implementations must be pure with respect to their inputs: same
/// configuration and context, same outcome. Returning `Err` marks the rule
/// as misbehaving; the evaluator degrades it to a synthetic failed result
/// instead of aborting the batch.
pub trait RuleCheck: Send + Sync {
    fn evaluate(
        &self,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
    ) -> Result<RuleOutcome, String>;
}

/// Closures are the open extension point for externally supplied rules.
impl<F> RuleCheck for F
where
    F: Fn(&BrandConfiguration, &EvaluationContext) -> Result<RuleOutcome, String> + Send + Sync,
{
    fn evaluate(
        &self,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
    ) -> Result<RuleOutcome, String> {
        self(configuration, context)
    }
}

// ── Compliance rule ──────────────────────────────────────────────────────────

/// A registered rule: identity, tags, weight, and its check function.
///
/// Weight and severity are fixed at construction; to change them,
/// unregister and re-register. Clones are cheap (the check function is
/// shared behind an `Arc`), so registry reads hand out snapshots.
#[derive(Clone)]
pub struct ComplianceRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// Contribution to the weighted overall score, always >= 1.
    pub weight: u32,
    pub enabled: bool,
    /// WCAG level this rule contributes to, if any.
    pub accessibility_level: Option<AccessibilityLevel>,
    /// Industry standard this rule verifies, if any.
    pub industry_standard: Option<String>,
    /// Brand guideline this rule verifies, if any.
    pub guideline: Option<String>,
    check: Arc<dyn RuleCheck>,
}

impl ComplianceRule {
    /// Build a rule. A zero weight is clamped to 1 so every executed rule
    /// contributes to the weighted score.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: RuleCategory,
        severity: Severity,
        weight: u32,
        check: impl RuleCheck + 'static,
    ) -> Self {
        ComplianceRule {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            severity,
            weight: weight.max(1),
            enabled: true,
            accessibility_level: None,
            industry_standard: None,
            guideline: None,
            check: Arc::new(check),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_accessibility_level(mut self, level: AccessibilityLevel) -> Self {
        self.accessibility_level = Some(level);
        self
    }

    pub fn with_industry_standard(mut self, standard: impl Into<String>) -> Self {
        self.industry_standard = Some(standard.into());
        self
    }

    pub fn with_guideline(mut self, guideline: impl Into<String>) -> Self {
        self.guideline = Some(guideline.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Run the check function.
    pub fn evaluate(
        &self,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
    ) -> Result<RuleOutcome, String> {
        self.check.evaluate(configuration, context)
    }

    /// Convert a check outcome into the aggregated result row.
    pub fn to_result(&self, outcome: RuleOutcome) -> RuleResult {
        RuleResult {
            rule_id: self.id.clone(),
            rule_name: self.name.clone(),
            category: self.category,
            severity: self.severity,
            weight: self.weight,
            passed: outcome.passed,
            score: RuleResult::clamp_score(outcome.score),
            message: outcome.message,
            recommendation: outcome.recommendation,
        }
    }

    /// Synthetic result for a rule whose check function failed outright.
    /// Always severity medium so one broken rule cannot flip compliance.
    pub fn failure_result(&self, detail: &str) -> RuleResult {
        RuleResult {
            rule_id: self.id.clone(),
            rule_name: self.name.clone(),
            category: self.category,
            severity: Severity::Medium,
            weight: self.weight,
            passed: false,
            score: 0.0,
            message: format!("rule evaluation failed: {detail}"),
            recommendation: None,
        }
    }

    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            severity: self.severity,
            weight: self.weight,
            enabled: self.enabled,
            accessibility_level: self.accessibility_level,
            industry_standard: self.industry_standard.clone(),
            guideline: self.guideline.clone(),
        }
    }
}

impl fmt::Debug for ComplianceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceRule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("weight", &self.weight)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Serializable snapshot of a rule, minus its check function. Used by
/// hosts that list the registry contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub weight: u32,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_level: Option<AccessibilityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_standard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline: Option<String>,
}

// ── Tests ────────────────────────────────────────────────────────────────────
