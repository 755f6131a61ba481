//! Weighted compliance evaluation over the registered rule set.
//!
//! One `evaluate` call runs every enabled rule against a configuration,
//! degrades misbehaving rules to synthetic failed results, and folds the
//! rows into a single [`CheckResult`]: weighted overall score, issue lists
//! partitioned by severity, per-category summaries, and per-tag
//! accessibility / industry-standard / guideline compliance maps.
//!
//! Results are cached by input fingerprint with a fixed TTL so repeated
//! checks of an unchanged configuration are free.

use std::sync::Arc;
use std::time::Instant;

use brandcheck_core::{
    evaluation_fingerprint, AccessibilityCompliance, AccessibilityLevel, BrandConfiguration,
    CategorySummary, CheckResult, EvaluationContext, RuleCategory, RuleResult, Severity,
    Strictness,
};
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::error::EngineError;
use crate::registry::RuleRegistry;
use crate::rule::ComplianceRule;

// ── Evaluator ────────────────────────────────────────────────────────────────

/// Tuning for the evaluator's result cache.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            cache_capacity: 256,
            cache_ttl: Duration::minutes(10),
        }
    }
}

pub struct ComplianceEvaluator {
    registry: Arc<RuleRegistry>,
    cache: ResultCache,
}

impl ComplianceEvaluator {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self::with_config(registry, EvaluatorConfig::default())
    }

    pub fn with_config(registry: Arc<RuleRegistry>, config: EvaluatorConfig) -> Self {
        ComplianceEvaluator {
            registry,
            cache: ResultCache::new(config.cache_capacity, config.cache_ttl),
        }
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Run every enabled rule and aggregate a check result.
    ///
    /// A rule whose check function returns `Err` is degraded to a synthetic
    /// failed result of severity medium; it never aborts the batch. The only
    /// error this method itself can report is a poisoned registry lock.
    pub fn evaluate(
        &self,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
    ) -> Result<CheckResult, EngineError> {
        self.evaluate_at(configuration, context, Utc::now())
    }

    fn evaluate_at(
        &self,
        configuration: &BrandConfiguration,
        context: &EvaluationContext,
        now: DateTime<Utc>,
    ) -> Result<CheckResult, EngineError> {
        let started = Instant::now();

        let fingerprint = match evaluation_fingerprint(configuration, context) {
            Ok(fp) => Some(fp),
            Err(err) => {
                warn!(error = %err, "input fingerprinting failed, bypassing result cache");
                None
            }
        };
        if let Some(fp) = &fingerprint {
            if let Some(hit) = self.cache.get_at(fp, now) {
                return Ok(hit);
            }
        }

        let rules = self
            .registry
            .try_list_all()
            .map_err(EngineError::RegistryPoisoned)?;

        let mut rows: Vec<(ComplianceRule, RuleResult)> = Vec::new();
        for rule in rules.into_iter().filter(|r| r.enabled) {
            let result = match rule.evaluate(configuration, context) {
                Ok(outcome) => rule.to_result(outcome),
                Err(detail) => {
                    warn!(
                        rule_id = %rule.id,
                        error = %detail,
                        "rule check failed, recording synthetic result"
                    );
                    rule.failure_result(&detail)
                }
            };
            rows.push((rule, result));
        }

        let result = aggregate(rows, now, started.elapsed().as_millis() as u64);
        debug!(
            tenant_id = %configuration.tenant_id,
            score = result.overall_score,
            compliant = result.compliant,
            issues = result.total_issues(),
            "compliance check aggregated"
        );

        if let Some(fp) = fingerprint {
            self.cache.put(fp, result.clone());
        }
        Ok(result)
    }

    /// Failed critical and high results only, evaluated under a relaxed
    /// context. Intended for fast-path gating.
    pub fn quick_evaluate(
        &self,
        configuration: &BrandConfiguration,
    ) -> Result<Vec<RuleResult>, EngineError> {
        let context = EvaluationContext::with_strictness(Strictness::Relaxed);
        let result = self.evaluate(configuration, &context)?;
        let mut issues = result.critical_issues;
        issues.extend(result.high_issues);
        Ok(issues)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

// ── Aggregation ──────────────────────────────────────────────────────────────

fn aggregate(
    rows: Vec<(ComplianceRule, RuleResult)>,
    checked_at: DateTime<Utc>,
    duration_ms: u64,
) -> CheckResult {
    let rules_executed = rows.len();
    let rules_passed = rows.iter().filter(|(_, r)| r.passed).count();

    let total_weight: u64 = rows.iter().map(|(_, r)| u64::from(r.weight)).sum();
    let weighted_sum: f64 = rows
        .iter()
        .map(|(_, r)| r.score * f64::from(r.weight))
        .sum();
    let overall_score = if total_weight == 0 {
        0
    } else {
        (weighted_sum / total_weight as f64).round() as u32
    };

    let compliant = !rows
        .iter()
        .any(|(_, r)| !r.passed && r.severity == Severity::Critical);

    let mut critical_issues = Vec::new();
    let mut high_issues = Vec::new();
    let mut medium_issues = Vec::new();
    let mut low_issues = Vec::new();
    for (_, result) in &rows {
        if result.passed {
            continue;
        }
        match result.severity {
            Severity::Critical => critical_issues.push(result.clone()),
            Severity::High => high_issues.push(result.clone()),
            Severity::Medium => medium_issues.push(result.clone()),
            Severity::Low => low_issues.push(result.clone()),
            // Info-severity failures influence the score but are not issues.
            Severity::Info => {}
        }
    }

    CheckResult {
        overall_score,
        compliant,
        critical_issues,
        high_issues,
        medium_issues,
        low_issues,
        category_summary: summarize_categories(&rows),
        accessibility: accessibility_compliance(&rows),
        industry_standards: tag_compliance(&rows, |rule| rule.industry_standard.as_deref()),
        guidelines: tag_compliance(&rows, |rule| rule.guideline.as_deref()),
        rules_executed,
        rules_passed,
        checked_at,
        duration_ms,
    }
}

/// Average score and pass counts per category, canonical category order,
/// only categories with at least one executed rule.
fn summarize_categories(rows: &[(ComplianceRule, RuleResult)]) -> IndexMap<RuleCategory, CategorySummary> {
    let mut summary = IndexMap::new();
    for category in RuleCategory::ALL {
        let scores: Vec<f64> = rows
            .iter()
            .filter(|(_, r)| r.category == category)
            .map(|(_, r)| r.score)
            .collect();
        if scores.is_empty() {
            continue;
        }
        let passed = rows
            .iter()
            .filter(|(_, r)| r.category == category && r.passed)
            .count();
        let total = scores.len();
        summary.insert(
            category,
            CategorySummary {
                score: (scores.iter().sum::<f64>() / total as f64).round(),
                passed,
                failed: total - passed,
                total,
            },
        );
    }
    summary
}

/// A level is assessed only if at least one executed rule carries its tag;
/// it is met when every tagged rule passed.
fn accessibility_compliance(rows: &[(ComplianceRule, RuleResult)]) -> AccessibilityCompliance {
    let mut compliance = AccessibilityCompliance::default();
    for level in [
        AccessibilityLevel::A,
        AccessibilityLevel::Aa,
        AccessibilityLevel::Aaa,
    ] {
        let mut assessed = false;
        let mut met = true;
        for (rule, result) in rows {
            if rule.accessibility_level == Some(level) {
                assessed = true;
                met = met && result.passed;
            }
        }
        if assessed {
            compliance.set_level(level, met);
        }
    }
    compliance
}

fn tag_compliance<'a>(
    rows: &'a [(ComplianceRule, RuleResult)],
    tag: impl Fn(&'a ComplianceRule) -> Option<&'a str>,
) -> IndexMap<String, bool> {
    let mut map = IndexMap::new();
    for (rule, result) in rows {
        if let Some(key) = tag(rule) {
            let entry = map.entry(key.to_string()).or_insert(true);
            *entry = *entry && result.passed;
        }
    }
    map
}

// ── Tests ────────────────────────────────────────────────────────────────────
