//! Full compliance report assembly.

use brandcheck_core::CheckResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::insights::{self, ComplianceStatus, Insights};
use crate::period::Period;
use crate::trends::{self, TrendAnalysis, TrendDirection};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Share of checks meeting each WCAG level, as a percentage of the
/// checks where that level was assessed at all.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessibilityRates {
    pub level_a: f64,
    pub level_aa: f64,
    pub level_aaa: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedMetrics {
    pub total_checks: usize,
    pub average_score: f64,
    pub best_score: u32,
    pub worst_score: u32,
    pub compliance_rate: f64,
    pub average_duration_ms: f64,
    pub total_issues: usize,
    pub issues_by_severity: SeverityBreakdown,
    pub accessibility: AccessibilityRates,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationTiers {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub tenant_id: String,
    pub generated_at: DateTime<Utc>,
    pub period: Period,
    pub trends: TrendAnalysis,
    pub insights: Insights,
    pub metrics: DetailedMetrics,
    pub recommendations: RecommendationTiers,
}

/// Builds the full report. `results` is the complete history oldest
/// first; `recent` is the insight window cut from its tail.
pub fn build(
    tenant_id: &str,
    period: Period,
    results: &[CheckResult],
    recent: &[CheckResult],
) -> ComplianceReport {
    let trends = trends::analyze(period, results);
    let insights = insights::derive(recent);
    let recommendations = recommendation_tiers(&trends, &insights);
    ComplianceReport {
        tenant_id: tenant_id.to_string(),
        generated_at: Utc::now(),
        period,
        metrics: detailed_metrics(results),
        recommendations,
        trends,
        insights,
    }
}

fn detailed_metrics(results: &[CheckResult]) -> DetailedMetrics {
    let total = results.len();
    if total == 0 {
        return DetailedMetrics {
            total_checks: 0,
            average_score: 0.0,
            best_score: 0,
            worst_score: 0,
            compliance_rate: 0.0,
            average_duration_ms: 0.0,
            total_issues: 0,
            issues_by_severity: SeverityBreakdown::default(),
            accessibility: AccessibilityRates::default(),
        };
    }

    let count = total as f64;
    let compliant = results.iter().filter(|result| result.compliant).count();
    DetailedMetrics {
        total_checks: total,
        average_score: round1(
            results
                .iter()
                .map(|result| f64::from(result.overall_score))
                .sum::<f64>()
                / count,
        ),
        best_score: results
            .iter()
            .map(|result| result.overall_score)
            .max()
            .unwrap_or(0),
        worst_score: results
            .iter()
            .map(|result| result.overall_score)
            .min()
            .unwrap_or(0),
        compliance_rate: round1(compliant as f64 / count * 100.0),
        average_duration_ms: round1(
            results
                .iter()
                .map(|result| result.duration_ms as f64)
                .sum::<f64>()
                / count,
        ),
        total_issues: results.iter().map(CheckResult::total_issues).sum(),
        issues_by_severity: SeverityBreakdown {
            critical: results.iter().map(|r| r.critical_issues.len()).sum(),
            high: results.iter().map(|r| r.high_issues.len()).sum(),
            medium: results.iter().map(|r| r.medium_issues.len()).sum(),
            low: results.iter().map(|r| r.low_issues.len()).sum(),
        },
        accessibility: accessibility_rates(results),
    }
}

fn accessibility_rates(results: &[CheckResult]) -> AccessibilityRates {
    let rate = |level: fn(&CheckResult) -> Option<bool>| {
        let assessed = results.iter().filter(|r| level(r).is_some()).count();
        if assessed == 0 {
            return 0.0;
        }
        let met = results.iter().filter(|r| level(r) == Some(true)).count();
        round1(met as f64 / assessed as f64 * 100.0)
    };
    AccessibilityRates {
        level_a: rate(|r| r.accessibility.level_a),
        level_aa: rate(|r| r.accessibility.level_aa),
        level_aaa: rate(|r| r.accessibility.level_aaa),
    }
}

fn recommendation_tiers(trends: &TrendAnalysis, insights: &Insights) -> RecommendationTiers {
    let mut immediate = insights.priority_actions.clone();
    if immediate.is_empty() && insights.status == ComplianceStatus::Critical {
        immediate.push("triage the failing checks before the next sweep".to_string());
    }

    let mut short_term = insights.recommendations.clone();
    if trends.direction == TrendDirection::Declining {
        short_term.push("reverse the declining score trend".to_string());
    }

    let mut long_term = vec!["keep periodic compliance monitoring enabled".to_string()];
    if trends.average_score < 90.0 {
        long_term.push("raise the rolling average into the excellent band".to_string());
    }
    if trends.direction == TrendDirection::Improving {
        long_term.push("hold the practices behind the current upward trend".to_string());
    }

    RecommendationTiers {
        immediate,
        short_term,
        long_term,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ── Tests ────────────────────────────────────────────────────────────────────
