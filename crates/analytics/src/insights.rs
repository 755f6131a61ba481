//! Status, risk, and recommendation derivation from recent checks.
//!
//! Each signal below is checked on its own and appends to the insight
//! lists independently. Risk only ever escalates: a signal can raise
//! the level to its floor but never lower what an earlier signal set.

use brandcheck_core::CheckResult;
use serde::Serialize;

/// How many of the newest checks feed the derivation.
pub const INSIGHT_WINDOW: usize = 10;

const DECLINE_POINTS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub status: ComplianceStatus,
    pub risk: RiskLevel,
    pub latest_score: u32,
    pub average_score: f64,
    pub checks_considered: usize,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub priority_actions: Vec<String>,
}

/// Derives insights from the recent window, oldest first.
pub fn derive(results: &[CheckResult]) -> Insights {
    let latest = match results.last() {
        Some(latest) => latest,
        None => return no_data(),
    };

    let scores: Vec<f64> = results
        .iter()
        .map(|result| f64::from(result.overall_score))
        .collect();
    let average = scores.iter().sum::<f64>() / scores.len() as f64;

    let status = if !latest.critical_issues.is_empty() {
        ComplianceStatus::Critical
    } else if average >= 90.0 {
        ComplianceStatus::Excellent
    } else if average >= 80.0 {
        ComplianceStatus::Good
    } else if average >= 70.0 {
        ComplianceStatus::Fair
    } else {
        ComplianceStatus::Poor
    };

    let mut insights = Vec::new();
    let mut recommendations = Vec::new();
    let mut priority_actions = Vec::new();
    let mut risk = RiskLevel::Low;

    let critical_count = latest.critical_issues.len();
    if critical_count > 0 {
        insights.push(format!(
            "{critical_count} critical issue(s) in the latest check"
        ));
        priority_actions.push("resolve the outstanding critical issues".to_string());
        escalate(&mut risk, RiskLevel::Critical);
    }

    let high_count = latest.high_issues.len();
    if high_count > 0 {
        insights.push(format!("{high_count} high-priority issue(s) open"));
        recommendations.push("schedule fixes for the high-priority issues".to_string());
        if high_count > 3 {
            escalate(&mut risk, RiskLevel::High);
        }
    }

    if latest.overall_score < 70 {
        recommendations.push("book a design review to lift the overall score".to_string());
        escalate(&mut risk, RiskLevel::Medium);
    } else if latest.overall_score >= 90 {
        insights.push("latest check scores in the excellent band".to_string());
    }

    if latest.accessibility.level_a == Some(false) {
        insights.push("WCAG level A compliance is failing".to_string());
        priority_actions.push("fix the failing level A accessibility checks".to_string());
        escalate(&mut risk, RiskLevel::Medium);
    }

    let unmet: Vec<&str> = latest
        .industry_standards
        .iter()
        .filter(|(_, met)| !**met)
        .map(|(name, _)| name.as_str())
        .collect();
    if !unmet.is_empty() {
        recommendations.push(format!("address unmet industry standards: {}", unmet.join(", ")));
    }

    if scores.len() >= 3 {
        let first = scores[0];
        let last = scores[scores.len() - 1];
        if first - last >= DECLINE_POINTS {
            insights.push(format!(
                "score declined {:.0} points over the last {} checks",
                first - last,
                scores.len()
            ));
            recommendations.push("investigate the recent score decline".to_string());
            escalate(&mut risk, RiskLevel::Medium);
        } else if last - first >= DECLINE_POINTS {
            insights.push("scores are trending upward".to_string());
        }
    }

    Insights {
        status,
        risk,
        latest_score: latest.overall_score,
        average_score: (average * 10.0).round() / 10.0,
        checks_considered: results.len(),
        insights,
        recommendations,
        priority_actions,
    }
}

/// Fixed response for tenants with no recorded checks.
fn no_data() -> Insights {
    Insights {
        status: ComplianceStatus::Critical,
        risk: RiskLevel::Low,
        latest_score: 0,
        average_score: 0.0,
        checks_considered: 0,
        insights: vec!["no compliance checks recorded for this tenant".to_string()],
        recommendations: vec!["run a compliance check to establish a baseline".to_string()],
        priority_actions: Vec::new(),
    }
}

fn escalate(risk: &mut RiskLevel, floor: RiskLevel) {
    if floor > *risk {
        *risk = floor;
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{result_at, result_with_issues};
    use chrono::{Duration, Utc};

    fn at(hours_ago: i64) -> chrono::DateTime<Utc> {
        Utc::now() - Duration::hours(hours_ago)
    }

    #[test]
    fn empty_history_gets_the_fixed_no_data_response() {
        let derived = derive(&[]);
        assert_eq!(derived.status, ComplianceStatus::Critical);
        assert_eq!(derived.risk, RiskLevel::Low);
        assert_eq!(derived.checks_considered, 0);
        assert!(!derived.insights.is_empty());
        assert!(!derived.recommendations.is_empty());
    }

    #[test]
    fn critical_issues_force_critical_status_and_risk() {
        let derived = derive(&[result_with_issues(95, 1, 0, at(0))]);
        assert_eq!(derived.status, ComplianceStatus::Critical);
        assert_eq!(derived.risk, RiskLevel::Critical);
        assert!(!derived.priority_actions.is_empty());
    }

    #[test]
    fn status_bands_follow_the_window_average() {
        let excellent = derive(&[result_at(92, at(2)), result_at(94, at(1))]);
        assert_eq!(excellent.status, ComplianceStatus::Excellent);

        let fair = derive(&[result_at(74, at(2)), result_at(76, at(1))]);
        assert_eq!(fair.status, ComplianceStatus::Fair);

        let poor = derive(&[result_at(40, at(1))]);
        assert_eq!(poor.status, ComplianceStatus::Poor);
    }

    #[test]
    fn low_score_escalates_risk_to_medium() {
        let derived = derive(&[result_at(65, at(0))]);
        assert_eq!(derived.risk, RiskLevel::Medium);
        assert!(derived
            .recommendations
            .iter()
            .any(|r| r.contains("design review")));
    }

    #[test]
    fn many_high_issues_escalate_risk_to_high() {
        let derived = derive(&[result_with_issues(85, 0, 4, at(0))]);
        assert_eq!(derived.risk, RiskLevel::High);

        let few = derive(&[result_with_issues(85, 0, 2, at(0))]);
        assert_eq!(few.risk, RiskLevel::Low);
    }

    #[test]
    fn failing_level_a_escalates_risk() {
        let mut result = result_at(95, at(0));
        result.accessibility.level_a = Some(false);
        let derived = derive(&[result]);

        assert_eq!(derived.risk, RiskLevel::Medium);
        assert!(derived
            .priority_actions
            .iter()
            .any(|action| action.contains("level A")));
    }

    #[test]
    fn sustained_decline_escalates_risk() {
        let derived = derive(&[
            result_at(90, at(3)),
            result_at(88, at(2)),
            result_at(85, at(1)),
        ]);
        assert_eq!(derived.risk, RiskLevel::Medium);
        assert!(derived.insights.iter().any(|i| i.contains("declined")));
    }

    #[test]
    fn risk_never_downgrades() {
        // Critical issue plus a decline: the decline's medium floor must
        // not lower the critical verdict.
        let derived = derive(&[
            result_at(90, at(3)),
            result_at(88, at(2)),
            result_with_issues(85, 1, 0, at(1)),
        ]);
        assert_eq!(derived.risk, RiskLevel::Critical);
    }

    #[test]
    fn unmet_industry_standards_are_named() {
        let mut result = result_at(95, at(0));
        result
            .industry_standards
            .insert("WCAG 2.1 AA".to_string(), false);
        let derived = derive(&[result]);

        assert!(derived
            .recommendations
            .iter()
            .any(|r| r.contains("WCAG 2.1 AA")));
    }
}
