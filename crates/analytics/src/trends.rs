//! Trend analysis over check history.
//!
//! Scores are grouped into calendar buckets for the requested period and
//! the bucket series decides the direction verdict: the mean of the
//! first half is compared against the mean of the second half, and a
//! difference within a two-point band counts as stable. With an odd
//! bucket count the middle bucket joins the second half.

use std::collections::BTreeMap;

use brandcheck_core::{CheckResult, RuleCategory, RuleResult, Severity};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::period::{bucket_key, bucket_start, Period};

const STABLE_BAND: f64 = 2.0;
const COMMON_ISSUE_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// One calendar bucket of checks, with issue counts averaged over the
/// checks that fell into it.
#[derive(Debug, Clone, Serialize)]
pub struct TrendDataPoint {
    pub timestamp: DateTime<Utc>,
    pub checks: usize,
    pub average_score: f64,
    pub compliant: bool,
    pub critical_issues: f64,
    pub high_issues: f64,
    pub medium_issues: f64,
    pub low_issues: f64,
    pub total_issues: f64,
}

/// A rule that keeps failing across the analyzed history.
#[derive(Debug, Clone, Serialize)]
pub struct CommonIssue {
    pub rule_id: String,
    pub rule_name: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub occurrences: usize,
    /// Share of analyzed checks the rule failed in, as a percentage.
    pub frequency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTrend {
    pub category: RuleCategory,
    pub average_score: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub period: Period,
    pub data_points: Vec<TrendDataPoint>,
    pub direction: TrendDirection,
    /// Change from the first bucket to the last, as a percentage of the
    /// first bucket's score.
    pub trend_percentage: f64,
    pub average_score: f64,
    pub best_score: u32,
    pub worst_score: u32,
    pub compliance_rate: f64,
    pub total_checks: usize,
    pub common_issues: Vec<CommonIssue>,
    pub category_trends: Vec<CategoryTrend>,
}

/// Analyzes history for one tenant. `results` must be oldest first.
pub fn analyze(period: Period, results: &[CheckResult]) -> TrendAnalysis {
    let data_points = bucketize(period, results);
    let bucket_scores: Vec<f64> = data_points.iter().map(|point| point.average_score).collect();
    let scores: Vec<f64> = results
        .iter()
        .map(|result| f64::from(result.overall_score))
        .collect();
    let compliant = results.iter().filter(|result| result.compliant).count();
    let compliance_rate = if results.is_empty() {
        0.0
    } else {
        round1(compliant as f64 / results.len() as f64 * 100.0)
    };

    TrendAnalysis {
        period,
        direction: direction_of(&bucket_scores),
        trend_percentage: trend_percentage(&bucket_scores),
        average_score: round1(mean(&scores)),
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
        compliance_rate,
        total_checks: results.len(),
        common_issues: common_issues(results),
        category_trends: category_trends(results),
        data_points,
    }
}

fn bucketize(period: Period, results: &[CheckResult]) -> Vec<TrendDataPoint> {
    let mut buckets: BTreeMap<_, Vec<&CheckResult>> = BTreeMap::new();
    for result in results {
        buckets
            .entry(bucket_key(period, result.checked_at))
            .or_default()
            .push(result);
    }

    buckets
        .into_values()
        .map(|entries| {
            let count = entries.len() as f64;
            let avg = |per_result: fn(&CheckResult) -> f64| {
                round1(entries.iter().map(|r| per_result(r)).sum::<f64>() / count)
            };
            TrendDataPoint {
                timestamp: bucket_start(period, entries[0].checked_at),
                checks: entries.len(),
                average_score: avg(|r| f64::from(r.overall_score)),
                compliant: entries.iter().all(|result| result.compliant),
                critical_issues: avg(|r| r.critical_issues.len() as f64),
                high_issues: avg(|r| r.high_issues.len() as f64),
                medium_issues: avg(|r| r.medium_issues.len() as f64),
                low_issues: avg(|r| r.low_issues.len() as f64),
                total_issues: avg(|r| r.total_issues() as f64),
            }
        })
        .collect()
}

/// First-half mean against second-half mean over the bucket series.
fn direction_of(scores: &[f64]) -> TrendDirection {
    if scores.len() < 2 {
        return TrendDirection::Stable;
    }
    let mid = scores.len() / 2;
    let delta = mean(&scores[mid..]) - mean(&scores[..mid]);
    if delta > STABLE_BAND {
        TrendDirection::Improving
    } else if delta < -STABLE_BAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

fn trend_percentage(scores: &[f64]) -> f64 {
    match (scores.first(), scores.last()) {
        (Some(&first), Some(&last)) if scores.len() >= 2 && first != 0.0 => {
            ((last - first) / first * 100.0).round()
        }
        _ => 0.0,
    }
}

/// Failing rules ranked by how often they failed, capped at ten.
fn common_issues(results: &[CheckResult]) -> Vec<CommonIssue> {
    let mut counts: IndexMap<String, (RuleResult, usize)> = IndexMap::new();
    for result in results {
        for issue in result.issues() {
            match counts.get_mut(&issue.rule_id) {
                // Keep the newest occurrence so severity reflects the
                // current rule definition.
                Some((sample, count)) => {
                    *sample = issue.clone();
                    *count += 1;
                }
                None => {
                    counts.insert(issue.rule_id.clone(), (issue.clone(), 1));
                }
            }
        }
    }

    let total = results.len();
    let mut issues: Vec<CommonIssue> = counts
        .into_iter()
        .map(|(rule_id, (sample, occurrences))| CommonIssue {
            rule_id,
            rule_name: sample.rule_name,
            category: sample.category,
            severity: sample.severity,
            occurrences,
            frequency: round1(occurrences as f64 / total as f64 * 100.0),
        })
        .collect();
    issues.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    issues.truncate(COMMON_ISSUE_LIMIT);
    issues
}

/// Per-category score movement, using each check's category summary.
fn category_trends(results: &[CheckResult]) -> Vec<CategoryTrend> {
    let mut series: IndexMap<RuleCategory, Vec<f64>> = IndexMap::new();
    for result in results {
        for (category, summary) in &result.category_summary {
            series.entry(*category).or_default().push(summary.score);
        }
    }

    RuleCategory::ALL
        .iter()
        .filter_map(|category| {
            series.get(category).map(|scores| CategoryTrend {
                category: *category,
                average_score: round1(mean(scores)),
                direction: direction_of(scores),
            })
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ── Tests ────────────────────────────────────────────────────────────────────
