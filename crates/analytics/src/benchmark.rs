//! Industry benchmark comparison.
//!
//! Baselines are a static table. The percentile scale anchors the
//! industry baseline at the 50th percentile and the best-practice
//! ceiling at the 99th.

use serde::Serialize;

const INDUSTRY_BASELINES: &[(&str, f64)] = &[
    ("technology", 85.0),
    ("finance", 88.0),
    ("healthcare", 90.0),
    ("retail", 82.0),
    ("education", 84.0),
    ("media", 83.0),
];

const DEFAULT_BASELINE: f64 = 80.0;

pub const BEST_PRACTICE: f64 = 95.0;

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkComparison {
    pub tenant_id: String,
    pub industry: Option<String>,
    pub current_score: f64,
    pub industry_baseline: f64,
    pub best_practice: f64,
    /// Current score minus the baseline. Negative means behind.
    pub gap_to_baseline: f64,
    pub gap_to_best_practice: f64,
    pub percentile: u32,
    pub recommendations: Vec<String>,
}

/// Baseline for the industry, falling back to the cross-industry default.
/// Lookup is case-insensitive.
pub fn baseline_for(industry: Option<&str>) -> f64 {
    industry
        .and_then(|name| {
            let needle = name.to_ascii_lowercase();
            INDUSTRY_BASELINES
                .iter()
                .find(|(candidate, _)| *candidate == needle)
                .map(|(_, baseline)| *baseline)
        })
        .unwrap_or(DEFAULT_BASELINE)
}

/// Compares the tenant's latest score against its industry. A tenant
/// with no recorded checks compares at score zero and is told so.
pub fn compare(
    tenant_id: &str,
    industry: Option<&str>,
    latest_score: Option<u32>,
) -> BenchmarkComparison {
    let baseline = baseline_for(industry);
    let current = latest_score.map_or(0.0, f64::from);
    let label = industry.unwrap_or("industry");

    let mut recommendations = Vec::new();
    if latest_score.is_none() {
        recommendations
            .push("run a compliance check before comparing against the industry".to_string());
    } else if current < baseline {
        recommendations.push(format!(
            "close the {:.0}-point gap to the {label} baseline",
            baseline - current
        ));
    } else if current < BEST_PRACTICE {
        recommendations.push(format!(
            "push toward the best-practice score of {BEST_PRACTICE:.0}"
        ));
    } else {
        recommendations.push("maintain the current score with periodic checks".to_string());
    }

    BenchmarkComparison {
        tenant_id: tenant_id.to_string(),
        industry: industry.map(String::from),
        current_score: current,
        industry_baseline: baseline,
        best_practice: BEST_PRACTICE,
        gap_to_baseline: current - baseline,
        gap_to_best_practice: current - BEST_PRACTICE,
        percentile: percentile_of(current, baseline),
        recommendations,
    }
}

fn percentile_of(current: f64, baseline: f64) -> u32 {
    let value = if current <= baseline {
        50.0 * current / baseline
    } else if BEST_PRACTICE > baseline {
        50.0 + 49.0 * (current - baseline) / (BEST_PRACTICE - baseline)
    } else {
        99.0
    };
    value.round().clamp(0.0, 99.0) as u32
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_industries_use_their_baseline() {
        assert_eq!(baseline_for(Some("healthcare")), 90.0);
        assert_eq!(baseline_for(Some("Technology")), 85.0);
        assert_eq!(baseline_for(Some("bakery")), 80.0);
        assert_eq!(baseline_for(None), 80.0);
    }

    #[test]
    fn percentile_anchors_at_baseline_and_ceiling() {
        let at_baseline = compare("acme", Some("technology"), Some(85));
        assert_eq!(at_baseline.percentile, 50);

        let at_ceiling = compare("acme", Some("technology"), Some(95));
        assert_eq!(at_ceiling.percentile, 99);

        let above_ceiling = compare("acme", Some("technology"), Some(100));
        assert_eq!(above_ceiling.percentile, 99);

        let halfway = compare("acme", None, Some(40));
        assert_eq!(halfway.percentile, 25);
    }

    #[test]
    fn no_history_compares_at_zero_with_advice() {
        let comparison = compare("acme", Some("finance"), None);
        assert_eq!(comparison.current_score, 0.0);
        assert_eq!(comparison.percentile, 0);
        assert_eq!(comparison.gap_to_baseline, -88.0);
        assert!(!comparison.recommendations.is_empty());
    }

    #[test]
    fn recommendations_follow_the_standing() {
        let behind = compare("acme", Some("healthcare"), Some(70));
        assert!(behind.recommendations[0].contains("20-point gap"));

        let ahead = compare("acme", Some("retail"), Some(90));
        assert!(ahead.recommendations[0].contains("best-practice"));

        let leading = compare("acme", Some("retail"), Some(96));
        assert!(leading.recommendations[0].contains("maintain"));
    }
}
