//! Analytics engine facade.

use brandcheck_core::CheckResult;
use chrono::Duration;
use tracing::debug;

use crate::benchmark::{self, BenchmarkComparison};
use crate::cache::{AnalyticsCache, CacheKey, CacheOp, CachedValue};
use crate::config::AnalyticsConfig;
use crate::history::HistoryStore;
use crate::insights::{self, Insights, INSIGHT_WINDOW};
use crate::period::Period;
use crate::report::{self, ComplianceReport};
use crate::trends::{self, TrendAnalysis};

/// Accumulates check history per tenant and serves derived views from
/// it. All views are cached briefly; recording a result drops the
/// tenant's cached views so reads never trail a newer check.
pub struct AnalyticsEngine {
    history: HistoryStore,
    cache: AnalyticsCache,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        AnalyticsEngine {
            history: HistoryStore::new(config.retention_days, config.max_history_per_tenant),
            cache: AnalyticsCache::new(
                config.cache_capacity,
                Duration::seconds(config.cache_ttl_secs as i64),
            ),
        }
    }

    /// Records a completed check for the tenant.
    pub fn record(&self, tenant_id: &str, result: CheckResult) {
        self.history.record(tenant_id, result);
        self.cache.invalidate_tenant(tenant_id);
        debug!(
            tenant_id = %tenant_id,
            entries = self.history.len(tenant_id),
            "analytics history updated"
        );
    }

    pub fn get_trends(&self, tenant_id: &str, period: Period) -> TrendAnalysis {
        let key = CacheKey::new(tenant_id, CacheOp::Trends(period));
        if let Some(CachedValue::Trends(cached)) = self.cache.get(&key) {
            return cached;
        }
        let results = self.history.snapshot(tenant_id);
        let analysis = trends::analyze(period, &results);
        self.cache.put(key, CachedValue::Trends(analysis.clone()));
        analysis
    }

    pub fn get_insights(&self, tenant_id: &str) -> Insights {
        let key = CacheKey::new(tenant_id, CacheOp::Insights);
        if let Some(CachedValue::Insights(cached)) = self.cache.get(&key) {
            return cached;
        }
        let recent = self.history.recent(tenant_id, INSIGHT_WINDOW);
        let derived = insights::derive(&recent);
        self.cache.put(key, CachedValue::Insights(derived.clone()));
        derived
    }

    pub fn get_report(&self, tenant_id: &str, period: Period) -> ComplianceReport {
        let key = CacheKey::new(tenant_id, CacheOp::Report(period));
        if let Some(CachedValue::Report(cached)) = self.cache.get(&key) {
            return cached;
        }
        let results = self.history.snapshot(tenant_id);
        let recent = self.history.recent(tenant_id, INSIGHT_WINDOW);
        let built = report::build(tenant_id, period, &results, &recent);
        self.cache.put(key, CachedValue::Report(built.clone()));
        built
    }

    /// Compares the tenant's latest score against its industry baseline.
    pub fn get_benchmark(&self, tenant_id: &str, industry: Option<&str>) -> BenchmarkComparison {
        let key = CacheKey::new(tenant_id, CacheOp::Benchmark(industry.map(String::from)));
        if let Some(CachedValue::Benchmark(cached)) = self.cache.get(&key) {
            return cached;
        }
        let latest = self.history.latest(tenant_id);
        let comparison = benchmark::compare(
            tenant_id,
            industry,
            latest.map(|result| result.overall_score),
        );
        self.cache
            .put(key, CachedValue::Benchmark(comparison.clone()));
        comparison
    }

    pub fn history_len(&self, tenant_id: &str) -> usize {
        self.history.len(tenant_id)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{result_at, result_with_issues};
    use crate::insights::ComplianceStatus;
    use crate::trends::TrendDirection;
    use chrono::{Duration, Utc};

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new(AnalyticsConfig::default())
    }

    #[test]
    fn recording_feeds_every_view() {
        let engine = engine();
        let now = Utc::now();
        for (days_ago, score) in [(3, 50), (2, 52), (1, 90), (0, 92)] {
            engine.record("acme", result_at(score, now - Duration::days(days_ago)));
        }

        let trends = engine.get_trends("acme", Period::Day);
        assert_eq!(trends.direction, TrendDirection::Improving);
        assert_eq!(trends.total_checks, 4);

        let insights = engine.get_insights("acme");
        assert_eq!(insights.latest_score, 92);

        let report = engine.get_report("acme", Period::Day);
        assert_eq!(report.metrics.total_checks, 4);

        let benchmark = engine.get_benchmark("acme", Some("technology"));
        assert_eq!(benchmark.current_score, 92.0);
    }

    #[test]
    fn recording_invalidates_cached_views() {
        let engine = engine();
        engine.record("acme", result_at(60, Utc::now() - Duration::hours(1)));
        assert_eq!(engine.get_insights("acme").latest_score, 60);

        engine.record("acme", result_at(95, Utc::now()));
        assert_eq!(engine.get_insights("acme").latest_score, 95);
        assert_eq!(engine.get_benchmark("acme", None).current_score, 95.0);
    }

    #[test]
    fn unknown_tenants_get_empty_views() {
        let engine = engine();
        let trends = engine.get_trends("ghost", Period::Week);
        assert_eq!(trends.total_checks, 0);

        let insights = engine.get_insights("ghost");
        assert_eq!(insights.status, ComplianceStatus::Critical);
        assert_eq!(insights.checks_considered, 0);

        let benchmark = engine.get_benchmark("ghost", Some("media"));
        assert_eq!(benchmark.current_score, 0.0);
        assert_eq!(benchmark.percentile, 0);
        assert!(!benchmark.recommendations.is_empty());
    }

    #[test]
    fn insight_window_only_sees_the_newest_ten() {
        let engine = engine();
        let now = Utc::now();
        engine.record("acme", result_with_issues(10, 1, 0, now - Duration::hours(20)));
        for hours_ago in (0..10).rev() {
            engine.record(
                "acme",
                result_at(90, now - Duration::hours(i64::from(hours_ago))),
            );
        }

        let insights = engine.get_insights("acme");
        assert_eq!(insights.checks_considered, 10);
        // The critical check fell out of the window.
        assert_ne!(insights.status, ComplianceStatus::Critical);
        assert_eq!(engine.history_len("acme"), 11);
    }
}
