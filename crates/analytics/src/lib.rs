//! Historical compliance analytics.
//!
//! Accumulates per-tenant check history and derives read-side views
//! from it:
//! - [`TrendAnalysis`]: calendar-bucketed score series with a direction
//!   verdict, recurring issues, and per-category movement
//! - [`Insights`]: a status and risk read of the recent window, with
//!   recommendations and priority actions
//! - [`ComplianceReport`]: trends, insights, and detail metrics combined
//!   into one document with tiered recommendations
//! - [`BenchmarkComparison`]: the latest score against a static industry
//!   baseline and a best-practice ceiling
//!
//! Reads are cached per tenant with a short TTL; recording a new result
//! drops that tenant's cached views.

pub mod benchmark;
pub mod cache;
pub mod config;
pub mod engine;
pub mod history;
pub mod insights;
pub mod period;
pub mod report;
pub mod trends;

#[cfg(test)]
pub(crate) mod fixtures;

pub use benchmark::BenchmarkComparison;
pub use config::AnalyticsConfig;
pub use engine::AnalyticsEngine;
pub use insights::{ComplianceStatus, Insights, RiskLevel};
pub use period::{BucketKey, Period};
pub use report::{ComplianceReport, DetailedMetrics, RecommendationTiers};
pub use trends::{CategoryTrend, CommonIssue, TrendAnalysis, TrendDataPoint, TrendDirection};
