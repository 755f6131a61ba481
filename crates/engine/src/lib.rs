//! Weighted rule evaluation for tenant brand configurations.
//!
//! The engine is built from three pieces:
//! - **Rule registry** — concurrent-read store of [`ComplianceRule`]s,
//!   insert/overwrite by id, runtime enable toggling.
//! - **Compliance evaluator** — runs every enabled rule, degrades failing
//!   rule functions to synthetic results, and aggregates a weighted
//!   [`CheckResult`](brandcheck_core::CheckResult).
//! - **Result cache** — LRU of recent results keyed by input fingerprint,
//!   expired at read time by a fixed TTL.
//!
//! A default catalog of built-in rules lives in [`builtin`].

pub mod builtin;
pub mod cache;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod rule;

pub use cache::ResultCache;
pub use error::EngineError;
pub use evaluator::{ComplianceEvaluator, EvaluatorConfig};
pub use registry::RuleRegistry;
pub use rule::{ComplianceRule, RuleCheck, RuleDescriptor, RuleOutcome};
