//! Shared types for the brandcheck workspace: brand configuration model,
//! evaluation context, severities, check results, and color math.

pub mod color;
pub mod config;
pub mod fingerprint;
pub mod result;
pub mod severity;

pub use config::{
    BrandConfiguration, BrandIdentity, ColorPalette, EvaluationContext, LogoMeta, Strictness,
    Typography,
};
pub use fingerprint::evaluation_fingerprint;
pub use result::{AccessibilityCompliance, CategorySummary, CheckResult, RuleResult};
pub use severity::{AccessibilityLevel, RuleCategory, Severity};
