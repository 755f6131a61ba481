//! Brand guideline rules: core identity fields must be present and valid.

use brandcheck_core::color::parse_hex;
use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

pub fn primary_color() -> ComplianceRule {
    ComplianceRule::new(
        "primary-color",
        "Primary color",
        RuleCategory::BrandGuidelines,
        Severity::Medium,
        5,
        check_primary_color,
    )
    .with_description("A parseable primary brand color must be configured.")
    .with_guideline("brand-colors")
}

fn check_primary_color(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    if config.palette.primary.trim().is_empty() {
        return Ok(RuleOutcome::fail(0.0, "primary color is not set")
            .with_recommendation("Pick a primary brand color"));
    }
    match parse_hex(&config.palette.primary) {
        Ok(_) => Ok(RuleOutcome::pass("primary color present")),
        Err(err) => Ok(RuleOutcome::fail(
            0.0,
            format!("primary color is not a valid hex color: {err}"),
        )),
    }
}

pub fn brand_name() -> ComplianceRule {
    ComplianceRule::new(
        "brand-name",
        "Brand name",
        RuleCategory::BrandGuidelines,
        Severity::High,
        8,
        check_brand_name,
    )
    .with_description("The brand must have a non-empty display name.")
    .with_guideline("brand-identity")
}

fn check_brand_name(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    if config.brand.name.trim().is_empty() {
        Ok(RuleOutcome::fail(0.0, "brand name is empty"))
    } else {
        Ok(RuleOutcome::pass("brand name present"))
    }
}

pub fn logo_asset() -> ComplianceRule {
    ComplianceRule::new(
        "logo-asset",
        "Logo asset",
        RuleCategory::BrandGuidelines,
        Severity::Medium,
        5,
        check_logo_asset,
    )
    .with_description("A logo asset URL must be configured.")
}

fn check_logo_asset(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    if config.logo.url.trim().is_empty() {
        Ok(RuleOutcome::fail(0.0, "no logo asset configured")
            .with_recommendation("Upload a logo and set its URL"))
    } else {
        Ok(RuleOutcome::pass("logo asset configured"))
    }
}
