//! Industry standard rules.

use brandcheck_core::color::{contrast_ratio, parse_hex};
use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

const WCAG_AA_CONTRAST: f64 = 4.5;
const LOGO_DIMENSION_MIN: u32 = 32;
const LOGO_DIMENSION_MAX: u32 = 1024;
const LOGO_ASPECT_MAX: f64 = 8.0;

pub fn wcag_aa_target() -> ComplianceRule {
    ComplianceRule::new(
        "wcag-aa-target",
        "WCAG AA target",
        RuleCategory::IndustryStandards,
        Severity::High,
        8,
        check_wcag_aa_target,
    )
    .with_description("Contrast and alt text jointly meet the WCAG 2.1 AA bar.")
    .with_industry_standard("WCAG 2.1 AA")
}

/// Fixed AA check, independent of the configured strictness.
fn check_wcag_aa_target(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let contrast_ok = match (
        parse_hex(&config.palette.text),
        parse_hex(&config.palette.background),
    ) {
        (Ok(text), Ok(background)) => contrast_ratio(text, background) >= WCAG_AA_CONTRAST,
        _ => false,
    };
    let alt_ok = config
        .logo
        .alt_text
        .as_deref()
        .is_some_and(|text| !text.trim().is_empty());

    match (contrast_ok, alt_ok) {
        (true, true) => Ok(RuleOutcome::pass("contrast and alt text meet WCAG 2.1 AA")),
        (false, true) => Ok(RuleOutcome::fail(50.0, "text contrast is below WCAG 2.1 AA")),
        (true, false) => Ok(RuleOutcome::fail(50.0, "logo alt text is missing for WCAG 2.1 AA")),
        (false, false) => Ok(RuleOutcome::fail(
            0.0,
            "both text contrast and logo alt text miss WCAG 2.1 AA",
        )),
    }
}

pub fn logo_dimensions() -> ComplianceRule {
    ComplianceRule::new(
        "logo-dimensions",
        "Logo dimensions",
        RuleCategory::IndustryStandards,
        Severity::Low,
        2,
        check_logo_dimensions,
    )
    .with_description("Declared logo dimensions stay within responsive-media bounds.")
    .with_industry_standard("responsive-media")
}

fn check_logo_dimensions(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let (width, height) = match (config.logo.width_px, config.logo.height_px) {
        (Some(w), Some(h)) => (w, h),
        // The bounds only apply when dimensions are declared.
        _ => return Ok(RuleOutcome::pass("logo dimensions not declared")),
    };

    let bounds = LOGO_DIMENSION_MIN..=LOGO_DIMENSION_MAX;
    if !bounds.contains(&width) || !bounds.contains(&height) {
        return Ok(RuleOutcome::fail(
            0.0,
            format!(
                "logo {width}x{height}px is outside {LOGO_DIMENSION_MIN}..={LOGO_DIMENSION_MAX}px"
            ),
        )
        .with_recommendation("Export the logo within the responsive-media size bounds"));
    }

    let aspect = f64::from(width.max(height)) / f64::from(width.min(height));
    if aspect > LOGO_ASPECT_MAX {
        Ok(RuleOutcome::fail(
            50.0,
            format!("logo aspect ratio {aspect:.1}:1 exceeds {LOGO_ASPECT_MAX:.0}:1"),
        ))
    } else {
        Ok(RuleOutcome::pass(format!("logo {width}x{height}px is within bounds")))
    }
}
