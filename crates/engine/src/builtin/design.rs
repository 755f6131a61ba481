//! Design consistency rules: palette shape, font pairing, type scale.

use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

const PALETTE_MIN: usize = 2;
const PALETTE_MAX: usize = 8;
const FONT_PAIRING_MAX: usize = 3;

// Minor-second through golden-ratio scales.
const SCALE_MIN: f64 = 1.067;
const SCALE_MAX: f64 = 1.618;

pub fn palette_size() -> ComplianceRule {
    ComplianceRule::new(
        "palette-size",
        "Palette size",
        RuleCategory::DesignConsistency,
        Severity::Low,
        3,
        check_palette_size,
    )
    .with_description("A usable palette has between 2 and 8 colors.")
}

fn check_palette_size(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let count = config.palette.all_colors().len();
    if (PALETTE_MIN..=PALETTE_MAX).contains(&count) {
        Ok(RuleOutcome::pass(format!("palette has {count} colors")))
    } else if count < PALETTE_MIN {
        Ok(RuleOutcome::fail(
            0.0,
            format!("palette has only {count} colors"),
        ))
    } else {
        // Oversized palettes lose credit in proportion to the overflow.
        Ok(RuleOutcome::fail(
            PALETTE_MAX as f64 / count as f64 * 100.0,
            format!("palette has {count} colors, more than the recommended {PALETTE_MAX}"),
        )
        .with_recommendation("Consolidate near-duplicate palette entries"))
    }
}

pub fn font_pairing() -> ComplianceRule {
    ComplianceRule::new(
        "font-pairing",
        "Font pairing",
        RuleCategory::DesignConsistency,
        Severity::Low,
        3,
        check_font_pairing,
    )
    .with_description("Consistent designs pair at most 3 font families.")
}

fn check_font_pairing(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let count = config.typography.distinct_families().len();
    if count == 0 {
        Ok(RuleOutcome::fail(0.0, "no font families configured"))
    } else if count <= FONT_PAIRING_MAX {
        Ok(RuleOutcome::pass(format!("{count} font families in use")))
    } else {
        Ok(RuleOutcome::fail(
            FONT_PAIRING_MAX as f64 / count as f64 * 100.0,
            format!("{count} font families in use, more than the recommended {FONT_PAIRING_MAX}"),
        )
        .with_recommendation("Reduce to a heading family, a body family, and at most one accent"))
    }
}

pub fn type_scale() -> ComplianceRule {
    ComplianceRule::new(
        "type-scale",
        "Type scale",
        RuleCategory::DesignConsistency,
        Severity::Info,
        1,
        check_type_scale,
    )
    .with_description("The type scale ratio should sit between minor second and golden ratio.")
}

fn check_type_scale(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let ratio = config.typography.scale_ratio;
    if (SCALE_MIN..=SCALE_MAX).contains(&ratio) {
        Ok(RuleOutcome::pass(format!("type scale ratio {ratio} is conventional")))
    } else {
        Ok(RuleOutcome::fail(
            0.0,
            format!("type scale ratio {ratio} is outside {SCALE_MIN}..={SCALE_MAX}"),
        )
        .with_recommendation("Adopt a standard modular scale such as 1.25 (major third)"))
    }
}
