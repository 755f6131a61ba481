//! Performance rules: asset budgets that keep page weight sane.

use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

const PALETTE_BUDGET: usize = 12;
const FONT_BUDGET: usize = 4;

pub fn palette_budget() -> ComplianceRule {
    ComplianceRule::new(
        "palette-budget",
        "Palette budget",
        RuleCategory::Performance,
        Severity::Info,
        1,
        check_palette_budget,
    )
    .with_description("Total palette entries stay within the design-token budget.")
}

fn check_palette_budget(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let count = config.palette.all_colors().len();
    if count <= PALETTE_BUDGET {
        Ok(RuleOutcome::pass(format!("{count} palette entries within budget")))
    } else {
        Ok(RuleOutcome::fail(
            PALETTE_BUDGET as f64 / count as f64 * 100.0,
            format!("{count} palette entries exceed the budget of {PALETTE_BUDGET}"),
        ))
    }
}

pub fn font_budget() -> ComplianceRule {
    ComplianceRule::new(
        "font-budget",
        "Font budget",
        RuleCategory::Performance,
        Severity::Low,
        2,
        check_font_budget,
    )
    .with_description("Each font family is a network fetch; keep the set small.")
}

fn check_font_budget(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let count = config.typography.distinct_families().len();
    if count <= FONT_BUDGET {
        Ok(RuleOutcome::pass(format!("{count} font families within budget")))
    } else {
        Ok(RuleOutcome::fail(
            FONT_BUDGET as f64 / count as f64 * 100.0,
            format!("{count} font families exceed the budget of {FONT_BUDGET}"),
        )
        .with_recommendation("Drop rarely used families or self-host a variable font"))
    }
}
