//! Usability rules.

use brandcheck_core::color::parse_hex;
use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

pub fn distinct_text_colors() -> ComplianceRule {
    ComplianceRule::new(
        "distinct-text-colors",
        "Distinct text colors",
        RuleCategory::Usability,
        Severity::Medium,
        5,
        check_distinct_text_colors,
    )
    .with_description("Text and background must not resolve to the same color.")
}

fn check_distinct_text_colors(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let text = match parse_hex(&config.palette.text) {
        Ok(color) => color,
        Err(err) => {
            return Ok(RuleOutcome::fail(
                0.0,
                format!("text color is not a valid hex color: {err}"),
            ))
        }
    };
    let background = match parse_hex(&config.palette.background) {
        Ok(color) => color,
        Err(err) => {
            return Ok(RuleOutcome::fail(
                0.0,
                format!("background color is not a valid hex color: {err}"),
            ))
        }
    };
    if text == background {
        Ok(RuleOutcome::fail(0.0, "text and background are the same color")
            .with_recommendation("Choose a text color that stands apart from the background"))
    } else {
        Ok(RuleOutcome::pass("text and background are distinct"))
    }
}
