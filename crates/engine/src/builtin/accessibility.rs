//! Accessibility rules: alt text, text contrast, readable base size.

use brandcheck_core::color::{contrast_ratio, parse_hex};
use brandcheck_core::{
    AccessibilityLevel, BrandConfiguration, EvaluationContext, RuleCategory, Severity, Strictness,
};

use crate::rule::{ComplianceRule, RuleOutcome};

/// Required WCAG contrast ratio by strictness. Standard tracks AA normal
/// text; strict tracks AAA.
fn required_contrast(strictness: Strictness) -> f64 {
    match strictness {
        Strictness::Relaxed => 3.0,
        Strictness::Standard => 4.5,
        Strictness::Strict => 7.0,
    }
}

fn minimum_base_size(strictness: Strictness) -> f64 {
    match strictness {
        Strictness::Relaxed => 14.0,
        Strictness::Standard | Strictness::Strict => 16.0,
    }
}

pub fn logo_alt_text() -> ComplianceRule {
    ComplianceRule::new(
        "logo-alt-text",
        "Logo alt text",
        RuleCategory::Accessibility,
        Severity::Critical,
        10,
        check_logo_alt_text,
    )
    .with_description("Logo assets must carry non-empty alternative text.")
    .with_accessibility_level(AccessibilityLevel::A)
}

fn check_logo_alt_text(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    match config.logo.alt_text.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(RuleOutcome::pass("logo alt text present")),
        _ => Ok(RuleOutcome::fail(0.0, "logo is missing alternative text")
            .with_recommendation("Describe the logo in one short phrase for screen readers")),
    }
}

pub fn text_contrast() -> ComplianceRule {
    ComplianceRule::new(
        "text-contrast",
        "Text contrast",
        RuleCategory::Accessibility,
        Severity::High,
        8,
        check_text_contrast,
    )
    .with_description("Body text must meet the WCAG contrast ratio for the configured strictness.")
    .with_accessibility_level(AccessibilityLevel::Aa)
}

fn check_text_contrast(
    config: &BrandConfiguration,
    ctx: &EvaluationContext,
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

    let ratio = contrast_ratio(text, background);
    let required = required_contrast(ctx.strictness);
    if ratio >= required {
        Ok(RuleOutcome::pass(format!(
            "text contrast {ratio:.2}:1 meets the {required:.1}:1 requirement"
        )))
    } else {
        // Partial credit proportional to how close the pair gets.
        Ok(RuleOutcome::fail(
            ratio / required * 100.0,
            format!("text contrast {ratio:.2}:1 is below the {required:.1}:1 requirement"),
        )
        .with_recommendation("Darken the text color or lighten the background"))
    }
}

pub fn readable_font_size() -> ComplianceRule {
    ComplianceRule::new(
        "readable-font-size",
        "Readable font size",
        RuleCategory::Accessibility,
        Severity::Medium,
        5,
        check_readable_font_size,
    )
    .with_description("Base body size must be large enough to read comfortably.")
    .with_accessibility_level(AccessibilityLevel::Aa)
}

fn check_readable_font_size(
    config: &BrandConfiguration,
    ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let size = config.typography.base_size_px;
    let minimum = minimum_base_size(ctx.strictness);
    if size >= minimum {
        Ok(RuleOutcome::pass(format!(
            "base size {size}px meets the {minimum}px minimum"
        )))
    } else if size <= 0.0 {
        Ok(RuleOutcome::fail(0.0, "base font size is not set"))
    } else {
        Ok(RuleOutcome::fail(
            size / minimum * 100.0,
            format!("base size {size}px is below the {minimum}px minimum"),
        )
        .with_recommendation(format!("Raise the base body size to at least {minimum}px")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::fixtures::sound_config;
    use brandcheck_core::EvaluationContext;

    #[test]
    fn alt_text_fails_when_missing_or_blank() {
        let ctx = EvaluationContext::default();
        let rule = logo_alt_text();

        let mut config = sound_config();
        assert!(rule.evaluate(&config, &ctx).unwrap().passed);

        config.logo.alt_text = None;
        let outcome = rule.evaluate(&config, &ctx).unwrap();
        assert!(!outcome.passed);
        assert_eq!(outcome.score, 0.0);

        config.logo.alt_text = Some("   ".into());
        assert!(!rule.evaluate(&config, &ctx).unwrap().passed);
    }

    #[test]
    fn contrast_threshold_tracks_strictness() {
        let rule = text_contrast();
        let mut config = sound_config();
        // #767676 on white sits at ~4.54:1, between the standard and
        // strict requirements.
        config.palette.text = "#767676".into();

        let standard = rule
            .evaluate(&config, &EvaluationContext::default())
            .unwrap();
        assert!(standard.passed);

        let strict = rule
            .evaluate(
                &config,
                &EvaluationContext::with_strictness(Strictness::Strict),
            )
            .unwrap();
        assert!(!strict.passed);
        // Partial credit: 4.54 / 7.0 of full marks.
        assert!(strict.score > 60.0 && strict.score < 70.0);
    }

    #[test]
    fn unparseable_color_degrades_with_diagnostic() {
        let rule = text_contrast();
        let mut config = sound_config();
        config.palette.text = "not-a-color".into();
        let outcome = rule
            .evaluate(&config, &EvaluationContext::default())
            .unwrap();
        assert!(!outcome.passed);
        assert!(outcome.message.contains("not a valid hex color"));
    }

    #[test]
    fn base_size_minimum_tracks_strictness() {
        let rule = readable_font_size();
        let mut config = sound_config();
        config.typography.base_size_px = 14.0;

        let relaxed = rule
            .evaluate(
                &config,
                &EvaluationContext::with_strictness(Strictness::Relaxed),
            )
            .unwrap();
        assert!(relaxed.passed);

        let standard = rule
            .evaluate(&config, &EvaluationContext::default())
            .unwrap();
        assert!(!standard.passed);
        assert!((standard.score - 87.5).abs() < 1e-9);
    }
}
