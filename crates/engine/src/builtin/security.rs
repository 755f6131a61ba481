//! Security rules.

use brandcheck_core::{BrandConfiguration, EvaluationContext, RuleCategory, Severity};

use crate::rule::{ComplianceRule, RuleOutcome};

pub fn https_logo() -> ComplianceRule {
    ComplianceRule::new(
        "https-logo",
        "HTTPS logo",
        RuleCategory::Security,
        Severity::High,
        8,
        check_https_logo,
    )
    .with_description("Logo assets must be served over TLS to avoid mixed content.")
    .with_guideline("secure-assets")
}

fn check_https_logo(
    config: &BrandConfiguration,
    _ctx: &EvaluationContext,
) -> Result<RuleOutcome, String> {
    let url = config.logo.url.trim();
    if url.is_empty() {
        // Presence is the logo-asset rule's concern.
        return Ok(RuleOutcome::pass("no logo asset to verify"));
    }
    if url.starts_with("https://") {
        Ok(RuleOutcome::pass("logo is served over https"))
    } else if url.starts_with("http://") {
        Ok(RuleOutcome::fail(0.0, "logo is served over plain http")
            .with_recommendation("Serve the logo from an https endpoint"))
    } else {
        Ok(RuleOutcome::fail(
            50.0,
            format!("logo URL scheme is not https: {url}"),
        ))
    }
}
