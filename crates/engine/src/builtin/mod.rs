//! Built-in rule catalog.
//!
//! One module per category. [`default_rules`] returns the full set in a
//! stable order; hosts can also cherry-pick individual constructors, wrap
//! them, or re-register them under different weights.

pub mod accessibility;
pub mod brand;
pub mod design;
pub mod industry;
pub mod performance;
pub mod security;
pub mod usability;

use crate::rule::ComplianceRule;

/// The complete built-in catalog, in registration order.
pub fn default_rules() -> Vec<ComplianceRule> {
    vec![
        accessibility::logo_alt_text(),
        accessibility::text_contrast(),
        accessibility::readable_font_size(),
        brand::primary_color(),
        brand::brand_name(),
        brand::logo_asset(),
        design::palette_size(),
        design::font_pairing(),
        design::type_scale(),
        usability::distinct_text_colors(),
        industry::wcag_aa_target(),
        industry::logo_dimensions(),
        performance::palette_budget(),
        performance::font_budget(),
        security::https_logo(),
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use brandcheck_core::BrandConfiguration;

    /// A configuration that satisfies every built-in rule, strict included.
    pub fn sound_config() -> BrandConfiguration {
        serde_json::from_value(serde_json::json!({
            "tenant_id": "acme",
            "brand": {
                "name": "Acme",
                "tagline": "Ship faster"
            },
            "palette": {
                "primary": "#1a73e8",
                "secondary": "#174ea6",
                "accent": "#fbbc04",
                "background": "#ffffff",
                "text": "#202124"
            },
            "typography": {
                "heading_font": "Inter",
                "body_font": "Georgia",
                "base_size_px": 16.0,
                "scale_ratio": 1.25
            },
            "logo": {
                "url": "https://cdn.acme.test/logo.svg",
                "alt_text": "Acme wordmark",
                "width_px": 256,
                "height_px": 128,
                "formats": ["svg", "png"]
            }
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ComplianceEvaluator;
    use crate::registry::RuleRegistry;
    use brandcheck_core::{AccessibilityLevel, EvaluationContext, Strictness};
    use std::sync::Arc;

    #[test]
    fn catalog_ids_are_unique() {
        let rules = default_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn sound_configuration_passes_the_whole_catalog() {
        let registry = Arc::new(RuleRegistry::with_rules(default_rules()));
        let evaluator = ComplianceEvaluator::new(registry);
        let result = evaluator
            .evaluate(
                &fixtures::sound_config(),
                &EvaluationContext::with_strictness(Strictness::Strict),
            )
            .unwrap();

        assert!(result.compliant);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.rules_passed, result.rules_executed);
        assert!(result.accessibility.is_met(AccessibilityLevel::A));
        assert!(result.accessibility.is_met(AccessibilityLevel::Aa));
        // Nothing in the catalog claims AAA.
        assert_eq!(result.accessibility.level(AccessibilityLevel::Aaa), None);
        assert_eq!(result.industry_standards.get("WCAG 2.1 AA"), Some(&true));
        assert_eq!(result.industry_standards.get("responsive-media"), Some(&true));
    }
}
