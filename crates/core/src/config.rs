//! Tenant brand configuration model and the context a check runs under.
//!
//! A [`BrandConfiguration`] is the unit every compliance check evaluates:
//! brand identity, color palette, typography, and logo metadata for one
//! tenant. The [`EvaluationContext`] carries the knobs that change how
//! strict individual rules are without changing the configuration itself.

use serde::{Deserialize, Serialize};

// ── Brand configuration ──────────────────────────────────────────────────────

/// Complete visual configuration for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConfiguration {
    pub tenant_id: String,
    pub brand: BrandIdentity,
    pub palette: ColorPalette,
    pub typography: Typography,
    pub logo: LogoMeta,
}

/// Textual brand identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named color roles plus any additional palette entries. All values are
/// hex strings such as `#1a2b3c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    #[serde(default)]
    pub extra: Vec<String>,
}

impl ColorPalette {
    /// Every color in the palette, named roles first, then extras.
    pub fn all_colors(&self) -> Vec<&str> {
        let mut colors = vec![
            self.primary.as_str(),
            self.secondary.as_str(),
            self.accent.as_str(),
            self.background.as_str(),
            self.text.as_str(),
        ];
        colors.extend(self.extra.iter().map(String::as_str));
        colors
    }
}

/// Typography settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    /// Base body size in CSS pixels.
    pub base_size_px: f64,
    /// Ratio between adjacent steps of the type scale.
    pub scale_ratio: f64,
    #[serde(default)]
    pub font_families: Vec<String>,
}

impl Typography {
    /// Distinct font families in use, first occurrence order preserved.
    pub fn distinct_families(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for family in [self.heading_font.as_str(), self.body_font.as_str()]
            .into_iter()
            .chain(self.font_families.iter().map(String::as_str))
        {
            if !family.is_empty() && !seen.contains(&family) {
                seen.push(family);
            }
        }
        seen
    }
}

/// Logo asset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoMeta {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_px: Option<u32>,
    #[serde(default)]
    pub formats: Vec<String>,
}

// ── Evaluation context ───────────────────────────────────────────────────────

/// How demanding rule thresholds should be for a given check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Relaxed,
    #[default]
    Standard,
    Strict,
}

/// Per-check context: strictness plus optional industry and audience hints
/// that individual rules may consult.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    #[serde(default)]
    pub strictness: Strictness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl EvaluationContext {
    pub fn with_strictness(strictness: Strictness) -> Self {
        EvaluationContext {
            strictness,
            ..EvaluationContext::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r##"{
            "tenant_id": "acme",
            "brand": { "name": "Acme" },
            "palette": {
                "primary": "#102030",
                "secondary": "#405060",
                "accent": "#708090",
                "background": "#ffffff",
                "text": "#111111"
            },
            "typography": {
                "heading_font": "Inter",
                "body_font": "Inter",
                "base_size_px": 16.0,
                "scale_ratio": 1.25
            },
            "logo": { "url": "https://cdn.acme.test/logo.svg" }
        }"##;
        let config: BrandConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.tenant_id, "acme");
        assert!(config.brand.tagline.is_none());
        assert!(config.palette.extra.is_empty());
        assert!(config.logo.alt_text.is_none());
        assert!(config.logo.formats.is_empty());
    }

    #[test]
    fn all_colors_includes_extras_in_order() {
        let palette = ColorPalette {
            primary: "#111111".into(),
            secondary: "#222222".into(),
            accent: "#333333".into(),
            background: "#ffffff".into(),
            text: "#000000".into(),
            extra: vec!["#444444".into()],
        };
        assert_eq!(
            palette.all_colors(),
            vec!["#111111", "#222222", "#333333", "#ffffff", "#000000", "#444444"]
        );
    }

    #[test]
    fn distinct_families_dedupes_and_skips_empty() {
        let typography = Typography {
            heading_font: "Inter".into(),
            body_font: "Inter".into(),
            base_size_px: 16.0,
            scale_ratio: 1.25,
            font_families: vec!["".into(), "Georgia".into(), "Inter".into()],
        };
        assert_eq!(typography.distinct_families(), vec!["Inter", "Georgia"]);
    }

    #[test]
    fn strictness_defaults_to_standard() {
        let ctx: EvaluationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx.strictness, Strictness::Standard);
        assert_eq!(Strictness::default(), Strictness::Standard);
    }
}
