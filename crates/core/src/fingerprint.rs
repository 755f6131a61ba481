//! Deterministic fingerprinting of evaluation inputs, used as cache keys.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::{BrandConfiguration, EvaluationContext};

#[derive(Serialize)]
struct FingerprintInput<'a> {
    configuration: &'a BrandConfiguration,
    context: &'a EvaluationContext,
}

/// Hex SHA-256 digest over the canonical JSON of one evaluation's inputs.
///
/// Field order is fixed by the struct definitions and no map types are
/// involved, so identical inputs always serialize to identical bytes.
pub fn evaluation_fingerprint(
    configuration: &BrandConfiguration,
    context: &EvaluationContext,
) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(&FingerprintInput {
        configuration,
        context,
    })?;
    let digest = Sha256::digest(&canonical);
    Ok(format!("{digest:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrandIdentity, ColorPalette, LogoMeta, Strictness, Typography};

    fn sample() -> BrandConfiguration {
        BrandConfiguration {
            tenant_id: "acme".into(),
            brand: BrandIdentity {
                name: "Acme".into(),
                tagline: None,
                description: None,
            },
            palette: ColorPalette {
                primary: "#112233".into(),
                secondary: "#445566".into(),
                accent: "#778899".into(),
                background: "#ffffff".into(),
                text: "#111111".into(),
                extra: vec![],
            },
            typography: Typography {
                heading_font: "Inter".into(),
                body_font: "Inter".into(),
                base_size_px: 16.0,
                scale_ratio: 1.25,
                font_families: vec![],
            },
            logo: LogoMeta {
                url: "https://cdn.acme.test/logo.svg".into(),
                alt_text: Some("Acme logo".into()),
                width_px: Some(128),
                height_px: Some(64),
                formats: vec!["svg".into()],
            },
        }
    }

    #[test]
    fn identical_inputs_share_a_fingerprint() {
        let ctx = EvaluationContext::default();
        let a = evaluation_fingerprint(&sample(), &ctx).unwrap();
        let b = evaluation_fingerprint(&sample(), &ctx).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn context_changes_the_fingerprint() {
        let config = sample();
        let standard = evaluation_fingerprint(&config, &EvaluationContext::default()).unwrap();
        let strict = evaluation_fingerprint(
            &config,
            &EvaluationContext::with_strictness(Strictness::Strict),
        )
        .unwrap();
        assert_ne!(standard, strict);
    }

    #[test]
    fn configuration_changes_the_fingerprint() {
        let ctx = EvaluationContext::default();
        let base = evaluation_fingerprint(&sample(), &ctx).unwrap();
        let mut changed = sample();
        changed.palette.primary = "#000000".into();
        assert_ne!(base, evaluation_fingerprint(&changed, &ctx).unwrap());
    }
}
