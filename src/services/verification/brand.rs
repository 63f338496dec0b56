use super::matcher::contains;
use crate::models::form::FieldName;
use crate::models::verdict::Verdict;
use tracing::info;

/// Check the brand name appears on the label
///
/// Brand names are short, so the caller passes a stricter threshold than the
/// matcher default.
pub fn verify_brand_name(form_brand: &str, text: &str, threshold: f64) -> Verdict {
    info!(brand = form_brand, "Verifying brand name");

    if contains(text, form_brand, threshold) {
        Verdict::matched(
            FieldName::BrandName,
            format!("Brand name '{}' found on the label.", form_brand),
        )
    } else {
        Verdict::mismatch(
            FieldName::BrandName,
            format!(
                "Brand name '{}' not found on the label. Please verify the image matches the form data.",
                form_brand
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verdict::VerdictStatus;

    const THRESHOLD: f64 = 0.85;

    #[test]
    fn test_brand_exact() {
        let verdict = verify_brand_name("Old Tom Distillery", "OLD TOM DISTILLERY\n750 mL", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Match);
        assert_eq!(verdict.field, FieldName::BrandName);
        assert!(verdict.message.contains("Old Tom Distillery"));
    }

    #[test]
    fn test_brand_with_ocr_noise() {
        let verdict = verify_brand_name("Old Tom Distillery", "0LD TOM DISTILLERY", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Match, "One misread letter should still match");
    }

    #[test]
    fn test_brand_missing() {
        let verdict = verify_brand_name("Blue Ridge Spirits", "OLD TOM DISTILLERY", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch);
        assert!(verdict.message.contains("not found on the label"));
    }

    #[test]
    fn test_brand_short_name_needs_close_match() {
        // "oak" vs "oat" scores 0.67, below the brand threshold
        let verdict = verify_brand_name("Oak", "OAT FIELD WHISKEY", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch);
    }

    #[test]
    fn test_brand_against_empty_text() {
        let verdict = verify_brand_name("Acme", "", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch);
    }
}
