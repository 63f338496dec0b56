use crate::models::form::FieldName;
use crate::models::verdict::Verdict;
use tracing::{debug, info};

/// Header every compliant label carries
pub const WARNING_HEADER: &str = "GOVERNMENT WARNING";

/// Statutory phrases counted toward a complete warning (27 CFR 16.21)
pub const WARNING_PHRASES: [&str; 7] = [
    WARNING_HEADER,
    "SURGEON GENERAL",
    "ACCORDING TO THE SURGEON GENERAL",
    "WOMEN SHOULD NOT DRINK",
    "ALCOHOLIC BEVERAGES DURING PREGNANCY",
    "CONSUMPTION OF ALCOHOLIC BEVERAGES",
    "IMPAIRS YOUR ABILITY",
];

/// Check the mandatory health warning is present and looks complete
///
/// Exact, upper-cased substring checks only: this is statutory text, so no
/// fuzzy matching.
pub fn verify_government_warning(text: &str, min_phrases: usize) -> Verdict {
    info!("Verifying government warning");

    let text_upper = text.to_uppercase();

    if !text_upper.contains(WARNING_HEADER) {
        return Verdict::not_found(
            FieldName::GovernmentWarning,
            "Government warning statement not found on the label. This is required by law.",
        );
    }

    let phrases_found = count_phrases(&text_upper);
    debug!(phrases_found, "Government warning phrases");

    if phrases_found >= min_phrases {
        Verdict::matched(
            FieldName::GovernmentWarning,
            "Government warning statement found on the label.",
        )
    } else {
        Verdict::warning(
            FieldName::GovernmentWarning,
            "'GOVERNMENT WARNING' found but complete warning text may be incomplete.",
        )
    }
}

/// Number of statutory phrases present (expects upper-cased text)
fn count_phrases(text_upper: &str) -> usize {
    WARNING_PHRASES
        .iter()
        .filter(|phrase| text_upper.contains(*phrase))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verdict::VerdictStatus;

    const MIN_PHRASES: usize = 2;

    #[test]
    fn test_warning_complete() {
        let text = "GOVERNMENT WARNING: (1) According to the Surgeon General, women should not drink \
                    alcoholic beverages during pregnancy because of the risk of birth defects.";
        let verdict = verify_government_warning(text, MIN_PHRASES);
        assert_eq!(verdict.status, VerdictStatus::Match);
    }

    #[test]
    fn test_warning_header_only() {
        let verdict = verify_government_warning("GOVERNMENT WARNING: (1) ...", MIN_PHRASES);
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert!(verdict.message.contains("may be incomplete"));
    }

    #[test]
    fn test_warning_missing() {
        let verdict = verify_government_warning("OLD TOM DISTILLERY\nSurgeon General", MIN_PHRASES);
        assert_eq!(verdict.status, VerdictStatus::NotFound, "Body text without header is not a warning");
        assert!(verdict.message.contains("required by law"));
    }

    #[test]
    fn test_warning_case_insensitive() {
        let verdict = verify_government_warning("government warning ... surgeon general", MIN_PHRASES);
        assert_eq!(verdict.status, VerdictStatus::Match);
    }

    #[test]
    fn test_warning_no_fuzzy_matching() {
        // A misread header is not accepted
        let verdict = verify_government_warning("G0VERNMENT WARNING surgeon general", MIN_PHRASES);
        assert_eq!(verdict.status, VerdictStatus::NotFound);
    }

    #[test]
    fn test_count_phrases() {
        assert_eq!(count_phrases(""), 0);
        assert_eq!(count_phrases("ACCORDING TO THE SURGEON GENERAL"), 2);
    }
}
