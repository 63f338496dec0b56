use super::matcher::contains;
use super::normalizer::normalize;
use crate::models::form::FieldName;
use crate::models::verdict::Verdict;
use tracing::{debug, info};

/// Words at or below this length don't count toward a partial match
const MIN_KEY_WORD_LEN: usize = 3;

/// Check the product class/type phrase appears on the label
///
/// Falls back to key-word coverage for phrases of three or more words, since
/// OCR commonly drops a single word out of long regulatory designations.
pub fn verify_product_type(form_type: &str, text: &str, threshold: f64) -> Verdict {
    info!(product_type = form_type, "Verifying product type");

    if contains(text, form_type, threshold) {
        return Verdict::matched(
            FieldName::ProductType,
            format!("Product type '{}' found on the label.", form_type),
        );
    }

    if partial_match(form_type, text) {
        return Verdict::matched(
            FieldName::ProductType,
            format!("Product type '{}' found on the label (partial match).", form_type),
        );
    }

    Verdict::mismatch(
        FieldName::ProductType,
        format!("Product type '{}' not found on the label.", form_type),
    )
}

/// At least half of the words (rounded down) are long key words present in the text
fn partial_match(form_type: &str, text: &str) -> bool {
    let words: Vec<&str> = form_type.split_whitespace().collect();
    if words.len() <= 2 {
        return false;
    }

    let text_norm = normalize(text);
    let key_words_found = words
        .iter()
        .map(|word| normalize(word))
        .filter(|word| word.chars().count() > MIN_KEY_WORD_LEN && text_norm.contains(word.as_str()))
        .count();

    debug!(key_words_found, total = words.len(), "Product type partial match");
    key_words_found >= words.len() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verdict::VerdictStatus;

    const THRESHOLD: f64 = 0.75;

    #[test]
    fn test_product_type_exact() {
        let text = "OLD TOM DISTILLERY\nKentucky Straight Bourbon Whiskey\n45% Alc./Vol.";
        let verdict = verify_product_type("Kentucky Straight Bourbon Whiskey", text, THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Match);
        assert!(!verdict.message.contains("partial"));
    }

    #[test]
    fn test_product_type_partial_when_words_split_across_lines() {
        // Words are present but scattered, so no 4-word window is similar enough
        let text = "KENTUCKY\nBOTTLED BY OLD TOM\nSTRAIGHT RYE AND CORN\nWHISKEY AGED 4 YEARS";
        let verdict = verify_product_type("Kentucky Straight Bourbon Whiskey", text, THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Match);
        assert!(verdict.message.contains("partial match"));
    }

    #[test]
    fn test_product_type_short_phrase_has_no_partial_credit() {
        let text = "VODKA DISTILLED FROM GRAIN";
        let verdict = verify_product_type("Rum", text, THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch);

        let verdict = verify_product_type("London Dry Gin", "DRY VERMOUTH", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch, "\"dry\" is too short to count as a key word");
    }

    #[test]
    fn test_product_type_not_found() {
        let verdict = verify_product_type("Tennessee Whiskey", "BLANCO TEQUILA", THRESHOLD);
        assert_eq!(verdict.status, VerdictStatus::Mismatch);
        assert_eq!(verdict.message, "Product type 'Tennessee Whiskey' not found on the label.");
    }

    #[test]
    fn test_partial_match_ignores_short_words() {
        // "of" and "the" never count even when present
        assert!(!partial_match("spirit of the agave", "of the of the"));
        assert!(partial_match("spirit of the agave", "AGAVE SPIRIT"));
    }
}
