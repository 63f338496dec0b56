/// Canonicalize recognized text or operator input for comparison
///
/// Lower-cases, drops everything except `a-z`, `0-9`, `%`, `.`, `-`, `/` and
/// whitespace, then collapses whitespace runs to one space and trims.
/// Digits, percent signs and unit separators survive so numeric tokens stay
/// comparable. Idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_kept(*c) || c.is_whitespace())
        .collect();

    // Collapsing after filtering keeps "a ! b" from leaving a double space
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '%' | '.' | '-' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(normalize("OLD  TOM\n\tDistillery"), "old tom distillery");
    }

    #[test]
    fn test_normalize_keeps_numeric_tokens() {
        assert_eq!(normalize("45% Alc./Vol. (90 Proof)"), "45% alc./vol. 90 proof");
        assert_eq!(normalize("750 mL"), "750 ml");
        assert_eq!(normalize("1-1/2 oz"), "1-1/2 oz");
    }

    #[test]
    fn test_normalize_strips_ocr_noise() {
        assert_eq!(normalize("GOVERNMENT WARNING: (1)"), "government warning 1");
        assert_eq!(normalize("Brand™ — “Reserve”"), "brand reserve");
        assert_eq!(normalize("a ! b"), "a b", "Removed punctuation must not leave double spaces");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  bourbon  "), "bourbon");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "OLD TOM DISTILLERY",
            "a ! b",
            "GOVERNMENT WARNING: (1) According to the Surgeon General,",
            "  45 %  ABV\r\n750ml ",
            "Ünïcödé Straße İstanbul",
            "--//..%%",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "normalize should be idempotent for {:?}", sample);
        }
    }
}
