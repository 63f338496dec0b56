use crate::models::form::FieldName;
use crate::models::verdict::Verdict;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Percentage patterns, applied to the lower-cased label text
///
/// Covers "45%", "45 %", "45 percent", "abv: 45", "alcohol 45", "alc. 45"
static ABV_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+\.?\d*)\s*%",
        r"(\d+\.?\d*)\s*percent",
        r"abv[:\s]*(\d+\.?\d*)",
        r"alcohol[:\s]*(\d+\.?\d*)",
        r"alc[.:\s]*(\d+\.?\d*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("ABV pattern should compile"))
    .collect()
});

/// Check the label states the same alcohol by volume as the form
///
/// Compares numerically within `tolerance` percentage points. An unparsable
/// or out-of-range form value is reported as `not_found`, never as an error.
pub fn verify_alcohol_content(form_abv: &str, text: &str, tolerance: f64) -> Verdict {
    info!(abv = form_abv, "Verifying alcohol content");

    let expected = match parse_form_abv(form_abv) {
        Ok(value) => value,
        Err(e) => {
            warn!(abv = form_abv, error = %e, "Invalid ABV value");
            return Verdict::not_found(
                FieldName::AlcoholContent,
                "Invalid alcohol content format in form.",
            );
        }
    };

    let found = extract_percentages(text);
    debug!(?found, "Found percentages in text");

    if found.iter().any(|value| (expected - value).abs() <= tolerance) {
        return Verdict::matched(
            FieldName::AlcoholContent,
            format!("Alcohol content {}% found on the label.", form_abv),
        );
    }

    match found.first() {
        Some(other) => Verdict::mismatch(
            FieldName::AlcoholContent,
            format!("Expected {}% but found {}% on the label.", form_abv, other),
        ),
        None => Verdict::not_found(
            FieldName::AlcoholContent,
            format!(
                "Could not find alcohol content on the label. Expected {}%.",
                form_abv
            ),
        ),
    }
}

/// Parse the operator's ABV, re-validating the 0-100 range
pub fn parse_form_abv(form_abv: &str) -> Result<f64, String> {
    let value: f64 = form_abv
        .trim()
        .parse()
        .map_err(|e| format!("Failed to parse alcohol content '{}': {}", form_abv, e))?;

    if !validate_abv(value) {
        return Err(format!("Alcohol content {} out of valid range (0-100)", value));
    }

    Ok(value)
}

/// Every distinct percentage in the text, in first-seen order
pub fn extract_percentages(text: &str) -> Vec<f64> {
    let text_lower = text.to_lowercase();
    let mut found: Vec<f64> = Vec::new();

    for pattern in ABV_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text_lower) {
            let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
                continue;
            };

            if validate_abv(value) && !found.contains(&value) {
                found.push(value);
            }
        }
    }

    found
}

/// Validate ABV is within 0-100 inclusive
pub fn validate_abv(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}
