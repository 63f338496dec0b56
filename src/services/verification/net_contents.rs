use super::normalizer::normalize;
use crate::models::form::FieldName;
use crate::models::verdict::Verdict;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

/// Volume patterns, applied to the lower-cased label text
static VOLUME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+\.?\d*)\s*(ml|milliliter|millilitre)",
        r"(\d+\.?\d*)\s*(l|liter|litre)",
        r"(\d+\.?\d*)\s*(oz|ounce)",
        r"(\d+\.?\d*)\s*(fl\s*oz|fluid\s*ounce)",
        r"(\d+\.?\d*)\s*(cl|centiliter)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("volume pattern should compile"))
    .collect()
});

/// Leading number followed by a unit word in the operator's value
static FORM_VOLUME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.?\d*)\s*([a-z]+)").expect("form volume pattern should compile"));

/// A number with the unit it was written in
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub amount: f64,
    /// Unit as written, lower-cased with inner spaces removed ("fl oz" -> "floz")
    pub unit: String,
}

impl Volume {
    /// Same quantity within `tolerance` (exclusive), with compatible unit spellings
    pub fn is_equivalent(&self, other: &Volume, tolerance: f64) -> bool {
        let units_match = self.unit == other.unit
            || self.unit.contains(other.unit.as_str())
            || other.unit.contains(self.unit.as_str());

        units_match && (self.amount - other.amount).abs() < tolerance
    }
}

/// Check the label states the operator's net contents
///
/// Returns `None` when no net contents were supplied. Never reports
/// `mismatch`: unit OCR noise is common, so an unresolved comparison is
/// inconclusive (`not_found`) rather than contradictory.
pub fn verify_net_contents(form_contents: Option<&str>, text: &str, tolerance: f64) -> Option<Verdict> {
    let form_contents = form_contents.filter(|v| !v.trim().is_empty())?;
    info!(net_contents = form_contents, "Verifying net contents");

    let form_normalized = normalize(form_contents);
    let found_message = format!("Net contents '{}' found on the label.", form_contents);

    if normalize(text).contains(&form_normalized) {
        return Some(Verdict::matched(FieldName::NetContents, found_message));
    }

    if let Some(expected) = parse_form_volume(&form_normalized) {
        let candidates = extract_volumes(text);
        debug!(?expected, ?candidates, "Comparing volumes");

        if candidates.iter().any(|found| expected.is_equivalent(found, tolerance)) {
            return Some(Verdict::matched(FieldName::NetContents, found_message));
        }
    }

    Some(Verdict::not_found(
        FieldName::NetContents,
        format!("Net contents '{}' not clearly found on the label.", form_contents),
    ))
}

/// Parse "750 ml" style input (expects normalized text)
pub fn parse_form_volume(form_normalized: &str) -> Option<Volume> {
    let caps = FORM_VOLUME.captures(form_normalized)?;
    let amount = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_string();

    Some(Volume { amount, unit })
}

/// Every volume mention in the text, grouped by unit pattern
pub fn extract_volumes(text: &str) -> Vec<Volume> {
    let text_lower = text.to_lowercase();
    let mut volumes = Vec::new();

    for pattern in VOLUME_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text_lower) {
            let (Some(amount), Some(unit)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            if let Ok(amount) = amount.as_str().parse::<f64>() {
                volumes.push(Volume {
                    amount,
                    unit: unit.as_str().split_whitespace().collect(),
                });
            }
        }
    }

    volumes
}
