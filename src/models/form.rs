use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Fields a verdict can be reported for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldName {
    #[serde(rename = "Brand Name")]
    BrandName,
    #[serde(rename = "Product Class/Type")]
    ProductType,
    #[serde(rename = "Alcohol Content")]
    AlcoholContent,
    #[serde(rename = "Net Contents")]
    NetContents,
    #[serde(rename = "Government Warning")]
    GovernmentWarning,
}

impl FieldName {
    /// Human-readable label shown next to a verdict
    pub fn label(&self) -> &'static str {
        match self {
            Self::BrandName => "Brand Name",
            Self::ProductType => "Product Class/Type",
            Self::AlcoholContent => "Alcohol Content",
            Self::NetContents => "Net Contents",
            Self::GovernmentWarning => "Government Warning",
        }
    }

    /// Key used in the submitted form mapping
    pub fn form_key(&self) -> &'static str {
        match self {
            Self::BrandName => "brand_name",
            Self::ProductType => "product_type",
            Self::AlcoholContent => "alcohol_content",
            Self::NetContents => "net_contents",
            Self::GovernmentWarning => "government_warning",
        }
    }

    /// Fields whose form value is mandatory
    pub fn is_required(&self) -> bool {
        matches!(self, Self::BrandName | Self::ProductType | Self::AlcoholContent)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form contract violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("required form field '{0}' is missing or empty")]
    MissingField(&'static str),
}

/// Operator-entered application data for one label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormFields {
    pub brand_name: String,
    pub product_type: String,
    /// Alcohol by volume as typed by the operator, e.g. "45" or "12.5"
    pub alcohol_content: String,
    #[serde(default)]
    pub net_contents: Option<String>,
}

impl FormFields {
    pub fn new(
        brand_name: impl Into<String>,
        product_type: impl Into<String>,
        alcohol_content: impl Into<String>,
        net_contents: Option<String>,
    ) -> Self {
        Self {
            brand_name: brand_name.into(),
            product_type: product_type.into(),
            alcohol_content: alcohol_content.into(),
            net_contents,
        }
    }

    /// Build from a raw field-name -> value mapping (e.g. submitted form data)
    ///
    /// Unknown keys are ignored. A blank `net_contents` is treated as absent.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, FormError> {
        let required = |field: FieldName| -> Result<String, FormError> {
            map.get(field.form_key())
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or(FormError::MissingField(field.form_key()))
        };

        Ok(Self {
            brand_name: required(FieldName::BrandName)?,
            product_type: required(FieldName::ProductType)?,
            alcohol_content: required(FieldName::AlcoholContent)?,
            net_contents: map
                .get(FieldName::NetContents.form_key())
                .filter(|v| !v.trim().is_empty())
                .cloned(),
        })
    }

    /// Net contents if the operator supplied a non-blank value
    pub fn net_contents(&self) -> Option<&str> {
        self.net_contents
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_map_all_fields() {
        let map = form_map(&[
            ("brand_name", "Old Tom Distillery"),
            ("product_type", "Kentucky Straight Bourbon Whiskey"),
            ("alcohol_content", "45"),
            ("net_contents", "750 mL"),
        ]);

        let form = FormFields::from_map(&map).expect("complete form should parse");
        assert_eq!(form.brand_name, "Old Tom Distillery");
        assert_eq!(form.alcohol_content, "45");
        assert_eq!(form.net_contents(), Some("750 mL"));
    }

    #[test]
    fn test_from_map_blank_net_contents_is_absent() {
        let map = form_map(&[
            ("brand_name", "Acme"),
            ("product_type", "Vodka"),
            ("alcohol_content", "40"),
            ("net_contents", "   "),
        ]);

        let form = FormFields::from_map(&map).unwrap();
        assert_eq!(form.net_contents, None);
        assert_eq!(form.net_contents(), None);
    }

    #[test]
    fn test_from_map_missing_required_field() {
        let map = form_map(&[("brand_name", "Acme"), ("alcohol_content", "40")]);

        let result = FormFields::from_map(&map);
        assert_eq!(result, Err(FormError::MissingField("product_type")));
    }

    #[test]
    fn test_from_map_ignores_unknown_keys() {
        let map = form_map(&[
            ("brand_name", "Acme"),
            ("product_type", "Vodka"),
            ("alcohol_content", "40"),
            ("csrf_token", "xyz"),
        ]);

        assert!(FormFields::from_map(&map).is_ok());
    }

    #[test]
    fn test_net_contents_accessor_filters_whitespace() {
        let form = FormFields::new("Acme", "Vodka", "40", Some(" ".to_string()));
        assert_eq!(form.net_contents(), None, "Whitespace-only value should count as absent");
    }

    #[test]
    fn test_field_name_serialization() {
        assert_eq!(
            serde_json::to_string(&FieldName::ProductType).unwrap(),
            "\"Product Class/Type\""
        );
        assert_eq!(FieldName::GovernmentWarning.to_string(), "Government Warning");
        assert!(FieldName::AlcoholContent.is_required());
        assert!(!FieldName::NetContents.is_required());
    }
}
