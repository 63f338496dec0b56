use crate::services::verification::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Text-recognition provider choice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OcrProvider {
    /// OCR server reached over HTTP
    Http,
    /// Local tesseract binary
    Tesseract,
}

impl Default for OcrProvider {
    fn default() -> Self {
        Self::Http
    }
}

/// HTTP OCR server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpOcrConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Boxes scoring below this are dropped when the server returns no raw text
    pub min_confidence: f64,
}

impl Default for HttpOcrConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:39835".to_string(),
            timeout_secs: 30,
            min_confidence: 0.3,
        }
    }
}

/// Tesseract binary settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TesseractConfig {
    pub binary_path: String,
    pub lang: String,
    /// OCR engine mode (3 = legacy + LSTM)
    pub oem: u8,
    /// Page segmentation mode (6 = single uniform block of text)
    pub psm: u8,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        let binary_path = if cfg!(target_os = "windows") {
            "C:/Program Files/Tesseract-OCR/tesseract.exe"
        } else if cfg!(target_os = "macos") {
            "tesseract"
        } else {
            "/usr/bin/tesseract"
        };

        Self {
            binary_path: binary_path.to_string(),
            lang: "eng".to_string(),
            oem: 3,
            psm: 6,
        }
    }
}

/// OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OcrConfig {
    #[serde(default)]
    pub provider: OcrProvider,
    #[serde(default)]
    pub http: HttpOcrConfig,
    #[serde(default)]
    pub tesseract: TesseractConfig,
}

/// Image preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreprocessingConfig {
    pub enabled: bool,
    /// Images with a side shorter than this are upscaled
    pub min_dimension: u32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_dimension: 1000,
        }
    }
}

/// Upload acceptance rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    pub max_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 16 * 1024 * 1024,
            allowed_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

/// Matching thresholds and tolerances used by the verifiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    pub default_threshold: f64,
    pub brand_threshold: f64,
    pub product_type_threshold: f64,
    /// Allowed ABV difference, in percentage points
    pub abv_tolerance: f64,
    /// Allowed volume difference (exclusive), in the label's unit
    pub volume_tolerance: f64,
    /// Statutory phrases required for a complete government warning
    pub warning_min_phrases: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            brand_threshold: 0.85,
            product_type_threshold: 0.75,
            abv_tolerance: 0.5,
            volume_tolerance: 1.0,
            warning_min_phrases: 2,
        }
    }
}

impl MatchingConfig {
    /// Validate thresholds are ratios and tolerances are non-negative
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("default_threshold", self.default_threshold),
            ("brand_threshold", self.brand_threshold),
            ("product_type_threshold", self.product_type_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within 0.0-1.0, got {}", name, value));
            }
        }

        if self.abv_tolerance < 0.0 || self.volume_tolerance < 0.0 {
            return Err("Tolerances must not be negative".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub preprocessing: PreprocessingConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.matching.validate()?;

        if self.upload.allowed_extensions.is_empty() {
            return Err("At least one upload extension must be allowed".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_default_when_absent() {
        let config: AppConfig = serde_json::from_str(r#"{ "logging": { "level": "warn", "json": false } }"#)
            .expect("missing sections should take defaults");
        assert_eq!(config.ocr, OcrConfig::default());
        assert_eq!(config.logging.level, "warn");

        let config: AppConfig = serde_json::from_str(r#"{ "ocr": { "tesseract": { "binary_path": "/usr/bin/tesseract", "lang": "eng", "oem": 1, "psm": 3 } } }"#)
            .expect("provider should default");
        assert_eq!(config.ocr.provider, OcrProvider::Http);
        assert_eq!(config.ocr.tesseract.oem, 1);

        assert_eq!(serde_json::from_str::<AppConfig>("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        // OCR config
        assert_eq!(config.ocr.provider, OcrProvider::Http);
        assert_eq!(config.ocr.tesseract.oem, 3);
        assert_eq!(config.ocr.tesseract.psm, 6);

        // Upload config
        assert_eq!(config.upload.max_bytes, 16 * 1024 * 1024);
        assert!(config.upload.allowed_extensions.contains(&"jpeg".to_string()));

        // Matching config
        assert_eq!(config.matching.default_threshold, 0.8);
        assert_eq!(config.matching.brand_threshold, 0.85);
        assert_eq!(config.matching.product_type_threshold, 0.75);
        assert_eq!(config.matching.abv_tolerance, 0.5);
        assert_eq!(config.matching.warning_min_phrases, 2);

        assert_eq!(config.preprocessing.min_dimension, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();

        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "ocr": { "provider": "tesseract" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.ocr.provider, OcrProvider::Tesseract);
        assert_eq!(config.ocr.http, HttpOcrConfig::default());
        assert_eq!(config.matching, MatchingConfig::default());
    }

    #[test]
    fn test_provider_serialization() {
        assert_eq!(serde_json::to_string(&OcrProvider::Http).unwrap(), "\"http\"");
        assert_eq!(serde_json::to_string(&OcrProvider::Tesseract).unwrap(), "\"tesseract\"");
    }

    #[test]
    fn test_matching_validate_rejects_bad_threshold() {
        let mut matching = MatchingConfig::default();
        matching.brand_threshold = 1.5;
        assert!(matching.validate().is_err(), "Threshold above 1.0 should be rejected");

        let mut matching = MatchingConfig::default();
        matching.abv_tolerance = -0.1;
        assert!(matching.validate().is_err(), "Negative tolerance should be rejected");
    }

    #[test]
    fn test_validate_requires_extension() {
        let mut config = AppConfig::default();
        config.upload.allowed_extensions.clear();
        assert!(config.validate().is_err());
    }
}
