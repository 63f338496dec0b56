use super::engine::{OcrEngine, RecognitionError, RecognizedText};
use crate::models::config::HttpOcrConfig;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP OCR client that communicates with an OCR server
pub struct HttpOcrClient {
    client: reqwest::blocking::Client,
    config: HttpOcrConfig,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

/// Single text box with bounding box coordinates
#[derive(Deserialize, Clone, Debug)]
struct TextBox {
    #[serde(rename = "box", default)]
    bbox: Vec<Vec<f64>>, // 4 corner points [[x1,y1], [x2,y2], [x3,y3], [x4,y4]]
    text: String,
    #[serde(default = "full_score")]
    score: f64,
}

fn full_score() -> f64 {
    1.0
}

/// OCR response from the server
#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    boxes: Vec<TextBox>,
    #[serde(default)]
    raw_text: String,
}

impl TextBox {
    /// Top edge (smallest y) of the box
    fn top_y(&self) -> f64 {
        self.bbox
            .iter()
            .filter_map(|p| p.get(1).copied())
            .fold(f64::INFINITY, f64::min)
    }

    /// Leftmost x-coordinate
    fn left_x(&self) -> f64 {
        self.bbox
            .iter()
            .filter_map(|p| p.first().copied())
            .fold(f64::INFINITY, f64::min)
    }
}

impl HttpOcrClient {
    /// Create a new HTTP OCR client from explicit settings
    pub fn new(config: HttpOcrConfig) -> Result<Self, RecognitionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RecognitionError::EngineUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Turn a server response into label text
    ///
    /// Prefers the server's raw text; otherwise keeps confident boxes and joins
    /// them top-to-bottom, left-to-right, one per line.
    fn process_response(data: OcrResponse, min_confidence: f64) -> String {
        if !data.raw_text.trim().is_empty() {
            return data.raw_text;
        }

        let mut boxes: Vec<TextBox> = data
            .boxes
            .into_iter()
            .filter(|b| b.score >= min_confidence && !b.text.trim().is_empty())
            .collect();

        boxes.sort_by(|a, b| {
            a.top_y()
                .partial_cmp(&b.top_y())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.left_x().partial_cmp(&b.left_x()).unwrap_or(std::cmp::Ordering::Equal))
        });

        boxes.iter().map(|b| b.text.as_str()).collect::<Vec<_>>().join("\n")
    }

    fn send_error(e: reqwest::Error) -> RecognitionError {
        if e.is_connect() || e.is_timeout() {
            RecognitionError::Unreachable(e.to_string())
        } else {
            RecognitionError::InvalidResponse(format!("Request failed: {}", e))
        }
    }
}

impl OcrEngine for HttpOcrClient {
    fn recognize(&self, image: &[u8]) -> Result<RecognizedText, RecognitionError> {
        let url = format!("{}/ocr", self.base_url());
        info!(url = %url, bytes = image.len(), "Sending image to OCR server");

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest {
                image_base64: general_purpose::STANDARD.encode(image),
            })
            .send()
            .map_err(Self::send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecognitionError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let data: OcrResponse = response
            .json()
            .map_err(|e| RecognitionError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = Self::process_response(data, self.config.min_confidence);
        debug!(chars = text.len(), "OCR server returned text");

        RecognizedText::from_raw(text)
    }

    fn health_check(&self) -> Result<String, RecognitionError> {
        let url = format!("{}/health", self.base_url());
        let response = self.client.get(&url).send().map_err(Self::send_error)?;

        if !response.status().is_success() {
            return Err(RecognitionError::Provider {
                status: response.status().as_u16(),
                message: "Health check failed".to_string(),
            });
        }

        Ok(format!("OCR server healthy at {}", self.base_url()))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
