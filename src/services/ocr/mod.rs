pub mod engine;
pub mod http_ocr;
pub mod preprocessing;
pub mod tesseract;
pub mod upload;

// Re-export main types
pub use engine::{OcrEngine, RecognitionError, RecognizedText};
pub use http_ocr::HttpOcrClient;
pub use preprocessing::PreprocessingService;
pub use tesseract::TesseractEngine;
pub use upload::LabelImage;

use crate::models::config::{OcrConfig, OcrProvider};
use std::sync::Arc;

/// Build the configured recognition provider
pub fn build_engine(config: &OcrConfig) -> Result<Arc<dyn OcrEngine>, RecognitionError> {
    match config.provider {
        OcrProvider::Http => Ok(Arc::new(HttpOcrClient::new(config.http.clone())?)),
        OcrProvider::Tesseract => Ok(Arc::new(TesseractEngine::new(config.tesseract.clone()))),
    }
}
