use crate::models::config::{AppConfig, UploadConfig};
use crate::models::form::FormFields;
use crate::models::verdict::VerificationReport;
use crate::services::ocr::{
    LabelImage, OcrEngine, PreprocessingService, RecognitionError, RecognizedText,
};
use crate::services::verification::Verifier;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Whole-request failures; never mixed into a verdict list
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("OCR failed or no text found: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("Image rejected: {0}")]
    Image(String),
}

/// Image-to-verdicts service: preprocessing, recognition, verification
#[derive(Clone)]
pub struct LabelVerificationService {
    engine: Arc<dyn OcrEngine>,
    preprocessor: Arc<PreprocessingService>,
    verifier: Verifier,
    upload: UploadConfig,
}

impl LabelVerificationService {
    pub fn new(engine: Arc<dyn OcrEngine>, config: &AppConfig) -> Self {
        Self {
            engine,
            preprocessor: Arc::new(PreprocessingService::new(config.preprocessing.clone())),
            verifier: Verifier::new(config.matching.clone()),
            upload: config.upload.clone(),
        }
    }

    pub fn engine(&self) -> &Arc<dyn OcrEngine> {
        &self.engine
    }

    /// Recognize text from raw image bytes
    ///
    /// Preprocessing and the provider call block, so they run on the blocking
    /// thread pool.
    pub async fn recognize(&self, image: Vec<u8>) -> Result<RecognizedText, RecognitionError> {
        let engine = Arc::clone(&self.engine);
        let preprocessor = Arc::clone(&self.preprocessor);

        tokio::task::spawn_blocking(move || {
            let prepared = preprocessor.prepare(&image)?;
            engine.recognize(&prepared)
        })
        .await
        .map_err(|e| RecognitionError::EngineUnavailable(format!("Recognition task failed: {}", e)))?
    }

    /// Full run for one label image
    ///
    /// Recognition failure short-circuits before any field is verified.
    pub async fn verify_image(
        &self,
        image: Vec<u8>,
        form: &FormFields,
    ) -> Result<VerificationReport, PipelineError> {
        info!(provider = self.engine.name(), bytes = image.len(), "Verifying label image");

        let text = self.recognize(image).await.map_err(|e| {
            error!(error = %e, "Text recognition failed");
            PipelineError::Recognition(e)
        })?;

        let verdicts = self.verifier.verify(form, text.as_str());
        Ok(VerificationReport::new(verdicts, text.into_string()))
    }

    /// Validate an image file against the upload rules, then verify it
    pub async fn verify_file(
        &self,
        path: &Path,
        form: &FormFields,
    ) -> Result<VerificationReport, PipelineError> {
        let image = LabelImage::from_path(path, &self.upload).map_err(PipelineError::Image)?;
        info!(file = %image.file_name, "Label image accepted");
        self.verify_image(image.bytes, form).await
    }

    /// Verify already-recognized text, applying the same no-text guard
    pub fn verify_text(
        &self,
        text: &str,
        form: &FormFields,
    ) -> Result<VerificationReport, PipelineError> {
        let text = RecognizedText::from_raw(text)?;
        let verdicts = self.verifier.verify(form, text.as_str());
        Ok(VerificationReport::new(verdicts, text.into_string()))
    }
}
