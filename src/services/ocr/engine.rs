use thiserror::Error;

/// Fewer non-whitespace characters than this counts as "no text found"
pub const MIN_TEXT_CHARS: usize = 5;

/// Why text recognition produced nothing usable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecognitionError {
    #[error("OCR provider unreachable: {0}")]
    Unreachable(String),

    #[error("OCR provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("invalid OCR provider response: {0}")]
    InvalidResponse(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("OCR engine exited with {}: {message}", exit_label(.code))]
    EngineFailed { code: Option<i32>, message: String },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("no readable text found on the image")]
    NoTextFound,
}

fn exit_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

/// Text recovered from a label image, known to be non-trivial
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText(String);

impl RecognizedText {
    /// Accept provider output, turning empty output and legacy string
    /// sentinels into typed failures
    pub fn from_raw(raw: impl Into<String>) -> Result<Self, RecognitionError> {
        let raw = raw.into();
        let trimmed = raw.trim_start();

        if let Some(reason) = trimmed.strip_prefix("ERROR:") {
            return Err(RecognitionError::InvalidResponse(reason.trim().to_string()));
        }

        if trimmed.starts_with("No readable text") {
            return Err(RecognitionError::NoTextFound);
        }

        let visible = raw.chars().filter(|c| !c.is_whitespace()).count();
        if visible < MIN_TEXT_CHARS {
            return Err(RecognitionError::NoTextFound);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Text-recognition provider abstraction
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an encoded image (PNG or JPEG bytes)
    fn recognize(&self, image: &[u8]) -> Result<RecognizedText, RecognitionError>;

    /// Check the provider is reachable / installed
    fn health_check(&self) -> Result<String, RecognitionError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}
