use super::engine::{OcrEngine, RecognitionError, RecognizedText};
use crate::models::config::TesseractConfig;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Tesseract OCR engine driven through its command-line binary
pub struct TesseractEngine {
    config: TesseractConfig,
}

impl TesseractEngine {
    /// Create a new engine; the binary is only looked up on use
    pub fn new(config: TesseractConfig) -> Self {
        Self { config }
    }

    /// Arguments for reading an image from stdin and writing text to stdout
    fn recognize_args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.config.lang.clone(),
            "--oem".to_string(),
            self.config.oem.to_string(),
            "--psm".to_string(),
            self.config.psm.to_string(),
        ]
    }

    fn unavailable(&self, e: std::io::Error) -> RecognitionError {
        RecognitionError::EngineUnavailable(format!(
            "Tesseract not found at '{}': {}",
            self.config.binary_path, e
        ))
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8]) -> Result<RecognizedText, RecognitionError> {
        info!(binary = %self.config.binary_path, bytes = image.len(), "Starting tesseract");

        let mut child = Command::new(&self.config.binary_path)
            .args(self.recognize_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(e))?;

        // Feed the image and close stdin so tesseract starts processing
        let fed = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(image)
                .map_err(|e| format!("Failed to send image to tesseract: {}", e)),
            None => Err("Failed to open tesseract stdin".to_string()),
        };
        if let Err(reason) = fed {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RecognitionError::EngineUnavailable(reason));
        }

        let output = child.wait_with_output().map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RecognitionError::EngineFailed {
                code: output.status.code(),
                message: stderr,
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "Tesseract returned text");

        RecognizedText::from_raw(text)
    }

    fn health_check(&self) -> Result<String, RecognitionError> {
        let output = Command::new(&self.config.binary_path)
            .arg("--version")
            .output()
            .map_err(|e| self.unavailable(e))?;

        // Older releases print the version banner on stderr
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        let version = banner.lines().next().unwrap_or("tesseract").trim().to_string();
        info!(version = %version, "Tesseract version");
        Ok(version)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_args() {
        let engine = TesseractEngine::new(TesseractConfig::default());
        assert_eq!(
            engine.recognize_args(),
            vec!["stdin", "stdout", "-l", "eng", "--oem", "3", "--psm", "6"]
        );
    }

    #[test]
    fn test_recognize_args_custom_lang() {
        let engine = TesseractEngine::new(TesseractConfig {
            lang: "eng+fra".to_string(),
            psm: 4,
            ..TesseractConfig::default()
        });
        let args = engine.recognize_args();
        assert!(args.contains(&"eng+fra".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("4"));
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let engine = TesseractEngine::new(TesseractConfig {
            binary_path: "/nonexistent/path/to/tesseract".to_string(),
            ..TesseractConfig::default()
        });

        assert!(matches!(
            engine.recognize(b"png bytes"),
            Err(RecognitionError::EngineUnavailable(_))
        ));
        assert!(matches!(
            engine.health_check(),
            Err(RecognitionError::EngineUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_binary_keeps_exit_code() {
        // `false` reads nothing and exits 1, so the write may also fail early
        let engine = TesseractEngine::new(TesseractConfig {
            binary_path: "false".to_string(),
            ..TesseractConfig::default()
        });

        match engine.recognize(&vec![0u8; 1 << 20]) {
            Err(RecognitionError::EngineFailed { code, .. }) => assert_eq!(code, Some(1)),
            Err(RecognitionError::EngineUnavailable(reason)) => {
                assert!(reason.starts_with("Failed to send image"), "Unexpected: {}", reason)
            }
            other => panic!("Expected engine failure, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_failed_message_keeps_full_code() {
        let err = RecognitionError::EngineFailed {
            code: Some(70000),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "OCR engine exited with code 70000: boom");

        let signalled = RecognitionError::EngineFailed { code: None, message: String::new() };
        assert!(signalled.to_string().contains("a signal"));
    }

    #[test]
    #[ignore] // Requires tesseract installed on the system
    fn test_health_check_with_installed_binary() {
        let engine = TesseractEngine::new(TesseractConfig::default());
        let version = engine.health_check().expect("tesseract should be installed");
        assert!(version.to_lowercase().contains("tesseract"));
    }
}
