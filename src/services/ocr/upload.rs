use crate::models::config::UploadConfig;
use std::fs;
use std::path::Path;

/// Uploaded label photograph that passed acceptance checks
#[derive(Debug, Clone, PartialEq)]
pub struct LabelImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl LabelImage {
    /// Validate an in-memory upload
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        rules: &UploadConfig,
    ) -> Result<Self, String> {
        let file_name = file_name.into();

        if !allowed_file(&file_name, rules) {
            return Err(format!(
                "Invalid file type '{}'. Allowed: {}",
                file_name,
                rules.allowed_extensions.join(", ")
            ));
        }

        if bytes.is_empty() {
            return Err(format!("Image file '{}' is empty", file_name));
        }

        if bytes.len() as u64 > rules.max_bytes {
            return Err(format!(
                "Image file '{}' is {} bytes, limit is {}",
                file_name,
                bytes.len(),
                rules.max_bytes
            ));
        }

        Ok(Self { file_name, bytes })
    }

    /// Read and validate an image from disk
    pub fn from_path(path: &Path, rules: &UploadConfig) -> Result<Self, String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Invalid image path: {:?}", path))?
            .to_string();

        if !allowed_file(&file_name, rules) {
            return Err(format!(
                "Invalid file type '{}'. Allowed: {}",
                file_name,
                rules.allowed_extensions.join(", ")
            ));
        }

        // Check size before reading the whole file
        let metadata = fs::metadata(path)
            .map_err(|e| format!("Image file not found: {:?} ({})", path, e))?;
        if metadata.len() > rules.max_bytes {
            return Err(format!(
                "Image file '{}' is {} bytes, limit is {}",
                file_name,
                metadata.len(),
                rules.max_bytes
            ));
        }

        let bytes = fs::read(path).map_err(|e| format!("Failed to read image file: {}", e))?;
        Self::from_bytes(file_name, bytes, rules)
    }
}

/// Extension check, case-insensitive
pub fn allowed_file(file_name: &str, rules: &UploadConfig) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => rules
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}
