use super::engine::RecognitionError;
use crate::models::config::PreprocessingConfig;
use image::{DynamicImage, GenericImageView};
use tracing::{info, warn};

/// Image preparation ahead of text recognition
pub struct PreprocessingService {
    config: PreprocessingConfig,
}

impl PreprocessingService {
    /// Create a new preprocessing service with custom configuration
    pub fn new(config: PreprocessingConfig) -> Self {
        Self { config }
    }

    /// Decode → RGB → upscale small images → PNG bytes
    pub fn prepare(&self, bytes: &[u8]) -> Result<Vec<u8>, RecognitionError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| RecognitionError::InvalidImage(format!("Failed to decode image: {}", e)))?;

        let (width, height) = image.dimensions();
        info!(width, height, "Image opened successfully");

        let prepared = if self.config.enabled {
            self.upscale(&self.to_rgb(&image))
        } else {
            image
        };

        Self::encode_png(&prepared)
    }

    /// Convert to 8-bit RGB
    pub fn to_rgb(&self, image: &DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgb8(image.to_rgb8())
    }

    /// Scale up so neither side is below `min_dimension`, keeping aspect ratio
    pub fn upscale(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        let min_dimension = self.config.min_dimension;

        if width == 0 || height == 0 || (width >= min_dimension && height >= min_dimension) {
            return image.clone();
        }

        let factor = f64::max(
            min_dimension as f64 / width as f64,
            min_dimension as f64 / height as f64,
        );
        let new_width = (width as f64 * factor) as u32;
        let new_height = (height as f64 * factor) as u32;
        info!(new_width, new_height, "Image resized");

        image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
    }

    /// Encode image to PNG bytes
    pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, RecognitionError> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| {
                warn!(error = %e, "Failed to encode image");
                RecognitionError::InvalidImage(format!("Failed to encode image: {}", e))
            })?;
        Ok(buffer)
    }
}
