//! Headshot Core - Image processing library
//!
//! This crate provides the core image processing functionality for Headshot:
//! decoding an uploaded photo, cropping it to a headshot frame, and running
//! the local adjustment pipeline (brightness/contrast, saturation, uniform
//! blur, vignette).

pub mod adjust;
pub mod decode;
pub mod encode;
pub mod prepare;
pub mod provider;
pub mod session;

pub use adjust::{render, RenderScratch};
pub use prepare::{compute_crop_geometry, prepare, CropGeometry, FramePreset};
pub use session::{EditSession, SessionState, SubmissionId};

use thiserror::Error;

/// Adjustment parameters for the local enhancement pipeline.
///
/// All values default to zero, which is the identity transform: rendering
/// with default settings reproduces the source buffer bit for bit.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentSettings {
    /// Brightness offset (-255 to 255; the UI exposes -100 to 100)
    pub brightness: i32,
    /// Contrast (-100 to 100)
    pub contrast: i32,
    /// Saturation (-100 to 100)
    pub saturation: i32,
    /// Uniform blur radius in pixels (0 = off)
    pub blur: f32,
    /// Vignette strength (0 to 100)
    pub vignette: f32,
}

/// Error for adjustment parameters outside their declared domain.
///
/// The contrast bound is load-bearing: the contrast factor formula divides
/// by `259 - contrast`, so 259 must be unreachable.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("brightness {0} outside [-255, 255]")]
    Brightness(i32),

    #[error("contrast {0} outside [-100, 100]")]
    Contrast(i32),

    #[error("saturation {0} outside [-100, 100]")]
    Saturation(i32),

    #[error("blur radius {0} must be finite and >= 0")]
    Blur(f32),

    #[error("vignette {0} outside [0, 100]")]
    Vignette(f32),
}

impl AdjustmentSettings {
    /// Create new settings with default (identity) values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Check every parameter against its declared domain.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(-255..=255).contains(&self.brightness) {
            return Err(SettingsError::Brightness(self.brightness));
        }
        if !(-100..=100).contains(&self.contrast) {
            return Err(SettingsError::Contrast(self.contrast));
        }
        if !(-100..=100).contains(&self.saturation) {
            return Err(SettingsError::Saturation(self.saturation));
        }
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(SettingsError::Blur(self.blur));
        }
        if !self.vignette.is_finite() || !(0.0..=100.0).contains(&self.vignette) {
            return Err(SettingsError::Vignette(self.vignette));
        }
        Ok(())
    }
}

/// A flat RGBA8 pixel buffer in row-major order.
///
/// Length is always `width * height * 4`. Two named instances exist per
/// session: the immutable original produced by the frame preparer, and the
/// enhanced buffer recomputed from it on every settings change.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid buffer.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
