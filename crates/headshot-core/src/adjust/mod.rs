//! The local adjustment pipeline.
//!
//! Applies the enhancement stages to an RGBA pixel buffer, strictly in
//! this order:
//! 1. Brightness/contrast
//! 2. Saturation
//! 3. Uniform blur
//! 4. Vignette
//!
//! The order matters: saturation reads the brightness/contrast-adjusted
//! channels, and blur and vignette are surface-level effects applied after
//! the per-pixel transforms.
//!
//! [`render`] is a pure function of `(original, settings)`. Every call
//! recomputes from the immutable original, never from a previous render,
//! so repeated renders with the same settings are bit-identical and
//! resetting the settings to zero reproduces the original exactly.

mod blur;
mod vignette;

pub use blur::uniform_blur;
pub use vignette::apply_vignette;

use crate::{AdjustmentSettings, PixelBuffer, SettingsError};

/// Reusable scratch space for the blur stage.
///
/// The blur's separable passes need an intermediate buffer the size of the
/// frame. Re-rendering happens on every slider tick, so the session keeps
/// one of these alive and reuses it whenever the frame dimensions match;
/// a size change triggers a reallocation.
#[derive(Debug, Default)]
pub struct RenderScratch {
    width: u32,
    height: u32,
    intermediate: Vec<f32>,
}

impl RenderScratch {
    /// Create an empty scratch; buffers are allocated on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the intermediate buffer sized for `width * height` RGBA
    /// pixels, reallocating only if the dimensions changed.
    pub(crate) fn intermediate_for(&mut self, width: u32, height: u32) -> &mut [f32] {
        let len = (width as usize) * (height as usize) * 4;
        if self.width != width || self.height != height {
            self.intermediate = vec![0.0; len];
            self.width = width;
            self.height = height;
        }
        &mut self.intermediate
    }
}

/// Render the enhanced buffer for the given settings.
///
/// Pure and deterministic: the output depends only on `original` and
/// `settings`. The original is never written to, and on error no buffer is
/// produced at all, so a caller holding a previous enhanced buffer keeps
/// it intact.
///
/// Stages whose parameter is zero are skipped entirely, which keeps
/// all-zero settings bit-identical to the original.
///
/// # Errors
///
/// Returns `SettingsError` if any parameter is outside its domain; see
/// [`AdjustmentSettings::validate`].
pub fn render(
    original: &PixelBuffer,
    settings: &AdjustmentSettings,
    scratch: &mut RenderScratch,
) -> Result<PixelBuffer, SettingsError> {
    settings.validate()?;

    let mut pixels = original.pixels.clone();

    if settings.brightness != 0 || settings.contrast != 0 {
        apply_brightness_contrast(&mut pixels, settings.brightness, settings.contrast);
    }

    if settings.saturation != 0 {
        apply_saturation(&mut pixels, settings.saturation);
    }

    if settings.blur > 0.0 {
        uniform_blur(
            &mut pixels,
            original.width,
            original.height,
            settings.blur,
            scratch,
        );
    }

    if settings.vignette > 0.0 {
        apply_vignette(&mut pixels, original.width, original.height, settings.vignette);
    }

    Ok(PixelBuffer::new(original.width, original.height, pixels))
}

/// Apply brightness and contrast in one pass (per RGB channel, alpha
/// untouched).
///
/// Formula: `v' = clamp(factor * ((v + brightness) - 128) + 128, 0, 255)`
/// with `factor = (259 * (contrast + 255)) / (255 * (259 - contrast))`.
/// Contrast is validated to [-100, 100] upstream, so the denominator never
/// reaches zero.
pub fn apply_brightness_contrast(pixels: &mut [u8], brightness: i32, contrast: i32) {
    let factor =
        (259.0 * (contrast as f32 + 255.0)) / (255.0 * (259.0 - contrast as f32));
    let brightness = brightness as f32;

    for chunk in pixels.chunks_exact_mut(4) {
        for channel in &mut chunk[..3] {
            let v = *channel as f32;
            let adjusted = factor * ((v + brightness) - 128.0) + 128.0;
            *channel = adjusted.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Apply saturation (per RGB channel, alpha untouched).
///
/// Each channel is pushed away from (or pulled toward) the pixel's
/// grayscale value: `channel' = clamp(gray + (channel - gray) * factor)`
/// with `factor = 1 + saturation / 100`. At -100 the factor is zero and
/// every pixel collapses to its grayscale value.
pub fn apply_saturation(pixels: &mut [u8], saturation: i32) {
    let factor = 1.0 + saturation as f32 / 100.0;

    for chunk in pixels.chunks_exact_mut(4) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        // ITU-R BT.601 luma weights
        let gray = 0.2989 * r + 0.5870 * g + 0.1140 * b;

        chunk[0] = (gray + (r - gray) * factor).round().clamp(0.0, 255.0) as u8;
        chunk[1] = (gray + (g - gray) * factor).round().clamp(0.0, 255.0) as u8;
        chunk[2] = (gray + (b - gray) * factor).round().clamp(0.0, 255.0) as u8;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
