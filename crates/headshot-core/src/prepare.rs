//! Frame preparation: crop an uploaded photo to the headshot aspect ratio.
//!
//! The preparer selects a crop window in the source image that matches the
//! target aspect ratio, then resamples it to the exact target dimensions.
//! Wider-than-target sources are cropped horizontally and centered; taller
//! sources are cropped vertically with the window shifted toward the top,
//! since headshots favor keeping the head near the top of the frame rather
//! than perfectly centered.
//!
//! Resampling defaults to bilinear (`FilterType::Bilinear`): visually
//! adequate for slider-speed preview re-renders, and what the crop tests
//! assume. Lanczos3 is available for export-quality paths.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{FilterType, RasterImage};
use crate::PixelBuffer;

/// Errors that can occur while preparing a frame.
#[derive(Debug, Error, PartialEq)]
pub enum PrepareError {
    /// Source or target width/height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the image dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Output frame presets, one per presentation mode.
///
/// Each preset carries its target dimensions and the crop bias factor: the
/// fraction of the leftover height by which the crop window is shifted
/// toward the top when the source is taller than the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FramePreset {
    /// Portrait headshot, 1024x1536 (2:3), quarter bias.
    #[default]
    Portrait,
    /// Square avatar, 800x800, third bias.
    Square,
}

impl FramePreset {
    /// Target output width in pixels.
    pub fn target_width(self) -> u32 {
        match self {
            FramePreset::Portrait => 1024,
            FramePreset::Square => 800,
        }
    }

    /// Target output height in pixels.
    pub fn target_height(self) -> u32 {
        match self {
            FramePreset::Portrait => 1536,
            FramePreset::Square => 800,
        }
    }

    /// Top-bias factor for taller-than-target sources.
    pub fn bias(self) -> f64 {
        match self {
            FramePreset::Portrait => 0.25,
            FramePreset::Square => 1.0 / 3.0,
        }
    }
}

/// The crop window selected in a source image, before resampling.
///
/// Derived per image from its natural dimensions and the target aspect
/// ratio; never stored. Source coordinates are fractional - rounding to
/// whole pixels happens at resampling time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropGeometry {
    /// Horizontal offset of the crop window in the source, in pixels.
    pub source_x: f64,
    /// Vertical offset of the crop window in the source, in pixels.
    pub source_y: f64,
    /// Crop window width in source pixels.
    pub source_width: f64,
    /// Crop window height in source pixels.
    pub source_height: f64,
    /// Output width in pixels.
    pub target_width: u32,
    /// Output height in pixels.
    pub target_height: u32,
}

/// Compute the crop window for a source image and target frame.
///
/// # Arguments
///
/// * `src_width`, `src_height` - Natural dimensions of the source image
/// * `target_width`, `target_height` - Output frame dimensions
/// * `bias` - Top-bias factor for taller sources, clamped to [0.0, 0.5]
///   (0.0 = pinned to the top edge, 0.5 = vertically centered)
///
/// # Algorithm
///
/// If the source is relatively wider than the target, the crop uses the
/// full source height and a centered horizontal window. Otherwise the crop
/// uses the full source width and a vertical window offset by
/// `(src_height - crop_height) * bias`.
///
/// # Errors
///
/// Returns `PrepareError::InvalidDimensions` if any dimension is zero.
pub fn compute_crop_geometry(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
    bias: f64,
) -> Result<CropGeometry, PrepareError> {
    if src_width == 0 || src_height == 0 {
        return Err(PrepareError::InvalidDimensions {
            width: src_width,
            height: src_height,
        });
    }
    if target_width == 0 || target_height == 0 {
        return Err(PrepareError::InvalidDimensions {
            width: target_width,
            height: target_height,
        });
    }

    let bias = bias.clamp(0.0, 0.5);
    let src_w = src_width as f64;
    let src_h = src_height as f64;
    let target_aspect = target_width as f64 / target_height as f64;
    let source_aspect = src_w / src_h;

    let (source_x, source_y, source_width, source_height) = if source_aspect > target_aspect {
        // Source relatively wider: full height, centered horizontal window
        let crop_h = src_h;
        let crop_w = src_h * target_aspect;
        ((src_w - crop_w) / 2.0, 0.0, crop_w, crop_h)
    } else {
        // Source relatively taller (or equal): full width, top-biased window
        let crop_w = src_w;
        let crop_h = src_w / target_aspect;
        let offset_y = ((src_h - crop_h) * bias).max(0.0);
        (0.0, offset_y, crop_w, crop_h)
    };

    Ok(CropGeometry {
        source_x,
        source_y,
        source_width,
        source_height,
        target_width,
        target_height,
    })
}

/// Prepare an uploaded image for editing: crop to the preset's aspect
/// ratio and resample to its exact target dimensions.
///
/// This runs once per upload and produces the immutable original buffer
/// that every adjustment render starts from.
///
/// # Errors
///
/// Returns `PrepareError::InvalidDimensions` for a zero-sized source,
/// `PrepareError::InvalidPixelData` if the raster's buffer doesn't match
/// its dimensions.
pub fn prepare(
    image: &RasterImage,
    preset: FramePreset,
    filter: FilterType,
) -> Result<PixelBuffer, PrepareError> {
    prepare_to_target(
        image,
        preset.target_width(),
        preset.target_height(),
        preset.bias(),
        filter,
    )
}

/// Prepare an uploaded image for an explicit target frame.
///
/// Same contract as [`prepare`], with the frame given directly instead of
/// through a preset.
pub fn prepare_to_target(
    image: &RasterImage,
    target_width: u32,
    target_height: u32,
    bias: f64,
    filter: FilterType,
) -> Result<PixelBuffer, PrepareError> {
    let geometry = compute_crop_geometry(
        image.width,
        image.height,
        target_width,
        target_height,
        bias,
    )?;

    let rgba = image
        .to_rgba_image()
        .ok_or(PrepareError::InvalidPixelData {
            expected: (image.width as usize) * (image.height as usize) * 4,
            actual: image.pixels.len(),
        })?;

    // Round the fractional window to whole pixels, clamped into bounds
    let crop_x = (geometry.source_x.round() as u32).min(image.width.saturating_sub(1));
    let crop_y = (geometry.source_y.round() as u32).min(image.height.saturating_sub(1));
    let crop_w = (geometry.source_width.round() as u32)
        .min(image.width - crop_x)
        .max(1);
    let crop_h = (geometry.source_height.round() as u32)
        .min(image.height - crop_y)
        .max(1);

    let cropped = image::imageops::crop_imm(&rgba, crop_x, crop_y, crop_w, crop_h).to_image();
    let resampled = image::imageops::resize(
        &cropped,
        target_width,
        target_height,
        filter.to_image_filter(),
    );

    Ok(PixelBuffer::from_rgba_image(resampled))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=4000, 1u32..=4000)
    }

    proptest! {
        /// Property: the crop window always lies within the source image.
        #[test]
        fn prop_crop_within_source(
            (src_w, src_h) in dimensions_strategy(),
            bias in 0.0f64..=0.5,
        ) {
            let geo = compute_crop_geometry(src_w, src_h, 1024, 1536, bias).unwrap();

            prop_assert!(geo.source_x >= 0.0);
            prop_assert!(geo.source_y >= 0.0);
            prop_assert!(geo.source_x + geo.source_width <= src_w as f64 + 1e-6);
            prop_assert!(geo.source_y + geo.source_height <= src_h as f64 + 1e-6);
        }

        /// Property: the crop window matches the target aspect ratio.
        #[test]
        fn prop_crop_matches_target_aspect(
            (src_w, src_h) in dimensions_strategy(),
        ) {
            let geo = compute_crop_geometry(src_w, src_h, 1024, 1536, 0.25).unwrap();

            let crop_aspect = geo.source_width / geo.source_height;
            let target_aspect = 1024.0 / 1536.0;
            prop_assert!((crop_aspect - target_aspect).abs() < 1e-6);
        }

        /// Property: one crop dimension always spans the full source.
        #[test]
        fn prop_one_dimension_spans_source(
            (src_w, src_h) in dimensions_strategy(),
        ) {
            let geo = compute_crop_geometry(src_w, src_h, 800, 800, 1.0 / 3.0).unwrap();

            let full_width = (geo.source_width - src_w as f64).abs() < 1e-6;
            let full_height = (geo.source_height - src_h as f64).abs() < 1e-6;
            prop_assert!(full_width || full_height);
        }

        /// Property: vertical offset never exceeds the centered position.
        #[test]
        fn prop_top_bias_at_most_centered(
            (src_w, src_h) in dimensions_strategy(),
            bias in 0.0f64..=0.5,
        ) {
            let geo = compute_crop_geometry(src_w, src_h, 1024, 1536, bias).unwrap();

            let leftover = src_h as f64 - geo.source_height;
            if leftover > 0.0 {
                prop_assert!(geo.source_y <= leftover / 2.0 + 1e-6);
            }
        }

        /// Property: geometry computation is deterministic.
        #[test]
        fn prop_geometry_deterministic(
            (src_w, src_h) in dimensions_strategy(),
            bias in 0.0f64..=0.5,
        ) {
            let a = compute_crop_geometry(src_w, src_h, 1024, 1536, bias).unwrap();
            let b = compute_crop_geometry(src_w, src_h, 1024, 1536, bias).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
