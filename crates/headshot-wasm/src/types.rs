//! WASM-compatible wrapper types for pixel data.
//!
//! These types wrap the core Headshot types with a JavaScript-friendly
//! interface, handling the conversion between Rust and JavaScript data
//! representations.

use headshot_core::decode::FilterType;
use headshot_core::{FramePreset, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA pixel buffer wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array` - typically handed
/// straight to `ImageData` for canvas display.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Buffer width in pixels
    /// * `height` - Buffer height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the buffer width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the buffer height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Create a JsPixelBuffer from a core PixelBuffer.
    pub(crate) fn from_buffer(buf: PixelBuffer) -> Self {
        Self {
            width: buf.width,
            height: buf.height,
            pixels: buf.pixels,
        }
    }

    /// Convert back to a core PixelBuffer.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 preset value to the core FramePreset enum.
///
/// Values:
/// - 0 = Portrait (1024x1536)
/// - 1 = Square (800x800)
///
/// Any other value defaults to Portrait.
pub(crate) fn preset_from_u8(value: u8) -> FramePreset {
    match value {
        1 => FramePreset::Square,
        _ => FramePreset::Portrait,
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}
