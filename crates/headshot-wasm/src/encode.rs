//! PNG export binding.

use crate::types::JsPixelBuffer;
use headshot_core::encode::encode_png;
use wasm_bindgen::prelude::*;

/// Encode a pixel buffer as PNG bytes for download.
///
/// The returned `Uint8Array` is handed to a `Blob` on the JS side. PNG is
/// lossless, so decoding the bytes reproduces the buffer exactly.
#[wasm_bindgen]
pub fn export_png(buffer: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode_png(&buffer.to_buffer()).map_err(|e| JsValue::from_str(&e.to_string()))
}
