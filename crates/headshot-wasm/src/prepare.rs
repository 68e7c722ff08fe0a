//! Upload decoding and frame preparation bindings.

use crate::types::{filter_from_u8, preset_from_u8, JsPixelBuffer};
use headshot_core::decode::decode_image;
use headshot_core::{compute_crop_geometry, prepare};
use wasm_bindgen::prelude::*;

/// Decode an uploaded photo and prepare it for editing.
///
/// Decodes the bytes (JPEG/PNG, EXIF orientation applied), crops to the
/// preset's aspect ratio, and resamples to its exact target dimensions.
/// The returned buffer is the immutable original for the session.
///
/// # Arguments
/// * `bytes` - Raw upload bytes
/// * `preset` - Frame preset (0 = Portrait 1024x1536, 1 = Square 800x800)
/// * `filter` - Resampling filter (0 = Nearest, 1 = Bilinear, 2 = Lanczos3)
#[wasm_bindgen]
pub fn load_photo(bytes: &[u8], preset: u8, filter: u8) -> Result<JsPixelBuffer, JsValue> {
    let raster = decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let buffer = prepare(&raster, preset_from_u8(preset), filter_from_u8(filter))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Compute the crop window a source image would get for a preset.
///
/// Returns the geometry as a plain object (`source_x`, `source_y`,
/// `source_width`, `source_height`, `target_width`, `target_height`),
/// which the page uses to draw the crop overlay before committing.
#[wasm_bindgen]
pub fn compute_geometry(
    src_width: u32,
    src_height: u32,
    preset: u8,
) -> Result<JsValue, JsValue> {
    let preset = preset_from_u8(preset);
    let geometry = compute_crop_geometry(
        src_width,
        src_height,
        preset.target_width(),
        preset.target_height(),
        preset.bias(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&geometry).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use headshot_core::encode::encode_png;
    use headshot_core::PixelBuffer;

    fn upload_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = [50u8, 100, 150, 255]
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        encode_png(&PixelBuffer::new(width, height, pixels)).unwrap()
    }

    #[test]
    fn test_load_photo_portrait() {
        let buf = load_photo(&upload_png(200, 100), 0, 1).unwrap();
        assert_eq!(buf.width(), 1024);
        assert_eq!(buf.height(), 1536);
    }

    #[test]
    fn test_load_photo_square() {
        let buf = load_photo(&upload_png(100, 200), 1, 1).unwrap();
        assert_eq!(buf.width(), 800);
        assert_eq!(buf.height(), 800);
    }

    #[test]
    fn test_load_photo_bad_bytes() {
        assert!(load_photo(&[0u8; 16], 0, 1).is_err());
    }
}

/// WASM-specific tests that inspect the JsValue returned by
/// `compute_geometry`. These can only run on wasm32 targets; use
/// `wasm-pack test` to run them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn field(value: &JsValue, name: &str) -> f64 {
        js_sys::Reflect::get(value, &name.into())
            .unwrap()
            .as_f64()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compute_geometry_object_shape() {
        // 2000x1000 source for the 1024x1536 portrait frame: full height,
        // crop width 1000 * (1024/1536) centered
        let geometry = compute_geometry(2000, 1000, 0).unwrap();

        assert_eq!(field(&geometry, "target_width"), 1024.0);
        assert_eq!(field(&geometry, "target_height"), 1536.0);
        assert_eq!(field(&geometry, "source_height"), 1000.0);
        assert!((field(&geometry, "source_width") - 666.666).abs() < 0.01);
        assert!((field(&geometry, "source_x") - 666.666).abs() < 0.01);
    }

    #[wasm_bindgen_test]
    fn test_compute_geometry_zero_source_errors() {
        assert!(compute_geometry(0, 100, 0).is_err());
    }
}
