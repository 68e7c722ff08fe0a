//! Adjustment settings WASM bindings.
//!
//! Exposes the AdjustmentSettings type to the slider UI and provides the
//! render binding that recomputes the enhanced buffer on every change.

use crate::types::JsPixelBuffer;
use headshot_core::RenderScratch;
use wasm_bindgen::prelude::*;

/// Adjustment settings wrapper for JavaScript
#[wasm_bindgen]
pub struct AdjustmentSettings {
    inner: headshot_core::AdjustmentSettings,
}

#[wasm_bindgen]
impl AdjustmentSettings {
    /// Create new settings with default (identity) values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: headshot_core::AdjustmentSettings::new(),
        }
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    /// Set brightness value
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner.contrast
    }

    /// Set contrast value
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: i32) {
        self.inner.contrast = value;
    }

    /// Get saturation value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.saturation
    }

    /// Set saturation value
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: i32) {
        self.inner.saturation = value;
    }

    /// Get blur radius
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur
    }

    /// Set blur radius
    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.blur = value;
    }

    /// Get vignette strength
    #[wasm_bindgen(getter)]
    pub fn vignette(&self) -> f32 {
        self.inner.vignette
    }

    /// Set vignette strength
    #[wasm_bindgen(setter)]
    pub fn set_vignette(&mut self, value: f32) {
        self.inner.vignette = value;
    }

    /// Check if all settings are at their identity values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(value: JsValue) -> Result<AdjustmentSettings, JsValue> {
        let inner: headshot_core::AdjustmentSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentSettings {
    /// Get a reference to the inner settings for use in render bindings
    pub(crate) fn inner(&self) -> &headshot_core::AdjustmentSettings {
        &self.inner
    }
}

/// Render the enhanced buffer for an original buffer and settings.
///
/// Always recomputes from the given original buffer; the caller keeps the
/// original alive across slider ticks and passes it in every time, so the
/// adjustments never compound. For long-lived editing prefer the
/// `EditSession` binding, which also reuses the blur scratch buffer.
///
/// # Errors
///
/// Rejects settings outside their domain (the error message names the
/// offending parameter).
#[wasm_bindgen]
pub fn render_adjusted(
    original: &JsPixelBuffer,
    settings: &AdjustmentSettings,
) -> Result<JsPixelBuffer, JsValue> {
    let mut scratch = RenderScratch::new();
    let enhanced = headshot_core::render(&original.to_buffer(), settings.inner(), &mut scratch)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(enhanced))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_accessors() {
        let mut settings = AdjustmentSettings::new();
        assert!(settings.is_default());

        settings.set_brightness(20);
        assert_eq!(settings.brightness(), 20);

        settings.set_contrast(-30);
        assert_eq!(settings.contrast(), -30);

        settings.set_saturation(50);
        assert_eq!(settings.saturation(), 50);

        settings.set_blur(2.5);
        assert_eq!(settings.blur(), 2.5);

        settings.set_vignette(70.0);
        assert_eq!(settings.vignette(), 70.0);

        assert!(!settings.is_default());
    }

    #[test]
    fn test_render_identity() {
        let pixels = vec![128, 64, 192, 255, 10, 20, 30, 255];
        let original = JsPixelBuffer::new(2, 1, pixels.clone());
        let settings = AdjustmentSettings::new();

        let result = render_adjusted(&original, &settings).unwrap();

        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 1);
        assert_eq!(result.pixels(), pixels);
    }

    #[test]
    fn test_render_brightness() {
        let original = JsPixelBuffer::new(1, 1, vec![128, 128, 128, 255]);
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(20);

        let result = render_adjusted(&original, &settings).unwrap();
        assert_eq!(result.pixels(), vec![148, 148, 148, 255]);
    }

    #[test]
    fn test_render_does_not_modify_original() {
        let pixels = vec![100, 100, 100, 255];
        let original = JsPixelBuffer::new(1, 1, pixels.clone());
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(50);

        let _result = render_adjusted(&original, &settings).unwrap();
        assert_eq!(original.pixels(), pixels);
    }

    #[test]
    fn test_render_rejects_invalid_settings() {
        let original = JsPixelBuffer::new(1, 1, vec![0, 0, 0, 255]);
        let mut settings = AdjustmentSettings::new();
        settings.set_contrast(259);

        assert!(render_adjusted(&original, &settings).is_err());
    }
}
