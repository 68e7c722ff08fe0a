//! Editing session binding.
//!
//! Holds the whole session in WASM memory so the page never juggles the
//! original and enhanced buffers itself: it loads a photo once, pushes
//! settings on slider changes, and reads back the buffer to paint.

use crate::adjustments::AdjustmentSettings;
use crate::types::{preset_from_u8, JsPixelBuffer};
use headshot_core::{FramePreset, SessionState, SubmissionId};
use wasm_bindgen::prelude::*;

/// One user's editing session, held in WASM memory.
#[wasm_bindgen]
pub struct EditSession {
    inner: headshot_core::EditSession,
}

#[wasm_bindgen]
impl EditSession {
    /// Create an empty session.
    ///
    /// # Arguments
    /// * `preset` - Frame preset (0 = Portrait 1024x1536, 1 = Square 800x800)
    #[wasm_bindgen(constructor)]
    pub fn new(preset: u8) -> Self {
        Self {
            inner: headshot_core::EditSession::new(preset_from_u8(preset)),
        }
    }

    /// Lifecycle state as a string: "empty", "loaded", "submitting", "result".
    pub fn state(&self) -> String {
        match self.inner.state() {
            SessionState::Empty => "empty",
            SessionState::ImageLoaded => "loaded",
            SessionState::Submitting => "submitting",
            SessionState::Result => "result",
        }
        .to_string()
    }

    /// The session's preset (0 = Portrait, 1 = Square).
    pub fn preset(&self) -> u8 {
        match self.inner.preset() {
            FramePreset::Portrait => 0,
            FramePreset::Square => 1,
        }
    }

    /// Decode an upload and prepare it as this session's photo.
    ///
    /// Resets adjustments to identity and discards any prior remote result.
    pub fn load_photo(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_photo(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply new settings and return the re-rendered enhanced buffer.
    ///
    /// Rendering always starts from the original, so repeated calls with
    /// the same settings return the same pixels.
    pub fn update_settings(
        &mut self,
        settings: &AdjustmentSettings,
    ) -> Result<JsPixelBuffer, JsValue> {
        let enhanced = self
            .inner
            .update_settings(settings.inner().clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsPixelBuffer::from_buffer(enhanced.clone()))
    }

    /// Reset adjustments to identity and return the restored buffer.
    pub fn reset_settings(&mut self) -> Result<JsPixelBuffer, JsValue> {
        let enhanced = self
            .inner
            .reset_settings()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsPixelBuffer::from_buffer(enhanced.clone()))
    }

    /// The immutable prepared original, if a photo is loaded.
    pub fn original(&self) -> Option<JsPixelBuffer> {
        self.inner
            .original()
            .map(|buf| JsPixelBuffer::from_buffer(buf.clone()))
    }

    /// The enhanced buffer for the current settings, if a photo is loaded.
    pub fn enhanced(&self) -> Option<JsPixelBuffer> {
        self.inner
            .enhanced()
            .map(|buf| JsPixelBuffer::from_buffer(buf.clone()))
    }

    /// The most recent remote generation result as a pixel buffer, if any.
    pub fn generated(&self) -> Option<JsPixelBuffer> {
        self.inner.generated().map(|raster| {
            JsPixelBuffer::new(raster.width, raster.height, raster.pixels.clone())
        })
    }

    /// Encode the current enhanced buffer as downloadable PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Begin a remote transform submission and return its id.
    ///
    /// The page passes the id back with the fetch response; responses for
    /// superseded ids are ignored, so the last submission wins. Ids are
    /// carried as JS numbers, which represent them exactly up to 2^53;
    /// one session never issues that many.
    pub fn begin_submission(&mut self) -> Result<f64, JsValue> {
        self.inner
            .begin_submission()
            .map(|id| id.as_u64() as f64)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Accept a remote transform response.
    ///
    /// Returns `true` if the response was current and accepted, `false` if
    /// it belonged to a superseded submission.
    pub fn complete_submission(&mut self, id: f64, image_bytes: &[u8]) -> Result<bool, JsValue> {
        self.inner
            .complete_submission(SubmissionId::from(id as u64), image_bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Record a failed remote transform.
    ///
    /// Returns `true` if the failure was for the current submission.
    pub fn fail_submission(&mut self, id: f64) -> bool {
        self.inner.fail_submission(SubmissionId::from(id as u64))
    }

    /// Discard everything and return to the empty state.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
