//! Per-session editing state.
//!
//! An [`EditSession`] is the explicitly passed context object that owns
//! everything a browser session needs: the immutable original buffer, the
//! current settings, the latest enhanced buffer, and the blur scratch.
//! Nothing is ambient or shared, so concurrent sessions are safe and tests
//! can construct sessions freely.
//!
//! The session is a small state machine:
//!
//! ```text
//! Empty -> ImageLoaded -> (adjusting)* -> ImageLoaded   (reset)
//! Empty -> ImageLoaded -> Submitting -> Result -> ImageLoaded  (new photo)
//! ```
//!
//! Adjusting self-loops on every settings change and never moves to a new
//! image without an explicit [`EditSession::load_photo`].
//!
//! The remote flow is single-threaded and event-driven: at most one
//! submission is relevant at a time. Submissions carry monotonically
//! increasing ids; a response that arrives for a superseded id is ignored,
//! so a double-submitting user gets the last submission's result rather
//! than a race.

use thiserror::Error;

use crate::adjust::{render, RenderScratch};
use crate::decode::{decode_image, DecodeError, FilterType, RasterImage};
use crate::encode::{encode_png, EncodeError};
use crate::prepare::{prepare, FramePreset, PrepareError};
use crate::{AdjustmentSettings, PixelBuffer, SettingsError};

/// Identifier for one remote transform submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionId(u64);

impl SubmissionId {
    /// The raw id value, for callers that round-trip ids over a boundary.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubmissionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No photo loaded yet.
    #[default]
    Empty,
    /// A photo is loaded and adjustable.
    ImageLoaded,
    /// A remote transform is outstanding.
    Submitting,
    /// A remote result has been received.
    Result,
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation that needs a photo ran before one was loaded.
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Prepare(#[from] PrepareError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// One user's editing session.
#[derive(Debug)]
pub struct EditSession {
    preset: FramePreset,
    filter: FilterType,
    state: SessionState,
    settings: AdjustmentSettings,
    original: Option<PixelBuffer>,
    enhanced: Option<PixelBuffer>,
    generated: Option<RasterImage>,
    scratch: RenderScratch,
    next_submission: u64,
    active_submission: Option<u64>,
}

impl EditSession {
    /// Create an empty session for the given output preset.
    pub fn new(preset: FramePreset) -> Self {
        Self {
            preset,
            filter: FilterType::Bilinear,
            state: SessionState::Empty,
            settings: AdjustmentSettings::default(),
            original: None,
            enhanced: None,
            generated: None,
            scratch: RenderScratch::new(),
            next_submission: 0,
            active_submission: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The session's output preset.
    pub fn preset(&self) -> FramePreset {
        self.preset
    }

    /// Current adjustment settings.
    pub fn settings(&self) -> &AdjustmentSettings {
        &self.settings
    }

    /// The immutable cropped/resampled source buffer, if a photo is loaded.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// The enhanced buffer for the current settings, if a photo is loaded.
    pub fn enhanced(&self) -> Option<&PixelBuffer> {
        self.enhanced.as_ref()
    }

    /// The most recent remote generation result, if any.
    pub fn generated(&self) -> Option<&RasterImage> {
        self.generated.as_ref()
    }

    /// Load a new photo from uploaded bytes.
    ///
    /// Decodes and prepares the frame, resets the settings to identity,
    /// and seeds the enhanced buffer with the original. Any outstanding
    /// submission becomes irrelevant.
    pub fn load_photo(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let raster = decode_image(bytes)?;
        let original = prepare(&raster, self.preset, self.filter)?;

        self.enhanced = Some(original.clone());
        self.original = Some(original);
        self.settings = AdjustmentSettings::default();
        self.generated = None;
        self.active_submission = None;
        self.state = SessionState::ImageLoaded;
        Ok(())
    }

    /// Replace the settings and re-render the enhanced buffer.
    ///
    /// The render always starts from the immutable original, never from
    /// the previous enhanced buffer. On error (invalid settings, no photo)
    /// the previous settings and enhanced buffer are left untouched.
    pub fn update_settings(
        &mut self,
        settings: AdjustmentSettings,
    ) -> Result<&PixelBuffer, SessionError> {
        let original = self.original.as_ref().ok_or(SessionError::NoImage)?;
        let enhanced = render(original, &settings, &mut self.scratch)?;

        self.settings = settings;
        self.state = SessionState::ImageLoaded;
        Ok(self.enhanced.insert(enhanced))
    }

    /// Reset all adjustments to identity.
    ///
    /// The enhanced buffer becomes bit-identical to the original.
    pub fn reset_settings(&mut self) -> Result<&PixelBuffer, SessionError> {
        self.update_settings(AdjustmentSettings::default())
    }

    /// Encode the current enhanced buffer as a downloadable PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        let enhanced = self.enhanced.as_ref().ok_or(SessionError::NoImage)?;
        Ok(encode_png(enhanced)?)
    }

    /// Begin a remote transform submission.
    ///
    /// Supersedes any outstanding submission: responses for earlier ids
    /// will be ignored when they eventually arrive.
    pub fn begin_submission(&mut self) -> Result<SubmissionId, SessionError> {
        if self.original.is_none() {
            return Err(SessionError::NoImage);
        }
        self.next_submission += 1;
        self.active_submission = Some(self.next_submission);
        self.state = SessionState::Submitting;
        Ok(SubmissionId(self.next_submission))
    }

    /// Accept a remote transform response.
    ///
    /// Returns `Ok(true)` if the response was current and accepted,
    /// `Ok(false)` if it belonged to a superseded submission and was
    /// ignored. Accepted bytes must decode as a raster image.
    pub fn complete_submission(
        &mut self,
        id: SubmissionId,
        image_bytes: &[u8],
    ) -> Result<bool, SessionError> {
        if self.active_submission != Some(id.0) {
            return Ok(false);
        }

        let raster = decode_image(image_bytes)?;
        self.generated = Some(raster);
        self.active_submission = None;
        self.state = SessionState::Result;
        Ok(true)
    }

    /// Record a failed remote transform.
    ///
    /// Returns `true` if the failure belonged to the current submission
    /// (the session returns to `ImageLoaded`), `false` if it was stale.
    pub fn fail_submission(&mut self, id: SubmissionId) -> bool {
        if self.active_submission != Some(id.0) {
            return false;
        }
        self.active_submission = None;
        self.state = SessionState::ImageLoaded;
        true
    }

    /// Discard everything and return to the empty state ("new photo").
    pub fn clear(&mut self) {
        self.original = None;
        self.enhanced = None;
        self.generated = None;
        self.settings = AdjustmentSettings::default();
        self.active_submission = None;
        self.state = SessionState::Empty;
    }
}
