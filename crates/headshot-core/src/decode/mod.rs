//! Upload decoding for Headshot.
//!
//! Turns the raw bytes of an uploaded photo (JPEG, PNG, ...) into an
//! orientation-corrected RGBA raster ready for the frame preparer. Phone
//! cameras record rotation as EXIF metadata rather than rotating pixels,
//! so orientation has to be applied here - cropping a sideways image would
//! frame the subject wrong.
//!
//! All operations are synchronous; the WASM bindings call them from the
//! browser's worker context.

mod types;
mod upload;

pub use types::{DecodeError, FilterType, Orientation, RasterImage};
pub use upload::decode_image;
