//! Image encoding for export.
//!
//! The download button produces a PNG of the enhanced frame; PNG is
//! lossless, so the exported file matches the rendered pixels exactly.

mod png;

pub use png::{encode_png, EncodeError};
