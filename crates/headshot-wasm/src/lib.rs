//! Headshot WASM - WebAssembly bindings for Headshot
//!
//! This crate exposes the headshot-core functionality to the browser page:
//! decoding an upload, cropping it to the headshot frame, running the
//! adjustment pipeline on slider changes, and exporting the result as PNG.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel buffers
//! - `adjustments` - Adjustment settings and the render binding
//! - `prepare` - Upload decoding and frame preparation bindings
//! - `encode` - PNG export binding
//! - `session` - A full editing session held in WASM memory
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditSession } from '@headshot/wasm';
//!
//! await init();
//!
//! const session = new EditSession(0); // portrait preset
//! session.load_photo(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod encode;
mod prepare;
mod session;
mod types;

// Re-export public types
pub use adjustments::{render_adjusted, AdjustmentSettings};
pub use encode::export_png;
pub use prepare::{compute_geometry, load_photo};
pub use session::EditSession;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"Headshot WASM ready".into());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
