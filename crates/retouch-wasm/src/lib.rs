//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate provides WASM bindings to expose the retouch-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The edit session (load, preview, commit, reset, export)
//! - `adjustments` - The six adjustment parameters and the stateless pipeline
//! - `operations` - Stateless rotate, sharpen and vignette
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and scale-to-fit
//! - `encode` - Image encoding for export
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageEditor, JsAdjustmentParams } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsImageEditor();
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod editor;
mod encode;
mod operations;
mod types;

// Re-export public types
pub use adjustments::{apply_adjustments, JsAdjustmentParams};
pub use decode::{decode_image, resize_to_fit};
pub use editor::JsImageEditor;
pub use encode::{encode_image, encode_jpeg};
pub use operations::{rotate90, sharpen, vignette};
pub use types::JsImage;

/// Write a message to the browser console. No-op off wasm32.
pub(crate) fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    log(&format!("retouch-wasm {} ready", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    retouch_core::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
