//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode an image to the format named by a file extension
//! - [`encode_jpeg`] - Encode an image to JPEG, flattening alpha
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@retouch/wasm';
//!
//! const bytes = encode_image(editor.working(), 'jpg', 90);
//! await writable.write(new Blob([bytes], { type: 'image/jpeg' }));
//! ```

use crate::types::JsImage;
use retouch_core::encode::{self, ExportFormat, ExportOptions};
use wasm_bindgen::prelude::*;

/// Encode an image to the format matching `extension` (png, jpg/jpeg, bmp, gif).
///
/// Alpha is flattened for formats that cannot store it.
///
/// # Errors
///
/// Returns an error for an unknown extension or if encoding fails.
#[wasm_bindgen]
pub fn encode_image(image: &JsImage, extension: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format =
        ExportFormat::from_extension(extension).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = ExportOptions {
        jpeg_quality: quality,
    };
    encode::encode_image(image.as_raster(), format, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival
/// * 80-90: Good quality, recommended for most uses
/// * Below 60: Low quality, visible artifacts
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.as_raster(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
