//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG, JPEG, BMP or GIF bytes
//! - [`resize_to_fit`] - Scale an image to fill a display region, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const display = resize_to_fit(image, canvas.width, canvas.height, 2); // Lanczos3
//! ```

use crate::types::{filter_from_u8, JsImage};
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from file bytes.
///
/// The format is detected from the content and EXIF orientation is applied.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported format, are corrupt,
/// or describe an image with no pixels.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_bytes(bytes)
        .map(JsImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to fill a `box_width x box_height` region, preserving
/// aspect ratio.
///
/// # Arguments
///
/// * `filter` - Resampling filter (0 = Nearest, 1 = Bilinear, 2 = Lanczos3)
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsImage,
    box_width: u32,
    box_height: u32,
    filter: u8,
) -> Result<JsImage, JsValue> {
    decode::resize_to_fit(image.as_raster(), box_width, box_height, filter_from_u8(filter))
        .map(JsImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
