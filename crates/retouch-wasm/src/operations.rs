//! Discrete one-shot operators for JavaScript.
//!
//! These are the stateless forms of rotate, sharpen and vignette. When the
//! result should become the new baseline, use the methods on
//! [`crate::JsImageEditor`] instead.

use crate::types::JsImage;
use retouch_core::{filter, mask, transform};
use wasm_bindgen::prelude::*;

/// Rotate an image 90 degrees clockwise. Width and height swap.
#[wasm_bindgen]
pub fn rotate90(image: &JsImage) -> JsImage {
    JsImage::from_raster(transform::rotate90(image.as_raster()))
}

/// Sharpen an image with the fixed 3x3 kernel.
#[wasm_bindgen]
pub fn sharpen(image: &JsImage) -> JsImage {
    JsImage::from_raster(filter::sharpen(image.as_raster()))
}

/// Darken an image radially from the center.
#[wasm_bindgen]
pub fn vignette(image: &JsImage) -> JsImage {
    JsImage::from_raster(mask::apply_vignette(image.as_raster()))
}
