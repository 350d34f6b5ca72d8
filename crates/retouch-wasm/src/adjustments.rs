//! Adjustment parameter WASM bindings.
//!
//! This module provides JavaScript bindings for the AdjustmentParams type,
//! allowing the six slider values to be manipulated from TypeScript.

use crate::types::JsImage;
use retouch_core::AdjustmentParams;
use wasm_bindgen::prelude::*;

/// Adjustment parameters wrapper for JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsAdjustmentParams {
    inner: AdjustmentParams,
}

#[wasm_bindgen]
impl JsAdjustmentParams {
    /// Create new parameters with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    #[wasm_bindgen(getter)]
    pub fn warmth(&self) -> f32 {
        self.inner.warmth
    }

    #[wasm_bindgen(setter)]
    pub fn set_warmth(&mut self, value: f32) {
        self.inner.warmth = value;
    }

    #[wasm_bindgen(getter, js_name = grayscaleMix)]
    pub fn grayscale_mix(&self) -> f32 {
        self.inner.grayscale_mix
    }

    #[wasm_bindgen(setter, js_name = grayscaleMix)]
    pub fn set_grayscale_mix(&mut self, value: f32) {
        self.inner.grayscale_mix = value;
    }

    #[wasm_bindgen(getter, js_name = blurRadius)]
    pub fn blur_radius(&self) -> f32 {
        self.inner.blur_radius
    }

    #[wasm_bindgen(setter, js_name = blurRadius)]
    pub fn set_blur_radius(&mut self, value: f32) {
        self.inner.blur_radius = value;
    }

    /// Check if all parameters are at their identity values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Copy with every field clamped to its declared range
    pub fn clamped(&self) -> JsAdjustmentParams {
        Self::from_params(self.inner.clamped())
    }

    /// Serialize to a plain JS object (camelCase keys)
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing keys take defaults
    pub fn from_json(value: JsValue) -> Result<JsAdjustmentParams, JsValue> {
        let inner: AdjustmentParams =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl JsAdjustmentParams {
    pub(crate) fn from_params(inner: AdjustmentParams) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &AdjustmentParams {
        &self.inner
    }
}

/// Derive a new image from `image` and `params`.
///
/// The source image is not modified.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new JsAdjustmentParams();
/// params.brightness = 50;
/// params.grayscaleMix = 25;
///
/// const adjusted = apply_adjustments(baseline, params);
/// const pixels = adjusted.pixels();
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsImage, params: &JsAdjustmentParams) -> JsImage {
    JsImage::from_raster(retouch_core::apply_adjustments(
        image.as_raster(),
        params.inner(),
    ))
}
