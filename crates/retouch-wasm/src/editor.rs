//! Edit session bindings.
//!
//! [`JsImageEditor`] owns one [`EditSession`] for the lifetime of a page.
//! The presentation layer drives it directly: sliders call `preview`, the
//! rotate/sharpen/vignette buttons call the commit methods, and every
//! control is enabled from `isLoaded`.
//!
//! # Example
//!
//! ```typescript
//! const editor = new JsImageEditor();
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! const params = new JsAdjustmentParams();
//! params.warmth = 20;
//! const preview = editor.preview(params);
//!
//! editor.rotate90();                // commits a new baseline
//! const jpeg = editor.export('jpg', 90);
//! ```

use crate::adjustments::JsAdjustmentParams;
use crate::types::{filter_from_u8, JsImage};
use retouch_core::decode::decode_bytes;
use retouch_core::encode::{encode_image, ExportFormat, ExportOptions};
use retouch_core::{EditSession, EditorError};
use wasm_bindgen::prelude::*;

fn to_js_error(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A single-image edit session.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsImageEditor {
    session: EditSession,
}

#[wasm_bindgen]
impl JsImageEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode file bytes and make them the loaded image.
    ///
    /// On failure the previous image stays loaded.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.try_load_bytes(bytes).map_err(to_js_error)
    }

    /// Make an existing image the loaded image.
    pub fn set_image(&mut self, image: &JsImage) {
        self.session.set_image(image.as_raster().clone());
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    #[wasm_bindgen(getter, js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.session.is_loaded()
    }

    /// Copy of the working image, if loaded.
    pub fn working(&self) -> Option<JsImage> {
        self.session.working().cloned().map(JsImage::from_raster)
    }

    /// Copy of the baseline image, if loaded.
    pub fn original(&self) -> Option<JsImage> {
        self.session.original().cloned().map(JsImage::from_raster)
    }

    /// Parameters of the last preview.
    pub fn params(&self) -> JsAdjustmentParams {
        JsAdjustmentParams::from_params(self.session.params())
    }

    /// Re-derive the working image from the baseline.
    pub fn preview(&mut self, params: &JsAdjustmentParams) -> Result<JsImage, JsValue> {
        self.try_preview(params).map_err(to_js_error)
    }

    /// Rotate 90 degrees clockwise and commit.
    pub fn rotate90(&mut self) -> Result<JsImage, JsValue> {
        self.session
            .rotate90()
            .map(|img| JsImage::from_raster(img.clone()))
            .map_err(to_js_error)
    }

    /// Sharpen and commit.
    pub fn sharpen(&mut self) -> Result<JsImage, JsValue> {
        self.session
            .sharpen()
            .map(|img| JsImage::from_raster(img.clone()))
            .map_err(to_js_error)
    }

    /// Vignette and commit.
    pub fn vignette(&mut self) -> Result<JsImage, JsValue> {
        self.session
            .vignette()
            .map(|img| JsImage::from_raster(img.clone()))
            .map_err(to_js_error)
    }

    /// Back to the image as loaded, with default parameters.
    pub fn reset(&mut self) -> Result<JsImage, JsValue> {
        self.session
            .reset()
            .map(|img| JsImage::from_raster(img.clone()))
            .map_err(to_js_error)
    }

    /// Encode the working image to the format named by `extension`.
    pub fn export(&self, extension: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.try_export(extension, quality).map_err(to_js_error)
    }

    /// Working image scaled to fill a display region.
    pub fn render_fit(&self, box_width: u32, box_height: u32, filter: u8) -> Result<JsImage, JsValue> {
        self.session
            .render_fit(box_width, box_height, filter_from_u8(filter))
            .map(JsImage::from_raster)
            .map_err(to_js_error)
    }
}

impl JsImageEditor {
    fn try_load_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let image = decode_bytes(bytes)?;
        crate::log(&format!(
            "retouch: loaded {}x{} image",
            image.width(),
            image.height()
        ));
        self.session.set_image(image);
        Ok(())
    }

    fn try_preview(&mut self, params: &JsAdjustmentParams) -> Result<JsImage, EditorError> {
        self.session
            .preview_from_baseline(*params.inner())
            .map(|img| JsImage::from_raster(img.clone()))
    }

    fn try_export(&self, extension: &str, quality: u8) -> Result<Vec<u8>, EditorError> {
        let working = self.session.working().ok_or(EditorError::NoImage)?;
        let format = ExportFormat::from_extension(extension)?;
        let options = ExportOptions {
            jpeg_quality: quality,
        };
        Ok(encode_image(working, format, &options)?)
    }
}
