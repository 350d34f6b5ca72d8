//! The edit session: holds the baseline and working images.
//!
//! # Architecture
//!
//! The session is a two-tier edit model:
//!
//! - **Preview** ([`EditSession::preview_from_baseline`]): the working image is
//!   re-derived from the untouched baseline with the given parameters. Moving
//!   a slider any number of times can never accumulate error.
//! - **Commit** ([`EditSession::commit_baseline`]): the given image becomes
//!   both the working image and the new baseline. Rotate, sharpen and
//!   vignette are commit points; they cannot be undone by resetting sliders.
//!
//! The image as loaded is kept separately so [`EditSession::reset`] can
//! discard every edit.
//!
//! Every operation either succeeds completely or leaves the session exactly
//! as it was.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::adjustments::apply_adjustments;
use crate::decode::{load_image, resize_to_fit, DecodeError, FilterType, RasterImage};
use crate::encode::{save_image, EncodeError, ExportFormat, ExportOptions};
use crate::filter::sharpen;
use crate::mask::apply_vignette;
use crate::transform::rotate90;
use crate::AdjustmentParams;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An operation needs an image but none is loaded.
    #[error("No image loaded")]
    NoImage,

    /// Save in place was requested for an image that was not loaded from a file.
    #[error("Image has no source file; use export with an explicit path")]
    NoSourcePath,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Clone)]
struct Loaded {
    /// Image as loaded; target of `reset`.
    source: RasterImage,
    /// Re-derivation baseline for previews.
    original: RasterImage,
    /// Currently displayed/exported image.
    working: RasterImage,
    params: AdjustmentParams,
    path: Option<PathBuf>,
}

/// Holds the images and parameters of one editing session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    loaded: Option<Loaded>,
    /// Bumped whenever the baseline is replaced.
    revision: u64,
}

impl EditSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image file, replacing whatever was loaded before.
    ///
    /// On failure the current session is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let image = load_image(path)?;
        self.install(image, Some(path.to_path_buf()));
        Ok(())
    }

    /// Install an already-decoded image with no backing file.
    pub fn set_image(&mut self, image: RasterImage) {
        self.install(image, None);
    }

    fn install(&mut self, image: RasterImage, path: Option<PathBuf>) {
        self.loaded = Some(Loaded {
            source: image.clone(),
            original: image.clone(),
            working: image,
            params: AdjustmentParams::default(),
            path,
        });
        self.revision += 1;
    }

    /// Drop the loaded image. Subsequent operations report `NoImage`.
    pub fn clear(&mut self) {
        if self.loaded.take().is_some() {
            self.revision += 1;
            info!("cleared session");
        }
    }

    /// Whether an image is loaded. Drives enablement of every editing control.
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The current baseline.
    pub fn original(&self) -> Option<&RasterImage> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    /// The image as last previewed or committed.
    pub fn working(&self) -> Option<&RasterImage> {
        self.loaded.as_ref().map(|l| &l.working)
    }

    /// Parameters of the last preview; defaults when nothing is loaded.
    pub fn params(&self) -> AdjustmentParams {
        self.loaded
            .as_ref()
            .map(|l| l.params)
            .unwrap_or_default()
    }

    /// Path the image was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().and_then(|l| l.path.as_deref())
    }

    /// Counter identifying the current baseline.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded, EditorError> {
        self.loaded.as_mut().ok_or(EditorError::NoImage)
    }

    /// Re-derive the working image from the baseline with `params`.
    ///
    /// Parameters are clamped before they are stored and applied.
    pub fn preview_from_baseline(
        &mut self,
        params: AdjustmentParams,
    ) -> Result<&RasterImage, EditorError> {
        let loaded = self.loaded_mut()?;
        let params = params.clamped();
        loaded.working = apply_adjustments(&loaded.original, &params);
        loaded.params = params;
        Ok(&loaded.working)
    }

    /// Store new parameters and refresh the working image.
    pub fn set_params(&mut self, params: AdjustmentParams) -> Result<(), EditorError> {
        self.preview_from_baseline(params).map(|_| ())
    }

    /// Install a preview rendered elsewhere from the current baseline.
    pub(crate) fn install_preview(&mut self, params: AdjustmentParams, working: RasterImage) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.params = params;
            loaded.working = working;
        }
    }

    /// Make `image` both the working image and the new baseline.
    ///
    /// Parameters are kept.
    pub fn commit_baseline(&mut self, image: RasterImage) -> Result<(), EditorError> {
        let loaded = self.loaded_mut()?;
        loaded.original = image.clone();
        loaded.working = image;
        self.revision += 1;
        Ok(())
    }

    fn commit_with(
        &mut self,
        operation: &str,
        op: impl FnOnce(&RasterImage) -> RasterImage,
    ) -> Result<&RasterImage, EditorError> {
        let working = self.working().ok_or(EditorError::NoImage)?;
        let result = op(working);
        info!(
            operation,
            width = result.width(),
            height = result.height(),
            "committed new baseline"
        );
        self.commit_baseline(result)?;
        self.working().ok_or(EditorError::NoImage)
    }

    /// Rotate the working image 90 degrees clockwise and commit it.
    pub fn rotate90(&mut self) -> Result<&RasterImage, EditorError> {
        self.commit_with("rotate90", rotate90)
    }

    /// Sharpen the working image and commit it.
    pub fn sharpen(&mut self) -> Result<&RasterImage, EditorError> {
        self.commit_with("sharpen", sharpen)
    }

    /// Apply a radial vignette to the working image and commit it.
    pub fn vignette(&mut self) -> Result<&RasterImage, EditorError> {
        self.commit_with("vignette", apply_vignette)
    }

    /// Discard every edit: baseline and working image return to the image
    /// as loaded, parameters return to defaults.
    pub fn reset(&mut self) -> Result<&RasterImage, EditorError> {
        let loaded = self.loaded_mut()?;
        loaded.original = loaded.source.clone();
        loaded.working = loaded.source.clone();
        loaded.params = AdjustmentParams::default();
        self.revision += 1;
        info!("reset to loaded image");
        self.working().ok_or(EditorError::NoImage)
    }

    /// Write the working image to `path`, format chosen by extension.
    pub fn export(
        &self,
        path: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<ExportFormat, EditorError> {
        let working = self.working().ok_or(EditorError::NoImage)?;
        Ok(save_image(working, path, options)?)
    }

    /// Write the working image back to the file it was loaded from.
    pub fn save(&self, options: &ExportOptions) -> Result<ExportFormat, EditorError> {
        let loaded = self.loaded.as_ref().ok_or(EditorError::NoImage)?;
        let path = loaded.path.as_deref().ok_or(EditorError::NoSourcePath)?;
        Ok(save_image(&loaded.working, path, options)?)
    }

    /// Scale the working image to fit a display region.
    pub fn render_fit(
        &self,
        box_width: u32,
        box_height: u32,
        filter: FilterType,
    ) -> Result<RasterImage, EditorError> {
        let working = self.working().ok_or(EditorError::NoImage)?;
        Ok(resize_to_fit(working, box_width, box_height, filter)?)
    }
}
