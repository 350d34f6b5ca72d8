//! Retouch Core - Image adjustment library
//!
//! This crate provides the core functionality for Retouch: decoding and
//! exporting raster images, the parametric adjustment pipeline, the discrete
//! one-shot operators (rotate, sharpen, vignette) and the edit session that
//! ties them together.
//!
//! # Edit Model
//!
//! An [`EditSession`] keeps two images. The *baseline* is never modified by
//! the parametric pipeline: every preview is re-derived from it with the
//! current [`AdjustmentParams`]. Discrete operators run on the *working*
//! image and commit their result as the new baseline.

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod luminance;
pub mod mask;
pub mod scheduler;
pub mod session;
pub mod transform;

pub use adjustments::apply_adjustments;
pub use config::{ConfigError, EditorConfig, PreviewConfig};
pub use decode::{ColorLayout, DecodeError, RasterImage};
pub use encode::{EncodeError, ExportFormat, ExportOptions};
pub use scheduler::{PreviewOutcome, PreviewScheduler, PreviewTicket};
pub use session::{EditSession, EditorError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Declared range and default for one adjustment parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp a value into range. NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

pub const BRIGHTNESS_RANGE: ParamRange = ParamRange::new(-100.0, 100.0, 0.0);
pub const CONTRAST_RANGE: ParamRange = ParamRange::new(-100.0, 100.0, 0.0);
pub const SATURATION_RANGE: ParamRange = ParamRange::new(0.0, 200.0, 100.0);
pub const WARMTH_RANGE: ParamRange = ParamRange::new(-100.0, 100.0, 0.0);
pub const GRAYSCALE_MIX_RANGE: ParamRange = ParamRange::new(0.0, 100.0, 0.0);
pub const BLUR_RADIUS_RANGE: ParamRange = ParamRange::new(0.0, 20.0, 0.0);

/// The six scalar parameters of the adjustment pipeline.
///
/// Every field is independent. Each one has an identity value at which its
/// pipeline stage is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentParams {
    /// Brightness (-100 to 100), identity 0
    pub brightness: f32,
    /// Contrast around mid-gray (-100 to 100), identity 0
    pub contrast: f32,
    /// Saturation (0 to 200), identity 100
    pub saturation: f32,
    /// Warmth, red/blue balance (-100 to 100), identity 0
    pub warmth: f32,
    /// Blend toward grayscale (0 to 100), identity 0
    pub grayscale_mix: f32,
    /// Gaussian blur standard deviation (0 to 20), identity 0
    pub blur_radius: f32,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            brightness: BRIGHTNESS_RANGE.default,
            contrast: CONTRAST_RANGE.default,
            saturation: SATURATION_RANGE.default,
            warmth: WARMTH_RANGE.default,
            grayscale_mix: GRAYSCALE_MIX_RANGE.default,
            blur_radius: BLUR_RADIUS_RANGE.default,
        }
    }
}

impl AdjustmentParams {
    /// Create a new AdjustmentParams with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with every field clamped to its declared range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: BRIGHTNESS_RANGE.clamp(self.brightness),
            contrast: CONTRAST_RANGE.clamp(self.contrast),
            saturation: SATURATION_RANGE.clamp(self.saturation),
            warmth: WARMTH_RANGE.clamp(self.warmth),
            grayscale_mix: GRAYSCALE_MIX_RANGE.clamp(self.grayscale_mix),
            blur_radius: BLUR_RADIUS_RANGE.clamp(self.blur_radius),
        }
    }
}
