//! Radial vignette.
//!
//! The mask is 1.0 at the image center and falls off linearly with
//! Euclidean distance, reaching 0.0 at `min(width, height) / 1.5`. The
//! linear falloff is boosted by 1.5 and clamped, so a central region keeps
//! its full color before the darkening starts.

use super::mul_div_255;
use crate::decode::RasterImage;

/// Divisor applied to the shorter image side to get the falloff radius.
pub const RADIUS_DIVISOR: f32 = 1.5;

/// Multiplier applied to the linear falloff before clamping.
pub const INTENSITY_BOOST: f32 = 1.5;

/// Radial vignette mask for an image of a given size.
///
/// # Example
/// ```
/// use retouch_core::mask::VignetteMask;
///
/// let mask = VignetteMask::for_dimensions(300, 200);
/// // Center: color kept
/// assert_eq!(mask.evaluate(150.0, 100.0), 1.0);
/// // Corner: black
/// assert_eq!(mask.evaluate(0.0, 0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteMask {
    /// Center X in pixels
    pub center_x: f32,
    /// Center Y in pixels
    pub center_y: f32,
    /// Distance at which the mask reaches zero
    pub radius: f32,
}

impl VignetteMask {
    /// Build the mask for a `width x height` pixel grid.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            radius: width.min(height) as f32 / RADIUS_DIVISOR,
        }
    }

    /// Evaluate the mask at pixel coordinates.
    ///
    /// Returns `clamp(clamp(1 - d / radius, 0, 1) * 1.5, 0, 1)`.
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        let falloff = (1.0 - distance / self.radius.max(f32::EPSILON)).clamp(0.0, 1.0);
        (falloff * INTENSITY_BOOST).clamp(0.0, 1.0)
    }

    /// Mask value quantized to 8 bits (truncating), as used for blending.
    #[inline]
    pub fn weight_u8(&self, x: u32, y: u32) -> u8 {
        (self.evaluate(x as f32, y as f32) * 255.0) as u8
    }
}

/// Darken an image radially from the center outward.
///
/// Each color channel is blended toward black by the mask weight: weight 255
/// keeps the original color, weight 0 gives black. Alpha is left unchanged.
pub fn apply_vignette(image: &RasterImage) -> RasterImage {
    let mask = VignetteMask::for_dimensions(image.width(), image.height());
    let width = image.width();
    let channels = image.channels();

    let mut pixels = image.pixels().to_vec();
    for (idx, px) in pixels.chunks_exact_mut(channels).enumerate() {
        let x = idx as u32 % width;
        let y = idx as u32 / width;
        let weight = mask.weight_u8(x, y);
        if weight == 255 {
            continue;
        }
        for v in &mut px[..3] {
            *v = mul_div_255(*v, weight);
        }
    }

    image.with_pixels(pixels)
}
