//! Parametric adjustment pipeline.
//!
//! Derives a new image from the baseline and the six [`AdjustmentParams`].
//! The baseline is never modified, so moving a slider back and forth can
//! never accumulate rounding error.
//!
//! ## Stage Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Warmth
//! 5. Blur
//! 6. Grayscale mix
//!
//! Each stage is skipped entirely at its identity value, and the output of
//! every executed stage is rounded and clamped to 8 bits before the next one
//! runs. Alpha passes through untouched except where noted.

use tracing::debug;

use crate::decode::RasterImage;
use crate::filter::gaussian_blur;
use crate::luminance::{calculate_luminance, calculate_luminance_u8};
use crate::AdjustmentParams;

/// Fixed midpoint used by the contrast stage.
pub const CONTRAST_MIDPOINT: f32 = 128.0;

/// Apply all adjustments to the baseline image, returning a new image.
///
/// Parameters are clamped to their declared ranges first. With default
/// parameters the result equals `original` pixel for pixel.
///
/// # Example
/// ```
/// use retouch_core::{AdjustmentParams, RasterImage, apply_adjustments};
///
/// let gray = RasterImage::filled(4, 4, &[128, 128, 128]).unwrap();
/// let mut params = AdjustmentParams::default();
/// params.brightness = 50.0;
///
/// let out = apply_adjustments(&gray, &params);
/// assert_eq!(out.pixel(0, 0), &[192, 192, 192]);
/// ```
pub fn apply_adjustments(original: &RasterImage, params: &AdjustmentParams) -> RasterImage {
    let params = params.clamped();

    let mut image = original.clone();
    image = apply_brightness(image, params.brightness);
    image = apply_contrast(image, params.contrast);
    image = apply_saturation(image, params.saturation);
    image = apply_warmth(image, params.warmth);
    image = apply_blur(image, params.blur_radius);
    apply_grayscale_mix(image, params.grayscale_mix)
}

/// Round and clamp a stage result to the 8-bit range.
#[inline]
fn quantize(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Map every color channel independently, leaving alpha as is.
fn map_channels(image: RasterImage, f: impl Fn(f32) -> f32) -> RasterImage {
    let channels = image.channels();
    let mut pixels = image.pixels().to_vec();
    for px in pixels.chunks_exact_mut(channels) {
        for v in &mut px[..3] {
            *v = quantize(f(*v as f32));
        }
    }
    image.with_pixels(pixels)
}

/// Map the RGB triple of every pixel, leaving alpha as is.
fn map_rgb(image: RasterImage, f: impl Fn(u8, u8, u8) -> (f32, f32, f32)) -> RasterImage {
    let channels = image.channels();
    let mut pixels = image.pixels().to_vec();
    for px in pixels.chunks_exact_mut(channels) {
        let (r, g, b) = f(px[0], px[1], px[2]);
        px[0] = quantize(r);
        px[1] = quantize(g);
        px[2] = quantize(b);
    }
    image.with_pixels(pixels)
}

/// Apply brightness adjustment.
///
/// Formula: `output = input * (1 + brightness/100)`
fn apply_brightness(image: RasterImage, brightness: f32) -> RasterImage {
    if brightness == 0.0 {
        return image;
    }
    debug!(brightness, "applying brightness");
    let factor = 1.0 + brightness / 100.0;
    map_channels(image, |v| v * factor)
}

/// Apply contrast adjustment around a fixed mid-gray.
///
/// Formula: `output = 128 + (input - 128) * (1 + contrast/100)`
fn apply_contrast(image: RasterImage, contrast: f32) -> RasterImage {
    if contrast == 0.0 {
        return image;
    }
    debug!(contrast, "applying contrast");
    let factor = 1.0 + contrast / 100.0;
    map_channels(image, |v| CONTRAST_MIDPOINT + (v - CONTRAST_MIDPOINT) * factor)
}

/// Apply saturation adjustment.
///
/// Interpolates between the pixel's luminance and its color by
/// `saturation/100`: 0 is fully gray, 100 unchanged, 200 extrapolates to
/// twice the color distance.
fn apply_saturation(image: RasterImage, saturation: f32) -> RasterImage {
    if saturation == 100.0 {
        return image;
    }
    debug!(saturation, "applying saturation");
    let factor = saturation / 100.0;
    map_rgb(image, |r, g, b| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let gray = calculate_luminance(r, g, b);
        (
            gray + (r - gray) * factor,
            gray + (g - gray) * factor,
            gray + (b - gray) * factor,
        )
    })
}

/// Apply warmth (red/blue balance) adjustment.
///
/// The image is converted to 3-channel RGB first, so any alpha is dropped.
/// Red is scaled by `1 + warmth/100`, blue by `1 - warmth/100`; green is
/// untouched.
fn apply_warmth(image: RasterImage, warmth: f32) -> RasterImage {
    if warmth == 0.0 {
        return image;
    }
    debug!(warmth, "applying warmth");
    let shift = warmth / 100.0;
    map_rgb(image.to_rgb(), |r, g, b| {
        (r as f32 * (1.0 + shift), g as f32, b as f32 * (1.0 - shift))
    })
}

/// Apply Gaussian blur with standard deviation `radius`.
fn apply_blur(image: RasterImage, radius: f32) -> RasterImage {
    if radius == 0.0 {
        return image;
    }
    debug!(radius, "applying blur");
    gaussian_blur(&image, radius)
}

/// Blend toward the full grayscale conversion by `grayscale_mix/100`.
///
/// Runs last so that at 100 it overrides all earlier color work.
fn apply_grayscale_mix(image: RasterImage, grayscale_mix: f32) -> RasterImage {
    if grayscale_mix == 0.0 {
        return image;
    }
    debug!(grayscale_mix, "applying grayscale mix");
    let t = grayscale_mix / 100.0;
    map_rgb(image, |r, g, b| {
        let gray = calculate_luminance_u8(r, g, b) as f32;
        let (r, g, b) = (r as f32, g as f32, b as f32);
        (
            r * (1.0 - t) + gray * t,
            g * (1.0 - t) + gray * t,
            b * (1.0 - t) + gray * t,
        )
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::ColorLayout;
    use proptest::prelude::*;

    /// Strategy for small RGB images with random content.
    fn image_strategy() -> impl Strategy<Value = RasterImage> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let size = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| RasterImage::new(w, h, ColorLayout::Rgb, pixels).unwrap())
        })
    }

    /// Strategy for small RGBA images with random content, alpha included.
    fn rgba_image_strategy() -> impl Strategy<Value = RasterImage> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let size = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| RasterImage::new(w, h, ColorLayout::Rgba, pixels).unwrap())
        })
    }

    /// Strategy for in-range parameter sets.
    fn params_strategy() -> impl Strategy<Value = AdjustmentParams> {
        (
            -100.0f32..=100.0,
            -100.0f32..=100.0,
            0.0f32..=200.0,
            -100.0f32..=100.0,
            0.0f32..=100.0,
            0.0f32..=3.0,
        )
            .prop_map(
                |(brightness, contrast, saturation, warmth, grayscale_mix, blur_radius)| {
                    AdjustmentParams {
                        brightness,
                        contrast,
                        saturation,
                        warmth,
                        grayscale_mix,
                        blur_radius,
                    }
                },
            )
    }

    proptest! {
        /// Property: Default params are the identity.
        #[test]
        fn prop_default_is_identity(img in image_strategy()) {
            prop_assert_eq!(apply_adjustments(&img, &AdjustmentParams::default()), img);
        }

        /// Property: Same inputs always give the same output.
        #[test]
        fn prop_deterministic(img in image_strategy(), params in params_strategy()) {
            let first = apply_adjustments(&img, &params);
            let second = apply_adjustments(&img, &params);
            prop_assert_eq!(first, second);
        }

        /// Property: p1, p2, p1 yields the first p1 result again.
        #[test]
        fn prop_no_drift(
            img in image_strategy(),
            p1 in params_strategy(),
            p2 in params_strategy(),
        ) {
            let first = apply_adjustments(&img, &p1);
            let _ = apply_adjustments(&img, &p2);
            let again = apply_adjustments(&img, &p1);
            prop_assert_eq!(first, again);
        }

        /// Property: Full grayscale mix equals the luminance of the
        /// pre-grayscale image.
        #[test]
        fn prop_full_grayscale_is_luminance(
            img in image_strategy(),
            params in params_strategy(),
        ) {
            let mut before = params;
            before.grayscale_mix = 0.0;
            let mut full = params;
            full.grayscale_mix = 100.0;

            let pre = apply_adjustments(&img, &before);
            let out = apply_adjustments(&img, &full);
            for (p, o) in pre.pixels().chunks_exact(3).zip(out.pixels().chunks_exact(3)) {
                let lum = calculate_luminance_u8(p[0], p[1], p[2]);
                prop_assert_eq!(o, &[lum, lum, lum][..]);
            }
        }

        /// Property: Without warmth (which drops alpha) and blur (which
        /// smooths it), the alpha plane comes through byte for byte.
        #[test]
        fn prop_alpha_preserved_without_warmth_or_blur(
            img in rgba_image_strategy(),
            params in params_strategy(),
        ) {
            let mut params = params;
            params.warmth = 0.0;
            params.blur_radius = 0.0;

            let out = apply_adjustments(&img, &params);
            prop_assert!(out.has_alpha());
            for (i, o) in img.pixels().chunks_exact(4).zip(out.pixels().chunks_exact(4)) {
                prop_assert_eq!(i[3], o[3]);
            }
        }

        /// Property: Default params are the identity for RGBA too.
        #[test]
        fn prop_default_is_identity_rgba(img in rgba_image_strategy()) {
            prop_assert_eq!(apply_adjustments(&img, &AdjustmentParams::default()), img);
        }

        /// Property: Dimensions never change.
        #[test]
        fn prop_dimensions_preserved(img in image_strategy(), params in params_strategy()) {
            let out = apply_adjustments(&img, &params);
            prop_assert_eq!(out.dimensions(), img.dimensions());
        }
    }
}
