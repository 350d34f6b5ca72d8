//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! This is the weighting used whenever the pipeline needs a "grayscale"
//! version of a pixel: the saturation stage interpolates toward it and the
//! grayscale-mix stage blends toward it.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from RGB values on any scale.
///
/// The result is on the same scale as the inputs.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Calculate luminance from u8 RGB values (0 to 255), rounded to nearest.
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    calculate_luminance(r as f32, g as f32, b as f32)
        .clamp(0.0, 255.0)
        .round() as u8
}
