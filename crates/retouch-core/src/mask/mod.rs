//! Radial masks.
//!
//! Masks are evaluated per-pixel and return a value from 0.0 (no effect,
//! pixel goes to black) to 1.0 (pixel keeps its color). The vignette is a
//! discrete operator: it is computed once per call over the full grid and
//! never cached.

pub mod vignette;

pub use vignette::{apply_vignette, VignetteMask};

/// Multiply two 8-bit values and divide by 255 with rounding.
///
/// Exact for every input pair, including `mul_div_255(v, 255) == v`.
#[inline]
pub fn mul_div_255(a: u8, b: u8) -> u8 {
    let tmp = a as u32 * b as u32 + 128;
    (((tmp >> 8) + tmp) >> 8) as u8
}
