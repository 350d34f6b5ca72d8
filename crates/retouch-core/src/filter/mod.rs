//! Neighborhood filters: Gaussian blur and fixed-kernel sharpening.
//!
//! Blur is one of the parametric pipeline stages. Sharpen is a discrete
//! operator: it runs once on the working image and its result becomes the
//! new baseline.

mod blur;
mod sharpen;

pub use blur::{gaussian_blur, MIN_BLUR_SIGMA};
pub use sharpen::{sharpen, SHARPEN_KERNEL, SHARPEN_SCALE};
