//! Image decoding for Retouch.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and GIF files into a [`RasterImage`]
//! - Applying EXIF orientation so the working image is upright
//! - Aspect-preserving resize for display
//!
//! Every decoded image is normalized to 8-bit RGB or RGBA. Palette,
//! grayscale and 16-bit sources are expanded on load.

mod load;
mod resize;
mod types;

pub use load::{decode_bytes, load_image};
#[cfg(test)]
pub(crate) use load::zero_width_bmp;
pub use resize::{fit_dimensions, resize_to_fit};
pub use types::{ColorLayout, DecodeError, FilterType, Orientation, RasterImage};
