//! Lossless 90-degree clockwise rotation.
//!
//! A quarter turn is a pure pixel permutation, so no interpolation is
//! involved and four rotations reproduce the input exactly.
//!
//! For a source of size `w x h`, the destination is `h x w` and:
//! ```text
//! dst(x, y) = src(y, h - 1 - x)
//! ```

use crate::decode::RasterImage;

/// Dimensions after a quarter turn: width and height swap.
///
/// # Example
///
/// ```
/// use retouch_core::transform::rotated_dimensions;
///
/// assert_eq!(rotated_dimensions(100, 50), (50, 100));
/// ```
#[inline]
pub fn rotated_dimensions(width: u32, height: u32) -> (u32, u32) {
    (height, width)
}

/// Rotate an image 90 degrees clockwise, expanding the canvas to fit.
///
/// The channel layout (RGB or RGBA) is preserved.
pub fn rotate90(image: &RasterImage) -> RasterImage {
    let (src_w, src_h) = (image.width() as usize, image.height() as usize);
    let (dst_w, dst_h) = rotated_dimensions(image.width(), image.height());
    let channels = image.channels();
    let src = image.pixels();

    let mut output = Vec::with_capacity(src.len());
    for dst_y in 0..dst_h as usize {
        for dst_x in 0..dst_w as usize {
            // Clockwise: the bottom row of the source becomes the left column.
            let src_x = dst_y;
            let src_y = src_h - 1 - dst_x;
            let idx = (src_y * src_w + src_x) * channels;
            output.extend_from_slice(&src[idx..idx + channels]);
        }
    }

    // Same byte count and layout, only the dimensions change.
    RasterImage::new(dst_w, dst_h, image.layout(), output).unwrap_or_else(|_| image.clone())
}
