//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so RGBA images are flattened to opaque RGB
//! before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::RasterImage;

/// Default JPEG quality for export.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode an image to JPEG bytes at `quality` (clamped to 1..=100).
///
/// Alpha, if present, is discarded; JPEG output is always opaque RGB.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let flat = image.to_rgb();

    let mut out = Cursor::new(Vec::with_capacity(flat.byte_size() / 4));
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(
            flat.pixels(),
            flat.width(),
            flat.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-empty image at any quality yields a framed JPEG stream.
        #[test]
        fn prop_any_image_encodes(
            width in 1u32..=40,
            height in 1u32..=40,
            fill in any::<[u8; 4]>(),
            quality in any::<u8>(),
        ) {
            let img = RasterImage::filled(width, height, &fill).unwrap();
            let bytes = encode_jpeg(&img, quality).unwrap();
            prop_assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
        }
    }
}
