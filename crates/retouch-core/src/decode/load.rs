//! Decoding of common raster formats with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::info;

use super::{DecodeError, Orientation, RasterImage};

/// Decode an image from in-memory file bytes.
///
/// The format (PNG, JPEG, BMP or GIF) is detected from the content. When the
/// file carries an EXIF orientation tag, the pixels are rotated/flipped so the
/// result is upright.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::ZeroDimensions` for an image with no pixels.
pub fn decode_bytes(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    RasterImage::from_dynamic(apply_orientation(img, orientation))
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<RasterImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    let image = decode_bytes(&bytes)?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

/// Extract EXIF orientation from file bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// A structurally valid 24-bit BMP whose header declares a 0 x 4 image.
#[cfg(test)]
pub(crate) fn zero_width_bmp() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(54);
    // BITMAPFILEHEADER
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&54u32.to_le_bytes()); // file size
    bytes.extend_from_slice(&[0; 4]); // reserved
    bytes.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset
    // BITMAPINFOHEADER
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes()); // width
    bytes.extend_from_slice(&4i32.to_le_bytes()); // height
    bytes.extend_from_slice(&1u16.to_le_bytes()); // planes
    bytes.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    bytes.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    bytes.extend_from_slice(&0u32.to_le_bytes()); // image size
    bytes.extend_from_slice(&2835i32.to_le_bytes());
    bytes.extend_from_slice(&2835i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // palette colors
    bytes.extend_from_slice(&0u32.to_le_bytes()); // important colors
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_rgb() {
        let src = RgbImage::from_pixel(5, 3, Rgb([10, 20, 30]));
        let bytes = encode(DynamicImage::ImageRgb8(src), ImageFormat::Png);

        let img = decode_bytes(&bytes).unwrap();
        assert_eq!(img.dimensions(), (5, 3));
        assert!(!img.has_alpha());
        assert_eq!(img.pixel(4, 2), &[10, 20, 30]);
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 128]));
        let bytes = encode(DynamicImage::ImageRgba8(src), ImageFormat::Png);

        let img = decode_bytes(&bytes).unwrap();
        assert!(img.has_alpha());
        assert_eq!(img.pixel(1, 1), &[1, 2, 3, 128]);
    }

    #[test]
    fn test_decode_bmp() {
        let src = RgbImage::from_pixel(4, 4, Rgb([200, 100, 50]));
        let bytes = encode(DynamicImage::ImageRgb8(src), ImageFormat::Bmp);

        let img = decode_bytes(&bytes).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.pixel(0, 0), &[200, 100, 50]);
    }

    #[test]
    fn test_decode_jpeg() {
        let src = RgbImage::from_pixel(16, 8, Rgb([128, 128, 128]));
        let bytes = encode(DynamicImage::ImageRgb8(src), ImageFormat::Jpeg);

        let img = decode_bytes(&bytes).unwrap();
        assert_eq!(img.dimensions(), (16, 8));
        let px = img.pixel(8, 4);
        assert!((px[0] as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_bytes(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_is_corrupted() {
        let src = RgbImage::from_pixel(32, 32, Rgb([1, 2, 3]));
        let bytes = encode(DynamicImage::ImageRgb8(src), ImageFormat::Png);

        let result = decode_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_zero_width_is_error() {
        let bytes = zero_width_bmp();
        assert_eq!(&bytes[..2], b"BM");
        assert_eq!(bytes.len(), 54);

        // Rejected either by the BMP decoder or by the dimension check
        let result = decode_bytes(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::CorruptedFile(_)) | Err(DecodeError::ZeroDimensions { .. })
        ));
    }

    #[test]
    fn test_load_zero_width_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bmp");
        std::fs::write(&path, zero_width_bmp()).unwrap();
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_image("/definitely/not/here.png");
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        RgbImage::from_pixel(3, 7, Rgb([9, 9, 9])).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 7));
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::new_rgb8(6, 2);
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (2, 6));
    }

    #[test]
    fn test_no_exif_is_normal() {
        let src = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let bytes = encode(DynamicImage::ImageRgb8(src), ImageFormat::Bmp);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }
}
