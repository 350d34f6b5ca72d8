//! Core types for decoded raster images.

use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero width or zero height.
    #[error("Invalid dimensions: {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match the dimensions and layout.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Channel layout of a [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorLayout {
    /// Three interleaved 8-bit channels.
    #[default]
    Rgb,
    /// Four interleaved 8-bit channels, alpha last.
    Rgba,
}

impl ColorLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorLayout::Rgb => 3,
            ColorLayout::Rgba => 4,
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An 8-bit RGB or RGBA image held in row-major interleaved order.
///
/// Both the baseline and the working image of an edit session are
/// `RasterImage`s. Dimensions are always non-zero and the buffer length
/// always equals `width * height * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    layout: ColorLayout,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new image, validating dimensions and buffer length.
    pub fn new(
        width: u32,
        height: u32,
        layout: ColorLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimensions { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if pixels.len() != expected {
            return Err(DecodeError::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            pixels,
        })
    }

    /// Create a uniformly filled image. `fill` must have one value per channel.
    pub fn filled(width: u32, height: u32, fill: &[u8]) -> Result<Self, DecodeError> {
        let layout = match fill.len() {
            3 => ColorLayout::Rgb,
            4 => ColorLayout::Rgba,
            _ => return Err(DecodeError::InvalidFormat),
        };
        let count = width as usize * height as usize;
        Self::new(width, height, layout, fill.repeat(count))
    }

    /// Convert any decoded image into RGB8, or RGBA8 when it carries alpha.
    ///
    /// Palette, grayscale and 16-bit sources are expanded here, so every
    /// later stage only has to deal with two layouts.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, DecodeError> {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8())
        } else {
            Self::from_rgb_image(img.into_rgb8())
        }
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Result<Self, DecodeError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, ColorLayout::Rgb, img.into_raw())
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self, DecodeError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, ColorLayout::Rgba, img.into_raw())
    }

    /// Hand the pixel data back to the `image` crate.
    pub fn to_dynamic(&self) -> DynamicImage {
        match self.layout {
            ColorLayout::Rgb => RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(DynamicImage::ImageRgb8),
            ColorLayout::Rgba => RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(DynamicImage::ImageRgba8),
        }
        // Buffer length is checked on construction.
        .unwrap_or_else(|| DynamicImage::new_rgb8(self.width, self.height))
    }

    /// Drop the alpha channel, producing an opaque RGB image.
    pub fn to_rgb(&self) -> RasterImage {
        match self.layout {
            ColorLayout::Rgb => self.clone(),
            ColorLayout::Rgba => {
                let pixels = self
                    .pixels
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                RasterImage {
                    width: self.width,
                    height: self.height,
                    layout: ColorLayout::Rgb,
                    pixels,
                }
            }
        }
    }

    /// Add an opaque alpha channel if the image has none.
    pub fn to_rgba(&self) -> RasterImage {
        match self.layout {
            ColorLayout::Rgba => self.clone(),
            ColorLayout::Rgb => {
                let pixels = self
                    .pixels
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], 255])
                    .collect();
                RasterImage {
                    width: self.width,
                    height: self.height,
                    layout: ColorLayout::Rgba,
                    pixels,
                }
            }
        }
    }

    /// Replace the pixel buffer, keeping dimensions and layout.
    pub(crate) fn with_pixels(&self, pixels: Vec<u8>) -> RasterImage {
        debug_assert_eq!(pixels.len(), self.pixels.len(), "Pixel buffer size mismatch");
        RasterImage {
            width: self.width,
            height: self.height,
            layout: self.layout,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> ColorLayout {
        self.layout
    }

    /// Number of bytes per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout == ColorLayout::Rgba
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Channel values of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dimensions() {
        let err = RasterImage::new(0, 10, ColorLayout::Rgb, vec![]).unwrap_err();
        assert!(matches!(err, DecodeError::ZeroDimensions { width: 0, height: 10 }));
    }

    #[test]
    fn test_new_validates_buffer_length() {
        let err = RasterImage::new(2, 2, ColorLayout::Rgba, vec![0; 12]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BufferMismatch {
                expected: 16,
                actual: 12
            }
        ));
    }

    #[test]
    fn test_filled_picks_layout() {
        let rgb = RasterImage::filled(4, 2, &[1, 2, 3]).unwrap();
        assert_eq!(rgb.layout(), ColorLayout::Rgb);
        assert_eq!(rgb.byte_size(), 24);

        let rgba = RasterImage::filled(4, 2, &[1, 2, 3, 4]).unwrap();
        assert!(rgba.has_alpha());
        assert_eq!(rgba.pixel(3, 1), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_to_rgb_drops_alpha() {
        let img = RasterImage::new(2, 1, ColorLayout::Rgba, vec![10, 20, 30, 40, 50, 60, 70, 80])
            .unwrap();
        let rgb = img.to_rgb();
        assert_eq!(rgb.layout(), ColorLayout::Rgb);
        assert_eq!(rgb.pixels(), &[10, 20, 30, 50, 60, 70]);
    }

    #[test]
    fn test_to_rgba_adds_opaque_alpha() {
        let img = RasterImage::new(1, 1, ColorLayout::Rgb, vec![9, 8, 7]).unwrap();
        assert_eq!(img.to_rgba().pixels(), &[9, 8, 7, 255]);
    }

    #[test]
    fn test_from_dynamic_expands_gray() {
        let gray = image::GrayImage::from_pixel(3, 2, image::Luma([77]));
        let img = RasterImage::from_dynamic(DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(img.layout(), ColorLayout::Rgb);
        assert_eq!(img.pixel(2, 1), &[77, 77, 77]);
    }

    #[test]
    fn test_from_dynamic_keeps_alpha() {
        let la = image::GrayAlphaImage::from_pixel(1, 1, image::LumaA([5, 100]));
        let img = RasterImage::from_dynamic(DynamicImage::ImageLumaA8(la)).unwrap();
        assert_eq!(img.pixels(), &[5, 5, 5, 100]);
    }

    #[test]
    fn test_dynamic_round_trip() {
        let img = RasterImage::new(2, 1, ColorLayout::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let back = RasterImage::from_dynamic(img.to_dynamic()).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert_eq!(FilterType::default(), FilterType::Lanczos3);
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ZeroDimensions { width: 0, height: 3 };
        assert_eq!(err.to_string(), "Invalid dimensions: 0x3");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
