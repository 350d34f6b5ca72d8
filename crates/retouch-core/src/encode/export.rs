//! Export to common raster formats.

use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
use crate::decode::RasterImage;

/// Errors that can occur while exporting an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The target extension does not map to a supported format.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Output formats supported for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
}

impl ExportFormat {
    /// Pick a format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Result<Self, EncodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "bmp" => Ok(ExportFormat::Bmp),
            "gif" => Ok(ExportFormat::Gif),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick a format from the extension of a path.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Gif => "gif",
        }
    }

    /// Whether the format can store an alpha channel.
    pub fn supports_alpha(self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Gif)
    }

    fn to_image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
            ExportFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Options controlling export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Convert an image so the target format can store it.
///
/// Alpha-bearing images are flattened to opaque RGB for formats without
/// alpha support; everything else is returned as is.
pub fn prepare_for_format(image: &RasterImage, format: ExportFormat) -> RasterImage {
    if image.has_alpha() && !format.supports_alpha() {
        image.to_rgb()
    } else {
        image.clone()
    }
}

/// Encode an image into the bytes of `format`.
pub fn encode_image(
    image: &RasterImage,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Vec<u8>, EncodeError> {
    if format == ExportFormat::Jpeg {
        return encode_jpeg(image, options.jpeg_quality);
    }

    let prepared = prepare_for_format(image, format);
    let mut buffer = Cursor::new(Vec::new());
    prepared
        .to_dynamic()
        .write_to(&mut buffer, format.to_image_format())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode an image and write it to `path`, choosing the format from the
/// path's extension.
pub fn save_image(
    image: &RasterImage,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportFormat, EncodeError> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_image(image, format, options)?;
    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io(e.to_string()))?;
    info!(
        path = %path.display(),
        format = format.extension(),
        bytes = bytes.len(),
        "exported image"
    );
    Ok(format)
}
