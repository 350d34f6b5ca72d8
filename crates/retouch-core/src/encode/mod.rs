//! Image encoding and export for Retouch.
//!
//! This module provides functionality for:
//! - Encoding images to PNG, JPEG, BMP or GIF, chosen by file extension
//! - Flattening alpha to opaque RGB for formats that cannot store it
//! - Writing the encoded result to disk

mod export;
mod jpeg;

pub use export::{
    encode_image, prepare_for_format, save_image, EncodeError, ExportFormat, ExportOptions,
};
pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
