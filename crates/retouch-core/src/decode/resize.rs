//! Scale-to-fit resizing for on-screen display.
//!
//! The presentation layer renders the working image inside a display region
//! of arbitrary size. These helpers compute and perform the aspect-preserving
//! resize without touching the edit session.

use super::{DecodeError, FilterType, RasterImage};

/// Calculate dimensions that fill a `box_width x box_height` region while
/// preserving the source aspect ratio.
///
/// The constraining axis is matched exactly; the other axis is truncated,
/// never below 1. Small images are scaled up.
pub fn fit_dimensions(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || box_width == 0 || box_height == 0 {
        return (0, 0);
    }

    let image_aspect = width as f64 / height as f64;
    let box_aspect = box_width as f64 / box_height as f64;

    if box_aspect > image_aspect {
        // Box is wider than the image: constrain by height
        let new_width = (box_height as f64 * image_aspect) as u32;
        (new_width.max(1), box_height)
    } else {
        // Constrain by width
        let new_height = (box_width as f64 / image_aspect) as u32;
        (box_width, new_height.max(1))
    }
}

/// Resize an image to fit within a display region, preserving aspect ratio.
///
/// # Errors
///
/// Returns `DecodeError::ZeroDimensions` if the region is empty.
pub fn resize_to_fit(
    image: &RasterImage,
    box_width: u32,
    box_height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    let (width, height) = fit_dimensions(image.width(), image.height(), box_width, box_height);
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroDimensions {
            width: box_width,
            height: box_height,
        });
    }

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let resized = image
        .to_dynamic()
        .resize_exact(width, height, filter.to_image_filter());
    RasterImage::from_dynamic(resized)
}
