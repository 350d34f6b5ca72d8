//! Gaussian blur.

use crate::decode::{ColorLayout, RasterImage};
use image::imageops;

/// Smallest sigma that is actually blurred.
///
/// Below this a Gaussian puts under `e^-50` of its weight on the nearest
/// neighbor, so the exact result is the input. `imageops::blur` instead
/// degenerates to a one-pixel shift for such tiny sigmas.
pub const MIN_BLUR_SIGMA: f32 = 0.1;

/// Blur an image with a Gaussian of standard deviation `sigma`.
///
/// `sigma < MIN_BLUR_SIGMA` (and NaN) returns an exact copy. All channels,
/// including alpha, are blurred; edges are handled by the `image` crate.
pub fn gaussian_blur(image: &RasterImage, sigma: f32) -> RasterImage {
    if sigma.is_nan() || sigma < MIN_BLUR_SIGMA {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let pixels = image.pixels().to_vec();
    let blurred = match image.layout() {
        ColorLayout::Rgb => image::RgbImage::from_raw(width, height, pixels)
            .map(|buf| imageops::blur(&buf, sigma).into_raw()),
        ColorLayout::Rgba => image::RgbaImage::from_raw(width, height, pixels)
            .map(|buf| imageops::blur(&buf, sigma).into_raw()),
    };

    match blurred {
        Some(pixels) => image.with_pixels(pixels),
        None => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        RasterImage::new(size, size, ColorLayout::Rgb, pixels).unwrap()
    }

    #[test]
    fn test_zero_sigma_is_exact_noop() {
        let img = checkerboard(8);
        assert_eq!(gaussian_blur(&img, 0.0), img);
    }

    #[test]
    fn test_negative_and_nan_sigma_are_noops() {
        let img = checkerboard(8);
        assert_eq!(gaussian_blur(&img, -3.0), img);
        assert_eq!(gaussian_blur(&img, f32::NAN), img);
    }

    #[test]
    fn test_tiny_sigma_does_not_shift() {
        let row = [0u8, 40, 80, 120, 160, 200];
        let pixels: Vec<u8> = (0..3)
            .flat_map(|_| row.iter().flat_map(|&v| [v, v, v]))
            .collect();
        let img = RasterImage::new(6, 3, ColorLayout::Rgb, pixels).unwrap();

        for sigma in [1e-30, 1e-6, 0.01, 0.05, 0.099] {
            assert_eq!(gaussian_blur(&img, sigma), img, "sigma {sigma}");
        }
    }

    #[test]
    fn test_tiny_sigma_keeps_single_bright_pixel() {
        let mut pixels = vec![0u8; 5 * 5 * 3];
        let center = (2 * 5 + 2) * 3;
        pixels[center..center + 3].copy_from_slice(&[255, 255, 255]);
        let img = RasterImage::new(5, 5, ColorLayout::Rgb, pixels).unwrap();

        let out = gaussian_blur(&img, 0.01);
        assert_eq!(out.pixel(2, 2), &[255, 255, 255]);
        assert_eq!(out.pixel(3, 2), &[0, 0, 0]);
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let img = checkerboard(16);
        let blurred = gaussian_blur(&img, 2.0);

        assert_eq!(blurred.dimensions(), img.dimensions());
        let center = blurred.pixel(8, 8)[0] as i32;
        assert!(
            (center - 128).abs() < 40,
            "Blurred checkerboard should approach mid-gray, got {}",
            center
        );
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = RasterImage::filled(12, 9, &[90, 120, 150]).unwrap();
        let blurred = gaussian_blur(&img, 3.0);
        let px = blurred.pixel(6, 4);
        assert!((px[0] as i32 - 90).abs() <= 1);
        assert!((px[1] as i32 - 120).abs() <= 1);
        assert!((px[2] as i32 - 150).abs() <= 1);
    }

    #[test]
    fn test_blur_keeps_layout() {
        let img = RasterImage::filled(6, 6, &[10, 10, 10, 200]).unwrap();
        let blurred = gaussian_blur(&img, 1.5);
        assert!(blurred.has_alpha());
        assert_eq!(blurred.byte_size(), img.byte_size());
    }
}
