//! Fixed-kernel sharpening.

use crate::decode::RasterImage;

/// 3x3 sharpening kernel, row-major. Applied with [`SHARPEN_SCALE`].
pub const SHARPEN_KERNEL: [i32; 9] = [-2, -2, -2, -2, 32, -2, -2, -2, -2];

/// Divisor for [`SHARPEN_KERNEL`]; the kernel sums to this value, so flat
/// regions are left unchanged.
pub const SHARPEN_SCALE: i32 = 16;

/// Sharpen an image with a single, non-parametric strength.
///
/// Interior pixels are convolved with [`SHARPEN_KERNEL`] and rounded to the
/// nearest value in `[0, 255]`. The one-pixel border has no full
/// neighborhood and is copied unchanged, as is the alpha channel.
pub fn sharpen(image: &RasterImage) -> RasterImage {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width < 3 || height < 3 {
        return image.clone();
    }

    let channels = image.channels();
    let src = image.pixels();
    let mut out = src.to_vec();
    let row = width * channels;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * row + x * channels;
            for c in 0..3 {
                let mut sum = 0i32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let sample = src[(y + ky - 1) * row + (x + kx - 1) * channels + c];
                        sum += SHARPEN_KERNEL[ky * 3 + kx] * sample as i32;
                    }
                }
                out[idx + c] = div_round(sum, SHARPEN_SCALE).clamp(0, 255) as u8;
            }
        }
    }

    image.with_pixels(out)
}

/// Integer division rounding half away from zero.
#[inline]
fn div_round(value: i32, divisor: i32) -> i32 {
    if value >= 0 {
        (value + divisor / 2) / divisor
    } else {
        (value - divisor / 2) / divisor
    }
}
