//! Whole-image color filters.
//!
//! Grayscale and sepia use the CSS Filter Effects matrices at 100%.

use festive_core::Filter;
use image::{Rgba, RgbaImage};

const GRAYSCALE: [[f32; 3]; 3] = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply a filter in place. Alpha is untouched.
pub fn apply_filter(image: &mut RgbaImage, filter: Filter) {
    let matrix = match filter {
        Filter::None => return,
        Filter::Grayscale => &GRAYSCALE,
        Filter::Sepia => &SEPIA,
    };

    for pixel in image.pixels_mut() {
        *pixel = transform(*pixel, matrix);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn transform(pixel: Rgba<u8>, m: &[[f32; 3]; 3]) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    let channel = |row: &[f32; 3]| {
        row[0].mul_add(r, row[1].mul_add(g, row[2] * b)).round().clamp(0.0, 255.0) as u8
    };
    Rgba([channel(&m[0]), channel(&m[1]), channel(&m[2]), a])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(pixel: [u8; 4], filter: Filter) -> [u8; 4] {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba(pixel));
        apply_filter(&mut img, filter);
        img.get_pixel(0, 0).0
    }

    #[test]
    fn none_leaves_pixels_alone() {
        assert_eq!(single([12, 34, 56, 78], Filter::None), [12, 34, 56, 78]);
    }

    #[test]
    fn grayscale_uses_luminance_weights() {
        // 0.2126 * 255 = 54.2
        assert_eq!(single([255, 0, 0, 255], Filter::Grayscale), [54, 54, 54, 255]);
        assert_eq!(single([255, 255, 255, 10], Filter::Grayscale), [255, 255, 255, 10]);
    }

    #[test]
    fn sepia_clamps_bright_pixels() {
        // White maps to (344.5, 306.8, 238.9) before clamping.
        assert_eq!(single([255, 255, 255, 255], Filter::Sepia), [255, 255, 239, 255]);
        // Pure blue: (0.189, 0.168, 0.131) * 255.
        assert_eq!(single([0, 0, 255, 255], Filter::Sepia), [48, 43, 33, 255]);
    }
}
