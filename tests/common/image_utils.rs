//! Image comparison utilities for testing.
//!
//! This module provides helper functions for checking the PNG files written
//! by a run.

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};
use std::path::Path;

/// Maximum pixel difference for image comparison
pub const DEFAULT_PIXEL_DIFF: u8 = 1;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Detect image format from the bytes of a file
pub fn detect_file_format(path: &Path) -> Option<ImageFormat> {
    let bytes = std::fs::read(path).ok()?;
    image::guess_format(&bytes).ok()
}

/// Compare two images for approximate equality
///
/// # Arguments
///
/// * `actual` - The actual image
/// * `expected` - The expected image
/// * `max_diff` - The maximum allowed difference per pixel component (default: 1)
///
/// # Returns
///
/// * `Ok(())` if the images are approximately equal
/// * `Err(String)` with an error message if they differ
pub fn assert_images_approx_eq(
    actual: &DynamicImage,
    expected: &DynamicImage,
    max_diff: Option<u8>,
) -> Result<(), String> {
    let (actual_width, actual_height) = actual.dimensions();
    let (expected_width, expected_height) = expected.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    let max_diff = max_diff.unwrap_or(DEFAULT_PIXEL_DIFF);
    let mut diff_count = 0;
    let mut max_observed_diff = 0u8;

    for (x, y, actual_pixel) in actual.pixels() {
        let expected_pixel = expected.get_pixel(x, y);
        for (a, e) in actual_pixel.0.iter().zip(expected_pixel.0.iter()) {
            let diff = a.abs_diff(*e);
            if diff > max_diff {
                diff_count += 1;
                max_observed_diff = max_observed_diff.max(diff);
            }
        }
    }

    if diff_count > 0 {
        return Err(format!(
            "Images differ in {} components, max observed diff = {}",
            diff_count, max_observed_diff
        ));
    }

    Ok(())
}

/// Share of pixels that are not pure white
pub fn ink_fraction(image: &DynamicImage) -> f64 {
    let total = (image.width() as u64 * image.height() as u64).max(1);
    let inked = image
        .pixels()
        .filter(|(_, _, p)| p.0[..3] != [255, 255, 255])
        .count();
    inked as f64 / total as f64
}

/// Physical resolution recorded in a PNG's `pHYs` chunk, in dots per inch
pub fn png_dpi(path: &Path) -> Option<f64> {
    let file = std::fs::File::open(path).ok()?;
    let reader = png::Decoder::new(file).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Some(dims.xppu as f64 * 0.0254),
        png::Unit::Unspecified => None,
    }
}

/// Whether any pixel of a row band `[y0, y1)` is strongly red or blue
pub fn has_colour_in_rows(image: &DynamicImage, y0: u32, y1: u32) -> bool {
    let rgb = image.to_rgb8();
    (y0..y1.min(rgb.height())).any(|y| {
        (0..rgb.width()).any(|x| {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            (r as i16 - b as i16).abs() > 60 && g < 230
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_assert_images_approx_eq() {
        let img1 = ImageBuffer::from_fn(3, 3, |x, y| Rgba([x as u8, y as u8, 100, 255]));
        let img3 = ImageBuffer::from_fn(3, 3, |x, y| {
            let blue = if x == 1 && y == 1 { 101 } else { 100 };
            Rgba([x as u8, y as u8, blue, 255])
        });

        let dyn_img1 = DynamicImage::ImageRgba8(img1);
        let dyn_img3 = DynamicImage::ImageRgba8(img3);

        assert!(assert_images_approx_eq(&dyn_img1, &dyn_img1, None).is_ok());
        assert!(assert_images_approx_eq(&dyn_img1, &dyn_img3, None).is_ok());
        assert!(assert_images_approx_eq(&dyn_img1, &dyn_img3, Some(0)).is_err());
    }

    #[test]
    fn test_ink_fraction() {
        let white_pixels = ImageBuffer::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let white = DynamicImage::ImageRgba8(white_pixels);
        assert_eq!(ink_fraction(&white), 0.0);
        assert!(!has_colour_in_rows(&white, 0, 4));
    }
}
