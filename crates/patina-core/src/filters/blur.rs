//! Blur-family filters (gaussian blur, unsharp mask).

use crate::filters::{FilterProducedNoOutput, from_rgba32f, to_rgba32f};
use crate::image::FilterImage;

/// Gaussian blur with a pixel-radius control.
///
/// The radius is converted to a gaussian sigma with the usual 3-sigma
/// support rule:
///
/// ```text
/// sigma = radius / 3
/// ```
///
/// A radius at or below zero is identity.
pub fn gaussian_blur(image: &FilterImage, radius: f32) -> Result<FilterImage, FilterProducedNoOutput> {
    if radius <= 0.0 {
        return Ok(image.clone());
    }
    let buffer = to_rgba32f(image).ok_or(FilterProducedNoOutput)?;
    let sigma = radius / 3.0;
    Ok(from_rgba32f(&image::imageops::blur(&buffer, sigma)))
}

/// Unsharp-mask sharpening.
///
/// The high-frequency detail is the difference between the source and its
/// gaussian-blurred copy; intensity scales how much of it is added back:
///
/// ```text
/// out = source + (source − blurred) × intensity
/// ```
///
/// `intensity = 0` (after the mapper's floor, near-zero) leaves the image
/// visually unchanged; radius controls the blur used to isolate detail.
pub fn unsharp_mask(
    image: &FilterImage,
    intensity: f32,
    radius: f32,
) -> Result<FilterImage, FilterProducedNoOutput> {
    if radius <= 0.0 {
        return Ok(image.clone());
    }
    let blurred = gaussian_blur(image, radius)?;

    let mut out = image.clone();
    for (dst, soft) in out.pixels.iter_mut().zip(&blurred.pixels) {
        for c in 0..3 {
            dst[c] = (dst[c] + (dst[c] - soft[c]) * intensity).clamp(0.0, 1.0);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> FilterImage {
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 1.0 } else { 0.0 };
                pixels.push([v, v, v, 1.0]);
            }
        }
        FilterImage {
            width: size,
            height: size,
            pixels,
        }
    }

    #[test]
    fn zero_radius_blur_is_identity() {
        let image = checkerboard(8);
        assert_eq!(gaussian_blur(&image, 0.0).unwrap(), image);
    }

    #[test]
    fn blur_reduces_local_contrast() {
        let image = checkerboard(8);
        let blurred = gaussian_blur(&image, 6.0).unwrap();
        let center = blurred.pixel(4, 4);
        // A strong blur of a checkerboard trends toward mid-gray.
        assert!(center[0] > 0.2 && center[0] < 0.8);
    }

    #[test]
    fn near_zero_intensity_unsharp_is_visually_identity() {
        let image = checkerboard(8);
        let out = unsharp_mask(&image, 1e-4, 6.0).unwrap();
        for (a, b) in out.pixels.iter().zip(&image.pixels) {
            for c in 0..3 {
                assert!((a[c] - b[c]).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn unsharp_preserves_alpha() {
        let mut image = checkerboard(8);
        for p in &mut image.pixels {
            p[3] = 0.5;
        }
        let out = unsharp_mask(&image, 1.0, 6.0).unwrap();
        assert!(out.pixels.iter().all(|p| p[3] == 0.5));
    }
}
