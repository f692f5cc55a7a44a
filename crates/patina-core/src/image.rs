//! Image representation and codec for the effect pipeline.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

/// Internal image representation. Always stored as RGBA f32.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in RGBA f32 format, row-major.
    pub pixels: Vec<[f32; 4]>,
}

impl FilterImage {
    /// Uniform-color image, mostly useful as a test fixture.
    pub fn filled(width: u32, height: u32, pixel: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; (width * height) as usize],
        }
    }

    /// Pixel at `(x, y)`. Coordinates are clamped to the image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Errors that can occur while decoding source bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero pixels")]
    EmptyImage,
}

/// Errors that can occur while encoding an output image.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("image has zero pixels")]
    EmptyImage,
}

/// Decode raw image bytes into the internal `FilterImage` format.
///
/// Supports common formats via the `image` crate (PNG, JPEG, TIFF, ...).
pub fn decode_image(bytes: &[u8]) -> Result<FilterImage, DecodeError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba32f();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let pixels: Vec<[f32; 4]> = rgba
        .pixels()
        .map(|p| [p.0[0], p.0[1], p.0[2], p.0[3]])
        .collect();

    Ok(FilterImage {
        width,
        height,
        pixels,
    })
}

/// Encode a `FilterImage` as PNG bytes.
///
/// Channels are clamped to 0..1 and quantized to 8 bits. PNG output is
/// deterministic: identical pixels yield identical bytes.
pub fn encode_png(image: &FilterImage) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 || image.pixels.is_empty() {
        return Err(EncodeError::EmptyImage);
    }

    let mut raw = Vec::with_capacity(image.pixels.len() * 4);
    for pixel in &image.pixels {
        for channel in pixel {
            raw.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &raw,
        image.width,
        image.height,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> FilterImage {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let r = x as f32 / (width - 1).max(1) as f32;
                let g = y as f32 / (height - 1).max(1) as f32;
                pixels.push([r, g, 0.5, 1.0]);
            }
        }
        FilterImage {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn encode_then_decode_preserves_dimensions() {
        let img = gradient(8, 6);
        let bytes = encode_png(&img).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width, 8);
        assert_eq!(decoded.height, 6);
        assert_eq!(decoded.pixels.len(), 48);
    }

    #[test]
    fn encode_is_deterministic() {
        let img = gradient(4, 4);
        assert_eq!(encode_png(&img).unwrap(), encode_png(&img).unwrap());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(DecodeError::Decode(_))
        ));
    }

    #[test]
    fn encode_rejects_empty_image() {
        let img = FilterImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert!(matches!(encode_png(&img), Err(EncodeError::EmptyImage)));
    }

    #[test]
    fn out_of_range_channels_are_clamped_on_encode() {
        let img = FilterImage::filled(2, 2, [1.5, -0.5, 0.5, 1.0]);
        let bytes = encode_png(&img).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        let px = decoded.pixel(0, 0);
        assert!((px[0] - 1.0).abs() < 1e-3);
        assert!(px[1].abs() < 1e-3);
    }
}
