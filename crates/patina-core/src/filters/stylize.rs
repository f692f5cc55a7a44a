//! Quantizing and stylizing filters (pixellate, crystallize, edges).

use palette::{FromColor, LinLuma, LinSrgb};

use crate::filters::FilterProducedNoOutput;
use crate::image::FilterImage;

/// Square block quantization.
///
/// Each `scale × scale` block is replaced by its average color. A block
/// smaller than one pixel yields no output, matching the primitive
/// contract for out-of-range scales.
pub fn pixellate(image: &FilterImage, scale: f32) -> Result<FilterImage, FilterProducedNoOutput> {
    if scale < 1.0 {
        return Err(FilterProducedNoOutput);
    }
    let block = (scale.round() as u32).min(image.width.max(image.height));

    let mut out = image.clone();
    for by in (0..image.height).step_by(block as usize) {
        for bx in (0..image.width).step_by(block as usize) {
            let x_end = (bx + block).min(image.width);
            let y_end = (by + block).min(image.height);

            let mut sum = [0.0f32; 4];
            let mut count = 0.0f32;
            for y in by..y_end {
                for x in bx..x_end {
                    let p = image.pixels[(y * image.width + x) as usize];
                    for c in 0..4 {
                        sum[c] += p[c];
                    }
                    count += 1.0;
                }
            }
            let avg = [
                sum[0] / count,
                sum[1] / count,
                sum[2] / count,
                sum[3] / count,
            ];

            for y in by..y_end {
                for x in bx..x_end {
                    out.pixels[(y * image.width + x) as usize] = avg;
                }
            }
        }
    }
    Ok(out)
}

/// Irregular crystal-cell quantization.
///
/// A Worley-style cell lookup: the image is covered by a grid of cells of
/// roughly `radius` pixels, each cell gets a jittered seed point, and every
/// pixel takes the source color at the nearest seed among its 3×3 cell
/// neighborhood. The jitter comes from an integer hash of the cell
/// coordinates, so output is a pure function of the inputs.
pub fn crystallize(image: &FilterImage, radius: f32) -> Result<FilterImage, FilterProducedNoOutput> {
    if radius < 1.0 {
        return Err(FilterProducedNoOutput);
    }
    let cell = (radius.round() as u32).min(image.width.max(image.height)).max(1);

    let mut out = image.clone();
    for y in 0..image.height {
        for x in 0..image.width {
            let cell_x = (x / cell) as i64;
            let cell_y = (y / cell) as i64;

            let mut best = f32::MAX;
            let mut best_seed = (x, y);
            for ny in cell_y - 1..=cell_y + 1 {
                for nx in cell_x - 1..=cell_x + 1 {
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let (sx, sy) = seed_point(nx as u32, ny as u32, cell, image.width, image.height);
                    let dx = sx as f32 - x as f32;
                    let dy = sy as f32 - y as f32;
                    let d = dx * dx + dy * dy;
                    if d < best {
                        best = d;
                        best_seed = (sx, sy);
                    }
                }
            }

            out.pixels[(y * image.width + x) as usize] = image.pixel(best_seed.0, best_seed.1);
        }
    }
    Ok(out)
}

/// Jittered seed position for one grid cell, clamped into the image.
fn seed_point(cell_x: u32, cell_y: u32, cell: u32, width: u32, height: u32) -> (u32, u32) {
    let h = cell_hash(cell_x, cell_y);
    let jx = (h & 0xFFFF) % cell;
    let jy = (h >> 16) % cell;
    let sx = (cell_x * cell + jx).min(width - 1);
    let sy = (cell_y * cell + jy).min(height - 1);
    (sx, sy)
}

/// Integer mix hash over cell coordinates.
fn cell_hash(x: u32, y: u32) -> u32 {
    let mut h = x.wrapping_mul(0x9E37_79B1) ^ y.wrapping_mul(0x85EB_CA77);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

/// Sobel edge detection on relative luminance. Runs unparameterized.
pub fn edges(image: &FilterImage) -> FilterImage {
    let luma = |x: u32, y: u32| -> f32 {
        let p = image.pixel(x, y);
        LinLuma::from_color(LinSrgb::new(p[0], p[1], p[2])).luma
    };

    let mut out = image.clone();
    for y in 0..image.height {
        for x in 0..image.width {
            let xm = x.saturating_sub(1);
            let xp = (x + 1).min(image.width - 1);
            let ym = y.saturating_sub(1);
            let yp = (y + 1).min(image.height - 1);

            let gx = (luma(xp, ym) + 2.0 * luma(xp, y) + luma(xp, yp))
                - (luma(xm, ym) + 2.0 * luma(xm, y) + luma(xm, yp));
            let gy = (luma(xm, yp) + 2.0 * luma(x, yp) + luma(xp, yp))
                - (luma(xm, ym) + 2.0 * luma(x, ym) + luma(xp, ym));
            let magnitude = (gx * gx + gy * gy).sqrt().min(1.0);

            let pixel = &mut out.pixels[(y * image.width + x) as usize];
            pixel[0] = magnitude;
            pixel[1] = magnitude;
            pixel[2] = magnitude;
        }
    }
    out
}
