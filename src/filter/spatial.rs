use rand::Rng;

use crate::color::sample::{Rgb, unpack_rgba8};
use crate::foundation::surface::Surface;

/// Edge length, in pixels, of a mosaic block.
pub const MOSAIC_BLOCK: u32 = 20;

/// Half-width of the box-blur window. The window is `(2r + 1)²` pixels.
pub const BLUR_RADIUS: i64 = 3;

/// Maximum absolute offset the noise mode adds to a channel.
pub const NOISE_INTENSITY: f32 = 0.15;

/// Color of the top-left pixel of the mosaic block containing `(x, y)`.
pub fn mosaic(snapshot: &Surface, x: u32, y: u32) -> Rgb {
    let xm = MOSAIC_BLOCK * (x / MOSAIC_BLOCK);
    let ym = MOSAIC_BLOCK * (y / MOSAIC_BLOCK);
    unpack_rgba8(snapshot.pixel(xm, ym)).rgb
}

/// Mean color of the `(2 * BLUR_RADIUS + 1)²` window centered on `(x, y)`, with edge-clamp
/// addressing.
pub fn box_blur(snapshot: &Surface, x: u32, y: u32) -> Rgb {
    let (cx, cy) = (i64::from(x), i64::from(y));
    let mut acc = [0.0f32; 3];
    let mut count = 0.0f32;
    for ny in cy - BLUR_RADIUS..=cy + BLUR_RADIUS {
        for nx in cx - BLUR_RADIUS..=cx + BLUR_RADIUS {
            let rgb = unpack_rgba8(snapshot.pixel_clamped(nx, ny)).rgb;
            acc[0] += rgb.r;
            acc[1] += rgb.g;
            acc[2] += rgb.b;
            count += 1.0;
        }
    }
    Rgb::new(acc[0] / count, acc[1] / count, acc[2] / count)
}

/// Color of the precomputed blur buffer at `(x, y)`.
pub fn precomputed_blur(blurred: &Surface, x: u32, y: u32) -> Rgb {
    unpack_rgba8(blurred.pixel(x, y)).rgb
}

/// Input plus independent uniform noise in `[-NOISE_INTENSITY, NOISE_INTENSITY]` per channel,
/// clamped.
pub fn noise<R: Rng + ?Sized>(input: Rgb, rng: &mut R) -> Rgb {
    input
        .map(|c| c + rng.random_range(-NOISE_INTENSITY..=NOISE_INTENSITY))
        .clamp01()
}

#[cfg(test)]
#[path = "../../tests/unit/filter/spatial.rs"]
mod tests;
