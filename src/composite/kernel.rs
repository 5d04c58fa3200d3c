use rand::Rng;

use crate::color::sample::{Rgb, pack_rgb, unpack_rgba8};
use crate::dispatch::options::FilterOptions;
use crate::foundation::math::lerp;

/// Pixels read by one kernel invocation.
#[derive(Clone, Copy, Debug)]
pub struct PixelInputs {
    /// Source pixel (straight color, opaque).
    pub src: [u8; 4],
    /// Drawing/mask pixel (premultiplied).
    pub drawing: [u8; 4],
    /// Background pixel (straight color, opaque).
    pub blending: [u8; 4],
}

/// Composite one output pixel.
///
/// With a transparent mask the background is copied through untouched. Otherwise the
/// mask color is un-premultiplied, fed to the filter with the source color, and the result
/// is mixed over the background by the mask alpha. The output is opaque.
pub fn composite_pixel<R: Rng + ?Sized>(
    options: &FilterOptions<'_>,
    px: PixelInputs,
    x: u32,
    y: u32,
    rng: &mut R,
) -> [u8; 4] {
    if px.drawing[3] == 0 {
        return px.blending;
    }

    let drawing = unpack_rgba8(px.drawing);
    let layer = drawing.unpremultiply();
    let src = unpack_rgba8(px.src).rgb;
    let dst = unpack_rgba8(px.blending).rgb;

    let filtered = options.apply(src, layer, x, y, rng);
    pack_rgb(mix(dst, filtered, drawing.a))
}

fn mix(dst: Rgb, filtered: Rgb, a: f32) -> Rgb {
    dst.zip(filtered, |d, f| lerp(d, f, a))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/kernel.rs"]
mod tests;
