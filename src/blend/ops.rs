//! Pure per-pixel blend functions.
//!
//! Each function maps an input color and a layer color to an output color. Formulas follow
//! the GIMP layer-mode operations. Divisions by zero are handled explicitly with the limit
//! value, so no function returns NaN or an infinity for inputs in `[0, 1]`.

use crate::color::hsv::{hsv_to_rgb, rgb_to_hsv};
use crate::color::sample::Rgb;

/// Layer replaces input.
pub fn normal(_input: Rgb, layer: Rgb) -> Rgb {
    layer
}

/// Input passes through.
pub fn eraser(input: Rgb, _layer: Rgb) -> Rgb {
    input
}

/// `max(in, layer)`.
pub fn lighten_only(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, f32::max)
}

/// `1 - (1 - in)(1 - layer)`.
pub fn screen(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| 1.0 - (1.0 - i) * (1.0 - l))
}

/// `in / (1 - layer)`, capped at 1. A layer at or above 1 saturates to 1.
pub fn dodge(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| {
        let denom = 1.0 - l;
        if denom <= 0.0 {
            1.0
        } else {
            (i / denom).min(1.0)
        }
    })
}

/// `in + layer`, capped at 1.
pub fn addition(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i + l).min(1.0))
}

/// `min(in, layer)`.
pub fn darken_only(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, f32::min)
}

/// `in * layer`.
pub fn multiply(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| i * l)
}

/// `1 - (1 - in) / layer`, clamped. An empty layer burns to 0.
pub fn burn(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| {
        if l <= 0.0 {
            0.0
        } else {
            (1.0 - (1.0 - i) / l).clamp(0.0, 1.0)
        }
    })
}

/// `in * (in + 2 layer (1 - in))`, capped at 1.
pub fn overlay(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i * (i + 2.0 * l * (1.0 - i))).min(1.0))
}

/// `(1 - in) * multiply + in * screen`.
pub fn soft_light(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| {
        let multiply = i * l;
        let screen = 1.0 - (1.0 - i) * (1.0 - l);
        (1.0 - i) * multiply + i * screen
    })
}

fn hard_light_channel(i: f32, l: f32) -> f32 {
    if l > 0.5 {
        let comp = (1.0 - i) * (1.0 - (l - 0.5) * 2.0);
        (1.0 - comp).min(1.0)
    } else {
        (i * (l * 2.0)).min(1.0)
    }
}

/// Screen above a layer value of 0.5, multiply at or below it.
pub fn hard_light(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, hard_light_channel)
}

/// `|in - layer|`.
pub fn difference(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i - l).abs())
}

/// `max(0, in - layer)`.
pub fn subtract(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i - l).max(0.0))
}

/// `in - layer + 0.5`, clamped.
pub fn grain_extract(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i - l + 0.5).clamp(0.0, 1.0))
}

/// `in + layer - 0.5`, clamped.
pub fn grain_merge(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| (i + l - 0.5).clamp(0.0, 1.0))
}

/// `in / layer`, capped at 1. An empty layer saturates to 1.
pub fn divide(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, |i, l| if l <= 0.0 { 1.0 } else { (i / l).min(1.0) })
}

/// Input with the layer's HSV hue, unless the layer is unsaturated.
pub fn hue(input: Rgb, layer: Rgb) -> Rgb {
    let mut in_hsv = rgb_to_hsv(input);
    let layer_hsv = rgb_to_hsv(layer);
    if layer_hsv.s > 0.0 {
        in_hsv.h = layer_hsv.h;
    }
    hsv_to_rgb(in_hsv)
}

/// Input with the layer's HSV saturation.
pub fn saturation(input: Rgb, layer: Rgb) -> Rgb {
    let mut in_hsv = rgb_to_hsv(input);
    in_hsv.s = rgb_to_hsv(layer).s;
    hsv_to_rgb(in_hsv)
}

/// Input with the layer's HSV value.
pub fn value(input: Rgb, layer: Rgb) -> Rgb {
    let mut in_hsv = rgb_to_hsv(input);
    in_hsv.v = rgb_to_hsv(layer).v;
    hsv_to_rgb(in_hsv)
}

/// Channel slots ordered by value: `(max, mid, min)`. Ties resolve through the same strict
/// comparison chain used when the result is written back.
#[derive(Clone, Copy)]
enum Slot {
    R,
    G,
    B,
}

fn order(c: Rgb) -> (Slot, Slot, Slot) {
    if c.r > c.g {
        if c.g > c.b {
            (Slot::R, Slot::G, Slot::B)
        } else if c.r > c.b {
            (Slot::R, Slot::B, Slot::G)
        } else {
            (Slot::B, Slot::R, Slot::G)
        }
    } else if c.r > c.b {
        (Slot::G, Slot::R, Slot::B)
    } else if c.g > c.b {
        (Slot::G, Slot::B, Slot::R)
    } else {
        (Slot::B, Slot::G, Slot::R)
    }
}

fn get(c: Rgb, slot: Slot) -> f32 {
    match slot {
        Slot::R => c.r,
        Slot::G => c.g,
        Slot::B => c.b,
    }
}

fn set(c: &mut Rgb, slot: Slot, v: f32) {
    match slot {
        Slot::R => c.r = v,
        Slot::G => c.g = v,
        Slot::B => c.b = v,
    }
}

/// HSL hue and saturation from the layer, HSL lightness from the input.
///
/// The output keeps the layer's channel ordering: whichever of R/G/B is the layer's
/// maximum is also the output's maximum, and likewise for mid and min. An achromatic layer
/// yields gray at the input's lightness.
pub fn color(input: Rgb, layer: Rgb) -> Rgb {
    let src_l = (input.max_channel() + input.min_channel()) / 2.0;

    let (max_slot, mid_slot, min_slot) = order(layer);
    let lay_max = get(layer, max_slot);
    let lay_mid = get(layer, mid_slot);
    let lay_min = get(layer, min_slot);
    if lay_max == lay_min {
        return Rgb::splat(src_l);
    }

    let lay_delta = lay_max - lay_min;
    let lay_s = lay_delta / (1.0 - (lay_max + lay_min - 1.0).abs());

    let dst_delta = (1.0 - (2.0 * src_l - 1.0).abs()) * lay_s;
    let dst_min = src_l - dst_delta / 2.0;
    let dst_max = dst_delta + dst_min;
    let dst_mid = dst_delta * (lay_mid - lay_min) / lay_delta + dst_min;

    let mut dst = Rgb::default();
    set(&mut dst, max_slot, dst_max);
    set(&mut dst, mid_slot, dst_mid);
    set(&mut dst, min_slot, dst_min);
    // Absorbs float rounding only; the reconstruction is in range analytically.
    dst.clamp01()
}

/// Approximate S-curve family indexed by `b`:
/// `b = 0` → 1/2, `0.25` → `sqrt(x/2)`, `0.5` → `x`, `0.75` → `2x²`, `1` → `4x³`,
/// interpolated in between. `b` is not range-checked.
pub fn s_curve(x: f32, b: f32) -> f32 {
    if b == 0.0 {
        0.5
    } else if b < 0.25 {
        let t = b * 4.0;
        0.5 * (1.0 - t) + (x * 0.5).sqrt() * t
    } else if b < 0.5 {
        let t = (b - 0.25) * 4.0;
        (x * 0.5).sqrt() * (1.0 - t) + x * t
    } else if b < 0.75 {
        let t = (b - 0.5) * 4.0;
        x * (1.0 + (2.0 * x - 1.0) * t)
    } else {
        let t = (b - 0.75) * 4.0;
        2.0 * x * x * (1.0 + (2.0 * x - 1.0) * t)
    }
}

/// Per-channel [`s_curve`] with the layer channel as the curve selector.
///
/// Steep curves exceed 1 near `x = 1`; the compositor clamps when packing.
pub fn tone_curve(input: Rgb, layer: Rgb) -> Rgb {
    input.zip(layer, s_curve)
}

/// Generalized sepia. `c = 2r + 4g + b`; each output channel is
/// `(0.131 + 0.058 * layer) * c`, clamped. A layer of `(1, 0.5, 0)` approximates the
/// classic sepia matrix.
pub fn sepia(input: Rgb, layer: Rgb) -> Rgb {
    let c = 2.0 * input.r + 4.0 * input.g + input.b;
    layer.map(|l| ((0.131 + (0.189 - 0.131) * l) * c).clamp(0.0, 1.0))
}

/// Brightness from `layer.r`, contrast from `layer.g`, both centered at 0.5.
pub fn brightness_contrast(input: Rgb, layer: Rgb) -> Rgb {
    let b = 2.0 * layer.r - 1.0;
    let c = 4.0 * layer.g * layer.g;
    input.map(|i| {
        let d = if b < 0.0 { i * (1.0 + b) } else { i + (1.0 - i) * b };
        ((d - 0.5) * c + 0.5).clamp(0.0, 1.0)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/blend/ops.rs"]
mod tests;
