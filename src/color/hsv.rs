//! RGB ↔ HSV conversion on `[0, 1]^3`. Hue is normalized to `[0, 1)`.

use crate::color::sample::Rgb;

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of a full turn.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Value.
    pub v: f32,
}

/// Convert RGB to HSV. Achromatic colors get hue 0 and saturation 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let max = rgb.max_channel();
    let min = rgb.min_channel();
    let delta = max - min;

    if max <= 0.0 || delta <= 0.0 {
        return Hsv {
            h: 0.0,
            s: 0.0,
            v: max,
        };
    }

    let s = delta / max;
    let sector = if rgb.r == max {
        (rgb.g - rgb.b) / delta
    } else if rgb.g == max {
        2.0 + (rgb.b - rgb.r) / delta
    } else {
        4.0 + (rgb.r - rgb.g) / delta
    };
    let mut h = sector / 6.0;
    if h < 0.0 {
        h += 1.0;
    }
    if h >= 1.0 {
        h -= 1.0;
    }
    Hsv { h, s, v: max }
}

/// Convert HSV back to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        return Rgb::splat(v);
    }

    let h6 = (h - h.floor()) * 6.0;
    let sector = (h6.floor() as u32).min(5);
    let f = h6 - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hsv.rs"]
mod tests;
