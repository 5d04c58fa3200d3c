use crate::foundation::math::mul_div255_u8;

/// Normalized color triple. Channels are nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Build a color from its channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gray with all channels equal to `v`.
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Apply `f` to each channel.
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Combine two colors channel by channel.
    pub fn zip(self, other: Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }

    /// Clamp each channel into `[0, 1]`.
    pub fn clamp01(self) -> Self {
        self.map(|c| c.clamp(0.0, 1.0))
    }

    /// Largest channel.
    pub fn max_channel(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Smallest channel.
    pub fn min_channel(self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Normalized RGBA sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    /// Color channels.
    pub rgb: Rgb,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Recover straight color from a premultiplied sample. Fully transparent samples yield
    /// black.
    ///
    /// Channels above alpha are not valid premultiplied data and unpremultiply to values
    /// above 1. The blend ops treat such a layer as saturated (dodge and divide give 1).
    pub fn unpremultiply(self) -> Rgb {
        if self.a > 0.0 {
            let a = self.a;
            self.rgb.map(|c| c / a)
        } else {
            Rgb::default()
        }
    }
}

/// Unpack an RGBA8 pixel into normalized floats (`c / 255`).
pub fn unpack_rgba8(px: [u8; 4]) -> Rgba {
    Rgba {
        rgb: Rgb::new(unit(px[0]), unit(px[1]), unit(px[2])),
        a: unit(px[3]),
    }
}

/// Pack a color into an opaque RGBA8 pixel, clamping and rounding each channel.
pub fn pack_rgb(rgb: Rgb) -> [u8; 4] {
    [to_u8(rgb.r), to_u8(rgb.g), to_u8(rgb.b), 255]
}

/// Pack a normalized RGBA sample, alpha included.
pub fn pack_rgba(px: Rgba) -> [u8; 4] {
    let [r, g, b, _] = pack_rgb(px.rgb);
    [r, g, b, to_u8(px.a)]
}

/// Premultiply a straight-alpha RGBA8 pixel.
pub fn premultiply_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    [
        mul_div255_u8(px[0], a),
        mul_div255_u8(px[1], a),
        mul_div255_u8(px[2], a),
        a,
    ]
}

fn unit(c: u8) -> f32 {
    f32::from(c) / 255.0
}

fn to_u8(c: f32) -> u8 {
    // NaN maps to 0 through the saturating float-to-int cast.
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/color/sample.rs"]
mod tests;
