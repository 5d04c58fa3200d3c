use std::fmt;
use std::str::FromStr;

use crate::blend::ops;
use crate::color::sample::Rgb;
use crate::foundation::error::{BlendError, BlendResult};

/// Signature shared by every pointwise blend function: `(input, layer) -> output`.
pub type PointwiseFn = fn(Rgb, Rgb) -> Rgb;

/// Blend-mode selector.
///
/// The discriminant is the public mode index. Callers persist it, so new modes are only
/// ever appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum BlendMode {
    /// Replace with the layer color.
    Normal = 0,
    /// Keep the input color.
    Eraser = 1,
    /// Per-channel maximum.
    LightenOnly = 2,
    /// Inverted multiply of inverted colors.
    Screen = 3,
    /// Color dodge.
    Dodge = 4,
    /// Saturating addition.
    Addition = 5,
    /// Per-channel minimum.
    DarkenOnly = 6,
    /// Per-channel product.
    Multiply = 7,
    /// Color burn.
    Burn = 8,
    /// Overlay.
    Overlay = 9,
    /// Soft light.
    SoftLight = 10,
    /// Hard light.
    HardLight = 11,
    /// Absolute difference.
    Difference = 12,
    /// Saturating subtraction.
    Subtract = 13,
    /// Grain extract.
    GrainExtract = 14,
    /// Grain merge.
    GrainMerge = 15,
    /// Saturating division.
    Divide = 16,
    /// HSV hue of the layer.
    Hue = 17,
    /// HSV saturation of the layer.
    Saturation = 18,
    /// HSL hue and saturation of the layer, lightness of the input.
    Color = 19,
    /// HSV value of the layer.
    Value = 20,
    /// Interpolated S-curve driven by the layer color.
    ToneCurve = 21,
    /// Generalized sepia tinted by the layer color.
    Sepia = 22,
    /// Brightness (layer red) and contrast (layer green).
    BrightnessContrast = 23,
    /// Block mosaic sampled from the input snapshot.
    Mosaic = 24,
    /// Uniform per-channel noise.
    Noise = 25,
    /// Sample of a caller-supplied precomputed blur.
    BlurPrecomputed = 26,
    /// Box blur of the input snapshot.
    Blur = 27,
}

impl BlendMode {
    /// Every mode, in table order.
    pub const ALL: [BlendMode; 28] = [
        BlendMode::Normal,
        BlendMode::Eraser,
        BlendMode::LightenOnly,
        BlendMode::Screen,
        BlendMode::Dodge,
        BlendMode::Addition,
        BlendMode::DarkenOnly,
        BlendMode::Multiply,
        BlendMode::Burn,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HardLight,
        BlendMode::Difference,
        BlendMode::Subtract,
        BlendMode::GrainExtract,
        BlendMode::GrainMerge,
        BlendMode::Divide,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Value,
        BlendMode::ToneCurve,
        BlendMode::Sepia,
        BlendMode::BrightnessContrast,
        BlendMode::Mosaic,
        BlendMode::Noise,
        BlendMode::BlurPrecomputed,
        BlendMode::Blur,
    ];

    /// Number of entries in the mode table.
    pub const COUNT: u32 = Self::ALL.len() as u32;

    /// Look up a mode by its stable index.
    pub fn from_index(index: u32) -> BlendResult<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(BlendError::InvalidModeIndex {
                index,
                count: Self::COUNT,
            })
    }

    /// Stable table index.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Kebab-case name, as used by serde and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Eraser => "eraser",
            BlendMode::LightenOnly => "lighten-only",
            BlendMode::Screen => "screen",
            BlendMode::Dodge => "dodge",
            BlendMode::Addition => "addition",
            BlendMode::DarkenOnly => "darken-only",
            BlendMode::Multiply => "multiply",
            BlendMode::Burn => "burn",
            BlendMode::Overlay => "overlay",
            BlendMode::SoftLight => "soft-light",
            BlendMode::HardLight => "hard-light",
            BlendMode::Difference => "difference",
            BlendMode::Subtract => "subtract",
            BlendMode::GrainExtract => "grain-extract",
            BlendMode::GrainMerge => "grain-merge",
            BlendMode::Divide => "divide",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Value => "value",
            BlendMode::ToneCurve => "tone-curve",
            BlendMode::Sepia => "sepia",
            BlendMode::BrightnessContrast => "brightness-contrast",
            BlendMode::Mosaic => "mosaic",
            BlendMode::Noise => "noise",
            BlendMode::BlurPrecomputed => "blur-precomputed",
            BlendMode::Blur => "blur",
        }
    }

    /// The pure per-pixel function for this mode, or `None` for modes that need pixel
    /// coordinates, auxiliary buffers or randomness.
    pub fn pointwise(self) -> Option<PointwiseFn> {
        let f: PointwiseFn = match self {
            BlendMode::Normal => ops::normal,
            BlendMode::Eraser => ops::eraser,
            BlendMode::LightenOnly => ops::lighten_only,
            BlendMode::Screen => ops::screen,
            BlendMode::Dodge => ops::dodge,
            BlendMode::Addition => ops::addition,
            BlendMode::DarkenOnly => ops::darken_only,
            BlendMode::Multiply => ops::multiply,
            BlendMode::Burn => ops::burn,
            BlendMode::Overlay => ops::overlay,
            BlendMode::SoftLight => ops::soft_light,
            BlendMode::HardLight => ops::hard_light,
            BlendMode::Difference => ops::difference,
            BlendMode::Subtract => ops::subtract,
            BlendMode::GrainExtract => ops::grain_extract,
            BlendMode::GrainMerge => ops::grain_merge,
            BlendMode::Divide => ops::divide,
            BlendMode::Hue => ops::hue,
            BlendMode::Saturation => ops::saturation,
            BlendMode::Color => ops::color,
            BlendMode::Value => ops::value,
            BlendMode::ToneCurve => ops::tone_curve,
            BlendMode::Sepia => ops::sepia,
            BlendMode::BrightnessContrast => ops::brightness_contrast,
            BlendMode::Mosaic
            | BlendMode::Noise
            | BlendMode::BlurPrecomputed
            | BlendMode::Blur => return None,
        };
        Some(f)
    }

    /// `true` for modes that read neighboring pixels of the input snapshot. These cannot run
    /// with input and output sharing storage.
    pub fn reads_neighbors(self) -> bool {
        matches!(self, BlendMode::Mosaic | BlendMode::Blur)
    }

    /// Preset layer color for modes whose layer acts as a parameter block rather than a
    /// paint color. `None` means the caller's drawing color is used as-is.
    pub fn default_layer(self) -> Option<Rgb> {
        match self {
            BlendMode::Sepia => Some(Rgb::new(1.0, 0.5, 0.0)),
            BlendMode::BrightnessContrast => Some(Rgb::new(0.5, 0.75, 0.0)),
            _ => None,
        }
    }

    /// Names of every mode, in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|m| m.name())
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = BlendError;

    /// Accepts a kebab-case name or a decimal table index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u32>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BlendError::validation(format!("unknown blend mode '{s}'")))
    }
}

impl TryFrom<u32> for BlendMode {
    type Error = BlendError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<BlendMode> for u32 {
    fn from(mode: BlendMode) -> Self {
        mode.index()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;
