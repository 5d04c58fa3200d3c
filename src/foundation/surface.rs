use crate::foundation::error::{BlendError, BlendResult};

/// A tightly packed, row-major RGBA8 image.
///
/// The drawing (mask) surface stores alpha-premultiplied RGB. Source and background surfaces
/// store straight color at alpha 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Create a surface filled with transparent black.
    pub fn new(width: u32, height: u32) -> BlendResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a surface with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: [u8; 4]) -> BlendResult<Self> {
        let len = expected_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: px.repeat(len / 4),
        })
    }

    /// Wrap existing RGBA8 bytes. `data.len()` must equal `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BlendResult<Self> {
        let len = expected_len(width, height)?;
        if data.len() != len {
            return Err(BlendError::validation(format!(
                "surface data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert an [`image::RgbaImage`] without copying pixel data.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert into an [`image::RgbaImage`].
    pub fn into_image(self) -> BlendResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| BlendError::evaluation("surface buffer smaller than its dimensions"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Read the pixel at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Read a pixel with edge-clamp addressing: out-of-range coordinates snap to the nearest
    /// valid pixel.
    pub fn pixel_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let cx = x.clamp(0, i64::from(self.width) - 1) as u32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.pixel(cx, cy)
    }

    /// Write the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let idx = self.index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    /// `true` when both surfaces have the same dimensions.
    pub fn same_size(&self, other: &Surface) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn expected_len(width: u32, height: u32) -> BlendResult<usize> {
    if width == 0 || height == 0 {
        return Err(BlendError::validation("surface dimensions must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BlendError::validation("surface buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/surface.rs"]
mod tests;
