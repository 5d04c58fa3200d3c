/// Rectangle of interest, half-open: `[left, right) × [top, bottom)`.
///
/// Coordinates may fall outside the buffer; they are clamped when the pass runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// First column.
    pub left: i64,
    /// First row.
    pub top: i64,
    /// One past the last column.
    pub right: i64,
    /// One past the last row.
    pub bottom: i64,
}

/// A [`Region`] clamped to a buffer: non-empty and fully in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    /// First column.
    pub x0: u32,
    /// First row.
    pub y0: u32,
    /// One past the last column.
    pub x1: u32,
    /// One past the last row.
    pub y1: u32,
}

impl Region {
    /// Build a region from its edges.
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole `width × height` extent.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, i64::from(width), i64::from(height))
    }

    /// Clamp to a `width × height` buffer. Returns `None` when nothing is left to visit.
    pub fn clamp_to(self, width: u32, height: u32) -> Option<PixelBounds> {
        let (w, h) = (i64::from(width), i64::from(height));
        let x0 = self.left.clamp(0, w);
        let x1 = self.right.clamp(0, w);
        let y0 = self.top.clamp(0, h);
        let y1 = self.bottom.clamp(0, h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(PixelBounds {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }
}

impl PixelBounds {
    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.x1 - self.x0) * u64::from(self.y1 - self.y0)
    }

    /// `true` when `(x, y)` lies inside.
    pub fn contains(self, x: u32, y: u32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }
}
