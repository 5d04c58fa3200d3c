use rayon::prelude::*;

use crate::foundation::error::{BlendError, BlendResult};
use crate::foundation::surface::Surface;

/// Largest pre-blur radius, in pixels, accepted anywhere in the crate.
pub const MAX_PRECOMPUTE_BLUR_RADIUS: u32 = 25;

/// Q16 fixed-point one.
const ONE_Q16: u32 = 1 << 16;

/// Sigma conventionally paired with a blur radius.
pub fn sigma_for_radius(radius: f32) -> f32 {
    0.4 * radius + 0.6
}

/// Separable Gaussian blur with edge-clamp addressing, rows in parallel on the current rayon
/// pool.
///
/// Produces the auxiliary buffer sampled by the blur-precomputed mode. A constant image
/// stays constant.
pub fn gaussian_blur(src: &Surface, radius: u32, sigma: f32) -> BlendResult<Surface> {
    GaussianKernel::new(radius, sigma)?.blur(src, true)
}

/// Reject pre-blur radii that are not finite or outside `[0, MAX_PRECOMPUTE_BLUR_RADIUS]`.
pub(crate) fn check_blur_radius(radius: f32) -> BlendResult<()> {
    if !radius.is_finite() || !(0.0..=MAX_PRECOMPUTE_BLUR_RADIUS as f32).contains(&radius) {
        return Err(BlendError::validation(format!(
            "blur radius must be within [0, {MAX_PRECOMPUTE_BLUR_RADIUS}], got {radius}"
        )));
    }
    Ok(())
}

/// Normalized Gaussian taps in Q16, `2 * radius + 1` of them, summing to exactly one.
#[derive(Clone, Debug)]
pub(crate) struct GaussianKernel {
    taps: Vec<u32>,
}

impl GaussianKernel {
    pub(crate) fn new(radius: u32, sigma: f32) -> BlendResult<Self> {
        if radius > MAX_PRECOMPUTE_BLUR_RADIUS {
            return Err(BlendError::validation(format!(
                "blur radius {radius} exceeds {MAX_PRECOMPUTE_BLUR_RADIUS}"
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BlendError::validation("blur sigma must be > 0"));
        }

        let r = i64::from(radius);
        let denom = 2.0 * f64::from(sigma).powi(2);
        let weights: Vec<f64> = (-r..=r)
            .map(|i| (-(i * i) as f64 / denom).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps: Vec<u32> = weights
            .iter()
            .map(|w| ((w / total) * f64::from(ONE_Q16)).round() as u32)
            .collect();
        // The center tap absorbs rounding so the taps sum to one.
        let rest: u32 = taps.iter().sum::<u32>() - taps[radius as usize];
        taps[radius as usize] = ONE_Q16.saturating_sub(rest);
        Ok(Self { taps })
    }

    pub(crate) fn radius(&self) -> u32 {
        (self.taps.len() / 2) as u32
    }

    /// Blur `src` with a horizontal then a vertical pass.
    pub(crate) fn blur(&self, src: &Surface, parallel: bool) -> BlendResult<Surface> {
        if self.radius() == 0 {
            return Ok(src.clone());
        }
        let mut tmp = Surface::new(src.width(), src.height())?;
        for_each_row(&mut tmp, parallel, |y, row| {
            self.convolve_row(row, |x, k| src.pixel_clamped(x + k, y))
        });
        let mut out = Surface::new(src.width(), src.height())?;
        for_each_row(&mut out, parallel, |y, row| {
            self.convolve_row(row, |x, k| tmp.pixel_clamped(x, y + k))
        });
        Ok(out)
    }

    /// Fill one output row; `sample(x, k)` reads the tap at offset `k` from column `x`.
    fn convolve_row(&self, row: &mut [u8], sample: impl Fn(i64, i64) -> [u8; 4]) {
        let r = i64::from(self.radius());
        for (x, out) in row.chunks_exact_mut(4).enumerate() {
            let mut acc = [0u64; 4];
            for (k, &w) in (-r..=r).zip(&self.taps) {
                let px = sample(x as i64, k);
                for (a, c) in acc.iter_mut().zip(px) {
                    *a += u64::from(w) * u64::from(c);
                }
            }
            for (o, a) in out.iter_mut().zip(acc) {
                *o = ((a + u64::from(ONE_Q16 / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

fn for_each_row<F>(dst: &mut Surface, parallel: bool, f: F)
where
    F: Fn(i64, &mut [u8]) + Sync + Send,
{
    let stride = dst.stride();
    let data = dst.data_mut();
    if parallel {
        data.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as i64, row));
    } else {
        data.chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as i64, row));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/gaussian.rs"]
mod tests;
