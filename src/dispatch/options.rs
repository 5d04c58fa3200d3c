use rand::Rng;

use crate::blend::mode::{BlendMode, PointwiseFn};
use crate::color::sample::Rgb;
use crate::filter::spatial;
use crate::foundation::error::{BlendError, BlendResult};
use crate::foundation::surface::Surface;

/// A blend mode resolved to the function it runs and the buffers it reads.
#[derive(Clone, Copy, Debug)]
pub enum Kernel<'a> {
    /// Pure `(input, layer)` function; ignores coordinates.
    Pointwise(PointwiseFn),
    /// Block mosaic over the input snapshot.
    Mosaic {
        /// Read-only copy of the input, distinct from the output.
        snapshot: &'a Surface,
    },
    /// Box blur over the input snapshot.
    Blur {
        /// Read-only copy of the input, distinct from the output.
        snapshot: &'a Surface,
    },
    /// Lookup into a caller-supplied blurred buffer.
    BlurPrecomputed {
        /// Buffer produced out-of-band, e.g. by [`crate::gaussian_blur`].
        blurred: &'a Surface,
    },
    /// Per-channel uniform noise.
    Noise,
}

/// Per-dispatch filter options: the selected mode and everything its kernel needs.
///
/// Built once per pass and shared read-only by every pixel invocation.
#[derive(Clone, Copy, Debug)]
pub struct FilterOptions<'a> {
    mode: BlendMode,
    kernel: Kernel<'a>,
}

impl<'a> FilterOptions<'a> {
    /// Resolve `mode` against the available auxiliary buffers.
    ///
    /// `snapshot` is the input image when it lives in storage separate from the output, and
    /// `None` when the pass runs in place. Neighbor-reading modes require it.
    pub fn resolve(
        mode: BlendMode,
        snapshot: Option<&'a Surface>,
        blurred: Option<&'a Surface>,
    ) -> BlendResult<Self> {
        let kernel = match mode {
            BlendMode::Mosaic | BlendMode::Blur => {
                let snapshot =
                    snapshot.ok_or(BlendError::BufferAliasing { mode: mode.name() })?;
                if mode == BlendMode::Mosaic {
                    Kernel::Mosaic { snapshot }
                } else {
                    Kernel::Blur { snapshot }
                }
            }
            BlendMode::BlurPrecomputed => Kernel::BlurPrecomputed {
                blurred: blurred.ok_or_else(|| {
                    BlendError::validation("blur-precomputed needs a bound precomputed blur buffer")
                })?,
            },
            BlendMode::Noise => Kernel::Noise,
            _ => match mode.pointwise() {
                Some(f) => Kernel::Pointwise(f),
                None => {
                    return Err(BlendError::evaluation(format!(
                        "mode '{mode}' has no kernel"
                    )));
                }
            },
        };
        Ok(Self { mode, kernel })
    }

    /// Mode these options were resolved from.
    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Resolved kernel.
    pub fn kernel(&self) -> Kernel<'a> {
        self.kernel
    }

    /// Run the kernel for one pixel. `rng` is only drawn from by the noise mode.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        input: Rgb,
        layer: Rgb,
        x: u32,
        y: u32,
        rng: &mut R,
    ) -> Rgb {
        match self.kernel {
            Kernel::Pointwise(f) => f(input, layer),
            Kernel::Mosaic { snapshot } => spatial::mosaic(snapshot, x, y),
            Kernel::Blur { snapshot } => spatial::box_blur(snapshot, x, y),
            Kernel::BlurPrecomputed { blurred } => spatial::precomputed_blur(blurred, x, y),
            Kernel::Noise => spatial::noise(input, rng),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/options.rs"]
mod tests;
