use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::blend::mode::BlendMode;
use crate::composite::kernel::{PixelInputs, composite_pixel};
use crate::dispatch::options::FilterOptions;
use crate::dispatch::region::{PixelBounds, Region};
use crate::filter::gaussian::{GaussianKernel, check_blur_radius, sigma_for_radius};
use crate::foundation::error::{BlendError, BlendResult};
use crate::foundation::math::row_seed;
use crate::foundation::settings::EngineSettings;
use crate::foundation::surface::Surface;

/// Blend-mode filter engine.
///
/// Holds the bound drawing (mask) and blending (background) surfaces, plus an optional
/// precomputed blur, and runs the compositing kernel over an input/output pair:
///
/// ```text
/// out = mix(blending, mode(input, unpremultiply(drawing)), drawing.a)
/// ```
///
/// Every dispatch validates the mode, the buffer sizes and the aliasing rules before it
/// writes a single pixel, so a failed call leaves the output untouched.
#[derive(Debug)]
pub struct FilterEngine {
    drawing: Surface,
    blending: Surface,
    blurred: Option<Surface>,
    settings: EngineSettings,
    pool: Option<rayon::ThreadPool>,
}

/// Where a pass reads its source pixels from.
#[derive(Clone, Copy)]
enum Source<'a> {
    /// A surface separate from the output.
    Snapshot(&'a Surface),
    /// The output rows themselves.
    InPlace,
}

impl FilterEngine {
    /// Bind a drawing and a blending surface of equal size.
    pub fn new(
        drawing: Surface,
        blending: Surface,
        settings: EngineSettings,
    ) -> BlendResult<Self> {
        settings.validate()?;
        if !drawing.same_size(&blending) {
            return Err(BlendError::validation(format!(
                "drawing is {}x{} but blending is {}x{}",
                drawing.width(),
                drawing.height(),
                blending.width(),
                blending.height()
            )));
        }
        let pool = if settings.parallel {
            settings.threads.map(build_thread_pool).transpose()?
        } else {
            None
        };
        Ok(Self {
            drawing,
            blending,
            blurred: None,
            settings,
            pool,
        })
    }

    /// Width shared by every bound surface.
    pub fn width(&self) -> u32 {
        self.drawing.width()
    }

    /// Height shared by every bound surface.
    pub fn height(&self) -> u32 {
        self.drawing.height()
    }

    /// Active settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Bound drawing surface.
    pub fn drawing(&self) -> &Surface {
        &self.drawing
    }

    /// Mutable access to the drawing surface, e.g. for painting strokes between passes.
    pub fn drawing_mut(&mut self) -> &mut Surface {
        &mut self.drawing
    }

    /// Bound blending surface.
    pub fn blending(&self) -> &Surface {
        &self.blending
    }

    /// Replace the drawing surface.
    pub fn set_drawing(&mut self, drawing: Surface) -> BlendResult<()> {
        self.check_size("drawing", &drawing)?;
        self.drawing = drawing;
        Ok(())
    }

    /// Replace the blending surface.
    pub fn set_blending(&mut self, blending: Surface) -> BlendResult<()> {
        self.check_size("blending", &blending)?;
        self.blending = blending;
        Ok(())
    }

    /// Bind a blurred copy of the input for the blur-precomputed mode.
    pub fn bind_precomputed_blur(&mut self, blurred: Surface) -> BlendResult<()> {
        self.check_size("precomputed blur", &blurred)?;
        self.blurred = Some(blurred);
        Ok(())
    }

    /// Compute and bind a Gaussian blur of `input` with the given radius, in pixels.
    ///
    /// The radius must lie in `[0, MAX_PRECOMPUTE_BLUR_RADIUS]`. Rows run under the same
    /// parallelism settings as filter passes.
    #[tracing::instrument(skip(self, input))]
    pub fn precompute_blur(&mut self, input: &Surface, radius: f32) -> BlendResult<()> {
        check_blur_radius(radius)?;
        self.check_size("input", input)?;
        let started = Instant::now();
        let kernel = GaussianKernel::new(radius.ceil() as u32, sigma_for_radius(radius))?;
        let blurred = if self.settings.parallel {
            self.install(|| kernel.blur(input, true))?
        } else {
            kernel.blur(input, false)?
        };
        tracing::debug!(
            taps = 2 * kernel.radius() + 1,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "precomputed blur"
        );
        self.blurred = Some(blurred);
        Ok(())
    }

    /// [`FilterEngine::precompute_blur`] with the configured `precompute_blur_radius`.
    pub fn precompute_blur_default(&mut self, input: &Surface) -> BlendResult<()> {
        self.precompute_blur(input, self.settings.precompute_blur_radius)
    }

    /// Run mode `mode` (a table index) over the whole buffer.
    pub fn filter(&self, mode: u32, input: &Surface, output: &mut Surface) -> BlendResult<()> {
        self.apply(BlendMode::from_index(mode)?, input, output, None)
    }

    /// Run mode `mode` (a table index) over `region`, clamped to the buffer. Pixels outside
    /// the region are left as they are.
    pub fn filter_rect(
        &self,
        mode: u32,
        input: &Surface,
        output: &mut Surface,
        region: Region,
    ) -> BlendResult<()> {
        self.apply(BlendMode::from_index(mode)?, input, output, Some(region))
    }

    /// Run mode `mode` (a table index) with `target` as both input and output.
    ///
    /// Fails with [`BlendError::BufferAliasing`] for modes that read neighbor pixels.
    pub fn filter_in_place(
        &self,
        mode: u32,
        target: &mut Surface,
        region: Option<Region>,
    ) -> BlendResult<()> {
        self.apply_in_place(BlendMode::from_index(mode)?, target, region)
    }

    /// Typed form of [`FilterEngine::filter`] and [`FilterEngine::filter_rect`].
    #[tracing::instrument(skip_all, fields(mode = %mode, ?region))]
    pub fn apply(
        &self,
        mode: BlendMode,
        input: &Surface,
        output: &mut Surface,
        region: Option<Region>,
    ) -> BlendResult<()> {
        let prepared = self
            .check_size("input", input)
            .and_then(|()| self.check_size("output", output))
            .and_then(|()| FilterOptions::resolve(mode, Some(input), self.blurred.as_ref()));
        let options = prepared.inspect_err(|e| tracing::warn!(error = %e, "dispatch rejected"))?;
        self.run(&options, Source::Snapshot(input), output, region);
        Ok(())
    }

    /// Typed form of [`FilterEngine::filter_in_place`].
    #[tracing::instrument(skip_all, fields(mode = %mode, ?region))]
    pub fn apply_in_place(
        &self,
        mode: BlendMode,
        target: &mut Surface,
        region: Option<Region>,
    ) -> BlendResult<()> {
        let prepared = self
            .check_size("target", target)
            .and_then(|()| FilterOptions::resolve(mode, None, self.blurred.as_ref()));
        let options = prepared.inspect_err(|e| tracing::warn!(error = %e, "dispatch rejected"))?;
        self.run(&options, Source::InPlace, target, region);
        Ok(())
    }

    fn run(
        &self,
        options: &FilterOptions<'_>,
        source: Source<'_>,
        output: &mut Surface,
        region: Option<Region>,
    ) {
        let region = region.unwrap_or_else(|| Region::full(self.width(), self.height()));
        let Some(bounds) = region.clamp_to(self.width(), self.height()) else {
            tracing::debug!(?region, "region is empty after clamping; nothing to do");
            return;
        };

        let seed = self.settings.noise_seed.unwrap_or_else(rand::random);
        let stride = output.stride();
        let started = Instant::now();

        let rows = |(y, row): (usize, &mut [u8])| {
            let y = y as u32;
            if y < bounds.y0 || y >= bounds.y1 {
                return;
            }
            let src_row = match source {
                Source::Snapshot(input) => {
                    let start = y as usize * stride;
                    Some(&input.data()[start..start + stride])
                }
                Source::InPlace => None,
            };
            self.process_row(options, bounds, y, row, src_row, seed);
        };

        let data = output.data_mut();
        if self.settings.parallel {
            self.install(|| data.par_chunks_exact_mut(stride).enumerate().for_each(rows));
        } else {
            data.chunks_exact_mut(stride).enumerate().for_each(rows);
        }

        tracing::debug!(
            mode = %options.mode(),
            ?bounds,
            pixels = bounds.area(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "filter pass complete"
        );
    }

    fn process_row(
        &self,
        options: &FilterOptions<'_>,
        bounds: PixelBounds,
        y: u32,
        row: &mut [u8],
        src_row: Option<&[u8]>,
        seed: u64,
    ) {
        let mut rng = StdRng::seed_from_u64(row_seed(seed, y));
        for x in bounds.x0..bounds.x1 {
            let i = x as usize * 4;
            let src = match src_row {
                Some(r) => [r[i], r[i + 1], r[i + 2], r[i + 3]],
                None => [row[i], row[i + 1], row[i + 2], row[i + 3]],
            };
            let px = PixelInputs {
                src,
                drawing: self.drawing.pixel(x, y),
                blending: self.blending.pixel(x, y),
            };
            let out = composite_pixel(options, px, x, y, &mut rng);
            row[i..i + 4].copy_from_slice(&out);
        }
    }

    /// Run `op` on the dedicated pool when one is configured, else on the caller's pool.
    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn check_size(&self, what: &str, s: &Surface) -> BlendResult<()> {
        if s.same_size(&self.drawing) {
            return Ok(());
        }
        Err(BlendError::validation(format!(
            "{what} is {}x{} but the engine is bound to {}x{}",
            s.width(),
            s.height(),
            self.width(),
            self.height()
        )))
    }
}

fn build_thread_pool(threads: usize) -> BlendResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(BlendError::validation(
            "engine settings 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| BlendError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/engine.rs"]
mod tests;
