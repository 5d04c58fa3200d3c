//! layerblend is a CPU blend-mode filter engine for painting-style compositing.
//!
//! Every output pixel is computed independently from three bound images:
//!
//! - an input (source) image,
//! - a drawing surface whose premultiplied alpha acts as the mask,
//! - a blending (background) surface the filtered color is mixed over.
//!
//! A [`BlendMode`] selects one of 28 filters: GIMP-style pointwise blends, HSV-space
//! component modes, tone adjustments, and a few spatial effects (mosaic, box blur,
//! precomputed blur, noise). [`FilterEngine`] validates a dispatch and runs the kernel
//! over the whole buffer or a clamped [`Region`], sequentially or row-parallel on rayon.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blend;
mod color;
mod composite;
mod dispatch;
mod filter;
mod foundation;

pub use crate::blend::mode::{BlendMode, PointwiseFn};
pub use crate::blend::ops;
pub use crate::color::hsv::{Hsv, hsv_to_rgb, rgb_to_hsv};
pub use crate::color::sample::{
    Rgb, Rgba, pack_rgb, pack_rgba, premultiply_rgba8, unpack_rgba8,
};
pub use crate::composite::kernel::{PixelInputs, composite_pixel};
pub use crate::dispatch::engine::FilterEngine;
pub use crate::dispatch::options::{FilterOptions, Kernel};
pub use crate::dispatch::region::{PixelBounds, Region};
pub use crate::filter::gaussian::{MAX_PRECOMPUTE_BLUR_RADIUS, gaussian_blur, sigma_for_radius};
pub use crate::filter::spatial::{
    BLUR_RADIUS, MOSAIC_BLOCK, NOISE_INTENSITY, box_blur, mosaic, noise, precomputed_blur,
};
pub use crate::foundation::error::{BlendError, BlendResult};
pub use crate::foundation::settings::{DEFAULT_PRECOMPUTE_BLUR_RADIUS, EngineSettings};
pub use crate::foundation::surface::Surface;
