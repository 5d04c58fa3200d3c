use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::filter::gaussian::check_blur_radius;
use crate::foundation::error::{BlendError, BlendResult};

/// Radius used for the Gaussian pre-blur when none is configured.
pub const DEFAULT_PRECOMPUTE_BLUR_RADIUS: f32 = 15.0;

/// Execution controls for a [`crate::FilterEngine`].
///
/// All fields are optional in JSON; missing fields take their [`Default`] value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Run rows in parallel with rayon.
    pub parallel: bool,
    /// Dedicated worker thread count. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Seed for the noise mode. `None` draws a fresh seed per dispatch.
    pub noise_seed: Option<u64>,
    /// Radius, in pixels, used by [`crate::FilterEngine::precompute_blur_default`]. At most
    /// [`crate::MAX_PRECOMPUTE_BLUR_RADIUS`].
    pub precompute_blur_radius: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            noise_seed: None,
            precompute_blur_radius: DEFAULT_PRECOMPUTE_BLUR_RADIUS,
        }
    }
}

impl EngineSettings {
    /// Parse settings from a JSON reader and validate them.
    pub fn from_reader<R: std::io::Read>(r: R) -> BlendResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| BlendError::serde(format!("parse engine settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BlendResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlendError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings that cannot drive a pass.
    pub fn validate(&self) -> BlendResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(BlendError::validation(
                "engine settings 'threads' must be >= 1 when set",
            ));
        }
        check_blur_radius(self.precompute_blur_radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
