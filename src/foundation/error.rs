/// Convenience result type used across layerblend.
pub type BlendResult<T> = Result<T, BlendError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlendError {
    /// Mode index outside the published blend-mode table.
    #[error("invalid mode index {index}: the blend-mode table has {count} entries")]
    InvalidModeIndex {
        /// Index requested by the caller.
        index: u32,
        /// Number of entries in the table.
        count: u32,
    },

    /// A neighbor-reading mode was dispatched with input and output sharing storage.
    #[error("buffer aliasing: mode '{mode}' reads neighbor pixels and cannot run in place")]
    BufferAliasing {
        /// Name of the rejected mode.
        mode: &'static str,
    },

    /// Invalid caller-provided buffers, regions or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a pass.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlendError {
    /// Build a [`BlendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlendError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`BlendError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
