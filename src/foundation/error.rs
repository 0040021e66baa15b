/// Crate-wide result alias.
pub type BlobscapeResult<T> = Result<T, BlobscapeError>;

/// Errors raised at the fallible edges of the crate (configuration, surfaces, export).
///
/// The per-frame animation path never surfaces these to the host: a missing drawing context skips
/// the tick instead.
#[derive(thiserror::Error, Debug)]
pub enum BlobscapeError {
    /// Invalid props, sizes or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlobscapeError {
    /// Build a [`BlobscapeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlobscapeError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BlobscapeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
