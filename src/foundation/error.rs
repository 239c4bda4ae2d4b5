/// Convenience result type used across rasterfx.
pub type RasterResult<T> = Result<T, RasterError>;

/// Top-level error taxonomy used by the public APIs.
///
/// The pixel kernels themselves have no failure modes. Errors only come from
/// boundary validation (buffer geometry, filter parameters), scratch allocation,
/// and descriptor parsing.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// Invalid caller-provided geometry, format, or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scratch buffer could not be reserved.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Errors when serializing or deserializing filter descriptors.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterError {
    /// Build a [`RasterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RasterError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`RasterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RasterError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
