/// Convenience result type used across godcrop.
pub type GodcropResult<T> = Result<T, GodcropError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Shape parameters never produce errors: invalid shapes degrade to a safe fallback path. Errors
/// are reserved for invalid frame geometry, undecodable inputs and output-side failures.
#[derive(thiserror::Error, Debug)]
pub enum GodcropError {
    /// Invalid user-provided geometry or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding source images or fonts.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors reported by or about the subject-detection collaborator.
    #[error("detection error: {0}")]
    Detection(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GodcropError {
    /// Build a [`GodcropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GodcropError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GodcropError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GodcropError::Detection`] value.
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection(msg.into())
    }

    /// Build a [`GodcropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
