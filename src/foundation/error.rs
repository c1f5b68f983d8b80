/// Convenience result type used across cardsmith.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by rendering and export APIs.
///
/// Malformed user input never produces one of these: sizes, colors and DPI values fall back to
/// defaults during normalization. Errors are reserved for catalogs that fail validation and for
/// failures inside the pipeline itself.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid catalog or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pipeline stage could not produce its output.
    #[error("render error: {0}")]
    Render(String),

    /// Serializing a finished raster failed.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
