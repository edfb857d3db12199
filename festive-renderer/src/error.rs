//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while decoding, drawing or exporting.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Image bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// A font file could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// The raster surface could not be created or drawn.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Encoding the surface failed.
    #[error("Export failed: {0}")]
    Export(String),
}
