//! Host error type.

use festive_core::FestiveError;
use festive_renderer::RenderError;
use thiserror::Error;

/// Result type for host operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Card or editor operation failed.
    #[error(transparent)]
    Festive(#[from] FestiveError),

    /// Decoding, drawing or encoding failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be parsed.
    #[error("invalid {what}: {value}")]
    InvalidInput {
        /// What was being parsed.
        what: &'static str,
        /// The offending text.
        value: String,
    },
}

impl AppError {
    /// Whether the user should see this as a warning rather than an error.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        match self {
            Self::Festive(e) => e.is_warning(),
            Self::Render(_) | Self::Io(_) | Self::InvalidInput { .. } => false,
        }
    }
}

/// Decode failures in the renderer are reported as the core's decode error.
pub(crate) fn decode_error(err: RenderError) -> AppError {
    match err {
        RenderError::Decode(msg) => AppError::Festive(FestiveError::Decode(msg)),
        other => AppError::Render(other),
    }
}
