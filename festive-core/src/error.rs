//! Error types for card and editor operations.

use thiserror::Error;

/// Result type for festive canvas operations.
pub type FestiveResult<T> = Result<T, FestiveError>;

/// Errors that can occur while composing cards or editing photos.
#[derive(Debug, Error)]
pub enum FestiveError {
    /// An operation needs a loaded image (or similar state) that is not there yet.
    #[error("{0}")]
    PreconditionNotMet(String),

    /// A selected file could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// A named option (swatch, section) is not part of the fixed vocabulary.
    #[error("Unrecognized {kind}: {value}")]
    UnrecognizedOption {
        /// What kind of option was requested.
        kind: &'static str,
        /// The value that did not match.
        value: String,
    },

    /// Display list serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FestiveError {
    /// The warning shown when the editor is used before a photo is uploaded.
    #[must_use]
    pub fn no_image() -> Self {
        Self::PreconditionNotMet("Please upload a photo first!".to_string())
    }

    /// Whether this error is a user-facing warning rather than a failure.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::PreconditionNotMet(_) | Self::UnrecognizedOption { .. }
        )
    }
}
