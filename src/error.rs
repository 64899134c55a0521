//! Error types shared by the generator, the table file and the renderer.

use thiserror::Error;

/// Errors produced while configuring, generating, persisting or rendering
/// a stimulus set.
#[derive(Debug, Error)]
pub enum StimulusError {
    /// Unrecognized task, alphabet, transform type, format or range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required file or column was not found.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// One row could not be drawn or saved.
    #[error("Render error on row {row}: {reason}")]
    Render {
        /// 1-based sequence index of the row
        row: usize,
        /// What went wrong
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON table or settings error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary table error
    #[error("Binary table error: {0}")]
    Binary(#[from] bincode::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl StimulusError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StimulusError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn missing(msg: impl Into<String>) -> Self {
        StimulusError::MissingInput(msg.into())
    }
}

/// Result type for stimulus operations
pub type Result<T> = std::result::Result<T, StimulusError>;
