//! Error types for reference preparation.

use thiserror::Error;
use vidgen_models::ReferenceMime;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while preparing an input reference.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error(
        "Unsupported media type `{mime}` for `{filename}` (supported: {})",
        ReferenceMime::supported_list()
    )]
    UnsupportedMediaType { filename: String, mime: String },

    #[error("Failed to re-encode reference image: {0}")]
    Encode(#[from] image::ImageError),
}
