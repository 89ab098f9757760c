//! Error types for the caption service.

use thiserror::Error;

/// Everything that can keep a caption from appearing.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// No credentials in the environment.
    #[error("Environment variable {0} is not set")]
    MissingApiKey(String),

    /// The captured frame could not be turned into a PNG.
    #[error("Failed to encode frame: {0}")]
    Encode(String),

    /// Network or transport failure.
    #[error("Caption request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Caption service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response had no text where it should.
    #[error("Caption response contained no text")]
    EmptyResponse,
}
