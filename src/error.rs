//! Error types for the grass canvas pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing and delivering a grass image
///
/// Unknown contribution level classifications and empty calendars are not
/// errors: the former decode to level 0 and the latter render a title-only
/// image.
#[derive(Error, Debug)]
pub enum Error {
    /// The calendar source could not be reached or returned an unusable payload
    #[error("Failed to fetch contributions: {0}")]
    FetchError(String),

    /// Failed to rasterize a display list
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to hand a finished image to the publishing sink
    #[error("Failed to publish image: {0}")]
    PublishError(String),

    /// Failed to deliver a notification
    #[error("Failed to send notification: {0}")]
    NotifyError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
