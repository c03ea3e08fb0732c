//! Error types for the render-capture-publish pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize the studio (e.g. HTTP client construction)
    #[error("Studio initialization failed: {0}")]
    InitializationError(String),

    /// The generation endpoint reported an error string
    #[error("Generation failed: {0}")]
    GenerationError(String),

    /// Capture target is unmounted or has zero dimensions
    #[error("Capture precondition failed: {0}")]
    CapturePrecondition(String),

    /// Rasterization of a render surface failed
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Image encode/decode failed
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// Document assembly failed (no file is written)
    #[error("Document assembly failed: {0}")]
    AssembleError(String),

    /// Share exchange failed or returned no shareable URL
    #[error("Publish failed: {0}")]
    PublishError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// The operation is already in flight and was rejected at the trigger site
    #[error("Operation already in progress: {0}")]
    Busy(&'static str),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
