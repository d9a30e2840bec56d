//! Error types for stylesweep

use thiserror::Error;

/// Result type alias for stylesweep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating, rendering or capturing variants
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to start the browser backend
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load the generated page
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// Failed to render or screenshot the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to locate or crop rendered elements
    #[error("Capture failed: {0}")]
    CaptureError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
