//! Error types for respswap

use thiserror::Error;

/// Main error type for operations that talk to the outside world
/// (fetching and decoding images, resolving URLs).
#[derive(Debug, Error)]
pub enum RespswapError {
    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error with status code
    #[error("HTTP error {0} for {1}")]
    Http(u16, String),
    /// The fetched bytes were not a decodable image
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The loader has no image registered for this URL
    #[error("No image available for {0}")]
    NotFound(String),
}

/// Reasons an element's image data could not be extracted.
///
/// These are never fatal: the orchestrator reports them and moves on to the
/// next element. The display strings are the console diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Inline boxes have no well-defined background positioning area.
    #[error("Error: background-image on inline elements isn't supported.")]
    UnsupportedInlineFlow,
    #[error(
        "Error: Couldn't parse background-image. Make sure it is set, and note that only a single url(...) is currently supported."
    )]
    UnparsableBackgroundImage,
    #[error(
        "Error: Couldn't parse background-size. Make sure it is set, and note that multiple background sizes for multiple backgrounds aren't yet supported."
    )]
    UnparsableBackgroundSize,
    /// `background-size` leaves both dimensions to the image.
    #[error("Error: background-size must be set to a fixed size (percentages and cover/contain are ok).")]
    MissingFixedSize,
}

/// Convenience Result type for respswap operations
pub type Result<T> = std::result::Result<T, RespswapError>;
