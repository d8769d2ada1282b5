//! Error types for lasernest.

use thiserror::Error;

/// Result type alias for lasernest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or running a nesting job.
///
/// Degenerate geometry and unplaceable parts are not errors: the former is
/// reported as `None` by the geometry utilities, the latter ends up in
/// [`NestingResult::unplaced_parts`](crate::NestingResult::unplaced_parts).
#[derive(Debug, Error)]
pub enum Error {
    /// Nesting configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Drawing is not a flat 2D drawing.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Raw record decoding failed.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(String),
}
