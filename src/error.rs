//! Error types for the presentation engine

use thiserror::Error;

/// Result type alias for presentation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a presentation.
///
/// Runtime failures (a transition naming an unknown scene, a refused media
/// play attempt, placement running out of attempts) are not represented
/// here: every one of them has a defined degraded continuation and must
/// never halt the presentation. Only construction-time problems surface as
/// errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured scene set is empty or the initial scene is not in it
    #[error("Invalid scene set: {0}")]
    SceneSetError(String),

    /// A required element is missing from the document surface
    #[error("Required element not found: {0}")]
    MissingElement(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
