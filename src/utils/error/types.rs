//! Error types for the engine

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
///
/// Expected rejections on the resolution path (duplicate rank names, cycle
/// guards, missing targets) are reported as `bool` results by the managers
/// themselves; this enum covers the configuration and storage boundaries.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}
