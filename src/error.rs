//! Error types for the workload engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the engine.
///
/// Arithmetic edge cases (zero capacity, empty day sets) are never errors;
/// they resolve to `0.0` at the call site.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Required input was empty or malformed.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Unsupported periodical bucketing key.
    #[error("Invalid interval key: {0} (expected day, week or month)")]
    InvalidIntervalKey(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Configuration document could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl EngineError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a not-found error for a resource id.
    pub fn resource_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Resource",
            id: id.into(),
        }
    }
}
