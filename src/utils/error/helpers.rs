//! Helper functions for creating specific error types

use super::types::EngineError;

/// Helper functions for creating specific errors
impl EngineError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }
}
