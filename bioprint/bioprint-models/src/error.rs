//! Error types for bioprint-models crate.

use thiserror::Error;

/// Errors that can occur in bioprint-models operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Invalid model configuration.
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    /// Shape mismatch during inference.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape.
        expected: String,
        /// Actual shape.
        actual: String,
    },

    /// Tensor data could not be read back.
    #[error("tensor data error: {0}")]
    TensorData(String),
}

impl ModelError {
    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a tensor data error.
    #[must_use]
    pub fn tensor_data(reason: impl Into<String>) -> Self {
        Self::TensorData(reason.into())
    }
}

/// Result type for bioprint-models operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = ModelError::invalid_config("hidden layer width must be > 0");
        assert!(err.to_string().contains("hidden layer width must be > 0"));
    }

    #[test]
    fn error_shape_mismatch() {
        let err = ModelError::shape_mismatch("[n, 6]", "[n, 4]");
        assert!(err.to_string().contains("[n, 6]"));
        assert!(err.to_string().contains("[n, 4]"));
    }

    #[test]
    fn error_tensor_data() {
        let err = ModelError::tensor_data("type mismatch");
        assert!(err.to_string().contains("tensor data error"));
    }
}
