//! Error types for bioprint-training crate.

use thiserror::Error;

/// Errors that can occur during training.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Invalid model configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset error.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Model error.
    #[error("model error: {0}")]
    Model(String),

    /// Training was interrupted.
    #[error("training interrupted: {0}")]
    Interrupted(String),

    /// Numerical instability detected.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl TrainingError {
    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a dataset error.
    #[must_use]
    pub fn dataset(reason: impl Into<String>) -> Self {
        Self::Dataset(reason.into())
    }

    /// Creates a model error.
    #[must_use]
    pub fn model(reason: impl Into<String>) -> Self {
        Self::Model(reason.into())
    }

    /// Creates an interrupted error.
    #[must_use]
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted(reason.into())
    }

    /// Creates a numerical instability error.
    #[must_use]
    pub fn numerical_instability(reason: impl Into<String>) -> Self {
        Self::NumericalInstability(reason.into())
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Config documents are the only JSON this crate reads.
impl From<serde_json::Error> for TrainingError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

impl From<bioprint_dataset::DatasetError> for TrainingError {
    fn from(err: bioprint_dataset::DatasetError) -> Self {
        match err {
            bioprint_dataset::DatasetError::InvalidSplitRatio(_) => {
                Self::InvalidConfig(err.to_string())
            }
            other => Self::Dataset(other.to_string()),
        }
    }
}

impl From<bioprint_models::ModelError> for TrainingError {
    fn from(err: bioprint_models::ModelError) -> Self {
        match err {
            bioprint_models::ModelError::InvalidConfig(_) => Self::InvalidConfig(err.to_string()),
            other => Self::Model(other.to_string()),
        }
    }
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = TrainingError::invalid_config("batch size must be > 0");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("batch size"));
    }

    #[test]
    fn error_interrupted() {
        let err = TrainingError::interrupted("cancelled at epoch 3");
        assert!(err.to_string().contains("training interrupted"));
    }

    #[test]
    fn error_numerical_instability() {
        let err = TrainingError::numerical_instability("loss is NaN");
        assert!(err.to_string().contains("numerical instability"));
    }

    #[test]
    fn split_ratio_maps_to_invalid_config() {
        let err: TrainingError = bioprint_dataset::DatasetError::invalid_split_ratio(1.5).into();
        assert!(matches!(err, TrainingError::InvalidConfig(_)));
    }

    #[test]
    fn empty_dataset_maps_to_dataset() {
        let err: TrainingError = bioprint_dataset::DatasetError::EmptyDataset.into();
        assert!(matches!(err, TrainingError::Dataset(_)));
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrainingError = json_err.into();
        assert!(matches!(err, TrainingError::InvalidConfig(_)));
    }

    #[test]
    fn error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json");
        let err: TrainingError = io_err.into();
        assert!(matches!(err, TrainingError::Io(_)));
    }
}
