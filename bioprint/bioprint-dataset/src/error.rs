//! Error types for bioprint-dataset crate.

use thiserror::Error;

/// Errors that can occur in bioprint-dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Empty dataset.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Invalid split ratio.
    #[error("invalid split ratio: {0} (must be in (0, 1))")]
    InvalidSplitRatio(f64),

    /// A row could not be turned into a sample.
    #[error("invalid sample at row {row}: {reason}")]
    InvalidSample {
        /// One-based data row (header excluded).
        row: usize,
        /// Reason for failure.
        reason: String,
    },

    /// File format is recognised but cannot be read.
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DatasetError {
    /// Creates an invalid split ratio error.
    #[must_use]
    pub const fn invalid_split_ratio(ratio: f64) -> Self {
        Self::InvalidSplitRatio(ratio)
    }

    /// Creates an invalid sample error.
    #[must_use]
    pub fn invalid_sample(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSample {
            row,
            reason: reason.into(),
        }
    }

    /// Creates an unsupported format error.
    #[must_use]
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat(name.into())
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type for bioprint-dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
