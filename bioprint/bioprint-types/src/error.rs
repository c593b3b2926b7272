//! Error types for bioprint-types crate.

use thiserror::Error;

/// Errors that can occur when parsing or checking bioprint types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    /// Unknown polymer blend name.
    #[error("unknown polymer type: {0}")]
    UnknownPolymer(String),

    /// Unknown viability class name.
    #[error("unknown viability class: {0}")]
    UnknownViability(String),

    /// Unknown print quality name.
    #[error("unknown print quality: {0}")]
    UnknownQuality(String),

    /// Unknown feature name.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// Parameter validation failed.
    #[error(transparent)]
    Validation(#[from] crate::ValidationError),
}

impl TypesError {
    /// Creates an unknown polymer error.
    #[must_use]
    pub fn unknown_polymer(name: impl Into<String>) -> Self {
        Self::UnknownPolymer(name.into())
    }

    /// Creates an unknown viability class error.
    #[must_use]
    pub fn unknown_viability(name: impl Into<String>) -> Self {
        Self::UnknownViability(name.into())
    }

    /// Creates an unknown print quality error.
    #[must_use]
    pub fn unknown_quality(name: impl Into<String>) -> Self {
        Self::UnknownQuality(name.into())
    }

    /// Creates an unknown feature error.
    #[must_use]
    pub fn unknown_feature(name: impl Into<String>) -> Self {
        Self::UnknownFeature(name.into())
    }
}

/// Result type for bioprint-types operations.
pub type Result<T> = std::result::Result<T, TypesError>;
