//! Error types for bioprint-scoring crate.

use std::time::Duration;

use thiserror::Error;

/// Reasons an enrichment response was not used.
///
/// These never escape [`crate::score_print_quality_enriched`], which logs
/// them and falls back to the heuristic.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The collaborator could not be reached or returned an error.
    #[error("enrichment transport error: {0}")]
    Transport(String),

    /// The enrichment settings cannot produce an attempt.
    #[error("invalid enrichment config: {0}")]
    InvalidConfig(String),

    /// No response within the configured timeout.
    #[error("enrichment timed out after {0:?}")]
    Timeout(Duration),

    /// The response did not contain parseable JSON.
    #[error("enrichment parse error: {0}")]
    Parse(String),

    /// The JSON parsed but violates the response schema.
    #[error("enrichment schema violation: {0}")]
    Schema(String),
}

impl EnrichmentError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Creates a schema error.
    #[must_use]
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::Schema(reason.into())
    }
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for bioprint-scoring operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
