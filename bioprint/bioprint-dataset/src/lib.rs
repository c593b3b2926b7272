//! Bioprinting datasets and preprocessing.
//!
//! This crate turns labelled bioprinting runs into classifier-ready data:
//!
//! # Samples
//!
//! - [`BioprintingSample`] - Process parameters plus observed viability
//! - [`reference_samples`] - The built-in five-run reference dataset
//! - [`DatasetSummary`] - Class counts and per-feature ranges
//!
//! # Preprocessing
//!
//! - [`FeatureScaler`] - Per-feature min-max scaling
//! - [`SplitRatio`] / [`split_sequential`] - Order-preserving train/test split
//! - [`one_hot_encode`] / [`decode_class`] - Label encoding
//! - [`preprocess`] - Scale, encode and split in one step
//!
//! # Ingestion
//!
//! - [`DatasetFormat`] - Upload format detection (CSV, XLSX)
//! - [`read_csv_samples`] / [`read_samples_from_path`] - CSV parsing
//!
//! # Example
//!
//! ```
//! use bioprint_dataset::{SplitRatio, preprocess, reference_samples};
//!
//! let data = preprocess(reference_samples(), SplitRatio::default()).unwrap();
//!
//! assert_eq!(data.train_features.len(), 4);
//! assert_eq!(data.test_labels.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod encoding;
mod error;
mod ingest;
mod preprocess;
mod sample;
mod scaler;
mod splits;
mod summary;

// Re-export sample types
pub use sample::{BioprintingSample, reference_samples};

// Re-export preprocessing
pub use encoding::{OneHot, decode_class, one_hot_encode};
pub use preprocess::{PreprocessedData, preprocess};
pub use scaler::{FeatureRow, FeatureScaler};
pub use splits::{SplitRatio, split_sequential};

// Re-export summary types
pub use summary::{DatasetSummary, FeatureStats};

// Re-export ingestion
pub use ingest::{DatasetFormat, estimate_row_count, read_csv_samples, read_samples_from_path};

// Re-export error types
pub use error::{DatasetError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        BioprintingSample, DatasetError, DatasetSummary, FeatureScaler, PreprocessedData,
        SplitRatio, preprocess, reference_samples, split_sequential,
    };
}
