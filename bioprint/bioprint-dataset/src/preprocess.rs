//! Preprocessing pipeline: scale, split, encode.

use bioprint_types::ViabilityClass;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoding::{OneHot, one_hot_encode};
use crate::error::{DatasetError, Result};
use crate::sample::BioprintingSample;
use crate::scaler::{FeatureRow, FeatureScaler};
use crate::splits::{SplitRatio, split_sequential};

/// Classifier-ready tensors produced by [`preprocess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessedData {
    /// Scaled training features.
    pub train_features: Vec<FeatureRow>,

    /// One-hot training labels.
    pub train_labels: Vec<OneHot>,

    /// Scaled test features.
    pub test_features: Vec<FeatureRow>,

    /// One-hot test labels.
    pub test_labels: Vec<OneHot>,

    /// Bounds fitted on the full dataset.
    #[serde(flatten)]
    pub scaler: FeatureScaler,
}

impl PreprocessedData {
    /// Per-feature minimum used for scaling.
    #[must_use]
    pub const fn feature_min(&self) -> &FeatureRow {
        self.scaler.feature_min()
    }

    /// Per-feature maximum used for scaling.
    #[must_use]
    pub const fn feature_max(&self) -> &FeatureRow {
        self.scaler.feature_max()
    }

    /// Number of training rows.
    #[must_use]
    pub fn train_len(&self) -> usize {
        self.train_features.len()
    }

    /// Number of test rows.
    #[must_use]
    pub fn test_len(&self) -> usize {
        self.test_features.len()
    }
}

/// Prepares samples for a classifier.
///
/// 1. Fits a [`FeatureScaler`] on every sample and scales the features.
/// 2. One-hot encodes the viability labels.
/// 3. Splits sequentially at `round(n × ratio)`: the first rows train, the
///    rest test.
///
/// # Errors
///
/// Returns [`DatasetError::EmptyDataset`] if `samples` is empty.
///
/// # Example
///
/// ```
/// use bioprint_dataset::{SplitRatio, preprocess, reference_samples};
///
/// let data = preprocess(reference_samples(), SplitRatio::EIGHTY_TWENTY).unwrap();
/// assert_eq!(data.train_len(), 4);
/// assert_eq!(data.test_len(), 1);
/// assert_eq!(data.feature_min()[0], 5.0);
/// ```
pub fn preprocess(samples: &[BioprintingSample], ratio: SplitRatio) -> Result<PreprocessedData> {
    if samples.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }

    let raw: Vec<FeatureRow> = samples.iter().map(BioprintingSample::features).collect();
    let scaler = FeatureScaler::fit(&raw)?;
    let scaled: Vec<FeatureRow> = raw.iter().map(|row| scaler.transform(row)).collect();

    let classes: Vec<ViabilityClass> = samples.iter().map(|s| s.viability).collect();
    let labels = one_hot_encode(&classes);

    let (train_features, test_features) = split_sequential(&scaled, ratio);
    let (train_labels, test_labels) = split_sequential(&labels, ratio);

    debug!(
        samples = samples.len(),
        train = train_features.len(),
        test = test_features.len(),
        "preprocessed dataset"
    );

    Ok(PreprocessedData {
        train_features: train_features.to_vec(),
        train_labels: train_labels.to_vec(),
        test_features: test_features.to_vec(),
        test_labels: test_labels.to_vec(),
        scaler,
    })
}
