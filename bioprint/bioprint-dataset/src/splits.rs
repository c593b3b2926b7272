//! Dataset splitting utilities.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Ratio for splitting datasets into train/test partitions.
///
/// The ratio specifies the proportion of data to use for training.
/// The remainder goes to the test partition.
///
/// # Example
///
/// ```
/// use bioprint_dataset::SplitRatio;
///
/// // 80% train, 20% test
/// let ratio = SplitRatio::try_new(0.8).unwrap();
/// assert!((ratio.train_ratio() - 0.8).abs() < 1e-12);
/// assert!((ratio.test_ratio() - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SplitRatio {
    train: f64,
}

impl SplitRatio {
    /// Creates a split ratio.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidSplitRatio`] unless `train` is in `(0, 1)`.
    pub fn try_new(train: f64) -> Result<Self> {
        if train > 0.0 && train < 1.0 {
            Ok(Self { train })
        } else {
            Err(DatasetError::invalid_split_ratio(train))
        }
    }

    /// Returns the training ratio.
    #[must_use]
    pub const fn train_ratio(&self) -> f64 {
        self.train
    }

    /// Returns the test ratio.
    #[must_use]
    pub fn test_ratio(&self) -> f64 {
        1.0 - self.train
    }

    /// Computes the split point for a given dataset size: `round(total × train)`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn split_point(&self, total: usize) -> usize {
        ((total as f64 * self.train).round() as usize).min(total)
    }

    /// Common 80/20 split.
    pub const EIGHTY_TWENTY: Self = Self { train: 0.8 };

    /// Common 70/30 split.
    pub const SEVENTY_THIRTY: Self = Self { train: 0.7 };
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self::EIGHTY_TWENTY
    }
}

impl TryFrom<f64> for SplitRatio {
    type Error = DatasetError;

    fn try_from(value: f64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<SplitRatio> for f64 {
    fn from(ratio: SplitRatio) -> Self {
        ratio.train
    }
}

/// Splits items into `(train, test)` without shuffling.
///
/// The first `round(n × ratio)` items form the training partition and the
/// remainder the test partition, so the split is reproducible by
/// construction.
///
/// # Example
///
/// ```
/// use bioprint_dataset::{SplitRatio, split_sequential};
///
/// let items: Vec<u32> = (0..10).collect();
/// let (train, test) = split_sequential(&items, SplitRatio::EIGHTY_TWENTY);
/// assert_eq!(train, &[0, 1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(test, &[8, 9]);
/// ```
#[must_use]
pub fn split_sequential<T>(items: &[T], ratio: SplitRatio) -> (&[T], &[T]) {
    items.split_at(ratio.split_point(items.len()))
}
