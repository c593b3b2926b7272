//! Dataset summary and statistics.

use bioprint_types::{Feature, NUM_CLASSES, NUM_FEATURES, ViabilityClass};
use serde::{Deserialize, Serialize};

use crate::sample::BioprintingSample;

/// Range and mean of one feature column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    /// Feature described.
    pub feature: Feature,
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

/// Summary statistics for a dataset.
///
/// Shown to the user after an upload and before training.
///
/// # Example
///
/// ```
/// use bioprint_dataset::{DatasetSummary, reference_samples};
/// use bioprint_types::ViabilityClass;
///
/// let summary = DatasetSummary::from_samples(reference_samples());
/// assert_eq!(summary.total_samples, 5);
/// assert_eq!(summary.class_count(ViabilityClass::High), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Total number of samples.
    pub total_samples: usize,

    /// Samples per class, in `Low, Medium, High` order.
    pub class_counts: [usize; NUM_CLASSES],

    /// Per-feature statistics. Empty for an empty dataset.
    pub features: Vec<FeatureStats>,
}

impl DatasetSummary {
    /// Creates a summary from a slice of samples.
    #[must_use]
    pub fn from_samples(samples: &[BioprintingSample]) -> Self {
        let Some(first) = samples.first() else {
            return Self::default();
        };

        let mut class_counts = [0; NUM_CLASSES];
        let mut min = first.features();
        let mut max = min;
        let mut sum = [0.0; NUM_FEATURES];

        for sample in samples {
            class_counts[sample.label_index()] += 1;
            for (i, value) in sample.features().into_iter().enumerate() {
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
                sum[i] += value;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let n = samples.len() as f64;
        let features = Feature::ALL
            .into_iter()
            .map(|feature| {
                let i = feature.index();
                FeatureStats {
                    feature,
                    min: min[i],
                    max: max[i],
                    mean: sum[i] / n,
                }
            })
            .collect();

        Self {
            total_samples: samples.len(),
            class_counts,
            features,
        }
    }

    /// Returns true if the dataset is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_samples == 0
    }

    /// Number of samples labelled with `class`.
    #[must_use]
    pub const fn class_count(&self, class: ViabilityClass) -> usize {
        self.class_counts[class.index()]
    }

    /// Returns true if any class has no samples.
    #[must_use]
    pub fn has_missing_class(&self) -> bool {
        self.class_counts.contains(&0)
    }

    /// Statistics for one feature.
    #[must_use]
    pub fn feature(&self, feature: Feature) -> Option<&FeatureStats> {
        self.features.get(feature.index())
    }
}
