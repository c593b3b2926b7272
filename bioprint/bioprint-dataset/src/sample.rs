//! Labelled bioprinting samples and the built-in reference dataset.

use bioprint_types::{NUM_FEATURES, ProcessParameters, ViabilityClass};
use serde::{Deserialize, Serialize};

/// A single labelled bioprinting run.
///
/// # Example
///
/// ```
/// use bioprint_dataset::{BioprintingSample, reference_samples};
/// use bioprint_types::ViabilityClass;
///
/// let first = &reference_samples()[0];
/// assert_eq!(first.viability, ViabilityClass::High);
/// assert_eq!(first.features()[0], 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioprintingSample {
    /// Process parameters of the run.
    #[serde(flatten)]
    pub parameters: ProcessParameters,

    /// Observed viability.
    pub viability: ViabilityClass,
}

impl BioprintingSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(parameters: ProcessParameters, viability: ViabilityClass) -> Self {
        Self {
            parameters,
            viability,
        }
    }

    /// Returns the raw feature vector.
    #[must_use]
    pub const fn features(&self) -> [f64; NUM_FEATURES] {
        self.parameters.to_features()
    }

    /// Returns the class index of the label.
    #[must_use]
    pub const fn label_index(&self) -> usize {
        self.viability.index()
    }
}

static REFERENCE_SAMPLES: [BioprintingSample; 5] = [
    BioprintingSample::new(
        ProcessParameters::new(5.0, 180.0, 30.0, 0.3, 3.5, 30.0),
        ViabilityClass::High,
    ),
    BioprintingSample::new(
        ProcessParameters::new(10.0, 200.0, 25.0, 0.2, 2.8, 45.0),
        ViabilityClass::Medium,
    ),
    BioprintingSample::new(
        ProcessParameters::new(5.0, 190.0, 40.0, 0.3, 4.0, 30.0),
        ViabilityClass::High,
    ),
    BioprintingSample::new(
        ProcessParameters::new(15.0, 210.0, 20.0, 0.4, 2.0, 60.0),
        ViabilityClass::Low,
    ),
    BioprintingSample::new(
        ProcessParameters::new(10.0, 195.0, 35.0, 0.25, 3.2, 50.0),
        ViabilityClass::Medium,
    ),
];

/// The built-in reference dataset.
///
/// Loaded once, never mutated; shared by every caller for the lifetime of
/// the process.
#[must_use]
pub fn reference_samples() -> &'static [BioprintingSample] {
    &REFERENCE_SAMPLES
}
