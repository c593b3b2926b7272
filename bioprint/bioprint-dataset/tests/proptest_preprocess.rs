//! Property-based tests for preprocessing.
//!
//! Run with: cargo test -p bioprint-dataset -- proptest

use bioprint_dataset::{BioprintingSample, FeatureScaler, SplitRatio, preprocess};
use bioprint_types::{ProcessParameters, ViabilityClass};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_class() -> impl Strategy<Value = ViabilityClass> {
    prop_oneof![
        Just(ViabilityClass::Low),
        Just(ViabilityClass::Medium),
        Just(ViabilityClass::High),
    ]
}

fn arb_sample() -> impl Strategy<Value = BioprintingSample> {
    (
        1.0..20.0f64,
        150.0..230.0f64,
        10.0..60.0f64,
        0.1..0.5f64,
        1.0..6.0f64,
        10.0..90.0f64,
        arb_class(),
    )
        .prop_map(|(cd, t, s, lh, v, ct, class)| {
            BioprintingSample::new(ProcessParameters::new(cd, t, s, lh, v, ct), class)
        })
}

fn arb_ratio() -> impl Strategy<Value = SplitRatio> {
    (0.05..0.95f64).prop_map(|r| SplitRatio::try_new(r).unwrap())
}

// =============================================================================
// Property Tests: Pipeline
// =============================================================================

proptest! {
    /// Every row lands in exactly one partition, in order.
    #[test]
    fn partitions_cover_dataset(
        samples in prop::collection::vec(arb_sample(), 1..40),
        ratio in arb_ratio(),
    ) {
        let data = preprocess(&samples, ratio).unwrap();
        prop_assert_eq!(data.train_len() + data.test_len(), samples.len());
        prop_assert_eq!(data.train_len(), ratio.split_point(samples.len()));
        prop_assert_eq!(data.train_labels.len(), data.train_len());
        prop_assert_eq!(data.test_labels.len(), data.test_len());

        let labels = data.train_labels.iter().chain(&data.test_labels);
        for (sample, label) in samples.iter().zip(labels) {
            prop_assert_eq!(*label, sample.viability.one_hot());
        }
    }

    /// Scaled features stay inside the unit interval.
    #[test]
    fn scaled_features_in_unit_interval(
        samples in prop::collection::vec(arb_sample(), 1..40),
    ) {
        let data = preprocess(&samples, SplitRatio::default()).unwrap();
        for row in data.train_features.iter().chain(&data.test_features) {
            for &v in row {
                prop_assert!((0.0..=1.0).contains(&v), "scaled value {} out of range", v);
            }
        }
    }

    /// Inverse scaling recovers the raw features.
    #[test]
    fn scaling_round_trips(samples in prop::collection::vec(arb_sample(), 2..30)) {
        let rows: Vec<_> = samples.iter().map(BioprintingSample::features).collect();
        let scaler = FeatureScaler::fit(&rows).unwrap();

        for row in &rows {
            let back = scaler.inverse(&scaler.transform(row));
            for (a, b) in back.iter().zip(row) {
                prop_assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
            }
        }
    }
}

#[test]
fn empty_input_is_rejected() {
    assert!(preprocess(&[], SplitRatio::default()).is_err());
}
