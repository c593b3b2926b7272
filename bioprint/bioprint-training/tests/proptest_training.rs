//! Property-based tests for training metrics and configuration.
//!
//! Run with: cargo test -p bioprint-training -- proptest

use bioprint_dataset::reference_samples;
use bioprint_training::{
    ClassificationReport, ModelConfig, ModelSpec, RandomForestParams, TrainingError,
    TrainingResult, feature_importance_from_magnitudes, train,
};
use bioprint_types::ViabilityClass;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_class() -> impl Strategy<Value = ViabilityClass> {
    prop::sample::select(ViabilityClass::ALL.to_vec())
}

fn arb_pairs() -> impl Strategy<Value = Vec<(ViabilityClass, ViabilityClass)>> {
    prop::collection::vec((arb_class(), arb_class()), 0..64)
}

// =============================================================================
// Property Tests: Classification Report
// =============================================================================

proptest! {
    /// Every score is a fraction.
    #[test]
    fn report_scores_are_fractions(pairs in arb_pairs()) {
        let (actual, predicted): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let report = ClassificationReport::from_predictions(&actual, &predicted);
        for score in [report.accuracy, report.precision, report.recall, report.f1_score] {
            prop_assert!((0.0..=1.0).contains(&score), "score {}", score);
        }
    }

    /// The confusion matrix counts every evaluated pair once.
    #[test]
    fn confusion_counts_every_pair(pairs in arb_pairs()) {
        let (actual, predicted): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let report = ClassificationReport::from_predictions(&actual, &predicted);
        prop_assert_eq!(report.total() as usize, actual.len());

        for class in ViabilityClass::ALL {
            let support: u32 = report.confusion_matrix[class.index()].iter().sum();
            let expected = actual.iter().filter(|&&c| c == class).count();
            prop_assert_eq!(support as usize, expected);
        }
    }

    /// Agreement everywhere gives perfect scores.
    #[test]
    fn identical_predictions_are_perfect(classes in prop::collection::vec(arb_class(), 1..64)) {
        let report = ClassificationReport::from_predictions(&classes, &classes);
        prop_assert!((report.accuracy - 1.0).abs() < 1e-12);
        prop_assert!((report.f1_score - 1.0).abs() < 1e-12);
    }
}

// =============================================================================
// Property Tests: Feature Importance
// =============================================================================

proptest! {
    /// Importance always totals 100 and is sorted, largest first.
    #[test]
    fn importance_sums_to_100(magnitudes in prop::collection::vec(0.0..10.0f64, 6)) {
        let importance = feature_importance_from_magnitudes(&magnitudes);
        prop_assert_eq!(importance.len(), 6);

        let total: f64 = importance.iter().map(|f| f.importance).sum();
        prop_assert!((total - 100.0).abs() < 1e-9, "total {}", total);

        for pair in importance.windows(2) {
            prop_assert!(pair[0].importance >= pair[1].importance);
        }
    }
}

// =============================================================================
// Property Tests: Configuration
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Splits outside (0, 1) are rejected before any training.
    #[test]
    fn out_of_range_split_is_invalid(split in prop_oneof![-10.0..=0.0f64, 1.0..10.0f64]) {
        let config = ModelConfig::new(ModelSpec::RandomForest(RandomForestParams::default()))
            .with_train_test_split(split);
        let err = train(&config, reference_samples()).unwrap_err();
        prop_assert!(matches!(err, TrainingError::InvalidConfig(_)));
    }

    /// Simulated runs report the fixed result for any valid split and seed.
    #[test]
    fn simulated_result_ignores_split_and_seed(split in 0.01..0.99f64, seed in any::<u64>()) {
        let config = ModelConfig::new(ModelSpec::RandomForest(RandomForestParams::default()))
            .with_train_test_split(split)
            .with_random_seed(seed);
        prop_assert_eq!(train(&config, reference_samples()).unwrap(), TrainingResult::simulated());
    }
}
