//! Property-based tests for the scorers.
//!
//! Run with: cargo test -p bioprint-scoring -- proptest

use bioprint_scoring::{score_print_quality, score_viability, viability_score};
use bioprint_types::{PolymerType, PrintParameters, PrintQuality, ProcessParameters};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_process() -> impl Strategy<Value = ProcessParameters> {
    (
        -50.0..100.0f64,
        -100.0..400.0f64,
        -10.0..200.0f64,
        -1.0..2.0f64,
        -5.0..20.0f64,
        -10.0..200.0f64,
    )
        .prop_map(|(cd, t, s, lh, v, ct)| ProcessParameters::new(cd, t, s, lh, v, ct))
}

fn arb_polymer() -> impl Strategy<Value = PolymerType> {
    prop::sample::select(PolymerType::ALL.to_vec())
}

fn arb_print() -> impl Strategy<Value = PrintParameters> {
    (arb_polymer(), 0.05..0.5f64, 5.0..100.0f64, 100.0..250.0f64)
        .prop_map(|(p, lt, s, t)| PrintParameters::new(p, lt, s, t))
}

// =============================================================================
// Property Tests: Viability
// =============================================================================

proptest! {
    /// The distribution is always a valid probability vector.
    #[test]
    fn viability_is_normalized(params in arb_process()) {
        let prediction = score_viability(&params);
        prop_assert!(prediction.is_normalized(1e-9), "{:?}", prediction);
    }

    /// Scores stay within the attainable range.
    #[test]
    fn viability_score_bounds(params in arb_process()) {
        let score = viability_score(&params);
        prop_assert!((0.348 - 1e-9..=1.0 + 1e-9).contains(&score), "score {}", score);
    }

    /// Scoring twice gives the same answer.
    #[test]
    fn viability_is_idempotent(params in arb_process()) {
        prop_assert_eq!(score_viability(&params), score_viability(&params));
    }

    /// Very dense bioink never raises the high-viability share.
    #[test]
    fn dense_bioink_never_raises_high(
        sparse in 0.0..=7.0f64,
        dense in 12.01..100.0f64,
    ) {
        let base = ProcessParameters::default();
        let low_density = ProcessParameters { cell_density: sparse, ..base };
        let high_density = ProcessParameters { cell_density: dense, ..base };
        prop_assert!(score_viability(&high_density).high <= score_viability(&low_density).high);
    }
}

// =============================================================================
// Property Tests: Print Quality
// =============================================================================

proptest! {
    /// Impact weights always total 100.
    #[test]
    fn impact_sums_to_100(params in arb_print()) {
        prop_assert!((score_print_quality(&params).parameter_impact.total() - 100.0).abs() < 1e-12);
    }

    /// The distribution is a 100-point split with no negative share.
    #[test]
    fn distribution_sums_to_100(params in arb_print()) {
        let dist = score_print_quality(&params).quality_distribution;
        prop_assert!((dist.total() - 100.0).abs() < 1e-9);
        for share in dist.to_array() {
            prop_assert!((0.0..=100.0).contains(&share), "share {}", share);
        }
    }

    /// Confidence agrees with the class thresholds.
    #[test]
    fn confidence_matches_class(params in arb_print()) {
        let prediction = score_print_quality(&params);
        prop_assert!(prediction.confidence_score <= 100);
        if prediction.print_quality == PrintQuality::Bad {
            prop_assert!(prediction.confidence_score <= 50);
        } else {
            prop_assert!(prediction.confidence_score >= 50);
        }
    }

    /// Serialization is byte-identical across calls.
    #[test]
    fn quality_is_deterministic(params in arb_print()) {
        let a = serde_json::to_string(&score_print_quality(&params)).unwrap();
        let b = serde_json::to_string(&score_print_quality(&params)).unwrap();
        prop_assert_eq!(a, b);
    }
}
