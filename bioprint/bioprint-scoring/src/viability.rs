//! Weighted heuristic viability scorer.

use bioprint_types::{Feature, ProcessParameters, ViabilityClass, ViabilityPrediction};
use serde::{Deserialize, Serialize};

/// Optimal nozzle temperature (°C).
pub const OPTIMAL_TEMPERATURE: f64 = 190.0;

/// Optimal layer height (mm).
pub const OPTIMAL_LAYER_HEIGHT: f64 = 0.3;

/// Score at or above which high viability dominates.
pub const HIGH_REGIME: f64 = 0.8;

/// Score at or above which medium viability dominates.
pub const MEDIUM_REGIME: f64 = 0.6;

/// Weight of a feature in the viability score. Weights sum to one.
#[must_use]
pub const fn feature_weight(feature: Feature) -> f64 {
    match feature {
        Feature::CellDensity => 0.28,
        Feature::Temperature => 0.22,
        Feature::LayerHeight => 0.18,
        Feature::PrintSpeed => 0.15,
        Feature::CrosslinkTime => 0.12,
        Feature::Viscosity => 0.05,
    }
}

/// Fraction of a feature's weight earned by `value`.
///
/// Every comparison is written so that `NaN` falls through to the last
/// bucket.
#[must_use]
pub fn feature_factor(feature: Feature, value: f64) -> f64 {
    match feature {
        Feature::CellDensity => {
            if value <= 7.0 {
                1.0
            } else if value <= 10.0 {
                0.7
            } else if value <= 12.0 {
                0.4
            } else {
                0.2
            }
        }
        Feature::Temperature => {
            let diff = (value - OPTIMAL_TEMPERATURE).abs();
            if diff <= 5.0 {
                1.0
            } else if diff <= 10.0 {
                0.7
            } else {
                0.3
            }
        }
        Feature::LayerHeight => {
            if (value - OPTIMAL_LAYER_HEIGHT).abs() <= 0.05 {
                1.0
            } else {
                0.5
            }
        }
        Feature::PrintSpeed => {
            if value <= 35.0 {
                1.0
            } else {
                0.5
            }
        }
        Feature::CrosslinkTime => {
            if value >= 45.0 {
                1.0
            } else if value >= 35.0 {
                0.7
            } else {
                0.3
            }
        }
        Feature::Viscosity => {
            if (2.5..=3.5).contains(&value) {
                1.0
            } else {
                0.5
            }
        }
    }
}

/// Weighted viability score in `[0.348, 1.0]`.
///
/// # Example
///
/// ```
/// use bioprint_scoring::viability_score;
/// use bioprint_types::ProcessParameters;
///
/// // explorer defaults: only cell density (8) misses its optimal band
/// let score = viability_score(&ProcessParameters::default());
/// assert!((score - 0.916).abs() < 1e-9);
/// ```
#[must_use]
pub fn viability_score(params: &ProcessParameters) -> f64 {
    Feature::ALL
        .into_iter()
        .map(|f| feature_weight(f) * feature_factor(f, params.get(f)))
        .sum()
}

/// Maps a score to a viability distribution.
///
/// The piecewise regimes can produce slightly negative components near
/// their upper ends; [`ViabilityPrediction::from_raw`] clamps and
/// renormalises them.
#[must_use]
pub fn distribution_from_score(score: f64) -> ViabilityPrediction {
    if score >= HIGH_REGIME {
        let high = (score - HIGH_REGIME).mul_add(1.5, 0.7);
        let low = 0.05;
        ViabilityPrediction::from_raw(low, 1.0 - high - low, high)
    } else if score >= MEDIUM_REGIME {
        let medium = 0.6 + (score - MEDIUM_REGIME);
        let high = (score - MEDIUM_REGIME) * 2.0;
        ViabilityPrediction::from_raw(1.0 - high - medium, medium, high)
    } else {
        let low = (MEDIUM_REGIME - score).mul_add(0.5, 0.7);
        let high = 0.05;
        ViabilityPrediction::from_raw(low, 1.0 - low - high, high)
    }
}

/// Scores process parameters into a viability distribution.
///
/// Total and pure: any input, non-finite included, yields a distribution
/// whose components lie in `[0, 1]` and sum to one.
///
/// # Example
///
/// ```
/// use bioprint_scoring::score_viability;
/// use bioprint_types::{ProcessParameters, ViabilityClass};
///
/// let params = ProcessParameters::new(6.0, 190.0, 30.0, 0.3, 3.2, 45.0);
/// let prediction = score_viability(&params);
/// assert_eq!(prediction.most_likely(), ViabilityClass::High);
/// assert!(prediction.is_normalized(1e-9));
/// ```
#[must_use]
pub fn score_viability(params: &ProcessParameters) -> ViabilityPrediction {
    distribution_from_score(viability_score(params))
}

/// Viability distribution together with the score it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViabilityAssessment {
    /// Class probabilities.
    pub prediction: ViabilityPrediction,
    /// Weighted heuristic score.
    pub score: f64,
    /// Argmax of `prediction`.
    pub most_likely: ViabilityClass,
}

/// Scores parameters and reports the score and most likely class.
#[must_use]
pub fn assess_viability(params: &ProcessParameters) -> ViabilityAssessment {
    let score = viability_score(params);
    let prediction = distribution_from_score(score);
    ViabilityAssessment {
        prediction,
        score,
        most_likely: prediction.most_likely(),
    }
}

/// Improvement tips for parameters outside their optimal bands.
///
/// # Example
///
/// ```
/// use bioprint_scoring::viability_tips;
/// use bioprint_types::ProcessParameters;
///
/// assert!(viability_tips(&ProcessParameters::default()).is_empty());
///
/// let mut params = ProcessParameters::default();
/// params.print_speed = 50.0;
/// assert_eq!(viability_tips(&params), vec!["Reduce print speed below 35 mm/s"]);
/// ```
#[must_use]
pub fn viability_tips(params: &ProcessParameters) -> Vec<String> {
    let mut tips = Vec::new();

    if params.cell_density > 10.0 {
        tips.push("Reduce cell density below 10 ×10⁶ cells/mL".to_string());
    }
    if (params.temperature - OPTIMAL_TEMPERATURE).abs() > 5.0 {
        tips.push("Adjust temperature closer to 190°C".to_string());
    }
    if params.print_speed > 35.0 {
        tips.push("Reduce print speed below 35 mm/s".to_string());
    }
    if (params.layer_height - OPTIMAL_LAYER_HEIGHT).abs() > 0.05 {
        tips.push("Set layer height closer to 0.3 mm".to_string());
    }
    if params.crosslink_time < 45.0 {
        tips.push("Increase crosslink time to at least 45s".to_string());
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_a() -> ProcessParameters {
        ProcessParameters::new(6.0, 190.0, 30.0, 0.3, 3.2, 45.0)
    }

    fn scenario_b() -> ProcessParameters {
        ProcessParameters::new(15.0, 210.0, 20.0, 0.4, 2.0, 60.0)
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Feature::ALL.into_iter().map(feature_weight).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn scenario_a_is_high() {
        let assessment = assess_viability(&scenario_a());
        assert_relative_eq!(assessment.score, 1.0, epsilon = 1e-12);
        assert_eq!(assessment.most_likely, ViabilityClass::High);

        // raw (0.05, -0.05, 1.0) clamps to (0.05, 0, 1.0) and renormalises
        let p = assessment.prediction;
        assert_relative_eq!(p.medium, 0.0);
        assert_relative_eq!(p.low, 0.05 / 1.05, epsilon = 1e-12);
        assert_relative_eq!(p.high, 1.0 / 1.05, epsilon = 1e-12);
    }

    #[test]
    fn scenario_b_is_low() {
        let assessment = assess_viability(&scenario_b());
        assert_relative_eq!(assessment.score, 0.507, epsilon = 1e-12);
        assert_eq!(assessment.most_likely, ViabilityClass::Low);

        let p = assessment.prediction;
        assert_relative_eq!(p.low, 0.7465, epsilon = 1e-12);
        assert_relative_eq!(p.medium, 0.2035, epsilon = 1e-12);
        assert_relative_eq!(p.high, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn medium_regime_is_unchanged_when_valid() {
        let p = distribution_from_score(0.7);
        assert_relative_eq!(p.medium, 0.7, epsilon = 1e-12);
        assert_relative_eq!(p.high, 0.2, epsilon = 1e-12);
        assert_relative_eq!(p.low, 0.1, epsilon = 1e-12);
        assert_eq!(p.most_likely(), ViabilityClass::Medium);
    }

    #[test]
    fn medium_regime_upper_end_is_clamped() {
        let p = distribution_from_score(0.79);
        assert!(p.is_normalized(1e-9));
        assert_relative_eq!(p.low, 0.0);
    }

    #[test]
    fn minimum_score() {
        let worst = ProcessParameters::new(20.0, 100.0, 80.0, 1.0, 10.0, 5.0);
        assert_relative_eq!(viability_score(&worst), 0.348, epsilon = 1e-12);
    }

    #[test]
    fn non_finite_input_is_total() {
        let params = ProcessParameters::new(f64::NAN, f64::INFINITY, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        let score = viability_score(&params);
        assert_relative_eq!(score, 0.348, epsilon = 1e-12);
        assert!(score_viability(&params).is_normalized(1e-9));
    }

    #[test]
    fn factor_boundaries_are_inclusive() {
        assert_relative_eq!(feature_factor(Feature::CellDensity, 7.0), 1.0);
        assert_relative_eq!(feature_factor(Feature::CellDensity, 10.0), 0.7);
        assert_relative_eq!(feature_factor(Feature::CellDensity, 12.0), 0.4);
        assert_relative_eq!(feature_factor(Feature::Temperature, 195.0), 1.0);
        assert_relative_eq!(feature_factor(Feature::Temperature, 180.0), 0.7);
        assert_relative_eq!(feature_factor(Feature::PrintSpeed, 35.0), 1.0);
        assert_relative_eq!(feature_factor(Feature::CrosslinkTime, 35.0), 0.7);
        assert_relative_eq!(feature_factor(Feature::Viscosity, 3.5), 1.0);
        assert_relative_eq!(feature_factor(Feature::Viscosity, 3.6), 0.5);
    }

    #[test]
    fn tips_follow_explorer_order() {
        let tips = viability_tips(&scenario_b());
        assert_eq!(
            tips,
            vec![
                "Reduce cell density below 10 ×10⁶ cells/mL",
                "Adjust temperature closer to 190°C",
                "Set layer height closer to 0.3 mm",
            ]
        );

        let params = ProcessParameters::new(8.0, 190.0, 40.0, 0.3, 3.0, 30.0);
        assert_eq!(
            viability_tips(&params),
            vec![
                "Reduce print speed below 35 mm/s",
                "Increase crosslink time to at least 45s",
            ]
        );
    }

    #[test]
    fn assessment_json() {
        let json = serde_json::to_string(&assess_viability(&scenario_b())).unwrap();
        assert!(json.contains("\"mostLikely\":\"Low\""));
        assert!(json.contains("\"prediction\":{\"low\""));
    }
}
