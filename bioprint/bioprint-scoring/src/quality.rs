//! Deterministic print-quality scorer.

use bioprint_types::{
    ParameterImpact, PolymerType, PrintParameters, PrintQuality, QualityDistribution,
    QualityPrediction, Recommendations,
};
use tracing::debug;

/// Static print characteristics of a polymer blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolymerProfile {
    /// Baseline contribution to the quality score.
    pub base_score: f64,
    /// Extrusion temperature with the best print quality (°C).
    pub optimal_temperature: f64,
    /// Fixed facts reported with every assessment.
    pub insights: &'static [&'static str],
}

/// Looks up the profile of a polymer blend.
#[must_use]
pub const fn polymer_profile(polymer: PolymerType) -> PolymerProfile {
    match polymer {
        PolymerType::PlaGelatin => PolymerProfile {
            base_score: 80.0,
            optimal_temperature: 140.0,
            insights: &[
                "PLA-Gelatin blends offer good biocompatibility and moderate mechanical properties.",
                "Optimal printing temperature is around 140°C for this blend.",
            ],
        },
        PolymerType::PclAlginate => PolymerProfile {
            base_score: 75.0,
            optimal_temperature: 140.0,
            insights: &[
                "PCL-Alginate composites provide excellent flexibility and controlled degradation.",
                "Lower temperatures (130-140°C) are recommended for this blend.",
            ],
        },
        PolymerType::PlgaCollagen => PolymerProfile {
            base_score: 85.0,
            optimal_temperature: 160.0,
            insights: &[
                "PLGA-Collagen scaffolds offer superior cell adhesion and controlled degradation.",
            ],
        },
        PolymerType::PegFibrin => PolymerProfile {
            base_score: 70.0,
            optimal_temperature: 130.0,
            insights: &[
                "PEG-Fibrin hydrogels are excellent for soft tissue applications but have lower mechanical strength.",
                "Lower printing temperatures (120-130°C) help preserve bioactivity.",
            ],
        },
        PolymerType::PhaChitosan => PolymerProfile {
            base_score: 65.0,
            optimal_temperature: 150.0,
            insights: &[
                "PHA-Chitosan blends provide good antimicrobial properties but can be challenging to print.",
            ],
        },
    }
}

const THICKNESS_WEIGHT: f64 = 0.3;
const SPEED_WEIGHT: f64 = 0.2;
const TEMPERATURE_WEIGHT: f64 = 0.3;
const NORMALIZER: f64 = 1.8;

/// Quality score in `[0, 100]`.
///
/// Thinner layers, slower speeds and temperatures near the polymer's
/// optimum score higher. Overflowing results clamp to the nearest bound
/// and an undefined (NaN) result scores 0.
///
/// # Example
///
/// ```
/// use bioprint_scoring::quality_score;
/// use bioprint_types::{PolymerType, PrintParameters};
///
/// let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.2, 30.0, 160.0);
/// assert!((quality_score(&params) - 83.187).abs() < 1e-3);
/// ```
#[must_use]
pub fn quality_score(params: &PrintParameters) -> f64 {
    let profile = polymer_profile(params.polymer_type);

    let thickness = 100.0 - ((params.layer_thickness - 0.05) / 0.45) * 100.0;
    let speed = 100.0 - ((params.print_speed - 5.0) / 95.0) * 100.0;
    let temp_diff = (params.temperature - profile.optimal_temperature).abs();
    let temperature = 100.0 - (temp_diff / 30.0) * 100.0;

    let raw = TEMPERATURE_WEIGHT.mul_add(
        temperature,
        SPEED_WEIGHT.mul_add(speed, THICKNESS_WEIGHT.mul_add(thickness, profile.base_score)),
    ) / NORMALIZER;

    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

/// Splits 100 percentage points across quality classes.
#[must_use]
pub fn quality_distribution(quality: PrintQuality, score: f64) -> QualityDistribution {
    match quality {
        PrintQuality::Good => QualityDistribution::new(score, 100.0 - score, 0.0),
        PrintQuality::Medium => QualityDistribution::new(score - 50.0, 50.0, 100.0 - score),
        PrintQuality::Bad => QualityDistribution::new(0.0, score, 100.0 - score),
    }
}

/// Scores print parameters with the deterministic heuristic.
///
/// Pure: identical inputs produce identical (byte-for-byte serialised)
/// outputs.
///
/// # Example
///
/// ```
/// use bioprint_scoring::score_print_quality;
/// use bioprint_types::{PolymerType, PrintParameters, PrintQuality};
///
/// let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.2, 30.0, 160.0);
/// let prediction = score_print_quality(&params);
///
/// assert_eq!(prediction.print_quality, PrintQuality::Good);
/// assert_eq!(prediction.confidence_score, 83);
/// ```
#[must_use]
pub fn score_print_quality(params: &PrintParameters) -> QualityPrediction {
    let profile = polymer_profile(params.polymer_type);
    let score = quality_score(params);
    let print_quality = PrintQuality::from_score(score);
    let temp_diff = (params.temperature - profile.optimal_temperature).abs();

    let mut insights = Vec::new();

    if params.layer_thickness > 0.3 {
        insights.push("Layer thickness is relatively high, which may reduce print detail.".to_string());
    } else if params.layer_thickness < 0.1 {
        insights.push("Very thin layers may increase print time and risk of print failures.".to_string());
    }

    if params.print_speed > 60.0 {
        insights.push(
            "High print speed may reduce print quality, especially for complex structures."
                .to_string(),
        );
    } else if params.print_speed < 15.0 {
        insights.push("Very slow print speed will result in longer print times.".to_string());
    }

    if temp_diff > 20.0 {
        insights.push(format!(
            "Temperature is significantly different from the optimal temperature for {}.",
            params.polymer_type
        ));
    }

    insights.extend(profile.insights.iter().map(|s| (*s).to_string()));

    let mut recommendations = Recommendations::default();

    if temp_diff > 10.0 {
        recommendations.temperature = Some(profile.optimal_temperature);
    }
    if params.layer_thickness > 0.3 && print_quality != PrintQuality::Good {
        recommendations.layer_thickness = Some(0.2);
    }
    if params.print_speed > 60.0 && print_quality != PrintQuality::Good {
        recommendations.print_speed = Some(30.0);
    }
    if print_quality == PrintQuality::Bad && params.polymer_type == PolymerType::PhaChitosan {
        recommendations.polymer_type = Some(PolymerType::PlgaCollagen);
        insights.push("Consider switching to PLGA-Collagen for better printability.".to_string());
    }

    debug!(
        polymer = %params.polymer_type,
        score,
        quality = %print_quality,
        "scored print quality"
    );

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence_score = score.round() as u8;

    QualityPrediction {
        print_quality,
        confidence_score,
        insights,
        recommendations,
        parameter_impact: ParameterImpact::HEURISTIC,
        quality_distribution: quality_distribution(print_quality, score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scenario_c_is_good() {
        let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.2, 30.0, 160.0);
        let prediction = score_print_quality(&params);

        // (85 + 20 + 14.7368 + 30) / 1.8
        assert_relative_eq!(quality_score(&params), 149.736_842_105 / 1.8, epsilon = 1e-6);
        assert_eq!(prediction.print_quality, PrintQuality::Good);
        assert_eq!(prediction.confidence_score, 83);
        assert!(prediction.recommendations.is_empty());
        assert_eq!(
            prediction.insights,
            vec!["PLGA-Collagen scaffolds offer superior cell adhesion and controlled degradation."]
        );
        assert_relative_eq!(prediction.quality_distribution.total(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(prediction.quality_distribution.bad, 0.0);
    }

    #[test]
    fn bad_pha_chitosan_recommends_switch() {
        let params = PrintParameters::new(PolymerType::PhaChitosan, 0.5, 100.0, 250.0);
        let prediction = score_print_quality(&params);

        assert_eq!(prediction.print_quality, PrintQuality::Bad);
        assert_eq!(
            prediction.recommendations.polymer_type,
            Some(PolymerType::PlgaCollagen)
        );
        assert_eq!(prediction.recommendations.temperature, Some(150.0));
        assert_eq!(prediction.recommendations.layer_thickness, Some(0.2));
        assert_eq!(prediction.recommendations.print_speed, Some(30.0));
        assert_eq!(
            prediction.insights.last().map(String::as_str),
            Some("Consider switching to PLGA-Collagen for better printability.")
        );
        assert!(
            prediction
                .insights
                .iter()
                .any(|i| i.contains("optimal temperature for PHA-Chitosan"))
        );
    }

    #[test]
    fn insights_are_ordered() {
        let params = PrintParameters::new(PolymerType::PegFibrin, 0.08, 10.0, 130.0);
        let prediction = score_print_quality(&params);
        assert_eq!(
            prediction.insights,
            vec![
                "Very thin layers may increase print time and risk of print failures.",
                "Very slow print speed will result in longer print times.",
                "PEG-Fibrin hydrogels are excellent for soft tissue applications but have lower mechanical strength.",
                "Lower printing temperatures (120-130°C) help preserve bioactivity.",
            ]
        );
    }

    #[test]
    fn medium_distribution() {
        let dist = quality_distribution(PrintQuality::Medium, 60.0);
        assert_relative_eq!(dist.good, 10.0);
        assert_relative_eq!(dist.medium, 50.0);
        assert_relative_eq!(dist.bad, 40.0);
    }

    #[test]
    fn good_class_skips_thickness_and_speed_advice() {
        // thick but otherwise excellent: PLGA-Collagen at optimum, slow
        let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.32, 5.0, 160.0);
        let prediction = score_print_quality(&params);
        assert_eq!(prediction.print_quality, PrintQuality::Good);
        assert!(prediction.recommendations.layer_thickness.is_none());
    }

    #[test]
    fn score_is_clamped() {
        let params = PrintParameters::new(PolymerType::PegFibrin, 0.5, 100.0, 250.0);
        assert_relative_eq!(quality_score(&params), 0.0);

        let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.05, 5.0, 160.0);
        // (85 + 30 + 20 + 30) / 1.8
        assert_relative_eq!(quality_score(&params), 165.0 / 1.8, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_degrades_to_zero() {
        let params = PrintParameters::new(PolymerType::PlaGelatin, f64::NAN, 30.0, 140.0);
        let prediction = score_print_quality(&params);
        assert_eq!(prediction.print_quality, PrintQuality::Bad);
        assert_eq!(prediction.confidence_score, 0);
        assert_relative_eq!(prediction.quality_distribution.bad, 100.0);
    }

    #[test]
    fn overflow_clamps_to_nearest_bound() {
        let params = PrintParameters::new(PolymerType::PlgaCollagen, -1e308, 30.0, 160.0);
        let prediction = score_print_quality(&params);
        assert_relative_eq!(quality_score(&params), 100.0);
        assert_eq!(prediction.print_quality, PrintQuality::Good);
        assert_eq!(prediction.confidence_score, 100);

        let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.2, f64::INFINITY, 160.0);
        assert_relative_eq!(quality_score(&params), 0.0);
        assert_eq!(score_print_quality(&params).print_quality, PrintQuality::Bad);
    }

    #[test]
    fn serialisation_is_deterministic() {
        let params = PrintParameters::new(PolymerType::PclAlginate, 0.35, 70.0, 175.0);
        let a = serde_json::to_string(&score_print_quality(&params)).unwrap();
        let b = serde_json::to_string(&score_print_quality(&params)).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("\"printQuality\""));
        assert!(a.contains("\"parameterImpact\":{\"polymerType\":35.0"));
    }
}
