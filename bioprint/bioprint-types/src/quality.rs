//! Print quality assessment types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::params::PolymerType;

/// Print quality class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintQuality {
    /// Quality score of at least 75.
    Good,
    /// Quality score in `[50, 75)`.
    Medium,
    /// Quality score below 50.
    Bad,
}

impl PrintQuality {
    /// Lower bound of the `Good` class.
    pub const GOOD_THRESHOLD: f64 = 75.0;

    /// Lower bound of the `Medium` class.
    pub const MEDIUM_THRESHOLD: f64 = 50.0;

    /// Classifies a quality score in `[0, 100]`.
    ///
    /// # Example
    ///
    /// ```
    /// use bioprint_types::PrintQuality;
    ///
    /// assert_eq!(PrintQuality::from_score(75.0), PrintQuality::Good);
    /// assert_eq!(PrintQuality::from_score(74.9), PrintQuality::Medium);
    /// assert_eq!(PrintQuality::from_score(10.0), PrintQuality::Bad);
    /// ```
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::GOOD_THRESHOLD {
            Self::Good
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Bad
        }
    }

    /// Class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Medium => "Medium",
            Self::Bad => "Bad",
        }
    }
}

impl std::fmt::Display for PrintQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PrintQuality {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Good" => Ok(Self::Good),
            "Medium" => Ok(Self::Medium),
            "Bad" => Ok(Self::Bad),
            other => Err(TypesError::unknown_quality(other)),
        }
    }
}

/// Suggested parameter changes. Absent fields mean "keep as is".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Suggested polymer blend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polymer_type: Option<PolymerType>,

    /// Suggested layer thickness (mm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_thickness: Option<f64>,

    /// Suggested print speed (mm/s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_speed: Option<f64>,

    /// Suggested temperature (°C).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Recommendations {
    /// Returns true if no change is suggested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.polymer_type.is_none()
            && self.layer_thickness.is_none()
            && self.print_speed.is_none()
            && self.temperature.is_none()
    }
}

/// Relative weight of each print parameter, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterImpact {
    /// Polymer blend weight.
    pub polymer_type: f64,
    /// Layer thickness weight.
    pub layer_thickness: f64,
    /// Print speed weight.
    pub print_speed: f64,
    /// Temperature weight.
    pub temperature: f64,
}

impl ParameterImpact {
    /// Heuristic weights reported by the deterministic scorer.
    pub const HEURISTIC: Self = Self {
        polymer_type: 35.0,
        layer_thickness: 25.0,
        print_speed: 15.0,
        temperature: 25.0,
    };

    /// Returns the weights in field order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [
            self.polymer_type,
            self.layer_thickness,
            self.print_speed,
            self.temperature,
        ]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

impl Default for ParameterImpact {
    fn default() -> Self {
        Self::HEURISTIC
    }
}

/// Percentage split of expected outcomes across quality classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityDistribution {
    /// Share of good prints.
    pub good: f64,
    /// Share of medium prints.
    pub medium: f64,
    /// Share of bad prints.
    pub bad: f64,
}

impl QualityDistribution {
    /// Creates a distribution.
    #[must_use]
    pub const fn new(good: f64, medium: f64, bad: f64) -> Self {
        Self { good, medium, bad }
    }

    /// Returns the shares in `good, medium, bad` order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.good, self.medium, self.bad]
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.good + self.medium + self.bad
    }
}

/// Full print quality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityPrediction {
    /// Predicted class.
    pub print_quality: PrintQuality,

    /// Confidence in percent.
    pub confidence_score: u8,

    /// Ordered observations about the parameters.
    pub insights: Vec<String>,

    /// Suggested parameter changes.
    pub recommendations: Recommendations,

    /// Relative parameter weights.
    pub parameter_impact: ParameterImpact,

    /// Outcome split across classes.
    pub quality_distribution: QualityDistribution,
}
