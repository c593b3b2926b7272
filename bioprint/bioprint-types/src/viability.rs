//! Cell viability classes and probability distributions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Number of viability classes.
pub const NUM_CLASSES: usize = 3;

/// Cell viability outcome.
///
/// The discriminant is the class index used for label encoding.
///
/// # Example
///
/// ```
/// use bioprint_types::ViabilityClass;
///
/// assert_eq!(ViabilityClass::Medium.index(), 1);
/// assert_eq!(ViabilityClass::High.one_hot(), [0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViabilityClass {
    /// Low cell survival.
    Low = 0,
    /// Medium cell survival.
    Medium = 1,
    /// High cell survival.
    High = 2,
}

impl ViabilityClass {
    /// All classes in index order.
    pub const ALL: [Self; NUM_CLASSES] = [Self::Low, Self::Medium, Self::High];

    /// Class index (`Low = 0`, `Medium = 1`, `High = 2`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a class by index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// One-hot encoding of width [`NUM_CLASSES`].
    #[must_use]
    pub fn one_hot(self) -> [f64; NUM_CLASSES] {
        let mut encoded = [0.0; NUM_CLASSES];
        encoded[self.index()] = 1.0;
        encoded
    }

    /// Class name (`Low`, `Medium`, `High`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Lowercase key used in prediction payloads (`low`, `medium`, `high`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ViabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ViabilityClass {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypesError::unknown_viability(s))
    }
}

/// Probability distribution over the three viability classes.
///
/// Values are non-negative and sum to one when built through
/// [`ViabilityPrediction::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityPrediction {
    /// Probability of low viability.
    pub low: f64,
    /// Probability of medium viability.
    pub medium: f64,
    /// Probability of high viability.
    pub high: f64,
}

impl ViabilityPrediction {
    /// Creates a prediction from already-normalised probabilities.
    #[must_use]
    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    /// Builds a distribution from unnormalised weights.
    ///
    /// Each weight is clamped to `[0, 1]` (non-finite weights count as zero)
    /// and the triple is divided by its sum. If every weight clamps to zero
    /// the result is uniform.
    #[must_use]
    pub fn from_raw(low: f64, medium: f64, high: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let (low, medium, high) = (clamp(low), clamp(medium), clamp(high));
        let total = low + medium + high;
        if total <= 0.0 {
            let third = 1.0 / 3.0;
            return Self::new(third, third, third);
        }
        Self::new(low / total, medium / total, high / total)
    }

    /// Builds a distribution from class-ordered probabilities.
    #[must_use]
    pub fn from_array(probabilities: [f64; NUM_CLASSES]) -> Self {
        Self::from_raw(probabilities[0], probabilities[1], probabilities[2])
    }

    /// Returns the probabilities in class order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; NUM_CLASSES] {
        [self.low, self.medium, self.high]
    }

    /// Returns the probability of a class.
    #[must_use]
    pub const fn get(&self, class: ViabilityClass) -> f64 {
        match class {
            ViabilityClass::Low => self.low,
            ViabilityClass::Medium => self.medium,
            ViabilityClass::High => self.high,
        }
    }

    /// Returns the most likely class.
    ///
    /// Ties resolve to the earliest class in `Low, Medium, High` order.
    #[must_use]
    pub fn most_likely(&self) -> ViabilityClass {
        let mut best = ViabilityClass::Low;
        for class in [ViabilityClass::Medium, ViabilityClass::High] {
            if self.get(class) > self.get(best) {
                best = class;
            }
        }
        best
    }

    /// Returns true if all values are in `[0, 1]` and sum to one within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        let in_range = self.to_array().iter().all(|p| (0.0..=1.0).contains(p));
        in_range && (self.low + self.medium + self.high - 1.0).abs() <= tolerance
    }
}
