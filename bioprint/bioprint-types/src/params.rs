//! Process and print parameter types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::validation::ValidationError;

/// Number of process features fed to viability models.
pub const NUM_FEATURES: usize = 6;

/// Bioprinting process parameters that drive cell viability.
///
/// Units follow the dashboard: cell density in 10⁶ cells/mL, nozzle
/// temperature in °C, print speed in mm/s, layer height in mm, viscosity in
/// Pa·s and crosslink time in seconds.
///
/// # Example
///
/// ```
/// use bioprint_types::ProcessParameters;
///
/// let params = ProcessParameters::default();
/// assert_eq!(params.cell_density, 8.0);
/// assert_eq!(params.to_features()[1], 190.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessParameters {
    /// Cell density (10⁶ cells/mL).
    pub cell_density: f64,

    /// Nozzle temperature (°C).
    pub temperature: f64,

    /// Print speed (mm/s).
    pub print_speed: f64,

    /// Layer height (mm).
    pub layer_height: f64,

    /// Bioink viscosity (Pa·s).
    pub viscosity: f64,

    /// Crosslink exposure time (s).
    pub crosslink_time: f64,
}

impl Default for ProcessParameters {
    /// The parameter explorer's reset state.
    fn default() -> Self {
        Self {
            cell_density: 8.0,
            temperature: 190.0,
            print_speed: 30.0,
            layer_height: 0.3,
            viscosity: 3.0,
            crosslink_time: 45.0,
        }
    }
}

impl ProcessParameters {
    /// Creates parameters from explicit values.
    #[must_use]
    pub const fn new(
        cell_density: f64,
        temperature: f64,
        print_speed: f64,
        layer_height: f64,
        viscosity: f64,
        crosslink_time: f64,
    ) -> Self {
        Self {
            cell_density,
            temperature,
            print_speed,
            layer_height,
            viscosity,
            crosslink_time,
        }
    }

    /// Returns the feature vector in [`Feature::ALL`] order.
    #[must_use]
    pub const fn to_features(&self) -> [f64; NUM_FEATURES] {
        [
            self.cell_density,
            self.temperature,
            self.print_speed,
            self.layer_height,
            self.viscosity,
            self.crosslink_time,
        ]
    }

    /// Builds parameters from a feature vector in [`Feature::ALL`] order.
    #[must_use]
    pub const fn from_features(features: [f64; NUM_FEATURES]) -> Self {
        Self::new(
            features[0],
            features[1],
            features[2],
            features[3],
            features[4],
            features[5],
        )
    }

    /// Returns the value of a single feature.
    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        self.to_features()[feature.index()]
    }

    /// Checks that every parameter is a finite number.
    ///
    /// # Errors
    ///
    /// Returns the first non-finite parameter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (feature, value) in Feature::ALL.iter().zip(self.to_features()) {
            ValidationError::check_finite(feature.key(), value)?;
        }
        Ok(())
    }
}

/// A viability feature column.
///
/// The discriminant is the column index inside every feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// Cell density.
    CellDensity = 0,
    /// Nozzle temperature.
    Temperature = 1,
    /// Print speed.
    PrintSpeed = 2,
    /// Layer height.
    LayerHeight = 3,
    /// Bioink viscosity.
    Viscosity = 4,
    /// Crosslink time.
    CrosslinkTime = 5,
}

impl Feature {
    /// All features in column order.
    pub const ALL: [Self; NUM_FEATURES] = [
        Self::CellDensity,
        Self::Temperature,
        Self::PrintSpeed,
        Self::LayerHeight,
        Self::Viscosity,
        Self::CrosslinkTime,
    ];

    /// Column index of this feature.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// JSON / CSV key of this feature.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CellDensity => "cellDensity",
            Self::Temperature => "temperature",
            Self::PrintSpeed => "printSpeed",
            Self::LayerHeight => "layerHeight",
            Self::Viscosity => "viscosity",
            Self::CrosslinkTime => "crosslinkTime",
        }
    }

    /// Human-readable label used in feature-importance reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CellDensity => "Cell Density",
            Self::Temperature => "Nozzle Temperature",
            Self::PrintSpeed => "Print Speed",
            Self::LayerHeight => "Layer Height",
            Self::Viscosity => "Viscosity",
            Self::CrosslinkTime => "Crosslink Time",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Feature {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s || f.label() == s)
            .ok_or_else(|| TypesError::unknown_feature(s))
    }
}

/// Bioink polymer blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolymerType {
    /// Polylactic acid with gelatin.
    #[serde(rename = "PLA-Gelatin")]
    PlaGelatin,
    /// Polycaprolactone with alginate.
    #[serde(rename = "PCL-Alginate")]
    PclAlginate,
    /// Poly(lactic-co-glycolic acid) with collagen.
    #[serde(rename = "PLGA-Collagen")]
    PlgaCollagen,
    /// Polyethylene glycol with fibrin.
    #[serde(rename = "PEG-Fibrin")]
    PegFibrin,
    /// Polyhydroxyalkanoate with chitosan.
    #[serde(rename = "PHA-Chitosan")]
    PhaChitosan,
}

impl PolymerType {
    /// All supported polymers.
    pub const ALL: [Self; 5] = [
        Self::PlaGelatin,
        Self::PclAlginate,
        Self::PlgaCollagen,
        Self::PegFibrin,
        Self::PhaChitosan,
    ];

    /// Returns the blend name as used by the dashboard.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlaGelatin => "PLA-Gelatin",
            Self::PclAlginate => "PCL-Alginate",
            Self::PlgaCollagen => "PLGA-Collagen",
            Self::PegFibrin => "PEG-Fibrin",
            Self::PhaChitosan => "PHA-Chitosan",
        }
    }
}

impl std::fmt::Display for PolymerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PolymerType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypesError::unknown_polymer(s))
    }
}

/// Print settings that drive mechanical print quality.
///
/// # Example
///
/// ```
/// use bioprint_types::{PolymerType, PrintParameters};
///
/// let params = PrintParameters::new(PolymerType::PlgaCollagen, 0.2, 30.0, 160.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintParameters {
    /// Polymer blend.
    pub polymer_type: PolymerType,

    /// Layer thickness (mm).
    pub layer_thickness: f64,

    /// Print speed (mm/s).
    pub print_speed: f64,

    /// Extrusion temperature (°C).
    pub temperature: f64,
}

impl PrintParameters {
    /// Accepted layer thickness range (mm).
    pub const LAYER_THICKNESS_RANGE: (f64, f64) = (0.05, 0.5);

    /// Accepted print speed range (mm/s).
    pub const PRINT_SPEED_RANGE: (f64, f64) = (5.0, 100.0);

    /// Accepted temperature range (°C).
    pub const TEMPERATURE_RANGE: (f64, f64) = (100.0, 250.0);

    /// Creates print parameters.
    #[must_use]
    pub const fn new(
        polymer_type: PolymerType,
        layer_thickness: f64,
        print_speed: f64,
        temperature: f64,
    ) -> Self {
        Self {
            polymer_type,
            layer_thickness,
            print_speed,
            temperature,
        }
    }

    /// Checks the parameters against the form's accepted ranges.
    ///
    /// The scorer does not require this; it is offered to callers that
    /// validate requests before scoring.
    ///
    /// # Errors
    ///
    /// Returns the first parameter that is non-finite or out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (lo, hi) = Self::LAYER_THICKNESS_RANGE;
        ValidationError::check_range("layerThickness", self.layer_thickness, lo, hi)?;
        let (lo, hi) = Self::PRINT_SPEED_RANGE;
        ValidationError::check_range("printSpeed", self.print_speed, lo, hi)?;
        let (lo, hi) = Self::TEMPERATURE_RANGE;
        ValidationError::check_range("temperature", self.temperature, lo, hi)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_default_is_explorer_reset_state() {
        let params = ProcessParameters::default();
        assert_eq!(
            params.to_features(),
            [8.0, 190.0, 30.0, 0.3, 3.0, 45.0]
        );
    }

    #[test]
    fn process_features_follow_column_order() {
        let params = ProcessParameters::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        for feature in Feature::ALL {
            assert_eq!(params.get(feature), (feature.index() + 1) as f64);
        }
        assert_eq!(ProcessParameters::from_features(params.to_features()), params);
    }

    #[test]
    fn process_validate_rejects_nan() {
        let mut params = ProcessParameters::default();
        params.viscosity = f64::NAN;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("viscosity"));
    }

    #[test]
    fn process_serializes_camel_case() {
        let json = serde_json::to_string(&ProcessParameters::default()).unwrap();
        assert!(json.contains("\"cellDensity\""));
        assert!(json.contains("\"crosslinkTime\""));
    }

    #[test]
    fn feature_labels_and_parsing() {
        assert_eq!(Feature::Temperature.label(), "Nozzle Temperature");
        assert_eq!("layerHeight".parse::<Feature>().unwrap(), Feature::LayerHeight);
        assert_eq!("Cell Density".parse::<Feature>().unwrap(), Feature::CellDensity);
        assert!("nozzle".parse::<Feature>().is_err());
    }

    #[test]
    fn polymer_round_trips_through_name() {
        for polymer in PolymerType::ALL {
            assert_eq!(polymer.name().parse::<PolymerType>().unwrap(), polymer);
            let json = serde_json::to_string(&polymer).unwrap();
            assert_eq!(json, format!("\"{}\"", polymer.name()));
        }
        assert_eq!(
            "pla-gelatin".parse::<PolymerType>().unwrap(),
            PolymerType::PlaGelatin
        );
        assert!("PVA".parse::<PolymerType>().is_err());
    }

    #[test]
    fn print_validate_ranges() {
        let ok = PrintParameters::new(PolymerType::PegFibrin, 0.05, 100.0, 250.0);
        assert!(ok.validate().is_ok());

        let thick = PrintParameters::new(PolymerType::PegFibrin, 0.6, 30.0, 150.0);
        assert!(matches!(
            thick.validate(),
            Err(ValidationError::OutOfRange {
                parameter: "layerThickness",
                ..
            })
        ));

        let cold = PrintParameters::new(PolymerType::PegFibrin, 0.2, 30.0, 90.0);
        assert!(cold.validate().is_err());
    }

    #[test]
    fn print_deserializes_dashboard_body() {
        let json = r#"{"polymerType":"PLGA-Collagen","layerThickness":0.2,"printSpeed":30,"temperature":160}"#;
        let params: PrintParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.polymer_type, PolymerType::PlgaCollagen);
        assert!((params.print_speed - 30.0).abs() < f64::EPSILON);
    }
}
