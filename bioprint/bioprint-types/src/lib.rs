//! Core types for bioprinting process scoring.
//!
//! This crate provides the shared vocabulary of the workspace:
//!
//! # Parameter Types
//!
//! - [`ProcessParameters`] - Six process parameters that drive cell viability
//! - [`PrintParameters`] - Polymer and machine settings that drive print quality
//! - [`PolymerType`] - Supported bioink polymer blends
//! - [`Feature`] - Canonical column order of the viability feature vector
//!
//! # Prediction Types
//!
//! - [`ViabilityClass`] / [`ViabilityPrediction`] - Three-class viability output
//! - [`PrintQuality`] / [`QualityPrediction`] - Print quality assessment
//! - [`ParameterImpact`], [`QualityDistribution`], [`Recommendations`]
//!
//! # Layer 0 Crate
//!
//! No tensor or async dependencies. Every type here is plain data with serde
//! support; JSON uses the camelCase field names of the dashboard API.
//!
//! # Example
//!
//! ```
//! use bioprint_types::{ViabilityClass, ViabilityPrediction};
//!
//! let prediction = ViabilityPrediction::new(0.1, 0.3, 0.6);
//! assert_eq!(prediction.most_likely(), ViabilityClass::High);
//! assert!(prediction.is_normalized(1e-9));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod params;
mod quality;
mod validation;
mod viability;

// Re-export parameter types
pub use params::{Feature, NUM_FEATURES, PolymerType, PrintParameters, ProcessParameters};

// Re-export prediction types
pub use quality::{
    ParameterImpact, PrintQuality, QualityDistribution, QualityPrediction, Recommendations,
};
pub use viability::{NUM_CLASSES, ViabilityClass, ViabilityPrediction};

// Re-export validation
pub use validation::ValidationError;

// Re-export error types
pub use error::{Result, TypesError};
