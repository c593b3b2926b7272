//! Heuristic scorers for bioprinting process parameters.
//!
//! # Viability
//!
//! - [`score_viability`] - Six process parameters to a three-class
//!   viability distribution
//! - [`assess_viability`] - The same, with the weighted score and most
//!   likely class
//! - [`viability_tips`] - Parameter adjustments toward the optimal bands
//!
//! # Print Quality
//!
//! - [`score_print_quality`] - Deterministic quality class, confidence,
//!   insights and recommendations
//! - [`score_print_quality_enriched`] - Prefers a validated answer from a
//!   [`QualityEnricher`], falling back to the heuristic
//!
//! Scorers are pure and total: they accept any input, including
//! non-finite values, and never fail.
//!
//! # Example
//!
//! ```
//! use bioprint_scoring::{score_print_quality, score_viability};
//! use bioprint_types::{PolymerType, PrintParameters, ProcessParameters, PrintQuality};
//!
//! let viability = score_viability(&ProcessParameters::default());
//! assert!(viability.is_normalized(1e-9));
//!
//! let quality = score_print_quality(&PrintParameters::new(
//!     PolymerType::PlgaCollagen,
//!     0.2,
//!     30.0,
//!     160.0,
//! ));
//! assert_eq!(quality.print_quality, PrintQuality::Good);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod enrichment;
mod error;
mod quality;
mod viability;

// Re-export viability scoring
pub use viability::{
    HIGH_REGIME, MEDIUM_REGIME, OPTIMAL_LAYER_HEIGHT, OPTIMAL_TEMPERATURE, ViabilityAssessment,
    assess_viability, distribution_from_score, feature_factor, feature_weight, score_viability,
    viability_score, viability_tips,
};

// Re-export print-quality scoring
pub use quality::{
    PolymerProfile, polymer_profile, quality_distribution, quality_score, score_print_quality,
};

// Re-export enrichment
pub use enrichment::{
    EnrichmentConfig, EnrichmentRequest, QualityEnricher, TOTAL_TOLERANCE, enrich_print_quality,
    extract_json, parse_enrichment, render_prompt, score_print_quality_enriched,
};

// Re-export error types
pub use error::{EnrichmentError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        EnrichmentConfig, EnrichmentError, EnrichmentRequest, QualityEnricher,
        ViabilityAssessment, assess_viability, score_print_quality, score_print_quality_enriched,
        score_viability, viability_tips,
    };
}
