//! Burn model architectures for bioprinting viability.
//!
//! # Model Architectures
//!
//! - [`FeedForwardClassifier`] - Dense `ReLU` network over the six process
//!   features with a three-class softmax head
//! - [`FeedForwardConfig`] - Layer widths
//!
//! # Tensor Helpers
//!
//! - [`rows_to_tensor`] / [`tensor_to_rows`] - Move fixed-width `f64` rows
//!   in and out of backend tensors
//!
//! # Backend Support
//!
//! Models are generic over Burn backends. The workspace trains on
//! `burn-ndarray` wrapped in `Autodiff`.
//!
//! # Example
//!
//! ```ignore
//! use bioprint_models::{FeedForwardClassifier, FeedForwardConfig};
//!
//! let config = FeedForwardConfig::new(vec![16, 8]);
//! let device = Default::default();
//! let model = FeedForwardClassifier::<MyBackend>::new(&config, &device);
//!
//! let input = Tensor::zeros([1, 6], &device);
//! let probabilities = model.probabilities(input);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod classifier;
mod error;

// Re-export model types
pub use classifier::{FeedForwardClassifier, FeedForwardConfig, rows_to_tensor, tensor_to_rows};

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        FeedForwardClassifier, FeedForwardConfig, ModelError, rows_to_tensor, tensor_to_rows,
    };
}
