//! Training lifecycle for bioprinting viability models.
//!
//! # Configuration
//!
//! - [`ModelConfig`] - Model family, hyperparameters, split and seed
//! - [`ModelSpec`] - Hyperparameters as a union keyed by model type
//!
//! # Training
//!
//! - [`TrainingOrchestrator`] - Validates, preprocesses and dispatches a run
//! - [`train`] - One-shot training with default settings
//! - [`train_in_background`] - Runs training on Tokio's blocking pool
//! - [`NeuralTrainer`] - Adam + cross-entropy loop for the neural path
//!
//! `randomForest` and `svm` runs are simulated and report a fixed result.
//!
//! # Progress
//!
//! - [`TrainingObserver`] - Receives [`TrainingEvent`]s
//! - [`ChannelObserver`] - Forwards events over an mpsc channel
//! - [`CancelFlag`] - Stops a run between epochs
//!
//! # Results
//!
//! - [`TrainingResult`] - Accuracy, macro scores, confusion matrix and
//!   feature importance
//! - [`TrainedViabilityModel`] - Trained classifier plus its scaler
//!
//! # Example
//!
//! ```
//! use bioprint_dataset::reference_samples;
//! use bioprint_training::{ModelConfig, train};
//!
//! let config = ModelConfig::from_json(r#"{"modelType": "svm", "trainTestSplit": 0.8}"#).unwrap();
//! let result = train(&config, reference_samples()).unwrap();
//! assert_eq!(result.confusion_matrix[2], [2, 6, 50]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod background;
mod config;
mod error;
mod inference;
mod loss;
mod metrics;
mod observer;
mod orchestrator;
mod trainer;

// Re-export configuration
pub use config::{
    DEFAULT_RANDOM_SEED, DEFAULT_TRAIN_TEST_SPLIT, GammaPreset, ModelConfig, ModelSpec, ModelType,
    NeuralNetworkParams, RandomForestParams, SvmGamma, SvmKernel, SvmParams,
};

// Re-export loss functions
pub use loss::{PROBABILITY_EPSILON, categorical_cross_entropy, cross_entropy_rows};

// Re-export metrics
pub use metrics::{
    ClassMetrics, ClassificationReport, ConfusionMatrix, EpochMetrics, FeatureImportance,
    TrainingHistory, TrainingResult, feature_importance_from_magnitudes,
};

// Re-export trainer
pub use trainer::{
    FittedNetwork, NeuralTrainer, TrainingBackend, TrainingState, accuracy_rows, num_batches,
};

// Re-export orchestration
pub use background::train_in_background;
pub use observer::{CancelFlag, ChannelObserver, NoopObserver, TrainingEvent, TrainingObserver};
pub use orchestrator::{TrainingOrchestrator, TrainingOutcome, train};

// Re-export inference
pub use inference::{InferenceBackend, TrainedViabilityModel, predict_probabilities};

// Re-export error types
pub use error::{Result, TrainingError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        CancelFlag, ModelConfig, ModelSpec, ModelType, TrainedViabilityModel, TrainingError,
        TrainingEvent, TrainingObserver, TrainingOrchestrator, TrainingResult, train,
        train_in_background,
    };
}
