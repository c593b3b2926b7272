//! Model configuration.
//!
//! A [`ModelConfig`] names the model family, its hyperparameters, the
//! train/test split and the random seed. Hyperparameters are a tagged union
//! keyed by `modelType`, so a config can only carry settings for the model
//! it selects.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bioprint_dataset::SplitRatio;
use bioprint_models::FeedForwardConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TrainingError};

/// Default train fraction.
pub const DEFAULT_TRAIN_TEST_SPLIT: f64 = 0.8;

/// Default random seed.
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
    /// Random forest (simulated).
    RandomForest,
    /// Support vector machine (simulated).
    Svm,
    /// Feed-forward neural network.
    NeuralNetwork,
}

impl ModelType {
    /// All model types.
    pub const ALL: [Self; 3] = [Self::RandomForest, Self::Svm, Self::NeuralNetwork];

    /// JSON key of the model type.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::RandomForest => "randomForest",
            Self::Svm => "svm",
            Self::NeuralNetwork => "neuralNetwork",
        }
    }

    /// Returns `true` if training is simulated rather than performed.
    #[must_use]
    pub const fn is_simulated(self) -> bool {
        !matches!(self, Self::NeuralNetwork)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelType {
    type Err = TrainingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| TrainingError::invalid_config(format!("unknown model type: {s}")))
    }
}

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RandomForestParams {
    /// Number of trees.
    pub n_estimators: u32,
    /// Maximum tree depth.
    pub max_depth: u32,
    /// Minimum samples per leaf.
    pub min_samples_leaf: u32,
    /// Sample with replacement.
    pub bootstrap: bool,
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            min_samples_leaf: 1,
            bootstrap: true,
        }
    }
}

impl RandomForestParams {
    /// Returns `true` if every count is positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.n_estimators > 0 && self.max_depth > 0 && self.min_samples_leaf > 0
    }
}

/// SVM kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvmKernel {
    /// Linear kernel.
    Linear,
    /// Polynomial kernel.
    Poly,
    /// Radial basis function kernel.
    #[default]
    Rbf,
    /// Sigmoid kernel.
    Sigmoid,
}

/// Named gamma heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GammaPreset {
    /// `1 / (n_features × variance)`.
    Scale,
    /// `1 / n_features`.
    Auto,
}

/// Kernel coefficient: a preset name or an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SvmGamma {
    /// Named heuristic.
    Preset(GammaPreset),
    /// Explicit positive value.
    Value(f64),
}

impl Default for SvmGamma {
    fn default() -> Self {
        Self::Preset(GammaPreset::Scale)
    }
}

/// Support vector machine hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SvmParams {
    /// Kernel function.
    pub kernel: SvmKernel,
    /// Regularization strength.
    #[serde(rename = "C")]
    pub c: f64,
    /// Kernel coefficient.
    pub gamma: SvmGamma,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            kernel: SvmKernel::default(),
            c: 1.0,
            gamma: SvmGamma::default(),
        }
    }
}

impl SvmParams {
    /// Returns `true` if `C` and an explicit gamma are positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let gamma_ok = match self.gamma {
            SvmGamma::Preset(_) => true,
            SvmGamma::Value(g) => g.is_finite() && g > 0.0,
        };
        self.c.is_finite() && self.c > 0.0 && gamma_ok
    }
}

/// Neural network hyperparameters.
///
/// # Example
///
/// ```
/// use bioprint_training::NeuralNetworkParams;
///
/// let params = NeuralNetworkParams::default()
///     .with_epochs(20)
///     .with_batch_size(8);
///
/// assert_eq!(params.hidden_layers, vec![64, 32]);
/// assert!(params.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NeuralNetworkParams {
    /// Width of each hidden layer.
    pub hidden_layers: Vec<usize>,
    /// Adam learning rate.
    pub learning_rate: f64,
    /// Number of passes over the training split.
    pub epochs: usize,
    /// Minibatch size.
    pub batch_size: usize,
}

impl Default for NeuralNetworkParams {
    fn default() -> Self {
        Self {
            hidden_layers: vec![64, 32],
            learning_rate: 0.001,
            epochs: 100,
            batch_size: 32,
        }
    }
}

impl NeuralNetworkParams {
    /// Sets the hidden layer widths.
    #[must_use]
    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    /// Sets the learning rate.
    #[must_use]
    pub const fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the number of epochs.
    #[must_use]
    pub const fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Returns `true` if the network and schedule are usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.hidden_layers.is_empty()
            && self.hidden_layers.iter().all(|&w| w > 0)
            && self.learning_rate.is_finite()
            && self.learning_rate > 0.0
            && self.epochs > 0
            && self.batch_size > 0
    }

    /// Classifier architecture for these hyperparameters.
    #[must_use]
    pub fn to_model_config(&self) -> FeedForwardConfig {
        FeedForwardConfig::new(self.hidden_layers.clone())
    }
}

/// Model family together with its hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "modelType",
    content = "hyperparameters",
    rename_all = "camelCase"
)]
pub enum ModelSpec {
    /// Random forest.
    RandomForest(RandomForestParams),
    /// Support vector machine.
    Svm(SvmParams),
    /// Feed-forward neural network.
    NeuralNetwork(NeuralNetworkParams),
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::NeuralNetwork(NeuralNetworkParams::default())
    }
}

impl ModelSpec {
    /// Default hyperparameters for a model type.
    #[must_use]
    pub fn defaults_for(model_type: ModelType) -> Self {
        match model_type {
            ModelType::RandomForest => Self::RandomForest(RandomForestParams::default()),
            ModelType::Svm => Self::Svm(SvmParams::default()),
            ModelType::NeuralNetwork => Self::NeuralNetwork(NeuralNetworkParams::default()),
        }
    }

    /// Decodes hyperparameters for a model type.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] if a field has the wrong type
    /// or an unknown enumerated value.
    pub fn from_hyperparameters(model_type: ModelType, value: Value) -> Result<Self> {
        let spec = match model_type {
            ModelType::RandomForest => Self::RandomForest(serde_json::from_value(value)?),
            ModelType::Svm => Self::Svm(serde_json::from_value(value)?),
            ModelType::NeuralNetwork => Self::NeuralNetwork(serde_json::from_value(value)?),
        };
        Ok(spec)
    }

    /// Model family.
    #[must_use]
    pub const fn model_type(&self) -> ModelType {
        match self {
            Self::RandomForest(_) => ModelType::RandomForest,
            Self::Svm(_) => ModelType::Svm,
            Self::NeuralNetwork(_) => ModelType::NeuralNetwork,
        }
    }

    /// Validates the hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] describing the first
    /// unusable setting.
    pub fn validate(&self) -> Result<()> {
        let ok = match self {
            Self::RandomForest(p) => p.is_valid(),
            Self::Svm(p) => p.is_valid(),
            Self::NeuralNetwork(p) => p.is_valid(),
        };
        if ok {
            Ok(())
        } else {
            Err(TrainingError::invalid_config(format!(
                "malformed {} hyperparameters",
                self.model_type()
            )))
        }
    }
}

/// Full training configuration.
///
/// Serializes as
/// `{"modelType", "hyperparameters", "trainTestSplit", "randomSeed"}`.
///
/// # Example
///
/// ```
/// use bioprint_training::{ModelConfig, ModelType};
///
/// let config = ModelConfig::from_json(
///     r#"{"modelType": "svm", "trainTestSplit": 0.8, "randomSeed": 7}"#,
/// ).unwrap();
///
/// assert_eq!(config.model_type(), ModelType::Svm);
/// assert_eq!(config.random_seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Model family and hyperparameters.
    #[serde(flatten)]
    pub model: ModelSpec,

    /// Fraction of samples used for training, in `(0, 1)`.
    pub train_test_split: f64,

    /// Seed for weight initialization and minibatch shuffling.
    pub random_seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(ModelSpec::default())
    }
}

impl ModelConfig {
    /// Creates a config with the default split and seed.
    #[must_use]
    pub const fn new(model: ModelSpec) -> Self {
        Self {
            model,
            train_test_split: DEFAULT_TRAIN_TEST_SPLIT,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }

    /// Sets the train fraction.
    #[must_use]
    pub const fn with_train_test_split(mut self, split: f64) -> Self {
        self.train_test_split = split;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Model family.
    #[must_use]
    pub const fn model_type(&self) -> ModelType {
        self.model.model_type()
    }

    /// Validated split ratio.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] unless the split is in `(0, 1)`.
    pub fn split_ratio(&self) -> Result<SplitRatio> {
        Ok(SplitRatio::try_new(self.train_test_split)?)
    }

    /// Validates split and hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] on the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.split_ratio()?;
        self.model.validate()
    }

    /// Returns `true` if [`ModelConfig::validate`] succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parses and validates a config document.
    ///
    /// Accepts the canonical form, where `hyperparameters` holds the
    /// selected model's settings, and the settings-bag form, where it holds
    /// one object per model type keyed by `modelType`. Omitted
    /// hyperparameters, split and seed take their defaults. Unknown
    /// hyperparameter keys are rejected, as is a bag without an entry for
    /// the selected model.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] for malformed JSON, an
    /// unknown model type, malformed hyperparameters or a split outside
    /// `(0, 1)`.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::Io`] if the file cannot be read, otherwise
    /// as [`ModelConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds a config from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// As [`ModelConfig::from_json`].
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(TrainingError::invalid_config("config must be a JSON object"));
        };

        let model_type: ModelType = map
            .get("modelType")
            .and_then(Value::as_str)
            .ok_or_else(|| TrainingError::invalid_config("modelType must be a string"))?
            .parse()?;

        let hyperparameters = match map.remove("hyperparameters") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(Value::Object(mut bag)) => match bag.remove(model_type.key()) {
                Some(selected @ Value::Object(_)) => selected,
                Some(_) => {
                    return Err(TrainingError::invalid_config(format!(
                        "hyperparameters.{} must be an object",
                        model_type.key()
                    )));
                }
                None if ModelType::ALL.iter().any(|t| bag.contains_key(t.key())) => {
                    return Err(TrainingError::invalid_config(format!(
                        "hyperparameters has no entry for {}",
                        model_type.key()
                    )));
                }
                None => Value::Object(bag),
            },
            Some(_) => {
                return Err(TrainingError::invalid_config(
                    "hyperparameters must be an object",
                ));
            }
        };

        let train_test_split = match map.get("trainTestSplit") {
            None | Some(Value::Null) => DEFAULT_TRAIN_TEST_SPLIT,
            Some(v) => v
                .as_f64()
                .ok_or_else(|| TrainingError::invalid_config("trainTestSplit must be a number"))?,
        };

        let random_seed = match map.get("randomSeed") {
            None | Some(Value::Null) => DEFAULT_RANDOM_SEED,
            Some(v) => v.as_u64().ok_or_else(|| {
                TrainingError::invalid_config("randomSeed must be a non-negative integer")
            })?,
        };

        let config = Self {
            model: ModelSpec::from_hyperparameters(model_type, hyperparameters)?,
            train_test_split,
            random_seed,
        };
        config.validate()?;
        Ok(config)
    }
}
