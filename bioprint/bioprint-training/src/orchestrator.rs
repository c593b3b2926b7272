//! Training orchestration: validate, preprocess, dispatch by model type.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bioprint_dataset::{BioprintingSample, PreprocessedData, decode_class, preprocess};
use bioprint_types::ViabilityClass;
use tracing::{info, warn};

use crate::config::{ModelConfig, ModelSpec, NeuralNetworkParams};
use crate::error::{Result, TrainingError};
use crate::inference::TrainedViabilityModel;
use crate::metrics::{ClassificationReport, TrainingResult, feature_importance_from_magnitudes};
use crate::observer::{CancelFlag, NoopObserver, TrainingEvent, TrainingObserver};
use crate::trainer::NeuralTrainer;

const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Result of a run, plus the trained model when one was produced.
#[derive(Debug)]
pub struct TrainingOutcome {
    /// Reported metrics.
    pub result: TrainingResult,
    /// Trained classifier; `None` for simulated model types.
    pub model: Option<TrainedViabilityModel>,
}

/// Runs training for a [`ModelConfig`].
///
/// `neuralNetwork` configs train a real classifier. `randomForest` and
/// `svm` configs are simulated: after the configured delay they report
/// [`TrainingResult::simulated`].
///
/// # Example
///
/// ```
/// use bioprint_dataset::reference_samples;
/// use bioprint_training::{ModelConfig, ModelSpec, SvmParams, TrainingOrchestrator};
///
/// let config = ModelConfig::new(ModelSpec::Svm(SvmParams::default()));
/// let result = TrainingOrchestrator::new()
///     .train(&config, reference_samples())
///     .unwrap();
///
/// assert!((result.accuracy - 0.9).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct TrainingOrchestrator {
    simulated_delay: Duration,
    observer: Arc<dyn TrainingObserver>,
    cancel: CancelFlag,
}

impl Default for TrainingOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TrainingOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingOrchestrator")
            .field("simulated_delay", &self.simulated_delay)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl TrainingOrchestrator {
    /// Creates an orchestrator with no delay and no observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            simulated_delay: Duration::ZERO,
            observer: Arc::new(NoopObserver),
            cancel: CancelFlag::new(),
        }
    }

    /// Sets how long simulated model types wait before reporting.
    #[must_use]
    pub const fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    /// Sets the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl TrainingObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Uses an existing cancel flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// The simulated delay.
    #[must_use]
    pub const fn simulated_delay(&self) -> Duration {
        self.simulated_delay
    }

    /// A handle that cancels runs started by this orchestrator.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Trains and returns the metrics.
    ///
    /// # Errors
    ///
    /// As [`TrainingOrchestrator::fit`].
    pub fn train(&self, config: &ModelConfig, samples: &[BioprintingSample]) -> Result<TrainingResult> {
        self.fit(config, samples).map(|outcome| outcome.result)
    }

    /// Trains and returns the metrics together with the trained model.
    ///
    /// Blocks for the whole run. Use [`crate::train_in_background`] from
    /// async code.
    ///
    /// # Errors
    ///
    /// - [`TrainingError::InvalidConfig`] if the split is outside `(0, 1)`
    ///   or the hyperparameters are malformed
    /// - [`TrainingError::Dataset`] if `samples` is empty or the training
    ///   split is empty on the neural path
    /// - [`TrainingError::Interrupted`] if the cancel flag is set
    /// - [`TrainingError::NumericalInstability`] if the loss diverges
    pub fn fit(&self, config: &ModelConfig, samples: &[BioprintingSample]) -> Result<TrainingOutcome> {
        config.validate()?;
        let data = preprocess(samples, config.split_ratio()?)?;

        info!(
            model_type = %config.model_type(),
            train = data.train_len(),
            test = data.test_len(),
            seed = config.random_seed,
            "training started"
        );
        self.observer.on_event(&TrainingEvent::Started {
            model_type: config.model_type(),
            train_samples: data.train_len(),
            test_samples: data.test_len(),
        });

        let outcome = match &config.model {
            ModelSpec::NeuralNetwork(params) => self.fit_network(params, config.random_seed, &data)?,
            ModelSpec::RandomForest(_) | ModelSpec::Svm(_) => {
                self.wait_simulated()?;
                TrainingOutcome {
                    result: TrainingResult::simulated(),
                    model: None,
                }
            }
        };

        info!(
            accuracy = outcome.result.accuracy,
            f1 = outcome.result.f1_score,
            "training finished"
        );
        self.observer.on_event(&TrainingEvent::Finished {
            accuracy: outcome.result.accuracy,
        });
        Ok(outcome)
    }

    fn fit_network(
        &self,
        params: &NeuralNetworkParams,
        seed: u64,
        data: &PreprocessedData,
    ) -> Result<TrainingOutcome> {
        let fitted = NeuralTrainer::new(params, seed)
            .with_observer(self.observer.as_ref())
            .with_cancel_flag(&self.cancel)
            .fit(data)?;

        let (features, labels) = if data.test_len() > 0 {
            (&data.test_features, &data.test_labels)
        } else {
            warn!("test split is empty, evaluating on the training split");
            (&data.train_features, &data.train_labels)
        };

        let model = TrainedViabilityModel::new(fitted.classifier, data.scaler.clone());
        let predicted: Vec<ViabilityClass> = model
            .predict_scaled(features)?
            .iter()
            .map(decode_class)
            .collect();
        let actual: Vec<ViabilityClass> = labels.iter().map(decode_class).collect();

        let report = ClassificationReport::from_predictions(&actual, &predicted);
        let importance =
            feature_importance_from_magnitudes(&model.classifier().input_weight_magnitudes()?);

        Ok(TrainingOutcome {
            result: TrainingResult::from_report(&report, importance).with_history(fitted.history),
            model: Some(model),
        })
    }

    fn wait_simulated(&self) -> Result<()> {
        let deadline = Instant::now() + self.simulated_delay;
        loop {
            if self.cancel.is_cancelled() {
                return Err(TrainingError::interrupted("cancelled during simulated training"));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep((deadline - now).min(CANCEL_POLL));
        }
    }
}

/// Trains with a default [`TrainingOrchestrator`].
///
/// # Errors
///
/// As [`TrainingOrchestrator::fit`].
///
/// # Example
///
/// ```
/// use bioprint_dataset::reference_samples;
/// use bioprint_training::{ModelConfig, TrainingError, train};
///
/// let config = ModelConfig::default().with_train_test_split(1.5);
/// let err = train(&config, reference_samples()).unwrap_err();
/// assert!(matches!(err, TrainingError::InvalidConfig(_)));
/// ```
pub fn train(config: &ModelConfig, samples: &[BioprintingSample]) -> Result<TrainingResult> {
    TrainingOrchestrator::new().train(config, samples)
}
