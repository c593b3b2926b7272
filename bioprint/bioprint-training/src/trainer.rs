//! Neural training loop.

use bioprint_dataset::{OneHot, PreprocessedData, decode_class};
use bioprint_models::{FeedForwardClassifier, rows_to_tensor};
use bioprint_types::{NUM_CLASSES, NUM_FEATURES};
use burn::backend::Autodiff;
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::Backend;
use burn::tensor::ElementConversion;
use burn_ndarray::{NdArray, NdArrayDevice};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NeuralNetworkParams;
use crate::error::{Result, TrainingError};
use crate::inference::{InferenceBackend, predict_probabilities};
use crate::loss::{categorical_cross_entropy, cross_entropy_rows};
use crate::metrics::{EpochMetrics, TrainingHistory};
use crate::observer::{CancelFlag, NoopObserver, TrainingEvent, TrainingObserver};

/// Backend used for training.
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// State of a training run.
///
/// # Example
///
/// ```
/// use bioprint_training::TrainingState;
///
/// let mut state = TrainingState::new(2);
/// assert!(!state.is_finished());
/// state.next_epoch();
/// state.next_epoch();
/// assert!(state.is_finished());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
    /// Current epoch (0-indexed).
    pub epoch: usize,

    /// Total epochs to run.
    pub total_epochs: usize,

    /// Whether training has finished.
    pub finished: bool,

    /// Accumulated metrics.
    pub history: TrainingHistory,
}

impl TrainingState {
    /// Creates a state for `total_epochs` epochs.
    #[must_use]
    pub fn new(total_epochs: usize) -> Self {
        Self {
            epoch: 0,
            total_epochs,
            finished: total_epochs == 0,
            history: TrainingHistory::new(),
        }
    }

    /// Returns true if training is finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the progress as a fraction [0, 1].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.total_epochs == 0 {
            1.0
        } else {
            self.epoch as f64 / self.total_epochs as f64
        }
    }

    /// Advances to the next epoch.
    pub const fn next_epoch(&mut self) {
        self.epoch += 1;
        if self.epoch >= self.total_epochs {
            self.finished = true;
        }
    }

    /// Adds epoch metrics.
    pub fn add_epoch_metrics(&mut self, metrics: EpochMetrics) {
        self.history.add_epoch(metrics);
    }
}

/// Returns the number of batches per epoch.
#[must_use]
pub const fn num_batches(num_samples: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        0
    } else {
        num_samples.div_ceil(batch_size)
    }
}

/// Fraction of rows whose most probable class matches the label.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_rows(probabilities: &[OneHot], labels: &[OneHot]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let correct = probabilities
        .iter()
        .zip(labels)
        .filter(|(p, y)| decode_class(p) == decode_class(y))
        .count();
    correct as f64 / probabilities.len() as f64
}

/// A classifier fitted by [`NeuralTrainer`].
#[derive(Debug)]
pub struct FittedNetwork {
    /// Trained weights on the inference backend.
    pub classifier: FeedForwardClassifier<InferenceBackend>,
    /// Per-epoch metrics.
    pub history: TrainingHistory,
}

const NOOP: NoopObserver = NoopObserver;

/// Fits a feed-forward classifier with Adam on categorical cross-entropy.
///
/// The seed drives weight initialization and per-epoch minibatch
/// shuffling. Training rows are never reordered across the split.
pub struct NeuralTrainer<'a> {
    params: &'a NeuralNetworkParams,
    seed: u64,
    observer: &'a dyn TrainingObserver,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> NeuralTrainer<'a> {
    /// Creates a trainer for the given hyperparameters.
    #[must_use]
    pub fn new(params: &'a NeuralNetworkParams, seed: u64) -> Self {
        Self {
            params,
            seed,
            observer: &NOOP,
            cancel: None,
        }
    }

    /// Reports each finished epoch to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn TrainingObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Stops between epochs once `cancel` is set.
    #[must_use]
    pub const fn with_cancel_flag(mut self, cancel: &'a CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Trains on `data.train_*`, validating against `data.test_*` after
    /// every epoch when the test split is non-empty.
    ///
    /// # Errors
    ///
    /// - [`TrainingError::InvalidConfig`] for unusable hyperparameters
    /// - [`TrainingError::Dataset`] if the training split is empty
    /// - [`TrainingError::Interrupted`] if cancelled
    /// - [`TrainingError::NumericalInstability`] if the loss is not finite
    pub fn fit(&self, data: &PreprocessedData) -> Result<FittedNetwork> {
        if !self.params.is_valid() {
            return Err(TrainingError::invalid_config(
                "malformed neuralNetwork hyperparameters",
            ));
        }
        let n = data.train_len();
        if n == 0 {
            return Err(TrainingError::dataset("training split is empty"));
        }

        let device = NdArrayDevice::default();
        TrainingBackend::seed(self.seed);

        let mut model: FeedForwardClassifier<TrainingBackend> =
            FeedForwardClassifier::new(&self.params.to_model_config(), &device);
        let mut optim = AdamConfig::new().init();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..n).collect();
        let mut state = TrainingState::new(self.params.epochs);

        info!(
            epochs = self.params.epochs,
            batches = num_batches(n, self.params.batch_size),
            hidden = ?self.params.hidden_layers,
            "training neural network"
        );

        while !state.is_finished() {
            if self.cancel.is_some_and(CancelFlag::is_cancelled) {
                return Err(TrainingError::interrupted(format!(
                    "cancelled before epoch {}",
                    state.epoch
                )));
            }

            indices.shuffle(&mut rng);
            let mut loss_sum = 0.0;

            for batch in indices.chunks(self.params.batch_size) {
                let features: Vec<_> = batch.iter().map(|&i| data.train_features[i]).collect();
                let labels: Vec<_> = batch.iter().map(|&i| data.train_labels[i]).collect();

                let x = rows_to_tensor::<TrainingBackend, NUM_FEATURES>(&features, &device);
                let y = rows_to_tensor::<TrainingBackend, NUM_CLASSES>(&labels, &device);

                let loss = categorical_cross_entropy(model.forward(x), y);
                let loss_value: f64 = loss.clone().into_scalar().elem();
                if !loss_value.is_finite() {
                    return Err(TrainingError::numerical_instability(format!(
                        "loss is {loss_value} at epoch {}",
                        state.epoch
                    )));
                }

                #[allow(clippy::cast_precision_loss)]
                let batch_weight = batch.len() as f64;
                loss_sum += loss_value * batch_weight;

                let grads = GradientsParams::from_grads(loss.backward(), &model);
                model = optim.step(self.params.learning_rate, model, grads);
            }

            #[allow(clippy::cast_precision_loss)]
            let train_loss = loss_sum / n as f64;

            let mut metrics = EpochMetrics::new(state.epoch, train_loss)
                .with_learning_rate(self.params.learning_rate)
                .with_samples(n);

            if data.test_len() > 0 {
                let probs = predict_probabilities(&model.valid(), &data.test_features, &device)?;
                metrics = metrics.with_validation(
                    cross_entropy_rows(&probs, &data.test_labels),
                    accuracy_rows(&probs, &data.test_labels),
                );
            }

            debug!(
                epoch = metrics.epoch,
                train_loss = metrics.train_loss,
                val_loss = ?metrics.val_loss,
                val_accuracy = ?metrics.val_accuracy,
                "epoch finished"
            );

            self.observer
                .on_event(&TrainingEvent::EpochFinished(metrics.clone()));
            state.add_epoch_metrics(metrics);
            state.next_epoch();
        }

        info!(
            final_loss = state.history.final_loss(),
            best_val_loss = ?state.history.best_val_loss,
            "neural network trained"
        );

        Ok(FittedNetwork {
            classifier: model.valid(),
            history: state.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bioprint_dataset::{SplitRatio, preprocess, reference_samples};

    fn small_params() -> NeuralNetworkParams {
        NeuralNetworkParams::default()
            .with_hidden_layers(vec![8])
            .with_epochs(5)
            .with_batch_size(2)
            .with_learning_rate(0.01)
    }

    #[test]
    fn state_progress() {
        let mut state = TrainingState::new(4);
        assert!((state.progress() - 0.0).abs() < 1e-12);
        state.next_epoch();
        assert!((state.progress() - 0.25).abs() < 1e-12);
        assert!(TrainingState::new(0).is_finished());
    }

    #[test]
    fn batches_round_up() {
        assert_eq!(num_batches(5, 2), 3);
        assert_eq!(num_batches(4, 2), 2);
        assert_eq!(num_batches(3, 32), 1);
        assert_eq!(num_batches(3, 0), 0);
    }

    #[test]
    fn accuracy_counts_argmax() {
        let probs = [[0.7, 0.2, 0.1], [0.1, 0.3, 0.6]];
        let labels = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!((accuracy_rows(&probs, &labels) - 0.5).abs() < 1e-12);
        assert!((accuracy_rows(&[], &[]) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn fit_records_every_epoch() {
        let data = preprocess(reference_samples(), SplitRatio::EIGHTY_TWENTY).unwrap();
        let params = small_params();
        let fitted = NeuralTrainer::new(&params, 42).fit(&data).unwrap();

        assert_eq!(fitted.history.epochs_completed(), 5);
        assert!(fitted.history.train_losses().iter().all(|l| l.is_finite()));
        assert!(fitted.history.epochs.iter().all(|m| m.val_accuracy.is_some()));
    }

    #[test]
    fn fit_reports_epochs_to_observer() {
        let data = preprocess(reference_samples(), SplitRatio::EIGHTY_TWENTY).unwrap();
        let params = small_params().with_epochs(3);
        let (observer, receiver) = crate::observer::ChannelObserver::new();

        NeuralTrainer::new(&params, 7)
            .with_observer(&observer)
            .fit(&data)
            .unwrap();

        let epochs: Vec<_> = receiver
            .try_iter()
            .filter_map(|e| match e {
                TrainingEvent::EpochFinished(m) => Some(m.epoch),
                _ => None,
            })
            .collect();
        assert_eq!(epochs, vec![0, 1, 2]);
    }

    #[test]
    fn fit_respects_cancel_flag() {
        let data = preprocess(reference_samples(), SplitRatio::EIGHTY_TWENTY).unwrap();
        let params = small_params();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let err = NeuralTrainer::new(&params, 1)
            .with_cancel_flag(&cancel)
            .fit(&data)
            .unwrap_err();
        assert!(matches!(err, TrainingError::Interrupted(_)));
    }

    #[test]
    fn fit_rejects_invalid_params() {
        let data = preprocess(reference_samples(), SplitRatio::EIGHTY_TWENTY).unwrap();
        let params = small_params().with_batch_size(0);
        let err = NeuralTrainer::new(&params, 1).fit(&data).unwrap_err();
        assert!(matches!(err, TrainingError::InvalidConfig(_)));
    }
}
