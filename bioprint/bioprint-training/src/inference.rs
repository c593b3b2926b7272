//! Inference with a trained viability classifier.

use bioprint_dataset::{FeatureRow, FeatureScaler, OneHot};
use bioprint_models::{FeedForwardClassifier, rows_to_tensor, tensor_to_rows};
use bioprint_types::{NUM_CLASSES, NUM_FEATURES, ProcessParameters, ViabilityPrediction};
use burn_ndarray::{NdArray, NdArrayDevice};

use crate::error::Result;

/// Backend used for inference.
pub type InferenceBackend = NdArray<f32>;

/// Runs the classifier on already scaled rows and returns class
/// probabilities.
///
/// # Errors
///
/// Returns [`crate::TrainingError::Model`] if the output cannot be read back.
pub fn predict_probabilities(
    classifier: &FeedForwardClassifier<InferenceBackend>,
    rows: &[FeatureRow],
    device: &NdArrayDevice,
) -> Result<Vec<OneHot>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let input = rows_to_tensor::<InferenceBackend, NUM_FEATURES>(rows, device);
    Ok(tensor_to_rows::<InferenceBackend, NUM_CLASSES>(
        classifier.probabilities(input),
    )?)
}

/// A trained classifier bundled with the scaler fitted on its data.
///
/// Raw parameters are always rescaled with the stored bounds before
/// inference.
#[derive(Debug)]
pub struct TrainedViabilityModel {
    classifier: FeedForwardClassifier<InferenceBackend>,
    scaler: FeatureScaler,
    device: NdArrayDevice,
}

impl TrainedViabilityModel {
    /// Bundles a classifier with its scaler.
    #[must_use]
    pub fn new(classifier: FeedForwardClassifier<InferenceBackend>, scaler: FeatureScaler) -> Self {
        Self {
            classifier,
            scaler,
            device: NdArrayDevice::default(),
        }
    }

    /// The trained classifier.
    #[must_use]
    pub const fn classifier(&self) -> &FeedForwardClassifier<InferenceBackend> {
        &self.classifier
    }

    /// The stored feature bounds.
    #[must_use]
    pub const fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Predicts the viability distribution for raw parameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TrainingError::Model`] if the output cannot be read back.
    pub fn predict(&self, parameters: &ProcessParameters) -> Result<ViabilityPrediction> {
        let row = self.scaler.transform_parameters(parameters);
        let probs = self.predict_scaled(&[row])?;
        Ok(probs
            .first()
            .map_or_else(|| ViabilityPrediction::from_raw(0.0, 0.0, 0.0), |p| {
                ViabilityPrediction::from_array(*p)
            }))
    }

    /// Predicts distributions for several raw parameter sets.
    ///
    /// # Errors
    ///
    /// As [`TrainedViabilityModel::predict`].
    pub fn predict_batch(&self, parameters: &[ProcessParameters]) -> Result<Vec<ViabilityPrediction>> {
        let rows: Vec<FeatureRow> = parameters
            .iter()
            .map(|p| self.scaler.transform_parameters(p))
            .collect();
        Ok(self
            .predict_scaled(&rows)?
            .into_iter()
            .map(ViabilityPrediction::from_array)
            .collect())
    }

    /// Class probabilities for rows that are already scaled.
    ///
    /// # Errors
    ///
    /// As [`TrainedViabilityModel::predict`].
    pub fn predict_scaled(&self, rows: &[FeatureRow]) -> Result<Vec<OneHot>> {
        predict_probabilities(&self.classifier, rows, &self.device)
    }
}
