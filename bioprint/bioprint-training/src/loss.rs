//! Loss functions for viability classification.

use bioprint_dataset::OneHot;
use burn::prelude::Backend;
use burn::tensor::Tensor;
use burn::tensor::activation::log_softmax;

/// Probability floor applied before taking logarithms of predictions.
pub const PROBABILITY_EPSILON: f64 = 1e-7;

/// Computes categorical cross-entropy from logits.
///
/// `loss = -mean_i Σ_c target[i, c] · log_softmax(logits)[i, c]`
///
/// # Arguments
///
/// - `logits`: Raw scores `[batch, num_classes]`
/// - `targets`: One-hot labels `[batch, num_classes]`
///
/// # Returns
///
/// Scalar loss value.
pub fn categorical_cross_entropy<B: Backend>(
    logits: Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let log_probs = log_softmax(logits, 1);
    (targets * log_probs).sum_dim(1).mean().neg()
}

/// Cross-entropy of predicted probabilities against one-hot labels.
///
/// Probabilities are clipped to [`PROBABILITY_EPSILON`] before the
/// logarithm. Returns 0 for empty input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cross_entropy_rows(probabilities: &[OneHot], labels: &[OneHot]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let total: f64 = probabilities
        .iter()
        .zip(labels)
        .map(|(p, y)| {
            p.iter()
                .zip(y)
                .map(|(&p, &y)| -y * p.max(PROBABILITY_EPSILON).ln())
                .sum::<f64>()
        })
        .sum();
    total / probabilities.len() as f64
}
