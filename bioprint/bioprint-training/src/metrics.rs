//! Training metrics and classification reports.

use bioprint_types::{Feature, NUM_CLASSES, ViabilityClass};
use serde::{Deserialize, Serialize};

/// Confusion counts: rows are actual classes, columns predicted classes,
/// both in `Low, Medium, High` order.
pub type ConfusionMatrix = [[u32; NUM_CLASSES]; NUM_CLASSES];

/// Metrics for a single training epoch.
///
/// # Example
///
/// ```
/// use bioprint_training::EpochMetrics;
///
/// let metrics = EpochMetrics::new(0, 0.9).with_validation(0.8, 0.5);
/// assert_eq!(metrics.epoch, 0);
/// assert_eq!(metrics.val_loss, Some(0.8));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochMetrics {
    /// Epoch number (0-indexed).
    pub epoch: usize,

    /// Mean training loss for this epoch.
    pub train_loss: f64,

    /// Validation loss on the test split (if non-empty).
    pub val_loss: Option<f64>,

    /// Validation accuracy on the test split (if non-empty).
    pub val_accuracy: Option<f64>,

    /// Learning rate used.
    pub learning_rate: f64,

    /// Number of training samples processed.
    pub train_samples: usize,
}

impl EpochMetrics {
    /// Creates new epoch metrics.
    #[must_use]
    pub const fn new(epoch: usize, train_loss: f64) -> Self {
        Self {
            epoch,
            train_loss,
            val_loss: None,
            val_accuracy: None,
            learning_rate: 0.0,
            train_samples: 0,
        }
    }

    /// Sets validation loss and accuracy.
    #[must_use]
    pub const fn with_validation(mut self, loss: f64, accuracy: f64) -> Self {
        self.val_loss = Some(loss);
        self.val_accuracy = Some(accuracy);
        self
    }

    /// Sets the learning rate.
    #[must_use]
    pub const fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets the training sample count.
    #[must_use]
    pub const fn with_samples(mut self, train: usize) -> Self {
        self.train_samples = train;
        self
    }

    /// Returns true if validation loss improved (is lower than previous best).
    #[must_use]
    pub fn val_improved(&self, previous_best: Option<f64>) -> bool {
        match (self.val_loss, previous_best) {
            (Some(current), Some(best)) => current < best,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Per-epoch record of a neural training run.
///
/// # Example
///
/// ```
/// use bioprint_training::{EpochMetrics, TrainingHistory};
///
/// let mut history = TrainingHistory::new();
/// history.add_epoch(EpochMetrics::new(0, 1.0).with_validation(0.9, 0.4));
/// history.add_epoch(EpochMetrics::new(1, 0.6).with_validation(0.7, 0.6));
///
/// assert_eq!(history.epochs_completed(), 2);
/// assert_eq!(history.best_epoch, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingHistory {
    /// Metrics for each epoch.
    pub epochs: Vec<EpochMetrics>,

    /// Best validation loss seen.
    pub best_val_loss: Option<f64>,

    /// Epoch with best validation loss.
    pub best_epoch: Option<usize>,
}

impl TrainingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds metrics for an epoch.
    pub fn add_epoch(&mut self, metrics: EpochMetrics) {
        if metrics.val_improved(self.best_val_loss) {
            self.best_val_loss = metrics.val_loss;
            self.best_epoch = Some(metrics.epoch);
        }
        self.epochs.push(metrics);
    }

    /// Returns the number of completed epochs.
    #[must_use]
    pub fn epochs_completed(&self) -> usize {
        self.epochs.len()
    }

    /// Returns the final training loss (`NaN` before the first epoch).
    #[must_use]
    pub fn final_loss(&self) -> f64 {
        self.epochs.last().map_or(f64::NAN, |m| m.train_loss)
    }

    /// Returns the initial training loss (`NaN` before the first epoch).
    #[must_use]
    pub fn initial_loss(&self) -> f64 {
        self.epochs.first().map_or(f64::NAN, |m| m.train_loss)
    }

    /// Returns training losses as a vector.
    #[must_use]
    pub fn train_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.train_loss).collect()
    }

    /// Returns validation losses as a vector.
    #[must_use]
    pub fn val_losses(&self) -> Vec<Option<f64>> {
        self.epochs.iter().map(|m| m.val_loss).collect()
    }

    /// Returns a human-readable summary.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let _ = writeln!(s, "Epochs completed: {}", self.epochs_completed());
        let _ = writeln!(
            s,
            "Initial loss: {:.4} -> Final loss: {:.4}",
            self.initial_loss(),
            self.final_loss()
        );
        if let Some(best) = self.best_val_loss {
            let _ = writeln!(
                s,
                "Best val loss: {:.4} (epoch {})",
                best,
                self.best_epoch.unwrap_or(0)
            );
        }
        s
    }
}

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetrics {
    /// Class the metrics describe.
    pub class: ViabilityClass,
    /// Correct predictions over predictions of this class.
    pub precision: f64,
    /// Correct predictions over actual members of this class.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1_score: f64,
    /// Number of actual members.
    pub support: u32,
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

/// Accuracy and macro-averaged scores derived from a confusion matrix.
///
/// Classes that neither occur nor are predicted are left out of the macro
/// averages; a class with a zero denominator contributes 0.
///
/// # Example
///
/// ```
/// use bioprint_training::ClassificationReport;
/// use bioprint_types::ViabilityClass::{High, Low, Medium};
///
/// let report = ClassificationReport::from_predictions(
///     &[Low, Medium, High, High],
///     &[Low, Medium, High, Medium],
/// );
/// assert!((report.accuracy - 0.75).abs() < 1e-12);
/// assert_eq!(report.confusion_matrix[2][1], 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReport {
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Macro-averaged precision.
    pub precision: f64,
    /// Macro-averaged recall.
    pub recall: f64,
    /// Macro-averaged F1.
    pub f1_score: f64,
    /// Actual × predicted counts.
    pub confusion_matrix: ConfusionMatrix,
}

impl ClassificationReport {
    /// Builds a report from paired actual and predicted classes.
    ///
    /// Extra items in the longer slice are ignored.
    #[must_use]
    pub fn from_predictions(actual: &[ViabilityClass], predicted: &[ViabilityClass]) -> Self {
        let mut matrix = [[0u32; NUM_CLASSES]; NUM_CLASSES];
        for (a, p) in actual.iter().zip(predicted) {
            matrix[a.index()][p.index()] += 1;
        }
        Self::from_confusion(matrix)
    }

    /// Builds a report from confusion counts.
    #[must_use]
    pub fn from_confusion(matrix: ConfusionMatrix) -> Self {
        let per_class = per_class_metrics(&matrix);
        let total = confusion_total(&matrix);
        let correct: u32 = (0..NUM_CLASSES).map(|c| matrix[c][c]).sum();

        let present: Vec<&ClassMetrics> = per_class
            .iter()
            .filter(|m| m.support > 0 || column_sum(&matrix, m.class.index()) > 0)
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let macro_avg = |f: fn(&ClassMetrics) -> f64| {
            if present.is_empty() {
                0.0
            } else {
                present.iter().map(|&m| f(m)).sum::<f64>() / present.len() as f64
            }
        };

        Self {
            accuracy: ratio(correct, total),
            precision: macro_avg(|m| m.precision),
            recall: macro_avg(|m| m.recall),
            f1_score: macro_avg(|m| m.f1_score),
            confusion_matrix: matrix,
        }
    }

    /// Per-class precision, recall and F1.
    #[must_use]
    pub fn per_class(&self) -> [ClassMetrics; NUM_CLASSES] {
        per_class_metrics(&self.confusion_matrix)
    }

    /// Number of evaluated samples.
    #[must_use]
    pub fn total(&self) -> u32 {
        confusion_total(&self.confusion_matrix)
    }
}

fn column_sum(matrix: &ConfusionMatrix, col: usize) -> u32 {
    matrix.iter().map(|row| row[col]).sum()
}

fn confusion_total(matrix: &ConfusionMatrix) -> u32 {
    matrix.iter().flatten().sum()
}

fn per_class_metrics(matrix: &ConfusionMatrix) -> [ClassMetrics; NUM_CLASSES] {
    ViabilityClass::ALL.map(|class| {
        let c = class.index();
        let tp = matrix[c][c];
        let support: u32 = matrix[c].iter().sum();
        let precision = ratio(tp, column_sum(matrix, c));
        let recall = ratio(tp, support);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            class,
            precision,
            recall,
            f1_score,
            support,
        }
    })
}

/// Contribution of one feature, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Human-readable feature label (e.g. `Cell Density`).
    pub feature: String,
    /// Share of total importance in `[0, 100]`.
    pub importance: f64,
}

impl FeatureImportance {
    /// Creates an entry for a feature.
    #[must_use]
    pub fn new(feature: Feature, importance: f64) -> Self {
        Self {
            feature: feature.label().to_string(),
            importance,
        }
    }
}

/// Normalises per-feature magnitudes to percentages summing to 100.
///
/// Entries are sorted by importance, largest first; ties keep feature
/// order. Non-finite or negative magnitudes count as zero, and an all-zero
/// input splits evenly.
#[must_use]
pub fn feature_importance_from_magnitudes(magnitudes: &[f64]) -> Vec<FeatureImportance> {
    let clean: Vec<f64> = Feature::ALL
        .iter()
        .map(|f| {
            magnitudes
                .get(f.index())
                .copied()
                .filter(|m| m.is_finite() && *m > 0.0)
                .unwrap_or(0.0)
        })
        .collect();
    let total: f64 = clean.iter().sum();

    #[allow(clippy::cast_precision_loss)]
    let even = 100.0 / Feature::ALL.len() as f64;

    let mut entries: Vec<FeatureImportance> = Feature::ALL
        .into_iter()
        .zip(clean)
        .map(|(feature, m)| {
            let share = if total > 0.0 { m / total * 100.0 } else { even };
            FeatureImportance::new(feature, share)
        })
        .collect();
    entries.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    entries
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResult {
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Macro-averaged precision.
    pub precision: f64,
    /// Macro-averaged recall.
    pub recall: f64,
    /// Macro-averaged F1.
    pub f1_score: f64,
    /// Actual × predicted counts.
    pub confusion_matrix: ConfusionMatrix,
    /// Feature contributions, largest first.
    pub feature_importance: Vec<FeatureImportance>,
    /// Per-epoch record; absent for simulated runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<TrainingHistory>,
}

impl TrainingResult {
    /// Combines a classification report with feature importance.
    #[must_use]
    pub fn from_report(report: &ClassificationReport, feature_importance: Vec<FeatureImportance>) -> Self {
        Self {
            accuracy: report.accuracy,
            precision: report.precision,
            recall: report.recall,
            f1_score: report.f1_score,
            confusion_matrix: report.confusion_matrix,
            feature_importance,
            history: None,
        }
    }

    /// Attaches a training history.
    #[must_use]
    pub fn with_history(mut self, history: TrainingHistory) -> Self {
        self.history = Some(history);
        self
    }

    /// Fixed result reported by simulated model types.
    ///
    /// # Example
    ///
    /// ```
    /// use bioprint_training::TrainingResult;
    ///
    /// let result = TrainingResult::simulated();
    /// assert!((result.accuracy - 0.9).abs() < 1e-12);
    /// assert_eq!(result.confusion_matrix[0], [30, 4, 1]);
    /// assert_eq!(result.feature_importance[0].feature, "Cell Density");
    /// ```
    #[must_use]
    pub fn simulated() -> Self {
        Self {
            accuracy: 0.9,
            precision: 0.87,
            recall: 0.86,
            f1_score: 0.86,
            confusion_matrix: [[30, 4, 1], [5, 40, 3], [2, 6, 50]],
            feature_importance: vec![
                FeatureImportance::new(Feature::CellDensity, 28.0),
                FeatureImportance::new(Feature::Temperature, 22.0),
                FeatureImportance::new(Feature::LayerHeight, 18.0),
                FeatureImportance::new(Feature::PrintSpeed, 15.0),
                FeatureImportance::new(Feature::CrosslinkTime, 12.0),
                FeatureImportance::new(Feature::Viscosity, 5.0),
            ],
            history: None,
        }
    }

    /// Number of samples counted in the confusion matrix.
    #[must_use]
    pub fn confusion_total(&self) -> u32 {
        confusion_total(&self.confusion_matrix)
    }
}
