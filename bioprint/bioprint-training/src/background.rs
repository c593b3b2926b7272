//! Off-runtime training for async callers.

use bioprint_dataset::BioprintingSample;
use tokio::task::JoinHandle;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::orchestrator::{TrainingOrchestrator, TrainingOutcome};

/// Runs [`TrainingOrchestrator::fit`] on Tokio's blocking pool.
///
/// Dropping the handle detaches the work. To stop it, set the
/// orchestrator's [`crate::CancelFlag`]; the run then finishes with
/// [`crate::TrainingError::Interrupted`] at the next epoch boundary.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```no_run
/// use bioprint_dataset::reference_samples;
/// use bioprint_training::{ModelConfig, TrainingOrchestrator, train_in_background};
///
/// # async fn run() {
/// let handle = train_in_background(
///     TrainingOrchestrator::new(),
///     ModelConfig::default(),
///     reference_samples().to_vec(),
/// );
/// let outcome = handle.await.unwrap().unwrap();
/// println!("accuracy {}", outcome.result.accuracy);
/// # }
/// ```
pub fn train_in_background(
    orchestrator: TrainingOrchestrator,
    config: ModelConfig,
    samples: Vec<BioprintingSample>,
) -> JoinHandle<Result<TrainingOutcome>> {
    tokio::task::spawn_blocking(move || orchestrator.fit(&config, &samples))
}
