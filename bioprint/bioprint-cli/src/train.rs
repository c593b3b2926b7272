//! `train` command.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use bioprint_training::{ModelConfig, TrainingEvent, TrainingOrchestrator, train_in_background};
use tracing::info;

use crate::dataset::load_samples;

fn log_event(event: &TrainingEvent) {
    match event {
        TrainingEvent::Started {
            model_type,
            train_samples,
            test_samples,
        } => info!(%model_type, train_samples, test_samples, "started"),
        TrainingEvent::EpochFinished(metrics) => info!(
            epoch = metrics.epoch + 1,
            train_loss = metrics.train_loss,
            val_loss = ?metrics.val_loss,
            val_accuracy = ?metrics.val_accuracy,
            "epoch"
        ),
        TrainingEvent::Finished { accuracy } => info!(accuracy, "finished"),
    }
}

pub async fn run(config_path: &Path, dataset: Option<&Path>, simulated_delay_ms: u64) -> Result<()> {
    let config = ModelConfig::from_path(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let samples = load_samples(dataset)?;

    let orchestrator = TrainingOrchestrator::new()
        .with_simulated_delay(Duration::from_millis(simulated_delay_ms))
        .with_observer(log_event);

    let outcome = train_in_background(orchestrator, config, samples)
        .await
        .context("training task panicked")??;

    println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    Ok(())
}
