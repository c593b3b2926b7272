//! Dataset loading and the `summary` command.

use std::path::Path;

use anyhow::{Context, Result};
use bioprint_dataset::{BioprintingSample, DatasetSummary, read_samples_from_path, reference_samples};
use tracing::{info, warn};

/// Reads samples from `path`, or returns the reference dataset.
pub fn load_samples(path: Option<&Path>) -> Result<Vec<BioprintingSample>> {
    match path {
        Some(path) => read_samples_from_path(path)
            .with_context(|| format!("failed to load dataset {}", path.display())),
        None => {
            info!(samples = reference_samples().len(), "using reference dataset");
            Ok(reference_samples().to_vec())
        }
    }
}

pub fn summary(path: Option<&Path>) -> Result<()> {
    let samples = load_samples(path)?;
    let summary = DatasetSummary::from_samples(&samples);
    if summary.has_missing_class() {
        warn!("dataset does not cover every viability class");
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
