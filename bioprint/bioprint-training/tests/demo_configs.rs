//! The shipped demo configs and dataset load and train.

use std::path::PathBuf;

use bioprint_dataset::read_samples_from_path;
use bioprint_training::{ModelConfig, ModelSpec, ModelType, TrainingResult, train};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn svm_demo_is_golden() {
    let config = ModelConfig::from_path(demo("svm.json")).unwrap();
    assert_eq!(config.model_type(), ModelType::Svm);

    let samples = read_samples_from_path(demo("samples.csv")).unwrap();
    assert_eq!(samples.len(), 10);
    assert_eq!(train(&config, &samples).unwrap(), TrainingResult::simulated());
}

#[test]
fn neural_network_demo_trains_on_csv() {
    let mut config = ModelConfig::from_path(demo("neural-network.json")).unwrap();
    if let ModelSpec::NeuralNetwork(params) = &mut config.model {
        params.epochs = 10;
    }

    let samples = read_samples_from_path(demo("samples.csv")).unwrap();
    let result = train(&config, &samples).unwrap();

    // 10 samples at 0.8 leaves two test rows
    assert_eq!(result.confusion_total(), 2);
    assert!((0.0..=1.0).contains(&result.accuracy));
    assert_eq!(result.history.map(|h| h.epochs_completed()), Some(10));
}

#[test]
fn missing_config_is_io_error() {
    let err = ModelConfig::from_path(demo("missing.json")).unwrap_err();
    assert!(matches!(err, bioprint_training::TrainingError::Io(_)));
}
