//! Feed-forward viability classifier.

use bioprint_types::{NUM_CLASSES, NUM_FEATURES};
use burn::module::Module;
use burn::nn;
use burn::prelude::Backend;
use burn::tensor::activation::{relu, softmax};
use burn::tensor::{Tensor, TensorData};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Configuration for the feed-forward classifier.
///
/// # Example
///
/// ```
/// use bioprint_models::FeedForwardConfig;
///
/// let config = FeedForwardConfig::default();
/// assert_eq!(config.hidden_layers, vec![64, 32]);
/// assert_eq!(config.input_dim, 6);
/// assert_eq!(config.output_dim, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedForwardConfig {
    /// Input dimension (default: 6 process features).
    pub input_dim: usize,

    /// Width of each hidden layer, in order.
    pub hidden_layers: Vec<usize>,

    /// Output dimension (default: 3 viability classes).
    pub output_dim: usize,
}

impl Default for FeedForwardConfig {
    fn default() -> Self {
        Self::new(vec![64, 32])
    }
}

impl FeedForwardConfig {
    /// Creates a configuration with the given hidden widths.
    #[must_use]
    pub const fn new(hidden_layers: Vec<usize>) -> Self {
        Self {
            input_dim: NUM_FEATURES,
            hidden_layers,
            output_dim: NUM_CLASSES,
        }
    }

    /// Sets the input dimension.
    #[must_use]
    pub const fn with_input_dim(mut self, input_dim: usize) -> Self {
        self.input_dim = input_dim;
        self
    }

    /// Sets the output dimension.
    #[must_use]
    pub const fn with_output_dim(mut self, output_dim: usize) -> Self {
        self.output_dim = output_dim;
        self
    }

    /// Returns `true` if all dimensions are positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.input_dim > 0 && self.output_dim > 0 && self.hidden_layers.iter().all(|&w| w > 0)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] naming the first zero dimension.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 {
            return Err(ModelError::invalid_config("input_dim must be > 0"));
        }
        if self.output_dim == 0 {
            return Err(ModelError::invalid_config("output_dim must be > 0"));
        }
        if let Some(i) = self.hidden_layers.iter().position(|&w| w == 0) {
            return Err(ModelError::invalid_config(format!(
                "hidden layer {i} must have a positive width"
            )));
        }
        Ok(())
    }
}

/// Dense classifier over process features.
///
/// Architecture: Input -> (Linear -> `ReLU`) × hidden -> Linear -> logits
///
/// Softmax is applied by [`FeedForwardClassifier::probabilities`]; training
/// works on the raw logits.
///
/// # Example
///
/// ```ignore
/// use bioprint_models::{FeedForwardClassifier, FeedForwardConfig};
///
/// let device = Default::default();
/// let model = FeedForwardClassifier::<MyBackend>::new(&FeedForwardConfig::default(), &device);
///
/// let input = Tensor::zeros([1, 6], &device);
/// assert_eq!(model.probabilities(input).dims(), [1, 3]);
/// ```
#[derive(Debug, Module)]
pub struct FeedForwardClassifier<B: Backend> {
    hidden: Vec<nn::Linear<B>>,
    output: nn::Linear<B>,
}

impl<B: Backend> FeedForwardClassifier<B> {
    /// Creates a classifier with freshly initialized weights.
    ///
    /// Weight initialization draws from the backend RNG; call `B::seed`
    /// first for reproducible weights.
    #[must_use]
    pub fn new(config: &FeedForwardConfig, device: &B::Device) -> Self {
        let mut hidden = Vec::with_capacity(config.hidden_layers.len());
        let mut width = config.input_dim;
        for &units in &config.hidden_layers {
            hidden.push(nn::LinearConfig::new(width, units).init(device));
            width = units;
        }
        let output = nn::LinearConfig::new(width, config.output_dim).init(device);
        Self { hidden, output }
    }

    /// Number of hidden layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.hidden.len()
    }

    /// Runs the forward pass.
    ///
    /// # Arguments
    ///
    /// - `input`: Input tensor of shape `[batch_size, input_dim]`
    ///
    /// # Returns
    ///
    /// Logits of shape `[batch_size, output_dim]`.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = input;
        for layer in &self.hidden {
            x = relu(layer.forward(x));
        }
        self.output.forward(x)
    }

    /// Runs the forward pass and applies softmax over classes.
    pub fn probabilities(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(input), 1)
    }

    /// Mean absolute weight leaving each input feature.
    ///
    /// Read from the first layer (the output layer when there are no hidden
    /// layers). Returns one value per input dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TensorData`] if the weights cannot be read back.
    pub fn input_weight_magnitudes(&self) -> Result<Vec<f64>> {
        let weight = self
            .hidden
            .first()
            .map_or_else(|| self.output.weight.val(), |layer| layer.weight.val());

        // Burn stores linear weights as [d_input, d_output].
        let magnitudes = weight.abs().mean_dim(1);
        let values = magnitudes
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| ModelError::tensor_data(format!("{e:?}")))?;
        Ok(values.into_iter().map(f64::from).collect())
    }
}

/// Packs fixed-width rows into a `[rows, N]` tensor.
#[allow(clippy::cast_possible_truncation)]
pub fn rows_to_tensor<B: Backend, const N: usize>(
    rows: &[[f64; N]],
    device: &B::Device,
) -> Tensor<B, 2> {
    let flat: Vec<f32> = rows
        .iter()
        .flat_map(|row| row.iter().map(|&v| v as f32))
        .collect();
    Tensor::from_data(TensorData::new(flat, [rows.len(), N]), device)
}

/// Unpacks a `[rows, N]` tensor into fixed-width rows.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] if the second dimension is not `N`,
/// or [`ModelError::TensorData`] if the values cannot be read back.
pub fn tensor_to_rows<B: Backend, const N: usize>(tensor: Tensor<B, 2>) -> Result<Vec<[f64; N]>> {
    let [rows, cols] = tensor.dims();
    if cols != N {
        return Err(ModelError::shape_mismatch(
            format!("[{rows}, {N}]"),
            format!("[{rows}, {cols}]"),
        ));
    }

    let values = tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| ModelError::tensor_data(format!("{e:?}")))?;

    Ok(values
        .chunks_exact(N)
        .map(|chunk| {
            let mut row = [0.0; N];
            for (dst, &src) in row.iter_mut().zip(chunk) {
                *dst = f64::from(src);
            }
            row
        })
        .collect())
}
