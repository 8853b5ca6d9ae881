//! Engagement classifier
//!
//! Architecture: Input(16) → [Linear → ReLU → Dropout] × N → Linear(n_classes)
//!
//! The predicted class is the argmax over the output logits.

use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::record::{FullPrecisionSettings, Recorder};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};

use crate::features::FeatureVector;
use crate::{PlayStatsError, Result};

/// Anything that maps a batch of feature vectors to class indices
pub trait Classifier {
    /// One class index per input row
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>>;
}

/// Configuration for the engagement network
#[derive(Debug, Clone)]
pub struct EngagementNetConfig {
    pub input_dim: usize,
    pub hidden_dims: Vec<usize>,
    pub num_classes: usize,
    pub dropout: f64,
}

impl EngagementNetConfig {
    pub fn new(hidden_dims: Vec<usize>, num_classes: usize, dropout: f64) -> Self {
        EngagementNetConfig {
            input_dim: FeatureVector::DIM,
            hidden_dims,
            num_classes,
            dropout,
        }
    }

    pub fn from_config(config: &crate::ClassifierConfig, num_classes: usize) -> Self {
        Self::new(config.hidden_dims.clone(), num_classes, config.dropout)
    }
}

/// A single hidden layer block: Linear → ReLU → Dropout
#[derive(Module, Debug)]
pub struct HiddenBlock<B: Backend> {
    linear: Linear<B>,
    dropout: Dropout,
}

impl<B: Backend> HiddenBlock<B> {
    pub fn new(device: &B::Device, in_dim: usize, out_dim: usize, dropout: f64) -> Self {
        HiddenBlock {
            linear: LinearConfig::new(in_dim, out_dim).init(device),
            dropout: DropoutConfig::new(dropout).init(),
        }
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.linear.forward(x);
        let x = relu(x);
        self.dropout.forward(x)
    }
}

/// Feed-forward classifier over the 16 profile features
#[derive(Module, Debug)]
pub struct EngagementNet<B: Backend> {
    hidden: Vec<HiddenBlock<B>>,
    output: Linear<B>,
}

impl<B: Backend> EngagementNet<B> {
    pub fn new(device: &B::Device, config: &EngagementNetConfig) -> Self {
        let mut hidden = Vec::with_capacity(config.hidden_dims.len());
        let mut in_dim = config.input_dim;
        for &out_dim in &config.hidden_dims {
            hidden.push(HiddenBlock::new(device, in_dim, out_dim, config.dropout));
            in_dim = out_dim;
        }

        EngagementNet {
            hidden,
            output: LinearConfig::new(in_dim, config.num_classes).init(device),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `x` - Feature rows [batch, 16]
    ///
    /// # Returns
    /// Class logits [batch, n_classes]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.iter().fold(x, |x, block| block.forward(x));
        self.output.forward(x)
    }

    /// Argmax class per row
    pub fn predict_classes(&self, x: Tensor<B, 2>) -> Vec<usize> {
        self.forward(x)
            .argmax(1)
            .into_data()
            .iter::<i64>()
            .map(|i| i as usize)
            .collect()
    }

    /// Save model to file
    pub fn save(&self, path: &str) -> Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.clone().into_record(), path.into())
            .map_err(|e| PlayStatsError::Artifact {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Load model from file
    pub fn load(device: &B::Device, path: &str, config: &EngagementNetConfig) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder
            .load(path.into(), device)
            .map_err(|e| PlayStatsError::Artifact {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let model = Self::new(device, config);
        Ok(model.load_record(record))
    }
}

/// Build a [batch, DIM] tensor from feature vectors
pub fn batch_to_tensor<B: Backend>(batch: &[FeatureVector], device: &B::Device) -> Tensor<B, 2> {
    let data: Vec<f32> = batch
        .iter()
        .flat_map(|v| v.as_slice().iter().copied())
        .collect();
    Tensor::<B, 2>::from_data(TensorData::new(data, [batch.len(), FeatureVector::DIM]), device)
}

/// Trained network bound to the device it runs on
pub struct NetClassifier<B: Backend> {
    model: EngagementNet<B>,
    device: B::Device,
}

impl<B: Backend> NetClassifier<B> {
    pub fn new(model: EngagementNet<B>, device: B::Device) -> Self {
        NetClassifier { model, device }
    }
}

impl<B: Backend> Classifier for NetClassifier<B> {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let input = batch_to_tensor::<B>(batch, &self.device);
        let classes = self.model.predict_classes(input);
        if classes.len() != batch.len() {
            return Err(PlayStatsError::Inference(format!(
                "classifier returned {} predictions for {} rows",
                classes.len(),
                batch.len()
            )));
        }
        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::RawPlayerProfile;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let config = EngagementNetConfig::new(vec![32, 16], 3, 0.1);
        let model = EngagementNet::<TestBackend>::new(&device, &config);

        let x = Tensor::random(
            [4, FeatureVector::DIM],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );
        assert_eq!(model.forward(x).dims(), [4, 3]);
    }

    #[test]
    fn test_no_hidden_layers() {
        let device = Default::default();
        let config = EngagementNetConfig::new(vec![], 2, 0.0);
        let model = EngagementNet::<TestBackend>::new(&device, &config);

        let x = Tensor::zeros([2, FeatureVector::DIM], &device);
        assert_eq!(model.forward(x).dims(), [2, 2]);
    }

    #[test]
    fn test_net_classifier_indices_in_range() {
        let device: <TestBackend as Backend>::Device = Default::default();
        let config = EngagementNetConfig::new(vec![8], 3, 0.0);
        let model = EngagementNet::<TestBackend>::new(&device, &config);
        let classifier = NetClassifier::new(model, device);

        let v = FeatureVector::encode(&RawPlayerProfile::default()).unwrap();
        let classes = classifier.predict(&[v.clone(), v]).unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.iter().all(|&c| c < 3));
        assert_eq!(classes[0], classes[1]);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net");
        let path = path.to_str().unwrap();

        let device = Default::default();
        let config = EngagementNetConfig::new(vec![8], 3, 0.0);
        let model = EngagementNet::<TestBackend>::new(&device, &config);
        model.save(path).unwrap();

        let loaded = EngagementNet::<TestBackend>::load(&device, path, &config).unwrap();
        let x = batch_to_tensor::<TestBackend>(
            &[FeatureVector::encode(&RawPlayerProfile::default()).unwrap()],
            &device,
        );
        let before: Vec<f32> = model.forward(x.clone()).into_data().iter::<f32>().collect();
        let after: Vec<f32> = loaded.forward(x).into_data().iter::<f32>().collect();
        assert_eq!(before, after);
    }
}
