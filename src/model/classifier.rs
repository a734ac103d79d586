//! Trained food category classifier
//!
//! Architecture: Input(features) → [Linear → ReLU]* → Linear(num_classes)
//!
//! The class with the largest logit is the prediction.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::record::{FullPrecisionSettings, Recorder};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use std::fmt;

use crate::{FeistaError, Result};

/// A trained model mapping an aligned feature row to a class index
pub trait Classifier: fmt::Debug {
    /// Width of the feature row the model was trained on
    fn input_dim(&self) -> usize;

    /// Number of classes the model can produce
    fn num_classes(&self) -> usize;

    /// Predict the class index for one aligned feature row
    fn classify(&self, features: &[f32]) -> Result<usize>;
}

/// Configuration for the classifier network
#[derive(Debug, Clone, PartialEq)]
pub struct MlpClassifierConfig {
    pub input_dim: usize,
    /// Hidden layer widths, may be empty for a linear model
    pub hidden_dims: Vec<usize>,
    pub num_classes: usize,
}

/// A single hidden layer block: Linear → ReLU
#[derive(Module, Debug)]
pub struct HiddenBlock<B: Backend> {
    linear: Linear<B>,
}

impl<B: Backend> HiddenBlock<B> {
    pub fn new(device: &B::Device, in_dim: usize, out_dim: usize) -> Self {
        HiddenBlock {
            linear: LinearConfig::new(in_dim, out_dim).init(device),
        }
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        relu(self.linear.forward(x))
    }
}

/// Feed-forward network producing one logit per class
#[derive(Module, Debug)]
pub struct ClassifierNet<B: Backend> {
    hidden: Vec<HiddenBlock<B>>,
    head: Linear<B>,
}

impl<B: Backend> ClassifierNet<B> {
    pub fn new(device: &B::Device, config: &MlpClassifierConfig) -> Self {
        let mut hidden = Vec::with_capacity(config.hidden_dims.len());
        let mut in_dim = config.input_dim;
        for &out_dim in &config.hidden_dims {
            hidden.push(HiddenBlock::new(device, in_dim, out_dim));
            in_dim = out_dim;
        }

        ClassifierNet {
            hidden,
            head: LinearConfig::new(in_dim, config.num_classes).init(device),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `features` - Aligned feature rows [batch, input_dim]
    ///
    /// # Returns
    /// Class logits [batch, num_classes]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self
            .hidden
            .iter()
            .fold(features, |x, block| block.forward(x));
        self.head.forward(x)
    }

    /// Weight shapes [in, out] of each layer, head last
    pub fn layer_dims(&self) -> Vec<[usize; 2]> {
        self.hidden
            .iter()
            .map(|block| block.linear.weight.dims())
            .chain(std::iter::once(self.head.weight.dims()))
            .collect()
    }
}

/// Classifier network bound to the device it runs on
#[derive(Debug)]
pub struct MlpClassifier<B: Backend> {
    net: ClassifierNet<B>,
    device: B::Device,
    config: MlpClassifierConfig,
}

impl<B: Backend> MlpClassifier<B> {
    /// Create a classifier with freshly initialized weights
    pub fn new(device: B::Device, config: MlpClassifierConfig) -> Self {
        let net = ClassifierNet::new(&device, &config);
        MlpClassifier {
            net,
            device,
            config,
        }
    }

    /// Save weights to file
    pub fn save(&self, path: &str) -> Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.net.clone().into_record(), path.into())
            .map_err(|e| FeistaError::Io(std::io::Error::other(e.to_string())))
    }

    /// Load weights from file
    pub fn load(device: B::Device, path: &str, config: MlpClassifierConfig) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder.load(path.into(), &device).map_err(|e| {
            FeistaError::mismatch(format!(
                "weights at {} do not fit {:?}: {}",
                path, config, e
            ))
        })?;

        let net = ClassifierNet::new(&device, &config);
        let expected = net.layer_dims();
        let net = net.load_record(record);

        // Records load without shape checks
        let found = net.layer_dims();
        if found != expected {
            return Err(FeistaError::mismatch(format!(
                "weights at {} have layer shapes {:?}, expected {:?}",
                path, found, expected
            )));
        }

        Ok(MlpClassifier {
            net,
            device,
            config,
        })
    }

    /// Raw class logits for one feature row
    pub fn logits(&self, features: &[f32]) -> Vec<f32> {
        let input: Tensor<B, 2> = Tensor::<B, 1>::from_floats(features, &self.device)
            .reshape([1, features.len()]);
        let data = self.net.forward(input).into_data();
        data.iter::<f32>().collect()
    }
}

impl<B: Backend> Classifier for MlpClassifier<B> {
    fn input_dim(&self) -> usize {
        self.config.input_dim
    }

    fn num_classes(&self) -> usize {
        self.config.num_classes
    }

    fn classify(&self, features: &[f32]) -> Result<usize> {
        if features.len() != self.config.input_dim {
            return Err(FeistaError::mismatch(format!(
                "classifier expects {} features, got {}",
                self.config.input_dim,
                features.len()
            )));
        }
        argmax(&self.logits(features))
    }
}

/// Index of the largest score, the first one on ties
pub fn argmax(scores: &[f32]) -> Result<usize> {
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(FeistaError::mismatch("classifier produced non-finite scores"));
    }

    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((idx, score));
        }
    }

    best.map(|(idx, _)| idx)
        .ok_or_else(|| FeistaError::mismatch("classifier produced no scores"))
}
