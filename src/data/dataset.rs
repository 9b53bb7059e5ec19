use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One row of the encoded training set: a fixed-length feature
/// vector and its target score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionSample {
    pub features: Vec<f32>,
    pub target:   f32,
}

/// Pairs up row-aligned feature rows and targets.
pub fn build_samples(features: Vec<Vec<f32>>, targets: Vec<f32>) -> Vec<RegressionSample> {
    features
        .into_iter()
        .zip(targets)
        .map(|(features, target)| RegressionSample { features, target })
        .collect()
}

pub struct RegressionDataset {
    samples: Vec<RegressionSample>,
}

impl RegressionDataset {
    pub fn new(samples: Vec<RegressionSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[RegressionSample] {
        &self.samples
    }
}

impl Dataset<RegressionSample> for RegressionDataset {
    fn get(&self, index: usize) -> Option<RegressionSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
