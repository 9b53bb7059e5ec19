// ============================================================
// Layer 4 — Regression Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// RegressionSamples into device-ready tensors.
//
// Input:  Vec of N samples, each with a feature vector of
//         length D (all rows share the same fitted layout)
// Output: RegressionBatch with features [N, D], targets [N]
//
// We flatten all feature rows into one long Vec, then reshape:
//   [r1_f1, ..., r1_fD, r2_f1, ..., rN_fD] → [N, D]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::RegressionSample;

// ─── RegressionBatch ──────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct RegressionBatch<B: Backend> {
    /// Feature matrix — shape: [batch_size, feature_count]
    pub features: Tensor<B, 2>,

    /// Target scores — shape: [batch_size]
    pub targets: Tensor<B, 1>,
}

// ─── RegressionBatcher ────────────────────────────────────────────────────────
/// Holds the target device so tensors are created where the
/// model lives.
#[derive(Clone, Debug)]
pub struct RegressionBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> RegressionBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<RegressionSample, RegressionBatch<B>> for RegressionBatcher<B> {
    /// Stack a Vec of samples into one RegressionBatch.
    fn batch(&self, items: Vec<RegressionSample>) -> RegressionBatch<B> {
        let batch_size    = items.len();
        // All rows share the fitted feature layout
        let feature_count = items.first().map(|s| s.features.len()).unwrap_or(0);

        let feature_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let target_flat: Vec<f32> = items.iter().map(|s| s.target).collect();

        let features = Tensor::<B, 1>::from_floats(
            feature_flat.as_slice(), &self.device
        ).reshape([batch_size, feature_count]);

        let targets = Tensor::<B, 1>::from_floats(
            target_flat.as_slice(), &self.device
        );

        RegressionBatch { features, targets }
    }
}
