// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly except the thin
// dataset/batcher adapters in Layer 4.
//
// What's in this layer:
//
//   model.rs     — The fixed 3-layer regression network
//                  (input → 64 → 32 → 1, ReLU between layers)
//
//   trainer.rs   — Mini-batch gradient descent with Adam,
//                  per-epoch validation, fixed epoch count
//
//   evaluator.rs — Held-out MAE/RMSE computation on the
//                  trained model, no parameter updates
//
// Backend selection happens here and only here, once, at
// compile time: the default backend runs on the general
// processor (NdArray); the `wgpu` crate feature swaps in the
// accelerator backend. A run uses its backend start to finish;
// hardware failure mid-run is fatal, never retried.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// The feed-forward regression network
pub mod model;

/// Full training loop with per-epoch validation
pub mod trainer;

/// Held-out metric computation (MAE / RMSE)
pub mod evaluator;

#[cfg(feature = "wgpu")]
pub type TrainingBackend = burn::backend::Autodiff<burn::backend::Wgpu>;
#[cfg(feature = "wgpu")]
pub type InferenceBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type TrainingBackend = burn::backend::Autodiff<burn::backend::NdArray>;
#[cfg(not(feature = "wgpu"))]
pub type InferenceBackend = burn::backend::NdArray;

/// Human-readable identifier of the compute device, recorded
/// in the metrics artifact.
pub const DEVICE_NAME: &str = if cfg!(feature = "wgpu") { "wgpu" } else { "cpu" };

#[cfg(feature = "wgpu")]
pub fn default_device() -> burn::backend::wgpu::WgpuDevice {
    burn::backend::wgpu::WgpuDevice::default()
}

#[cfg(not(feature = "wgpu"))]
pub fn default_device() -> burn::backend::ndarray::NdArrayDevice {
    burn::backend::ndarray::NdArrayDevice::default()
}
