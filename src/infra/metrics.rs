// ============================================================
// Layer 6 — Metric Value Objects
// ============================================================
// Two plain records, written once per run:
//
//   EpochLoss       — one (train_loss, val_loss) pair per epoch,
//                     in epoch order; feeds the loss-curve plot
//   TrainingMetrics — the final held-out scores plus run context
//                     (epoch count, device, feature count);
//                     serialized to metrics.json
//
// How to read the losses:
//   - train_loss should decrease each epoch (model is learning)
//   - val_loss diverging upward from train_loss → overfitting

use serde::{Deserialize, Serialize};

/// Losses recorded for a single training epoch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochLoss {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean batch MSE over the training set for this epoch
    pub train_loss: f64,

    /// MSE over the full validation set after this epoch
    pub val_loss: f64,
}

/// The final metrics record for a training run.
/// Field names keep the classic upper-case spellings in the
/// serialized form, so downstream consumers read `MAE`/`RMSE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Mean absolute error on the validation set, in score units
    #[serde(rename = "MAE")]
    pub mae: f64,

    /// Root mean squared error on the validation set
    #[serde(rename = "RMSE")]
    pub rmse: f64,

    /// Number of epochs the run trained for
    pub epochs: usize,

    /// Compute device identifier ("cpu" or "wgpu")
    pub device: String,

    /// Width of the fitted feature vectors
    pub n_features: usize,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_serialize_with_classic_names() {
        let metrics = TrainingMetrics {
            mae:        1.5,
            rmse:       2.5,
            epochs:     25,
            device:     "cpu".to_string(),
            n_features: 12,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"MAE\":1.5"));
        assert!(json.contains("\"RMSE\":2.5"));
        assert!(json.contains("\"n_features\":12"));
    }

    #[test]
    fn test_metrics_round_trip() {
        let metrics = TrainingMetrics {
            mae:        0.25,
            rmse:       0.5,
            epochs:     3,
            device:     "wgpu".to_string(),
            n_features: 7,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        let back: TrainingMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mae, metrics.mae);
        assert_eq!(back.device, metrics.device);
    }
}
