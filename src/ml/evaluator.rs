// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Computes held-out error metrics for a trained model: one
// forward pass over the full validation set, no parameter
// updates, then MAE and RMSE against the true targets.
//
// MAE  = mean(|prediction - truth|)   — error in score units
// RMSE = sqrt(mean((pred - truth)²))  — penalises large misses

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::{batcher::RegressionBatcher, dataset::RegressionSample};
use crate::ml::model::ScoreNet;

/// Held-out evaluation of a trained model.
pub struct Evaluation {
    pub mae:         f64,
    pub rmse:        f64,
    pub predictions: Vec<f32>,
}

/// Predict the whole validation set once and score it.
pub fn evaluate<B: Backend>(
    model:   &ScoreNet<B>,
    samples: &[RegressionSample],
    device:  &B::Device,
) -> Evaluation {
    let batcher = RegressionBatcher::<B>::new(device.clone());
    let batch   = batcher.batch(samples.to_vec());

    let predictions: Vec<f32> = model
        .forward(batch.features)
        .into_data()
        .convert::<f32>()
        .value;

    let truths: Vec<f32> = samples.iter().map(|s| s.target).collect();

    Evaluation {
        mae:  mae(&predictions, &truths),
        rmse: rmse(&predictions, &truths),
        predictions,
    }
}

/// Mean absolute error. Empty input → 0.0.
pub fn mae(predictions: &[f32], truths: &[f32]) -> f64 {
    debug_assert_eq!(predictions.len(), truths.len());
    if predictions.is_empty() {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(truths)
        .map(|(p, t)| (*p as f64 - *t as f64).abs())
        .sum();
    sum / predictions.len() as f64
}

/// Root mean squared error. Empty input → 0.0.
pub fn rmse(predictions: &[f32], truths: &[f32]) -> f64 {
    debug_assert_eq!(predictions.len(), truths.len());
    if predictions.is_empty() {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(truths)
        .map(|(p, t)| (*p as f64 - *t as f64).powi(2))
        .sum();
    (sum / predictions.len() as f64).sqrt()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::ScoreNetConfig;
    use burn::backend::NdArray;

    #[test]
    fn test_mae_and_rmse() {
        let pred  = [1.0f32, 2.0, 3.0];
        let truth = [1.0f32, 4.0, 0.0];
        // errors: 0, 2, 3
        assert!((mae(&pred, &truth) - 5.0 / 3.0).abs() < 1e-9);
        assert!((rmse(&pred, &truth) - (13.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_predictions_score_zero() {
        let values = [0.5f32, -1.5, 3.25];
        assert_eq!(mae(&values, &values), 0.0);
        assert_eq!(rmse(&values, &values), 0.0);
    }

    #[test]
    fn test_evaluate_covers_every_sample() {
        let device = Default::default();
        let model: ScoreNet<NdArray> = ScoreNetConfig::new(2).init(&device);

        let samples: Vec<RegressionSample> = (0..7)
            .map(|i| RegressionSample {
                features: vec![i as f32, 1.0],
                target:   i as f32,
            })
            .collect();

        let eval = evaluate(&model, &samples, &device);
        assert_eq!(eval.predictions.len(), 7);
        assert!(eval.mae.is_finite());
        assert!(eval.rmse >= eval.mae);
    }
}
