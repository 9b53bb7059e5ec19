// ============================================================
// Layer 5 — Regression Network
// ============================================================
// The fixed architecture: three linear layers with ReLU in
// between, producing one score per row.
//
//   features [batch, in_dim]
//       │  Linear in_dim → 64
//       │  ReLU
//       │  Linear 64 → 32
//       │  ReLU
//       │  Linear 32 → 1
//       ▼
//   scores [batch]        (squeezed from [batch, 1])
//
// There is no dropout and no normalisation — the network is
// deliberately small, this is a tabular regression head, not
// a deep architecture.

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ScoreNetConfig {
    /// Width of the input feature vectors (set after fitting
    /// the encoder — it depends on the one-hot vocabularies)
    pub input_dim: usize,

    #[config(default = 64)]
    pub hidden1: usize,

    #[config(default = 32)]
    pub hidden2: usize,
}

impl ScoreNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ScoreNet<B> {
        ScoreNet {
            fc1: LinearConfig::new(self.input_dim, self.hidden1).init(device),
            fc2: LinearConfig::new(self.hidden1, self.hidden2).init(device),
            out: LinearConfig::new(self.hidden2, 1).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct ScoreNet<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    out: Linear<B>,
}

impl<B: Backend> ScoreNet<B> {
    /// Forward pass: [batch, in_dim] → predicted scores [batch].
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 1> {
        let x = relu(self.fc1.forward(features));
        let x = relu(self.fc2.forward(x));
        // The output layer gives [batch, 1]; squeeze to [batch]
        // so predictions line up with the target vector.
        self.out.forward(x).squeeze(1)
    }

    /// Forward pass plus mean-squared-error against the targets.
    /// Returns (scalar loss tensor, predictions).
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        targets:  Tensor<B, 1>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let predictions = self.forward(features);
        let diff = predictions.clone() - targets;
        let loss = (diff.clone() * diff).mean();
        (loss, predictions)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_forward_output_shape() {
        let device = Default::default();
        let model: ScoreNet<NdArray> = ScoreNetConfig::new(5).init(&device);

        let input = Tensor::<NdArray, 2>::zeros([3, 5], &device);
        let output = model.forward(input);
        assert_eq!(output.dims(), [3]);
    }

    #[test]
    fn test_loss_is_zero_for_perfect_prediction() {
        // Not a training check — just that the MSE wiring gives
        // exactly zero when predictions equal targets.
        let device = Default::default();
        let model: ScoreNet<NdArray> = ScoreNetConfig::new(2).init(&device);

        let features = Tensor::<NdArray, 2>::zeros([4, 2], &device);
        let predictions = model.forward(features.clone());
        let (loss, _) = model.forward_loss(features, predictions);
        let loss: f32 = loss.into_scalar().elem();
        assert_eq!(loss, 0.0);
    }
}
