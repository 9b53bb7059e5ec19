// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch gradient descent with Adam over a fixed number of
// epochs. No early stopping, no convergence check: the loop
// runs to its epoch count and stops, full stop.
//
// Two kinds of randomness, deliberately different:
//   - The train/validation SPLIT is seeded (Layer 4) so runs
//     are comparable.
//   - The per-epoch batch order is fresh every run: the loader
//     shuffle seed comes from thread_rng.
//
// Per epoch:
//   1. iterate shuffled mini-batches, one Adam step per batch
//   2. record the mean batch MSE as the epoch's training loss
//   3. evaluate the FULL validation set once on the non-autodiff
//      model (model.valid()) and record its MSE
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{batcher::Batcher, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};
use rand::Rng;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::RegressionBatcher, dataset::RegressionDataset};
use crate::infra::metrics::EpochLoss;
use crate::ml::model::{ScoreNet, ScoreNetConfig};
use crate::ml::{default_device, InferenceBackend, TrainingBackend, DEVICE_NAME};

/// Below this many usable rows the validation split is too
/// small to produce statistically meaningful metrics, so the
/// pipeline refuses to train at all.
pub const MIN_TRAIN_ROWS: usize = 50;

/// Run the full training loop and return the trained model
/// together with the (train_loss, val_loss) series, one entry
/// per epoch, in epoch order.
pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: RegressionDataset,
    val_dataset:   RegressionDataset,
    feature_count: usize,
) -> Result<(ScoreNet<TrainingBackend>, Vec<EpochLoss>)> {
    ensure!(train_dataset.sample_count() > 0, "training set is empty");
    ensure!(val_dataset.sample_count() > 0, "validation set is empty");

    // The device is selected once here and used for the entire
    // run. If the accelerator fails mid-run, the run fails.
    let device = default_device();
    tracing::info!("Using {} device: {:?}", DEVICE_NAME, device);

    let mut model: ScoreNet<TrainingBackend> =
        ScoreNetConfig::new(feature_count).init(&device);
    tracing::info!("Model ready: {} input features", feature_count);

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader ──────────────────────────────────────────────────
    // Fresh shuffle seed per run; the loader reshuffles the row
    // order for every epoch.
    let shuffle_seed: u64 = rand::thread_rng().gen();
    let train_batcher = RegressionBatcher::<TrainingBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(shuffle_seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation batch (inner backend — no autodiff overhead) ───────────────
    // The validation set is evaluated whole, once per epoch.
    let val_batcher = RegressionBatcher::<InferenceBackend>::new(device.clone());
    let val_batch   = val_batcher.batch(val_dataset.samples().to_vec());

    let mut history: Vec<EpochLoss> = Vec::with_capacity(cfg.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.features, batch.targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = loss_sum / batches.max(1) as f64;

        // ── Validation phase (no parameter updates) ───────────────────────────
        let val_model = model.valid();
        let (val_loss, _) = val_model.forward_loss(
            val_batch.features.clone(),
            val_batch.targets.clone(),
        );
        let val_loss = val_loss.into_scalar().elem::<f64>();

        tracing::info!(
            "Epoch {:>3}/{}: train_loss={:.6}, val_loss={:.6}",
            epoch,
            cfg.epochs,
            train_loss,
            val_loss,
        );

        history.push(EpochLoss { epoch, train_loss, val_loss });
    }

    Ok((model, history))
}
