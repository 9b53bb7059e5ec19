// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and its configurable knobs.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the credit-score model on stored client records
    Train(TrainArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON file holding the array of client records
    #[arg(long, default_value = "data/clients.json")]
    pub data: String,

    /// Directory the four run artifacts are written into
    /// (overwritten on every run)
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 25)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Number of rows per gradient step (last batch may be shorter)
    #[arg(long, default_value_t = 256)]
    pub batch_size: usize,

    /// Seed for the train/validation split.
    /// Same seed + same data ⇒ same partition, so metrics from
    /// repeated runs stay comparable.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:      a.data,
            artifacts_dir:  a.artifacts_dir,
            epochs:         a.epochs,
            lr:             a.lr,
            batch_size:     a.batch_size,
            train_fraction: 0.8,
            split_seed:     a.seed,
        }
    }
}
