// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// One command is supported:
//   `train` — runs the full preprocessing-and-training pipeline
//             and prints the structured TrainResult as JSON
//             (the same object the original service returned
//             over HTTP; the HTTP layer is out of scope here).

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "credit-scorer",
    version = "0.1.0",
    about = "Train a feed-forward regression model on client records to predict a credit score."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The match consumes self, so the handlers are associated
    /// functions taking only their args.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training run from: {}", args.data);

        let use_case = TrainUseCase::new(args.into());
        let result = use_case.execute()?;

        // The structured result is the contract with the caller:
        // data-sufficiency problems arrive here as status="error",
        // not as a non-zero exit.
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;

    #[test]
    fn test_train_args_parse_into_config() {
        let cli = Cli::try_parse_from([
            "credit-scorer",
            "train",
            "--data", "clients.json",
            "--epochs", "3",
            "--batch-size", "64",
            "--seed", "7",
        ])
        .unwrap();

        // Consume the parsed command the same way run() does.
        let Commands::Train(args) = cli.command;
        let config: TrainConfig = args.into();
        assert_eq!(config.data_path, "clients.json");
        assert_eq!(config.epochs, 3);
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.split_seed, 7);
    }

    #[test]
    fn test_defaults_match_run_defaults() {
        let cli = Cli::try_parse_from(["credit-scorer", "train"]).unwrap();
        let Commands::Train(args) = cli.command;
        let config: TrainConfig = args.into();
        assert_eq!(config.epochs, 25);
        assert_eq!(config.batch_size, 256);
        assert_eq!(config.lr, 1e-3);
    }
}
