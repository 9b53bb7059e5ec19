// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Fetch raw records          (Layer 4 - data)
//   Step 2: Sanitize fields            (Layer 4 - data)
//   Step 3: Fit + transform features   (Layer 4 - data)
//   Step 4: Check data sufficiency     (here)
//   Step 5: Split train/validation     (Layer 4 - data)
//   Step 6: Run training loop          (Layer 5 - ml)
//   Step 7: Evaluate held-out metrics  (Layer 5 - ml)
//   Step 8: Persist the four artifacts (Layer 6 - infra)
//
// One synchronous job per call, no state kept across calls.
// Concurrent invocations are not guarded — callers that reuse
// the pipeline must serialize their runs.
//
// Error policy (two kinds of failure, handled differently):
//   - Data sufficiency problems (empty store, too few rows with
//     a target) are business outcomes: the call SUCCEEDS and
//     returns a TrainResult with status "error".
//   - I/O and serialization failures are environment errors and
//     propagate as Err.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::{
    dataset::{build_samples, RegressionDataset},
    encoder::fit_transform,
    sanitizer::sanitize,
    splitter::split_train_val,
    store::JsonRecordStore,
};
use crate::domain::record::TARGET_FIELD;
use crate::domain::traits::RecordStore;
use crate::infra::{artifact_store::ArtifactStore, metrics::TrainingMetrics, plot::render_loss_curve};
use crate::ml::evaluator::evaluate;
use crate::ml::trainer::{run_training, MIN_TRAIN_ROWS};
use crate::ml::{default_device, DEVICE_NAME};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. Serialisable so a run's exact
// configuration can be logged or reloaded later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:      String,
    pub artifacts_dir:  String,
    pub epochs:         usize,
    pub lr:             f64,
    pub batch_size:     usize,
    pub train_fraction: f64,
    pub split_seed:     u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/clients.json".to_string(),
            artifacts_dir:  "artifacts".to_string(),
            epochs:         25,
            lr:             1e-3,
            batch_size:     256,
            train_fraction: 0.8,
            split_seed:     42,
        }
    }
}

// ─── TrainResult ──────────────────────────────────────────────────────────────
/// Structured outcome of a training call, serialized as-is for
/// the caller. `metrics` is either the final metrics record or
/// an `{ "error": ... }` object, matching `status`.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    pub status:      String,
    pub n_rows_used: usize,
    pub metrics:     MetricsReport,
    pub artifacts:   BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MetricsReport {
    Metrics(TrainingMetrics),
    Error { error: String },
}

impl TrainResult {
    fn ok(n_rows_used: usize, metrics: TrainingMetrics, artifacts: BTreeMap<String, String>) -> Self {
        Self {
            status: "ok".to_string(),
            n_rows_used,
            metrics: MetricsReport::Metrics(metrics),
            artifacts,
        }
    }

    fn error(n_rows_used: usize, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            n_rows_used,
            metrics: MetricsReport::Error { error: message.into() },
            artifacts: BTreeMap::new(),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute a training run against the configured JSON store.
    pub fn execute(&self) -> Result<TrainResult> {
        let store = JsonRecordStore::new(&self.config.data_path);
        self.run(&store)
    }

    /// Execute a training run against any record store.
    pub fn run(&self, store: &dyn RecordStore) -> Result<TrainResult> {
        let cfg = &self.config;

        // ── Step 1: Fetch raw records ─────────────────────────────────────────
        let records = store.fetch_all()?;
        if records.is_empty() {
            // No data at all: report a structured outcome before
            // any model or device is touched.
            tracing::warn!("Record store is empty — nothing to train on");
            return Ok(TrainResult::error(0, "no records available in the store"));
        }

        // ── Step 2: Sanitize fields ───────────────────────────────────────────
        // Trim text, coerce count-like fields, null out anomalies.
        let clean = sanitize(&records);

        // ── Step 3: Fit and transform features ────────────────────────────────
        // Rows without a usable target are discarded here; the
        // fitted artifacts freeze the feature layout for this run.
        let fit = fit_transform(&clean, TARGET_FIELD);
        let n_rows = fit.targets.len();
        let feature_count = fit.artifacts.feature_names.len();
        tracing::info!(
            "Encoded {} of {} rows into {} features",
            n_rows,
            records.len(),
            feature_count,
        );

        // ── Step 4: Data sufficiency check ────────────────────────────────────
        // A validation split carved from fewer rows than this
        // gives statistically meaningless metrics.
        if n_rows < MIN_TRAIN_ROWS {
            tracing::warn!("Only {} usable rows (minimum {})", n_rows, MIN_TRAIN_ROWS);
            return Ok(TrainResult::error(
                n_rows,
                format!("not enough rows with {TARGET_FIELD}: {n_rows} < {MIN_TRAIN_ROWS}"),
            ));
        }

        // ── Step 5: Deterministic train/validation split ──────────────────────
        let samples = build_samples(fit.features, fit.targets);
        let (train_samples, val_samples) =
            split_train_val(samples, cfg.train_fraction, cfg.split_seed);
        tracing::info!(
            "Split: {} train, {} validation (seed {})",
            train_samples.len(),
            val_samples.len(),
            cfg.split_seed,
        );

        let train_dataset = RegressionDataset::new(train_samples);
        let val_dataset   = RegressionDataset::new(val_samples.clone());

        // ── Step 6: Run training loop (Layer 5) ───────────────────────────────
        let (model, history) = run_training(cfg, train_dataset, val_dataset, feature_count)?;

        // ── Step 7: Held-out evaluation ───────────────────────────────────────
        // One forward pass on the validated (non-autodiff) model.
        use burn::module::AutodiffModule;
        let device = default_device();
        let eval = evaluate(&model.valid(), &val_samples, &device);
        tracing::info!("Validation: MAE={:.4}, RMSE={:.4}", eval.mae, eval.rmse);

        let metrics = TrainingMetrics {
            mae:        eval.mae,
            rmse:       eval.rmse,
            epochs:     cfg.epochs,
            device:     DEVICE_NAME.to_string(),
            n_features: feature_count,
        };

        // ── Step 8: Persist the four run artifacts ────────────────────────────
        let artifact_store = ArtifactStore::new(&cfg.artifacts_dir)?;
        render_loss_curve(&artifact_store.loss_curve_path(), &history)?;
        artifact_store.save_model(&model)?;
        artifact_store.save_preprocessing(&fit.artifacts)?;
        artifact_store.save_metrics(&metrics)?;

        Ok(TrainResult::ok(n_rows, metrics, artifact_store.artifact_paths()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RawRecord;
    use serde_json::{json, Value};

    /// In-memory store so the pipeline can be exercised without
    /// touching a JSON file.
    struct VecStore(Vec<RawRecord>);

    impl RecordStore for VecStore {
        fn fetch_all(&self) -> Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }
    }

    fn client(i: usize, with_target: bool) -> RawRecord {
        let target = if with_target {
            json!(400.0 + (i % 300) as f64)
        } else {
            Value::Null
        };
        [
            ("id".to_string(), json!(i)),
            ("last_name".to_string(), json!("Doe")),
            ("age".to_string(), json!(20 + (i % 40))),
            ("monthly_rent".to_string(), if i % 7 == 0 { json!(-10) } else { json!(600 + i) }),
            ("region".to_string(), json!(if i % 2 == 0 { "north" } else { "south" })),
            ("credit_score".to_string(), target),
        ]
        .into_iter()
        .collect()
    }

    fn clients(n: usize) -> Vec<RawRecord> {
        (0..n).map(|i| client(i, true)).collect()
    }

    fn test_config(artifacts_dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            artifacts_dir: artifacts_dir.display().to_string(),
            epochs: 2,
            batch_size: 16,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_empty_store_is_a_structured_error() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(test_config(dir.path()));

        let result = use_case.run(&VecStore(Vec::new())).unwrap();
        assert_eq!(result.status, "error");
        assert_eq!(result.n_rows_used, 0);
        assert!(result.artifacts.is_empty());
    }

    #[test]
    fn test_forty_nine_rows_is_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(test_config(dir.path()));

        let result = use_case.run(&VecStore(clients(49))).unwrap();
        assert_eq!(result.status, "error");
        assert_eq!(result.n_rows_used, 49);
        match result.metrics {
            MetricsReport::Error { error } => assert!(error.contains("not enough rows")),
            MetricsReport::Metrics(_) => panic!("expected an error report"),
        }
    }

    #[test]
    fn test_rows_without_target_do_not_count() {
        // 60 records, only 49 with a target → still insufficient.
        let dir = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(test_config(dir.path()));

        let mut records = clients(49);
        records.extend((49..60).map(|i| client(i, false)));

        let result = use_case.run(&VecStore(records)).unwrap();
        assert_eq!(result.status, "error");
        assert_eq!(result.n_rows_used, 49);
    }

    #[test]
    fn test_fifty_rows_trains_successfully() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(test_config(dir.path()));

        let result = use_case.run(&VecStore(clients(50))).unwrap();
        assert_eq!(result.status, "ok");
        assert_eq!(result.n_rows_used, 50);

        let metrics = match result.metrics {
            MetricsReport::Metrics(m) => m,
            MetricsReport::Error { error } => panic!("unexpected error: {error}"),
        };
        assert!(metrics.mae.is_finite());
        assert!(metrics.rmse >= metrics.mae);
        assert_eq!(metrics.epochs, 2);

        // All four artifacts exist under the configured directory.
        assert_eq!(result.artifacts.len(), 4);
        for path in result.artifacts.values() {
            assert!(std::path::Path::new(path).exists(), "missing artifact: {path}");
        }
    }

    #[test]
    fn test_execute_reads_the_json_store() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("clients.json");
        std::fs::write(&data_path, serde_json::to_string(&clients(60)).unwrap()).unwrap();

        let config = TrainConfig {
            data_path: data_path.display().to_string(),
            ..test_config(&dir.path().join("artifacts"))
        };
        let result = TrainUseCase::new(config).execute().unwrap();
        assert_eq!(result.status, "ok");
        assert_eq!(result.n_rows_used, 60);
    }
}
