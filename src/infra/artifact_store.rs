// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Persists everything a successful training run produces, under
// predictable paths inside one configured directory:
//
//   artifacts/
//     model.mpk           ← trained network parameters
//     preprocessing.json  ← serialized PreprocessArtifacts
//     metrics.json        ← serialized TrainingMetrics
//     loss_curve.svg      ← the loss plot
//
// Every run overwrites the previous run's files — there is no
// versioning or history. The directory is explicit construction
// state, never ambient global configuration.
//
// Failure semantics: any write or read failure here is an
// environment problem and propagates as an error; the store
// never attempts partial recovery.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to named MessagePack format
//     (half-precision settings, `.mpk` on disk)
//   - Type-safe: loading fails if the architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::data::encoder::PreprocessArtifacts;
use crate::infra::metrics::TrainingMetrics;
use crate::ml::model::ScoreNet;

pub struct ArtifactStore {
    /// Directory all artifacts are written into
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create artifact directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Save the trained model parameters.
    /// The recorder adds the `.mpk` extension itself; the
    /// returned path is the full on-disk name.
    pub fn save_model<B: AutodiffBackend>(&self, model: &ScoreNet<B>) -> Result<PathBuf> {
        let stem = self.dir.join("model");

        CompactRecorder::new()
            .record(model.clone().into_record(), stem.clone())
            .with_context(|| format!("Cannot save model to '{}'", stem.display()))?;

        tracing::debug!("Saved model parameters: '{}'", self.model_path().display());
        Ok(self.model_path())
    }

    /// Load model parameters back into a freshly built model.
    /// The model must have the same architecture (input width)
    /// as the one that was saved, or loading fails. This is the
    /// entry point for any later inference pass.
    pub fn load_model<B: Backend>(
        &self,
        model:  ScoreNet<B>,
        device: &B::Device,
    ) -> Result<ScoreNet<B>> {
        let stem = self.dir.join("model");

        let record = CompactRecorder::new()
            .load(stem.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model from '{}'. Has a training run completed?",
                    self.model_path().display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the fitted encoder state as human-readable JSON.
    pub fn save_preprocessing(&self, artifacts: &PreprocessArtifacts) -> Result<PathBuf> {
        let path = self.preprocessing_path();
        fs::write(&path, artifacts.to_json()?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved preprocessing artifacts: '{}'", path.display());
        Ok(path)
    }

    /// Reload the fitted encoder state for a later inference pass.
    pub fn load_preprocessing(&self) -> Result<PreprocessArtifacts> {
        let path = self.preprocessing_path();
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        PreprocessArtifacts::from_json(&raw)
    }

    /// Save the final metrics record as JSON.
    pub fn save_metrics(&self, metrics: &TrainingMetrics) -> Result<PathBuf> {
        let path = self.metrics_path();
        let json = serde_json::to_string_pretty(metrics)
            .context("Cannot serialize training metrics")?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved metrics: '{}'", path.display());
        Ok(path)
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join("model.mpk")
    }

    pub fn preprocessing_path(&self) -> PathBuf {
        self.dir.join("preprocessing.json")
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.dir.join("metrics.json")
    }

    pub fn loss_curve_path(&self) -> PathBuf {
        self.dir.join("loss_curve.svg")
    }

    /// Named-path mapping reported back to the caller in the
    /// training result.
    pub fn artifact_paths(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("model".to_string(), self.model_path().display().to_string()),
            ("preprocessing".to_string(), self.preprocessing_path().display().to_string()),
            ("metrics".to_string(), self.metrics_path().display().to_string()),
            ("loss_curve".to_string(), self.loss_curve_path().display().to_string()),
        ])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::ScoreNetConfig;
    use crate::ml::TrainingBackend;
    use std::collections::BTreeMap as Map;

    fn sample_artifacts() -> PreprocessArtifacts {
        PreprocessArtifacts {
            feature_names: vec!["age".into(), "region__a".into(), "region__b".into()],
            num_means:     Map::from([("age".to_string(), 41.25)]),
            num_stds:      Map::from([("age".to_string(), 11.5)]),
            cat_levels:    Map::from([("region".to_string(), vec!["a".into(), "b".into()])]),
        }
    }

    #[test]
    fn test_preprocessing_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        let artifacts = sample_artifacts();
        store.save_preprocessing(&artifacts).unwrap();
        let loaded = store.load_preprocessing().unwrap();

        assert_eq!(loaded, artifacts);
        assert!(loaded.is_consistent());
    }

    #[test]
    fn test_model_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        let device = Default::default();
        let model: ScoreNet<TrainingBackend> = ScoreNetConfig::new(3).init(&device);
        store.save_model(&model).unwrap();
        assert!(store.model_path().exists());

        let fresh: ScoreNet<TrainingBackend> = ScoreNetConfig::new(3).init(&device);
        store.load_model(fresh, &device).unwrap();
    }

    #[test]
    fn test_metrics_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        let metrics = TrainingMetrics {
            mae:        1.0,
            rmse:       2.0,
            epochs:     25,
            device:     "cpu".to_string(),
            n_features: 3,
        };
        store.save_metrics(&metrics).unwrap();

        let raw = fs::read_to_string(store.metrics_path()).unwrap();
        assert!(raw.contains("\"MAE\""));
    }

    #[test]
    fn test_paths_are_predictable() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();
        let paths = store.artifact_paths();
        assert_eq!(paths.len(), 4);
        assert!(paths["model"].ends_with("model.mpk"));
        assert!(paths["loss_curve"].ends_with("loss_curve.svg"));
    }
}
