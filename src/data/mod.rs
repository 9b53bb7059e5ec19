// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw client records
// all the way to tensor batches ready for the model.
//
// The pipeline flows in this order:
//
//   record store (JSON)
//       │
//       ▼
//   JsonRecordStore   → fetches raw records
//       │
//       ▼
//   Sanitizer         → trims text, coerces types, nulls anomalies
//       │
//       ▼
//   FeatureEncoder    → filter by target, impute, standardize, one-hot
//       │
//       ▼
//   Splitter          → deterministic 80/20 train/validation split
//       │
//       ▼
//   RegressionDataset → implements Burn's Dataset trait
//       │
//       ▼
//   RegressionBatcher → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step, and every
// statistic a step computes depends only on the output of the
// previous step. The order is fixed: sanitize → filter-by-target
// → impute → standardize → encode.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads raw records from a JSON array file
pub mod store;

/// Normalises raw field values before any statistics
pub mod sanitizer;

/// Fits and applies the numeric/categorical feature encoding
pub mod encoder;

/// Deterministically splits data into train/validation sets
pub mod splitter;

/// Implements Burn's Dataset trait for regression samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
