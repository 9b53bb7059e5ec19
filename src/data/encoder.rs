// ============================================================
// Layer 4 — Feature Encoder
// ============================================================
// Fits numeric standardization and categorical vocabularies on
// a sanitized dataset and transforms it into the numeric
// feature matrix the model consumes.
//
// The encoding happens as explicit column-oriented passes, in
// a fixed order, because each pass's statistics depend on the
// previous pass's output:
//
//   1. keep rows with a usable target (order preserved)
//   2. drop identifier/target/sensitive columns
//   3. classify columns: numeric vs categorical
//   4. numeric:     impute median → standardize (mean / std)
//   5. categorical: impute "unknown" → sorted vocabulary → one-hot
//   6. assemble [numerics..., one-hot blocks...] + feature_names
//
// The fitted state is captured in PreprocessArtifacts. Those
// artifacts are the sole source of truth for reproducing this
// exact feature layout in any later inference pass, so they
// round-trip losslessly through JSON.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{as_finite_number, RawRecord, EXCLUDED_FIELDS};

/// Sentinel level substituted for missing categorical values.
/// Imputing before building the vocabulary guarantees every row
/// matches exactly one level of every categorical column.
pub const MISSING_LEVEL: &str = "unknown";

// ─── PreprocessArtifacts ──────────────────────────────────────────────────────
/// The fitted state of the encoder, created once per training
/// run and immutable afterwards.
///
/// `feature_names` fixes the column order of the feature matrix:
/// standardized numeric columns first (original relative order),
/// then one one-hot indicator per categorical level, levels in
/// sorted order within each column (named `"{column}__{level}"`).
///
/// BTreeMaps keep the serialized form deterministic, which is
/// what makes the JSON round trip byte-idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessArtifacts {
    pub feature_names: Vec<String>,
    pub num_means:     BTreeMap<String, f64>,
    pub num_stds:      BTreeMap<String, f64>,
    pub cat_levels:    BTreeMap<String, Vec<String>>,
}

impl PreprocessArtifacts {
    /// Number of feature columns implied by the fitted state:
    /// one per numeric column plus one per categorical level.
    pub fn feature_count(&self) -> usize {
        self.num_means.len()
            + self.cat_levels.values().map(|levels| levels.len()).sum::<usize>()
    }

    /// Invariant: feature_names matches the implied column count.
    pub fn is_consistent(&self) -> bool {
        self.feature_names.len() == self.feature_count()
    }

    /// Lossless human-readable serialization.
    /// serde_json prints floats in shortest-round-trip form, so
    /// serialize → deserialize → serialize is byte-identical.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Cannot serialize preprocessing artifacts")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Cannot deserialize preprocessing artifacts")
    }
}

// ─── FitOutput ────────────────────────────────────────────────────────────────
/// Result of a fit_transform call: row-aligned feature matrix
/// and target vector, plus the fitted artifacts.
pub struct FitOutput {
    /// One FeatureVector per surviving row, each of length
    /// `artifacts.feature_names.len()`
    pub features:  Vec<Vec<f32>>,

    /// Target values, one per surviving row
    pub targets:   Vec<f32>,

    /// The fitted encoder state
    pub artifacts: PreprocessArtifacts,
}

// ─── fit_transform ────────────────────────────────────────────────────────────
/// Fit the encoder on sanitized records and transform them.
///
/// Rows whose target is missing (or not a finite number) are
/// discarded up front; everything else survives, in its input
/// order. Zero surviving rows is legal and yields an empty
/// matrix — rejecting that case is the caller's job.
pub fn fit_transform(records: &[RawRecord], target_field: &str) -> FitOutput {
    // ── Step 1: filter by target, preserve order ──────────────────────────────
    let rows: Vec<&RawRecord> = records
        .iter()
        .filter(|r| r.get(target_field).and_then(as_finite_number).is_some())
        .collect();

    // ── Step 2: targets, one-to-one with surviving rows ───────────────────────
    let targets: Vec<f32> = rows
        .iter()
        .filter_map(|r| r.get(target_field).and_then(as_finite_number))
        .map(|v| v as f32)
        .collect();

    // ── Step 3: working column set, first-seen order ──────────────────────────
    // Identifier-like columns, the target, and the sensitive
    // field never enter the feature set.
    let mut column_order: Vec<String> = Vec::new();
    for row in &rows {
        for field in row.keys() {
            if field == target_field || EXCLUDED_FIELDS.contains(&field.as_str()) {
                continue;
            }
            if !column_order.iter().any(|c| c == field) {
                column_order.push(field.clone());
            }
        }
    }

    // ── Step 4: partition into numeric and categorical ────────────────────────
    // A column is categorical as soon as any observed value is
    // text; all-number (or all-missing) columns are numeric.
    let mut num_cols: Vec<String> = Vec::new();
    let mut cat_cols: Vec<String> = Vec::new();
    for col in &column_order {
        let is_categorical = rows
            .iter()
            .any(|r| matches!(r.get(col), Some(Value::String(_))));
        if is_categorical {
            cat_cols.push(col.clone());
        } else {
            num_cols.push(col.clone());
        }
    }

    // ── Steps 5 + 8: numeric imputation and standardization ───────────────────
    let mut num_means: BTreeMap<String, f64> = BTreeMap::new();
    let mut num_stds:  BTreeMap<String, f64> = BTreeMap::new();
    let mut num_matrix: Vec<Vec<f32>> = Vec::with_capacity(num_cols.len());

    for col in &num_cols {
        let raw: Vec<Option<f64>> = rows
            .iter()
            .map(|r| r.get(col).and_then(as_finite_number))
            .collect();

        // Median over the observed values of the surviving rows.
        // A column with no observed values at all imputes to 0.0.
        let med = median(raw.iter().filter_map(|v| *v)).unwrap_or(0.0);
        let filled: Vec<f64> = raw.iter().map(|v| v.unwrap_or(med)).collect();

        let (mean, std) = mean_and_std(&filled);
        // A constant column must become all-zero after centering,
        // never NaN, so an exactly-zero std is stored as 1.0.
        let std = if std == 0.0 { 1.0 } else { std };

        num_means.insert(col.clone(), mean);
        num_stds.insert(col.clone(), std);
        num_matrix.push(filled.iter().map(|v| ((v - mean) / std) as f32).collect());
    }

    // ── Steps 6 + 7: categorical imputation and vocabulary ────────────────────
    let mut cat_levels: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut cat_values: Vec<Vec<String>> = Vec::with_capacity(cat_cols.len());

    for col in &cat_cols {
        let values: Vec<String> = rows
            .iter()
            .map(|r| categorical_value(r.get(col)))
            .collect();

        // Sorted distinct levels — lexicographic sort keeps the
        // vocabulary (and thus the feature order) reproducible
        // across runs for identical input.
        let levels: Vec<String> = values.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        cat_levels.insert(col.clone(), levels);
        cat_values.push(values);
    }

    // ── Steps 9 + 10: one-hot expansion and final assembly ────────────────────
    let mut feature_names: Vec<String> = num_cols.clone();
    for col in &cat_cols {
        for level in &cat_levels[col] {
            feature_names.push(format!("{col}__{level}"));
        }
    }

    let n_rows = rows.len();
    let mut features: Vec<Vec<f32>> = Vec::with_capacity(n_rows);
    for row_idx in 0..n_rows {
        let mut feature_row: Vec<f32> = Vec::with_capacity(feature_names.len());
        for column in &num_matrix {
            feature_row.push(column[row_idx]);
        }
        for (col_idx, col) in cat_cols.iter().enumerate() {
            let value = &cat_values[col_idx][row_idx];
            for level in &cat_levels[col] {
                feature_row.push(if value == level { 1.0 } else { 0.0 });
            }
        }
        features.push(feature_row);
    }

    let artifacts = PreprocessArtifacts { feature_names, num_means, num_stds, cat_levels };
    debug_assert!(artifacts.is_consistent());

    FitOutput { features, targets, artifacts }
}

/// Normalise one categorical cell to its imputed string form.
/// Missing and nan-like strings collapse to the sentinel level;
/// stray numbers in a text column are stringified.
fn categorical_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || s == "nan" || s == "None" || s == "null" {
                MISSING_LEVEL.to_string()
            } else {
                s.to_string()
            }
        }
        Some(Value::Number(n)) => n.to_string(),
        _ => MISSING_LEVEL.to_string(),
    }
}

/// Median of the observed values. Even count → mean of the two
/// middle values. None when nothing was observed.
fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Mean and population standard deviation of a filled column.
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
