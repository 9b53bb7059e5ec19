// ============================================================
// Layer 3 — Client Record Domain Type
// ============================================================
// A client record is an ordered mapping of field name → scalar
// value (number, text, or missing). We keep it as a JSON map
// rather than a fixed struct because the pipeline works
// column-wise over whatever fields the store returns, and
// the feature layout must follow the order fields appear in.
//
// serde_json is built with the `preserve_order` feature, so
// iteration order over a RawRecord is the field order of the
// source file. That order fixes the relative column order of
// the feature matrix.

use serde_json::Value;

/// One raw client record as fetched from the record store.
/// Values are JSON scalars: Number, String, or Null (missing).
pub type RawRecord = serde_json::Map<String, Value>;

/// The field the model is trained to predict.
pub const TARGET_FIELD: &str = "credit_score";

/// Count-like fields that are physically non-negative.
/// A strictly negative value in one of these is a data-entry
/// anomaly, never a real observation, so sanitation turns it
/// into missing instead of letting it skew the statistics.
pub const COUNT_LIKE_FIELDS: &[&str] = &[
    "children_count",
    "benefits_coefficient",
    "monthly_rent",
];

/// Fields that must never leak into the feature matrix:
/// identifiers carry no signal, and `sexual_orientation` is
/// sensitive data kept in a separate store upstream — it is on
/// this list as a guard in case a store implementation joins
/// it in anyway.
pub const EXCLUDED_FIELDS: &[&str] = &[
    "id",
    "last_name",
    "first_name",
    "sexual_orientation",
];

/// Extract a finite float from a value, if it holds one.
/// Non-numeric values and NaN/infinity both yield None.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
