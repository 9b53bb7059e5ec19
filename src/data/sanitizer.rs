// ============================================================
// Layer 4 — Record Sanitizer
// ============================================================
// Normalises raw field values before any statistics are
// computed. Real client data arrives with trailing spaces,
// numbers typed into text fields, and impossible values like
// a rent of -5. None of that may reach the encoder, because
// every later stage (median, mean, vocabulary) would bake the
// garbage into the fitted artifacts.
//
// Rules applied per field, in order:
//   1. Text values are trimmed; booleans become their
//      canonical string form ("true" / "false").
//   2. The count-like fields (children_count,
//      benefits_coefficient, monthly_rent) are coerced to
//      numbers. Unparseable → missing. Strictly negative →
//      missing: a negative count is known to be non-physical,
//      it is an anomaly, not data.
//
// No row is ever dropped here. Output has the same cardinality
// and order as the input; dropping happens downstream based on
// the target field only.

use serde_json::Value;

use crate::domain::record::{RawRecord, COUNT_LIKE_FIELDS};

/// Sanitize a sequence of raw records.
/// Same length and order as the input, every field normalised.
pub fn sanitize(records: &[RawRecord]) -> Vec<RawRecord> {
    records.iter().map(sanitize_record).collect()
}

fn sanitize_record(record: &RawRecord) -> RawRecord {
    let mut clean = RawRecord::new();

    for (field, value) in record {
        let value = if COUNT_LIKE_FIELDS.contains(&field.as_str()) {
            coerce_non_negative(value)
        } else {
            canonicalise(value)
        };
        clean.insert(field.clone(), value);
    }

    clean
}

/// Trim strings and turn booleans into their string form.
/// Numbers and nulls pass through unchanged.
fn canonicalise(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        other => other.clone(),
    }
}

/// Coerce a count-like field to a number, suppressing anomalies.
/// Numeric strings are accepted ("3" → 3.0); anything that does
/// not parse, and any strictly negative value, becomes missing.
fn coerce_non_negative(value: &Value) -> Value {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v >= 0.0 && v.is_finite() => {
            serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> RawRecord {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_trims_text_fields() {
        let recs = vec![record(&[("region", json!("  north  "))])];
        let clean = sanitize(&recs);
        assert_eq!(clean[0]["region"], json!("north"));
    }

    #[test]
    fn test_negative_rent_becomes_missing() {
        let recs = vec![record(&[("monthly_rent", json!(-5))])];
        let clean = sanitize(&recs);
        assert!(clean[0]["monthly_rent"].is_null());
    }

    #[test]
    fn test_negative_count_like_fields_never_survive() {
        for field in ["children_count", "benefits_coefficient", "monthly_rent"] {
            let recs = vec![record(&[(field, json!(-1.5))])];
            let clean = sanitize(&recs);
            assert!(clean[0][field].is_null(), "{field} kept a negative value");
        }
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        let recs = vec![record(&[("children_count", json!(" 3 "))])];
        let clean = sanitize(&recs);
        assert_eq!(clean[0]["children_count"], json!(3.0));
    }

    #[test]
    fn test_unparseable_count_becomes_missing() {
        let recs = vec![record(&[("children_count", json!("two"))])];
        let clean = sanitize(&recs);
        assert!(clean[0]["children_count"].is_null());
    }

    #[test]
    fn test_no_row_is_dropped() {
        let recs = vec![
            record(&[("monthly_rent", json!(-1))]),
            record(&[("monthly_rent", Value::Null)]),
            record(&[("monthly_rent", json!(800.0))]),
        ];
        let clean = sanitize(&recs);
        assert_eq!(clean.len(), 3);
        assert_eq!(clean[2]["monthly_rent"], json!(800.0));
    }

    #[test]
    fn test_booleans_become_strings() {
        let recs = vec![record(&[("smoker", json!(true))])];
        let clean = sanitize(&recs);
        assert_eq!(clean[0]["smoker"], json!("true"));
    }
}
