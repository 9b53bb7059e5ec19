// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   artifact_store.rs — Persists everything a run produces
//                       (model weights, preprocessing state,
//                       metrics, loss curve) under predictable,
//                       overwritable paths.
//
//   metrics.rs        — The per-epoch loss record and the final
//                       TrainingMetrics value object.
//
//   plot.rs           — Renders the loss-curve SVG artifact.
//
// Reference: Rust Book §7 (Modules), §9 (Error Handling)
//            Burn Book §5 (Records and Checkpointing)

/// Model, preprocessing, metrics, and plot persistence
pub mod artifact_store;

/// Metric value objects
pub mod metrics;

/// Loss-curve rendering
pub mod plot;
