// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - JsonRecordStore implements RecordStore
//   - A future SqliteStore could also implement RecordStore
//   - The application layer only sees RecordStore
//     and works with both without any changes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::record::RawRecord;

// ─── RecordStore ──────────────────────────────────────────────────────────────
/// Any component that can supply the full set of client records.
///
/// The pipeline treats the store as read-only and makes no
/// assumption about the underlying storage technology.
///
/// Implementations:
///   - JsonRecordStore       → reads a JSON array file
///   - (future) SqliteStore  → reads the relational client table
pub trait RecordStore {
    /// Fetch every available record, in storage order.
    /// An empty Vec means the store holds no data at all —
    /// that is a valid outcome, not an error.
    fn fetch_all(&self) -> Result<Vec<RawRecord>>;
}
