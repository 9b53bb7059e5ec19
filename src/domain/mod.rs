// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types, constants, and traits describing the core
// concepts of the system: what a client record is, which
// fields the schema knows about, and how records are fetched.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O (only trait signatures)
//   - Only plain structs, enums, constants, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Raw client records and the field schema
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;
