//! Purpose: Shared core library crate used by the `tradelens` CLI and tests.
//! Exports: `core` (wire codec, export document access, errors).
//! Role: Internal library backing the binary; not a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
