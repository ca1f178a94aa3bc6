#![forbid(unsafe_code)]

//! Command-line support: script-driven replay of graph operations.
//!
//! The `pgraph` binary is a thin wrapper around this module so the replay
//! logic stays testable from the library.

/// Replay of TOML operation scripts.
///
/// Parses scripts, applies them to a fresh [`crate::storage::PersistentGraph`]
/// and renders the resulting version history as text or JSON.
pub mod replay;
