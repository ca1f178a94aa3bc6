//! Graph types and their versioning machinery.
//!
//! [`PersistentGraph`] keeps every past version readable through per-node
//! snapshot chains; [`DirectedGraph`] is the plain, non-versioned baseline.

mod graph;
mod mvcc;
mod node;
mod options;
mod plain;

/// Partially persistent graph and its read views.
pub use graph::{GraphStats, HistoryEntry, NodeView, PersistentGraph};

/// Graph configuration options.
pub use options::{GraphOptions, DEFAULT_IN_CAPACITY, DEFAULT_OUT_CAPACITY};

/// Non-versioned baseline graph.
pub use plain::{DirectedGraph, PlainNode};
