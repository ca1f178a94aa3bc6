//! Low-level building blocks shared by the graph types.

/// Concurrency wrappers.
///
/// Single-writer, multiple-reader access to a persistent graph from several
/// threads.
pub mod concurrency;
