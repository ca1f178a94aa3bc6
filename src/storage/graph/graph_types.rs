use serde::Serialize;

use crate::types::Version;

/// Footprint counters for a [`super::PersistentGraph`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of logical nodes.
    pub nodes: usize,
    /// Number of historical snapshots retained across all chains.
    pub snapshots: usize,
    /// Newest version of the graph.
    pub current_version: Version,
}

/// One superseded payload of a node.
#[derive(Debug, Eq, PartialEq)]
pub struct HistoryEntry<'a, T> {
    /// Last version at which `value` was current.
    pub superseded_at: Version,
    /// Payload held at that time.
    pub value: &'a T,
}

impl<T> Clone for HistoryEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HistoryEntry<'_, T> {}
