#![forbid(unsafe_code)]
//! Identifiers, version numbers and the crate-wide error type.

use std::fmt;

/// Global version number handed out by a graph's clock.
///
/// Versions start at 0 when a graph is created and advance by exactly one per
/// mutating operation.
pub type Version = u64;

/// Stable identifier of a logical node inside one graph.
///
/// Identifiers are assigned in creation order, starting at 0 for the root.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(pub u64);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u64)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for u64 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Errors surfaced by graph operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge slot index is outside `[0, capacity)`.
    #[error("slot {slot} out of range for node with {capacity} outgoing slots")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Outgoing capacity of the node.
        capacity: usize,
    },
    /// The node cannot record another incoming back-reference.
    #[error("node {node} already holds its maximum of {capacity} back-references")]
    CapacityExceeded {
        /// Node whose back-reference array is full.
        node: NodeId,
        /// Incoming capacity of that node.
        capacity: usize,
    },
    /// The edge slot holds no target.
    #[error("slot {slot} of node {node} holds no edge")]
    NullReference {
        /// Node that was dereferenced.
        node: NodeId,
        /// Empty slot.
        slot: usize,
    },
    /// The requested version has not been produced yet.
    #[error("version {requested} is ahead of current version {current}")]
    VersionOutOfRange {
        /// Version asked for.
        requested: Version,
        /// Graph version at the time of the call.
        current: Version,
    },
    /// The identifier does not belong to this graph.
    #[error("node {0} not found")]
    UnknownNode(NodeId),
    /// Options or scripts could not be parsed.
    #[error("config: {0}")]
    Config(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Fails with [`GraphError::SlotOutOfRange`] unless `slot < capacity`.
pub(crate) fn check_slot(slot: usize, capacity: usize) -> Result<()> {
    if slot >= capacity {
        return Err(GraphError::SlotOutOfRange { slot, capacity });
    }
    Ok(())
}
