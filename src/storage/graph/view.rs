use std::fmt;
use std::iter::Copied;
use std::slice;

use crate::storage::node::NodeState;
use crate::types::{NodeId, Result, Version};

use super::PersistentGraph;

/// Read-only handle on one node as it was at a fixed version.
///
/// Following an edge from a view yields a view at the same version, so a
/// whole path can be walked through one point in time.
pub struct NodeView<'g, T> {
    graph: &'g PersistentGraph<T>,
    id: NodeId,
    version: Version,
    state: &'g NodeState<T>,
    in_capacity: usize,
}

impl<'g, T> NodeView<'g, T> {
    pub(super) fn new(
        graph: &'g PersistentGraph<T>,
        id: NodeId,
        version: Version,
        state: &'g NodeState<T>,
        in_capacity: usize,
    ) -> Self {
        Self {
            graph,
            id,
            version,
            state,
            in_capacity,
        }
    }

    /// Identifier of the viewed node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Version the view is pinned to.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Payload at the pinned version.
    pub fn value(&self) -> &'g T {
        &self.state.value
    }

    /// Target of outgoing `slot` at the pinned version.
    pub fn edge(&self, slot: usize) -> Result<NodeId> {
        self.state.edge(self.id, slot)
    }

    /// Follows outgoing `slot`, staying at the pinned version.
    pub fn child(&self, slot: usize) -> Result<NodeView<'g, T>> {
        let target = self.edge(slot)?;
        Ok(self.graph.view(target, self.version))
    }

    /// All outgoing slots in order; empty slots yield `None`.
    pub fn edges(&self) -> Copied<slice::Iter<'g, Option<NodeId>>> {
        let state: &'g NodeState<T> = self.state;
        state.forward.iter().copied()
    }

    /// Back-references in attach order.
    pub fn back_references(&self) -> &'g [NodeId] {
        &self.state.backward
    }

    /// Number of outgoing slots.
    pub fn out_capacity(&self) -> usize {
        self.state.out_capacity()
    }

    /// Maximum number of back-references.
    pub fn in_capacity(&self) -> usize {
        self.in_capacity
    }
}

impl<T> Clone for NodeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("value", &self.state.value)
            .field("forward", &self.state.forward)
            .field("backward", &self.state.backward)
            .finish()
    }
}
