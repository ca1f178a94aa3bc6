use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::storage::{GraphStats, NodeView, PersistentGraph};
use crate::types::{NodeId, Result, Version};

/// Single-writer, multiple-reader handle on a [`PersistentGraph`].
///
/// Clones share the same graph. Readers hold the shared lock only for the
/// duration of one query; every mutation holds the exclusive lock across its
/// snapshot, clock advance and in-place update, so readers never observe a
/// half-applied version.
pub struct SharedGraph<T> {
    inner: Arc<RwLock<PersistentGraph<T>>>,
}

impl<T> Clone for SharedGraph<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedGraph<T> {
    /// Wraps an existing graph.
    pub fn new(graph: PersistentGraph<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Identifier of the root node.
    pub fn root(&self) -> NodeId {
        self.inner.read().root()
    }

    /// Newest version at the time of the call.
    pub fn current_version(&self) -> Version {
        self.inner.read().current_version()
    }

    /// Counters describing the graph's footprint.
    pub fn stats(&self) -> GraphStats {
        self.inner.read().stats()
    }

    /// Runs `f` against a view of `node` pinned to `version`.
    ///
    /// The shared lock is held while `f` runs; keep it short.
    pub fn with_view<R>(
        &self,
        node: NodeId,
        version: Version,
        f: impl FnOnce(NodeView<'_, T>) -> R,
    ) -> Result<R> {
        let graph = self.inner.read();
        let view = graph.node_at(node, version)?;
        Ok(f(view))
    }

    /// Returns the graph when this is the last handle, or the handle back.
    pub fn into_inner(self) -> std::result::Result<PersistentGraph<T>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T: Clone> SharedGraph<T> {
    /// Payload of `node` as of `version`, cloned out of the lock.
    pub fn read(&self, node: NodeId, version: Version) -> Result<T> {
        let graph = self.inner.read();
        graph.read(node, version).cloned()
    }

    /// See [`PersistentGraph::write`].
    pub fn write(&self, node: NodeId, value: T) -> Result<Version> {
        let mut graph = self.inner.write();
        trace!(node = %node, "acquired writer lock");
        graph.write(node, value)
    }

    /// See [`PersistentGraph::update_edge`].
    pub fn update_edge(&self, node: NodeId, slot: usize, target: NodeId) -> Result<Version> {
        self.inner.write().update_edge(node, slot, target)
    }

    /// See [`PersistentGraph::add_edge`].
    pub fn add_edge(&self, u: NodeId, v: NodeId, slot: usize) -> Result<Version> {
        self.inner.write().add_edge(u, v, slot)
    }

    /// See [`PersistentGraph::insert_vertex`].
    pub fn insert_vertex(&self, node: NodeId, slot: usize, value: T) -> Result<NodeId> {
        self.inner.write().insert_vertex(node, slot, value)
    }
}

impl<T> From<PersistentGraph<T>> for SharedGraph<T> {
    fn from(graph: PersistentGraph<T>) -> Self {
        Self::new(graph)
    }
}
