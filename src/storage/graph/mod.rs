use tracing::debug;

use crate::types::{GraphError, NodeId, Result, Version};

use super::mvcc::{VersionClock, VersionEntry, VersionLog};
use super::node::{NodeRecord, NodeState};
use super::options::GraphOptions;
use super::plain::{DirectedGraph, PlainNode};

mod edge_ops;
mod graph_types;
mod node_ops;
mod view;

pub use graph_types::{GraphStats, HistoryEntry};
pub use view::NodeView;

/// Directed graph with bounded fan-out whose every past version stays
/// readable.
///
/// Nodes live in an arena indexed by [`NodeId`]. Each mutation copies the
/// touched nodes' current state into an append-only version log before
/// changing them, and advances the graph-wide version clock by one. Only the
/// newest version can be mutated; any version up to
/// [`PersistentGraph::current_version`] can be read.
#[derive(Debug)]
pub struct PersistentGraph<T> {
    options: GraphOptions,
    nodes: Vec<NodeRecord<T>>,
    log: VersionLog<T>,
    clock: VersionClock,
    root: NodeId,
}

impl<T> PersistentGraph<T> {
    /// Creates a graph holding a single root node at version 0.
    pub fn new(root_value: T, out_capacity: usize, in_capacity: usize) -> Self {
        Self::with_options(root_value, GraphOptions::new(out_capacity, in_capacity))
    }

    /// Creates a graph from explicit [`GraphOptions`].
    pub fn with_options(root_value: T, options: GraphOptions) -> Self {
        let clock = VersionClock::default();
        let head = NodeState::new(root_value, options.out_capacity);
        let root = NodeRecord::new(head, options.in_capacity, clock.current());
        debug!(
            out_capacity = options.out_capacity,
            in_capacity = options.in_capacity,
            "created persistent graph"
        );
        Self {
            log: VersionLog::with_capacity(options.log_capacity_hint),
            nodes: vec![root],
            clock,
            root: NodeId(0),
            options,
        }
    }

    /// Identifier of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The newest version; the only one that mutations apply to.
    pub fn current_version(&self) -> Version {
        self.clock.current()
    }

    /// Options the graph was created with.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Number of logical nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if `node` belongs to this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Version at which `node` first appeared.
    pub fn born_at(&self, node: NodeId) -> Result<Version> {
        Ok(self.record(node)?.born)
    }

    /// View of the root as of `version`.
    pub fn root_at(&self, version: Version) -> Result<NodeView<'_, T>> {
        self.node_at(self.root, version)
    }

    /// View of `node` at the current version.
    pub fn node(&self, node: NodeId) -> Result<NodeView<'_, T>> {
        self.node_at(node, self.current_version())
    }

    /// View of `node` as of `version`.
    pub fn node_at(&self, node: NodeId, version: Version) -> Result<NodeView<'_, T>> {
        self.check_version(version)?;
        self.record(node)?;
        Ok(self.view(node, version))
    }

    /// Payload of `node` as of `version`.
    pub fn read(&self, node: NodeId, version: Version) -> Result<&T> {
        Ok(self.node_at(node, version)?.value())
    }

    /// Current payload of `node`.
    pub fn value(&self, node: NodeId) -> Result<&T> {
        Ok(&self.record(node)?.head.value)
    }

    /// Back-references recorded on `node` as of `version`, in attach order.
    pub fn back_references(&self, node: NodeId, version: Version) -> Result<&[NodeId]> {
        Ok(self.node_at(node, version)?.back_references())
    }

    /// Superseded states of `node`, newest first.
    pub fn history(&self, node: NodeId) -> Result<impl Iterator<Item = HistoryEntry<'_, T>>> {
        let record = self.record(node)?;
        Ok(self.log.chain(record.history).map(|entry| HistoryEntry {
            superseded_at: entry.superseded_at,
            value: &entry.state.value,
        }))
    }

    /// Counters describing the graph's current footprint.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            snapshots: self.log.len(),
            current_version: self.current_version(),
        }
    }

    pub(crate) fn record(&self, node: NodeId) -> Result<&NodeRecord<T>> {
        self.nodes
            .get(node.index())
            .ok_or(GraphError::UnknownNode(node))
    }

    pub(crate) fn check_version(&self, version: Version) -> Result<()> {
        let current = self.current_version();
        if version > current {
            return Err(GraphError::VersionOutOfRange {
                requested: version,
                current,
            });
        }
        Ok(())
    }

    /// Builds a view without validation. `node` must be part of the graph.
    fn view(&self, node: NodeId, version: Version) -> NodeView<'_, T> {
        let record = &self.nodes[node.index()];
        let state = self.log.resolve(&record.head, record.history, version);
        NodeView::new(self, node, version, state, record.in_capacity)
    }
}

impl<T: Clone> PersistentGraph<T> {
    /// Copies the graph as it was at `version` into a plain [`DirectedGraph`].
    ///
    /// Nodes born after `version` are left out. Identifiers are assigned in
    /// creation order, so the remaining nodes keep their ids.
    pub fn materialize(&self, version: Version) -> Result<DirectedGraph<T>> {
        self.check_version(version)?;
        let nodes = self
            .nodes
            .iter()
            .take_while(|record| record.born <= version)
            .map(|record| {
                let state = self.log.resolve(&record.head, record.history, version);
                PlainNode::from_parts(state.value.clone(), state.forward.clone())
            })
            .collect();
        Ok(DirectedGraph::from_nodes(
            nodes,
            self.root,
            self.options.out_capacity,
        ))
    }

    /// Pushes the current state of `node` onto its chain, tagged `superseded_at`.
    fn snapshot(&mut self, node: NodeId, superseded_at: Version) {
        let record = &mut self.nodes[node.index()];
        record.history = self.log.push(VersionEntry {
            superseded_at,
            state: record.head.clone(),
            prev: record.history,
        });
    }
}
