//! Non-versioned directed graph with bounded fan-out.
//!
//! Same slot model as [`super::PersistentGraph`] without history or
//! back-references. Also the target of
//! [`super::PersistentGraph::materialize`].

use smallvec::SmallVec;
use tracing::debug;

use crate::types::{check_slot, GraphError, NodeId, Result};

use super::node::ForwardSlots;

/// Vertex of a [`DirectedGraph`].
#[derive(Clone, Debug)]
pub struct PlainNode<T> {
    value: T,
    forward: ForwardSlots,
}

impl<T> PlainNode<T> {
    fn new(value: T, out_capacity: usize) -> Self {
        Self {
            value,
            forward: SmallVec::from_elem(None, out_capacity),
        }
    }

    pub(crate) fn from_parts(value: T, forward: ForwardSlots) -> Self {
        Self { value, forward }
    }

    /// Payload of the node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Outgoing slots in order; empty slots are `None`.
    pub fn edges(&self) -> &[Option<NodeId>] {
        &self.forward
    }
}

/// Mutable directed graph whose nodes each own `out_capacity` edge slots.
#[derive(Clone, Debug)]
pub struct DirectedGraph<T> {
    nodes: Vec<PlainNode<T>>,
    root: NodeId,
    out_capacity: usize,
}

impl<T> DirectedGraph<T> {
    /// Creates a graph holding only its root.
    pub fn new(root_value: T, out_capacity: usize) -> Self {
        Self {
            nodes: vec![PlainNode::new(root_value, out_capacity)],
            root: NodeId(0),
            out_capacity,
        }
    }

    pub(crate) fn from_nodes(nodes: Vec<PlainNode<T>>, root: NodeId, out_capacity: usize) -> Self {
        Self {
            nodes,
            root,
            out_capacity,
        }
    }

    /// Identifier of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of outgoing slots per node.
    pub fn out_capacity(&self) -> usize {
        self.out_capacity
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node.
    pub fn node(&self, node: NodeId) -> Result<&PlainNode<T>> {
        self.nodes
            .get(node.index())
            .ok_or(GraphError::UnknownNode(node))
    }

    /// Payload of `node`.
    pub fn value(&self, node: NodeId) -> Result<&T> {
        Ok(&self.node(node)?.value)
    }

    /// Replaces the payload of `node`.
    pub fn set_value(&mut self, node: NodeId, value: T) -> Result<()> {
        self.node_mut(node)?.value = value;
        Ok(())
    }

    /// Target of outgoing `slot` of `node`.
    pub fn edge(&self, node: NodeId, slot: usize) -> Result<NodeId> {
        let plain = self.node(node)?;
        check_slot(slot, plain.forward.len())?;
        plain.forward[slot].ok_or(GraphError::NullReference { node, slot })
    }

    /// Splices a new node holding `value` into outgoing `slot` of `node`.
    ///
    /// The new node inherits the old target of `slot` through its own `slot`.
    pub fn insert_vertex(&mut self, node: NodeId, slot: usize, value: T) -> Result<NodeId> {
        let successor = {
            let plain = self.node(node)?;
            check_slot(slot, plain.forward.len())?;
            plain.forward[slot]
        };
        let inserted = NodeId::from_index(self.nodes.len());
        let mut fresh = PlainNode::new(value, self.out_capacity);
        fresh.forward[slot] = successor;
        self.nodes.push(fresh);
        self.nodes[node.index()].forward[slot] = Some(inserted);
        debug!(node = %node, inserted = %inserted, slot, "inserted vertex");
        Ok(inserted)
    }

    /// Points outgoing `slot` of `node` at `target`.
    pub fn update_edge(&mut self, node: NodeId, slot: usize, target: NodeId) -> Result<()> {
        self.node(target)?;
        let plain = self.node_mut(node)?;
        check_slot(slot, plain.forward.len())?;
        plain.forward[slot] = Some(target);
        Ok(())
    }

    /// Adds the edge `u -> v` through slot `slot` of `u`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, slot: usize) -> Result<()> {
        self.update_edge(u, slot, v)
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut PlainNode<T>> {
        self.nodes
            .get_mut(node.index())
            .ok_or(GraphError::UnknownNode(node))
    }
}
