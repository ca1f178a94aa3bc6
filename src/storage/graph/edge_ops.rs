use tracing::{debug, warn};

use crate::storage::node::{NodeRecord, NodeState};
use crate::types::{check_slot, GraphError, NodeId, Result, Version};

use super::PersistentGraph;

impl<T> PersistentGraph<T> {
    /// Target of outgoing `slot` of `node` at the current version.
    pub fn edge(&self, node: NodeId, slot: usize) -> Result<NodeId> {
        self.record(node)?.head.edge(node, slot)
    }

    /// Target of outgoing `slot` of `node` as of `version`.
    pub fn edge_at(&self, node: NodeId, slot: usize, version: Version) -> Result<NodeId> {
        self.node_at(node, version)?.edge(slot)
    }
}

impl<T: Clone> PersistentGraph<T> {
    /// Points outgoing `slot` of `node` at `target` and records `node` as a
    /// back-reference on `target`.
    ///
    /// Every call is a new version, even when the slot already pointed at
    /// `target`. Nothing is mutated when the call fails.
    pub fn update_edge(&mut self, node: NodeId, slot: usize, target: NodeId) -> Result<Version> {
        check_slot(slot, self.record(node)?.out_capacity())?;
        if let Err(err) = self.record(target)?.ensure_back_slot(target) {
            warn!(node = %node, target = %target, slot, "edge rejected: {err}");
            return Err(err);
        }

        let superseded_at = self.current_version();
        self.snapshot(node, superseded_at);
        if target != node {
            self.snapshot(target, superseded_at);
        }
        let version = self.clock.advance();
        self.nodes[node.index()].head.forward[slot] = Some(target);
        self.nodes[target.index()].head.backward.push(node);
        debug!(node = %node, target = %target, slot, version, "updated edge");
        Ok(version)
    }

    /// Adds the edge `u -> v` through slot `slot` of `u`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, slot: usize) -> Result<Version> {
        self.update_edge(u, slot, v)
    }

    /// Splices a new node holding `value` into outgoing `slot` of `node`.
    ///
    /// The new node takes over whatever `slot` pointed to, through its own
    /// `slot`, and `node` then points at the new node. The new node records
    /// `node` as its first back-reference and the displaced successor, if
    /// any, records the new node. Returns the new node's id.
    pub fn insert_vertex(&mut self, node: NodeId, slot: usize, value: T) -> Result<NodeId> {
        let record = self.record(node)?;
        check_slot(slot, record.out_capacity())?;
        let successor = record.head.forward[slot];
        let inserted = NodeId::from_index(self.nodes.len());
        if self.options.in_capacity == 0 {
            let err = GraphError::CapacityExceeded {
                node: inserted,
                capacity: 0,
            };
            warn!(node = %node, slot, "vertex rejected: {err}");
            return Err(err);
        }
        if let Some(next) = successor {
            if let Err(err) = self.record(next)?.ensure_back_slot(next) {
                warn!(node = %node, successor = %next, slot, "vertex rejected: {err}");
                return Err(err);
            }
        }

        let superseded_at = self.current_version();
        self.snapshot(node, superseded_at);
        if let Some(next) = successor.filter(|next| *next != node) {
            self.snapshot(next, superseded_at);
        }
        let born = self.clock.advance();

        let mut head = NodeState::new(value, self.options.out_capacity);
        head.forward[slot] = successor;
        head.backward.push(node);
        self.nodes
            .push(NodeRecord::new(head, self.options.in_capacity, born));
        self.nodes[node.index()].head.forward[slot] = Some(inserted);
        if let Some(next) = successor {
            self.nodes[next.index()].head.backward.push(inserted);
        }
        debug!(node = %node, inserted = %inserted, slot, version = born, "inserted vertex");
        Ok(inserted)
    }
}
