use tracing::debug;

use crate::types::{NodeId, Result, Version};

use super::PersistentGraph;

impl<T: Clone> PersistentGraph<T> {
    /// Replaces the payload of `node`, keeping the old state readable.
    ///
    /// Returns the version at which the new payload becomes visible.
    pub fn write(&mut self, node: NodeId, value: T) -> Result<Version> {
        self.record(node)?;
        let superseded_at = self.current_version();
        self.snapshot(node, superseded_at);
        let version = self.clock.advance();
        self.nodes[node.index()].head.value = value;
        debug!(node = %node, version, "wrote node value");
        Ok(version)
    }
}
