use serde::{Deserialize, Serialize};

use crate::types::{GraphError, Result};

/// Default number of outgoing edge slots per node.
pub const DEFAULT_OUT_CAPACITY: usize = 5;
/// Default number of incoming back-reference slots per node.
pub const DEFAULT_IN_CAPACITY: usize = 5;

/// Configuration options supplied when creating a [`super::PersistentGraph`].
///
/// Capacities apply to every node the graph creates and are fixed for the
/// lifetime of the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphOptions {
    /// Number of outgoing edge slots per node.
    pub out_capacity: usize,
    /// Maximum number of incoming back-references per node.
    pub in_capacity: usize,
    /// Number of historical snapshots to pre-allocate room for.
    pub log_capacity_hint: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            out_capacity: DEFAULT_OUT_CAPACITY,
            in_capacity: DEFAULT_IN_CAPACITY,
            log_capacity_hint: 0,
        }
    }
}

impl GraphOptions {
    /// Creates options with the given slot capacities.
    pub fn new(out_capacity: usize, in_capacity: usize) -> Self {
        Self {
            out_capacity,
            in_capacity,
            ..Self::default()
        }
    }

    /// Sets the number of outgoing edge slots per node.
    pub fn out_capacity(mut self, slots: usize) -> Self {
        self.out_capacity = slots;
        self
    }

    /// Sets the number of incoming back-reference slots per node.
    pub fn in_capacity(mut self, slots: usize) -> Self {
        self.in_capacity = slots;
        self
    }

    /// Reserves room for this many snapshots up front.
    pub fn log_capacity_hint(mut self, entries: usize) -> Self {
        self.log_capacity_hint = entries;
        self
    }

    /// Parses options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|err| GraphError::Config(err.to_string()))
    }
}
