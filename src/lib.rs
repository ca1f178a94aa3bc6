//! Directed graphs with bounded fan-out and partial persistence.
//!
//! [`PersistentGraph`] records a snapshot of every node it mutates, tagged
//! with a graph-wide version number, so any earlier version of the graph can
//! still be read after later mutations. Only the newest version is mutable.
//!
//! ```
//! use partial_graph::PersistentGraph;
//!
//! let mut graph = PersistentGraph::new(1, 5, 5);
//! let root = graph.root();
//! let two = graph.insert_vertex(root, 0, 2)?;
//! let before = graph.current_version();
//! graph.write(two, 9)?;
//!
//! assert_eq!(graph.root_at(before)?.child(0)?.value(), &2);
//! assert_eq!(graph.node(root)?.child(0)?.value(), &9);
//! # Ok::<(), partial_graph::GraphError>(())
//! ```

pub mod cli;
pub mod primitives;
pub mod storage;
pub mod types;

pub use primitives::concurrency::SharedGraph;
pub use storage::{DirectedGraph, GraphOptions, NodeView, PersistentGraph};
pub use types::{GraphError, NodeId, Result, Version};
