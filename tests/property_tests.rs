#![allow(missing_docs)]

use partial_graph::{GraphError, NodeId, PersistentGraph, Version};
use proptest::prelude::*;

const OUT: usize = 3;
const IN: usize = 2;

#[derive(Debug, Clone)]
enum Operation {
    Write { node: u64, value: i32 },
    Insert { node: u64, slot: usize, value: i32 },
    Edge { from: u64, slot: usize, to: u64 },
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    // slots and ids deliberately overshoot so failures get exercised too
    prop_oneof![
        (0u64..8, any::<i32>()).prop_map(|(node, value)| Operation::Write { node, value }),
        (0u64..8, 0usize..=OUT, any::<i32>())
            .prop_map(|(node, slot, value)| Operation::Insert { node, slot, value }),
        (0u64..8, 0usize..=OUT, 0u64..8)
            .prop_map(|(from, slot, to)| Operation::Edge { from, slot, to }),
    ]
}

fn apply(graph: &mut PersistentGraph<i32>, op: &Operation) -> Result<(), GraphError> {
    match *op {
        Operation::Write { node, value } => graph.write(NodeId(node), value).map(drop),
        Operation::Insert { node, slot, value } => {
            graph.insert_vertex(NodeId(node), slot, value).map(drop)
        }
        Operation::Edge { from, slot, to } => {
            graph.update_edge(NodeId(from), slot, NodeId(to)).map(drop)
        }
    }
}

/// Captures every node's value, edges and back-references at the current version.
fn capture(graph: &PersistentGraph<i32>) -> Vec<(i32, Vec<Option<NodeId>>, Vec<NodeId>)> {
    (0..graph.node_count() as u64)
        .map(|id| {
            let view = graph.node(NodeId(id)).unwrap();
            (
                *view.value(),
                view.edges().collect(),
                view.back_references().to_vec(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_past_versions_never_change(ops in prop::collection::vec(arb_operation(), 1..60)) {
        let mut graph = PersistentGraph::new(0, OUT, IN);
        let mut captured: Vec<(Version, _)> = vec![(0, capture(&graph))];

        for op in &ops {
            let before = graph.current_version();
            match apply(&mut graph, op) {
                Ok(()) => {
                    prop_assert_eq!(graph.current_version(), before + 1);
                    captured.push((graph.current_version(), capture(&graph)));
                }
                Err(_) => prop_assert_eq!(graph.current_version(), before),
            }
        }

        for (version, nodes) in &captured {
            for (id, (value, edges, backs)) in nodes.iter().enumerate() {
                let view = graph.node_at(NodeId(id as u64), *version).unwrap();
                prop_assert_eq!(view.value(), value);
                prop_assert_eq!(&view.edges().collect::<Vec<_>>(), edges);
                prop_assert_eq!(view.back_references(), backs.as_slice());
            }
        }
    }

    #[test]
    fn prop_capacity_and_chain_invariants_hold(ops in prop::collection::vec(arb_operation(), 1..80)) {
        let mut graph = PersistentGraph::new(0, OUT, IN);
        for op in &ops {
            let _ = apply(&mut graph, op);
            for id in 0..graph.node_count() as u64 {
                let node = NodeId(id);
                let view = graph.node(node).unwrap();
                prop_assert!(view.back_references().len() <= IN);
                let tags: Vec<_> = graph.history(node).unwrap().map(|e| e.superseded_at).collect();
                prop_assert!(tags.windows(2).all(|w| w[0] > w[1]), "chain {:?}", tags);
                prop_assert!(tags.iter().all(|tag| *tag < graph.current_version()));
            }
        }
    }

    #[test]
    fn prop_write_round_trip(values in prop::collection::vec(any::<i64>(), 1..40)) {
        let mut graph = PersistentGraph::new(0i64, 1, 1);
        let root = graph.root();
        let versions: Vec<_> = values
            .iter()
            .map(|value| graph.write(root, *value).unwrap())
            .collect();
        for (version, value) in versions.iter().zip(&values) {
            prop_assert_eq!(graph.read(root, *version).unwrap(), value);
            // reads are idempotent
            prop_assert_eq!(graph.read(root, *version).unwrap(), value);
        }
        let beyond = graph.current_version() + 1;
        let is_out_of_range = matches!(
            graph.read(root, beyond),
            Err(GraphError::VersionOutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
    }
}
