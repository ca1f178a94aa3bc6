#![allow(missing_docs)]

use partial_graph::{GraphError, GraphOptions, NodeId, PersistentGraph, Result};

struct Walkthrough {
    graph: PersistentGraph<i32>,
    two: NodeId,
    three: NodeId,
}

fn single_insert() -> Result<Walkthrough> {
    let mut graph = PersistentGraph::with_options(1, GraphOptions::new(5, 5));
    let root = graph.root();
    let two = graph.insert_vertex(root, 0, 2)?;
    assert_eq!(graph.current_version(), 1);
    Ok(Walkthrough {
        graph,
        two,
        three: two,
    })
}

fn shared_child() -> Result<Walkthrough> {
    let mut walk = single_insert()?;
    let root = walk.graph.root();
    walk.three = walk.graph.insert_vertex(walk.two, 1, 3)?;
    assert_eq!(walk.graph.current_version(), 2);
    walk.graph.update_edge(root, 1, walk.three)?;
    assert_eq!(walk.graph.current_version(), 3);
    Ok(walk)
}

#[test]
fn inserted_value_is_reachable_from_root() -> Result<()> {
    let walk = single_insert()?;
    let version = walk.graph.current_version();
    let root = walk.graph.root_at(version)?;
    assert_eq!(root.child(0)?.value(), &2);
    assert_eq!(root.value(), &1);
    Ok(())
}

#[test]
fn second_edge_shares_target() -> Result<()> {
    let walk = shared_child()?;
    let root = walk.graph.root_at(3)?;
    assert_eq!(root.child(1)?.value(), &3);
    assert_eq!(root.child(0)?.value(), &2);
    assert_eq!(root.child(0)?.child(1)?.id(), root.child(1)?.id());
    assert_eq!(
        walk.graph.back_references(walk.three, 3)?,
        &[walk.two, walk.graph.root()]
    );

    // one version earlier the root had no second edge
    let earlier = walk.graph.root_at(2)?;
    assert!(matches!(
        earlier.child(1),
        Err(GraphError::NullReference { slot: 1, .. })
    ));
    Ok(())
}

#[test]
fn write_keeps_previous_value() -> Result<()> {
    let mut walk = shared_child()?;
    let before = walk.graph.current_version();
    let after = walk.graph.write(walk.two, 9)?;
    assert_eq!(after, before + 1);

    assert_eq!(walk.graph.read(walk.two, before)?, &2);
    assert_eq!(walk.graph.read(walk.two, after)?, &9);
    assert_eq!(walk.graph.root_at(before)?.child(0)?.value(), &2);
    assert_eq!(walk.graph.root_at(after)?.child(0)?.value(), &9);
    for version in 1..before {
        assert_eq!(walk.graph.read(walk.two, version)?, &2);
    }
    Ok(())
}

#[test]
fn full_target_leaves_both_nodes_untouched() -> Result<()> {
    let mut graph = PersistentGraph::new(1, 3, 1);
    let root = graph.root();
    let target = graph.insert_vertex(root, 0, 2)?;
    let version = graph.current_version();
    let stats = graph.stats();

    let err = graph.update_edge(root, 1, target).unwrap_err();
    assert_eq!(
        err,
        GraphError::CapacityExceeded {
            node: target,
            capacity: 1
        }
    );
    assert_eq!(graph.current_version(), version);
    assert_eq!(graph.stats(), stats);
    let view = graph.node(root)?;
    assert_eq!(view.edges().collect::<Vec<_>>(), vec![Some(target), None, None]);
    assert_eq!(graph.back_references(target, version)?, &[root]);
    Ok(())
}

#[test]
fn future_version_is_an_error() {
    let graph = PersistentGraph::new(1, 5, 5);
    let root = graph.root();
    assert_eq!(
        graph.read(root, 1),
        Err(GraphError::VersionOutOfRange {
            requested: 1,
            current: 0
        })
    );
    assert!(graph.edge_at(root, 0, 1).is_err());
    assert!(graph.materialize(1).is_err());
}

#[test]
fn query_before_first_write_returns_oldest_snapshot() -> Result<()> {
    let mut walk = shared_child()?;
    walk.graph.write(walk.three, 30)?;
    walk.graph.write(walk.three, 300)?;
    // node 3 was born at version 2; version 0 predates every snapshot
    assert_eq!(walk.graph.read(walk.three, 0)?, &3);
    assert_eq!(walk.graph.read(walk.three, 4)?, &30);
    assert_eq!(walk.graph.read(walk.three, 5)?, &300);
    Ok(())
}

#[test]
fn add_edge_always_creates_a_version() -> Result<()> {
    let mut walk = shared_child()?;
    let root = walk.graph.root();
    let first = walk.graph.add_edge(root, walk.three, 1)?;
    let second = walk.graph.add_edge(root, walk.three, 1)?;
    assert_eq!(second, first + 1);
    assert_eq!(walk.graph.edge_at(root, 1, first)?, walk.three);
    Ok(())
}

#[test]
fn materialized_baseline_matches_historical_view() -> Result<()> {
    let mut walk = shared_child()?;
    walk.graph.write(walk.two, 9)?;
    let plain = walk.graph.materialize(3)?;
    let root = plain.root();
    assert_eq!(plain.value(plain.edge(root, 0)?)?, &2);
    assert_eq!(plain.value(plain.edge(root, 1)?)?, &3);
    assert_eq!(plain.edge(plain.edge(root, 0)?, 1)?, walk.three);
    Ok(())
}
