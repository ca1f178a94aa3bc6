use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{GraphOptions, GraphStats, PersistentGraph};
use crate::types::{GraphError, NodeId, Version};

/// Error type for replay operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error while reading a script.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Script is not valid TOML or does not match the script schema.
    #[error("invalid script: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON rendering failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A step failed while replaying with `stop_on_error`.
    #[error("step {index} failed: {source}")]
    Step {
        /// Zero-based index of the failing operation.
        index: usize,
        /// Underlying graph error.
        source: GraphError,
    },
}

/// Replay script: a root payload, graph options and a list of operations.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Payload of the root node.
    pub root: i64,
    /// Graph options; defaults apply to missing keys.
    #[serde(default)]
    pub options: GraphOptions,
    /// Operations, applied in order.
    #[serde(default, rename = "op")]
    pub ops: Vec<ScriptOp>,
}

/// One scripted operation. Nodes are addressed by their numeric id.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptOp {
    /// Replace the payload of `node`.
    Write {
        /// Target node.
        node: u64,
        /// New payload.
        value: i64,
    },
    /// Splice a new node into `slot` of `node`.
    Insert {
        /// Node whose slot receives the new node.
        node: u64,
        /// Outgoing slot.
        slot: usize,
        /// Payload of the new node.
        value: i64,
    },
    /// Point `slot` of `from` at `to`.
    Edge {
        /// Source node.
        from: u64,
        /// Outgoing slot of the source.
        slot: usize,
        /// Target node.
        to: u64,
    },
    /// Read the payload of `node` as of `version`. Does not advance the clock.
    Read {
        /// Node to read.
        node: u64,
        /// Version to read at.
        version: Version,
    },
}

impl ScriptOp {
    fn describe(&self) -> String {
        match self {
            ScriptOp::Write { node, value } => format!("write n{node} = {value}"),
            ScriptOp::Insert { node, slot, value } => {
                format!("insert n{node}[{slot}] = {value}")
            }
            ScriptOp::Edge { from, slot, to } => format!("edge n{from}[{slot}] -> n{to}"),
            ScriptOp::Read { node, version } => format!("read n{node} @ v{version}"),
        }
    }
}

/// Replay behavior switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplayOptions {
    /// Abort on the first failing operation instead of recording it.
    pub stop_on_error: bool,
}

/// Outcome of one scripted operation.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StepOutcome {
    /// Zero-based position in the script.
    pub index: usize,
    /// Human-readable operation.
    pub op: String,
    /// Graph version after the step.
    pub version: Version,
    /// Id of the node created by an insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<u64>,
    /// Payload returned by a read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Error message when the step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One superseded payload in a node's history.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct HistoryPoint {
    /// Last version at which `value` was current.
    pub superseded_at: Version,
    /// Payload at that time.
    pub value: i64,
}

/// Final state and history of one node.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NodeHistory {
    /// Node id.
    pub node: u64,
    /// Version at which the node appeared.
    pub born: Version,
    /// Current payload.
    pub current: i64,
    /// Superseded payloads, newest first.
    pub history: Vec<HistoryPoint>,
}

/// Everything a replay produced.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ReplayReport {
    /// Per-operation outcomes.
    pub steps: Vec<StepOutcome>,
    /// Per-node history after the last operation.
    pub nodes: Vec<NodeHistory>,
    /// Final footprint counters.
    pub stats: GraphStats,
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Script, CliError> {
    let src = fs::read_to_string(path)?;
    parse_script(&src)
}

/// Parses a script from TOML text.
pub fn parse_script(src: &str) -> Result<Script, CliError> {
    Ok(toml::from_str(src)?)
}

/// The walkthrough shipped as `pgraph demo`.
///
/// Root 1 with five slots; 2 spliced under the root; 3 spliced under 2; the
/// root linked straight to 3; then 2 overwritten with 9 and read on both
/// sides of the write.
pub fn demo_script() -> Script {
    Script {
        root: 1,
        options: GraphOptions::new(5, 5),
        ops: vec![
            ScriptOp::Insert {
                node: 0,
                slot: 0,
                value: 2,
            },
            ScriptOp::Insert {
                node: 1,
                slot: 1,
                value: 3,
            },
            ScriptOp::Edge {
                from: 0,
                slot: 1,
                to: 2,
            },
            ScriptOp::Write { node: 1, value: 9 },
            ScriptOp::Read {
                node: 1,
                version: 3,
            },
            ScriptOp::Read {
                node: 1,
                version: 4,
            },
        ],
    }
}

/// Applies every operation of `script` to a fresh graph.
pub fn run_script(script: &Script, opts: ReplayOptions) -> Result<ReplayReport, CliError> {
    let mut graph = PersistentGraph::with_options(script.root, script.options.clone());
    let mut steps = Vec::with_capacity(script.ops.len());
    for (index, op) in script.ops.iter().enumerate() {
        let mut outcome = StepOutcome {
            index,
            op: op.describe(),
            version: graph.current_version(),
            inserted: None,
            value: None,
            error: None,
        };
        match apply(&mut graph, op, &mut outcome) {
            Ok(()) => debug!(index, version = graph.current_version(), "replayed step"),
            Err(source) if opts.stop_on_error => return Err(CliError::Step { index, source }),
            Err(err) => outcome.error = Some(err.to_string()),
        }
        outcome.version = graph.current_version();
        steps.push(outcome);
    }
    let nodes = collect_histories(&graph);
    info!(
        steps = steps.len(),
        version = graph.current_version(),
        "replay finished"
    );
    Ok(ReplayReport {
        steps,
        nodes,
        stats: graph.stats(),
    })
}

fn apply(
    graph: &mut PersistentGraph<i64>,
    op: &ScriptOp,
    outcome: &mut StepOutcome,
) -> Result<(), GraphError> {
    match *op {
        ScriptOp::Write { node, value } => {
            graph.write(NodeId(node), value)?;
        }
        ScriptOp::Insert { node, slot, value } => {
            let inserted = graph.insert_vertex(NodeId(node), slot, value)?;
            outcome.inserted = Some(inserted.0);
        }
        ScriptOp::Edge { from, slot, to } => {
            graph.add_edge(NodeId(from), NodeId(to), slot)?;
        }
        ScriptOp::Read { node, version } => {
            outcome.value = Some(*graph.read(NodeId(node), version)?);
        }
    }
    Ok(())
}

fn collect_histories(graph: &PersistentGraph<i64>) -> Vec<NodeHistory> {
    (0..graph.node_count() as u64)
        .map(NodeId)
        .filter_map(|id| {
            let born = graph.born_at(id).ok()?;
            let current = *graph.value(id).ok()?;
            let history = graph
                .history(id)
                .ok()?
                .map(|entry| HistoryPoint {
                    superseded_at: entry.superseded_at,
                    value: *entry.value,
                })
                .collect();
            Some(NodeHistory {
                node: id.0,
                born,
                current,
                history,
            })
        })
        .collect()
}

/// Renders a report as plain text.
pub fn render_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let _ = write!(out, "[{:>3}] v{:<4} {}", step.index, step.version, step.op);
        if let Some(id) = step.inserted {
            let _ = write!(out, " => n{id}");
        }
        if let Some(value) = step.value {
            let _ = write!(out, " => {value}");
        }
        if let Some(err) = &step.error {
            let _ = write!(out, " !! {err}");
        }
        out.push('\n');
    }
    out.push('\n');
    for node in &report.nodes {
        let _ = write!(
            out,
            "n{} (born v{}): {}",
            node.node, node.born, node.current
        );
        for point in &node.history {
            let _ = write!(out, " <- {}@v{}", point.value, point.superseded_at);
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "\nnodes={} snapshots={} version={}",
        report.stats.nodes, report.stats.snapshots, report.stats.current_version
    );
    out
}

/// Renders a report as pretty-printed JSON.
pub fn render_json(report: &ReplayReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)?)
}
