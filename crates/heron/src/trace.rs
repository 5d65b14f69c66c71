//! Per-tick diagnostic trace.
//!
//! Upstream dumps an ad-hoc report to the console when `debug` is on. We build the same records
//! as typed values and hand them to the caller at the end of the tick instead.

use crate::node::{NodeId, Point};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEdge {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceNode {
    pub id: NodeId,
    /// Position before the displacement was applied.
    pub x: f64,
    pub y: f64,
    pub force: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TraceRecord {
    /// Topology of a path, emitted once per path with an interior node.
    Init {
        nodes: Vec<TraceNode>,
        edges: Vec<TraceEdge>,
    },
    /// One applied triple, in `prev`, `current`, `next` order.
    Force {
        nodes: [ForceNode; 3],
        edges: [TraceEdge; 2],
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    pub records: Vec<TraceRecord>,
}

impl Trace {
    pub fn push(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn init_records(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Init { .. }))
    }

    pub fn force_records(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Force { .. }))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Consecutive-pair edge list of a path.
pub(crate) fn path_edges(ids: &[NodeId]) -> Vec<TraceEdge> {
    ids.windows(2)
        .map(|w| TraceEdge {
            source: w[0].clone(),
            target: w[1].clone(),
        })
        .collect()
}

/// Receives the trace of every tick run with `debug` enabled.
pub trait TraceSink {
    fn emit(&mut self, trace: Trace);
}

impl<F> TraceSink for F
where
    F: FnMut(Trace),
{
    fn emit(&mut self, trace: Trace) {
        self(trace)
    }
}
