//! The path-straightening force.
//!
//! Every tick, each interior node of every path is nudged so that the bend it sits on opens up
//! toward a straight line. Displacements are applied immediately, so later triples (in the same
//! path or a later one) observe positions already moved by earlier ones.

use crate::config::{Config, IdFn, PathNodesFn, PathStrengthFn, validate_angle_force};
use crate::error::Result;
use crate::geom::{self, TripleDisplacement};
use crate::node::{NodeId, NodePosition};
use crate::resolve::{PathEntry, ResolvedPath, resolve_paths};
use crate::trace::{ForceNode, Trace, TraceEdge, TraceNode, TraceRecord, TraceSink, path_edges};
use std::fmt;
use std::sync::Arc;

/// Capability contract between a host simulation and one of its forces.
pub trait Force<N> {
    /// Hands over the full node set. Called again whenever the host replaces it.
    fn initialize(&mut self, nodes: &[N]) -> Result<()>;

    /// Runs one simulation step. `alpha` is the host's cooling parameter.
    fn apply(&mut self, nodes: &mut [N], alpha: f64);
}

pub struct StraightenPaths<P, N> {
    config: Config<P, N>,
    raw_paths: Vec<P>,
    paths: Vec<ResolvedPath>,
    /// Last node set handed to `initialize`, kept so identity lookups can be rebuilt when an
    /// extractor changes. Never written back to the host.
    nodes: Option<Vec<N>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<P, N> fmt::Debug for StraightenPaths<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StraightenPaths")
            .field("config", &self.config)
            .field("raw_paths", &self.raw_paths.len())
            .field("paths", &self.paths)
            .field("initialized", &self.nodes.is_some())
            .finish()
    }
}

impl<P, N> StraightenPaths<P, N> {
    /// Paths are resolved on the first `initialize` call.
    pub fn new(config: Config<P, N>, raw_paths: Vec<P>) -> Self {
        Self {
            config,
            raw_paths,
            paths: Vec::new(),
            nodes: None,
            sink: None,
        }
    }

    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.set_trace_sink(sink);
        self
    }

    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &Config<P, N> {
        &self.config
    }

    /// Resolved paths, in input order.
    pub fn paths(&self) -> &[ResolvedPath] {
        &self.paths
    }

    pub fn raw_paths(&self) -> &[P] {
        &self.raw_paths
    }

    pub fn set_paths(&mut self, raw_paths: Vec<P>) -> Result<()> {
        let paths = resolve_paths(&self.config, self.nodes.as_deref(), &raw_paths)?;
        self.raw_paths = raw_paths;
        self.paths = paths;
        Ok(())
    }

    pub fn id(&self) -> &IdFn<N> {
        self.config.id()
    }

    pub fn set_id(
        &mut self,
        f: impl Fn(usize, &N) -> NodeId + Send + Sync + 'static,
    ) -> Result<()> {
        let mut config = self.config.clone();
        config.id = Arc::new(f);
        self.reconfigure(config)
    }

    pub fn path_nodes(&self) -> &PathNodesFn<P> {
        self.config.path_nodes()
    }

    pub fn set_path_nodes(
        &mut self,
        f: impl Fn(&P) -> Vec<PathEntry> + Send + Sync + 'static,
    ) -> Result<()> {
        let mut config = self.config.clone();
        config.path_nodes = Arc::new(f);
        self.reconfigure(config)
    }

    pub fn path_strength(&self) -> &PathStrengthFn<P> {
        self.config.path_strength()
    }

    pub fn set_path_strength(
        &mut self,
        f: impl Fn(&P) -> Option<f64> + Send + Sync + 'static,
    ) -> Result<()> {
        let mut config = self.config.clone();
        config.path_strength = Arc::new(f);
        self.reconfigure(config)
    }

    pub fn angle_force(&self) -> f64 {
        self.config.angle_force()
    }

    pub fn set_angle_force(&mut self, angle_force: f64) -> Result<()> {
        self.config.angle_force = validate_angle_force(angle_force)?;
        Ok(())
    }

    pub fn debug(&self) -> bool {
        self.config.debug()
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Swaps in `config` only if the current paths still resolve under it.
    fn reconfigure(&mut self, config: Config<P, N>) -> Result<()> {
        let paths = resolve_paths(&config, self.nodes.as_deref(), &self.raw_paths)?;
        self.config = config;
        self.paths = paths;
        Ok(())
    }
}

impl<P, N: NodePosition> StraightenPaths<P, N> {
    /// Applies one tick of displacement to `nodes`.
    ///
    /// Returns the tick's trace when `debug` is enabled.
    pub fn step(&self, nodes: &mut [N]) -> Option<Trace> {
        let mut trace = self.config.debug.then(Trace::default);
        let mut stale_paths = 0usize;

        for path in &self.paths {
            if !path.has_interior() {
                continue;
            }
            if path.nodes.iter().any(|&i| i >= nodes.len()) {
                stale_paths += 1;
                continue;
            }

            if let Some(trace) = trace.as_mut() {
                trace.push(self.init_record(nodes, &path.nodes));
            }

            let k = path.strength * self.config.angle_force;
            for w in path.nodes.windows(3) {
                let (prev, current, next) = (w[0], w[1], w[2]);
                // A two-cycle folds back onto the same node; there is no bend to measure.
                if prev == next {
                    continue;
                }

                let Some(d) = geom::triple_displacement(
                    nodes[prev].position(),
                    nodes[current].position(),
                    nodes[next].position(),
                    k,
                ) else {
                    tracing::trace!(prev, current, next, "skipping degenerate triple");
                    continue;
                };

                if let Some(trace) = trace.as_mut() {
                    trace.push(self.force_record(nodes, [prev, current, next], &d));
                }

                nodes[prev].translate(d.prev.x, d.prev.y);
                nodes[next].translate(d.next.x, d.next.y);
                nodes[current].translate(d.current.x, d.current.y);
            }
        }

        if stale_paths > 0 {
            tracing::warn!(
                stale_paths,
                nodes = nodes.len(),
                "paths reference nodes outside the current node set; call initialize after replacing nodes"
            );
        }

        trace
    }

    fn init_record(&self, nodes: &[N], path: &[usize]) -> TraceRecord {
        let ids: Vec<NodeId> = path
            .iter()
            .map(|&i| self.config.node_id(i, &nodes[i]))
            .collect();
        let edges = path_edges(&ids);
        let nodes = ids
            .into_iter()
            .zip(path)
            .map(|(id, &i)| TraceNode {
                id,
                x: nodes[i].x(),
                y: nodes[i].y(),
            })
            .collect();
        TraceRecord::Init { nodes, edges }
    }

    fn force_record(&self, nodes: &[N], triple: [usize; 3], d: &TripleDisplacement) -> TraceRecord {
        let [prev, current, next] = triple;
        let node = |i: usize, force| ForceNode {
            id: self.config.node_id(i, &nodes[i]),
            x: nodes[i].x(),
            y: nodes[i].y(),
            force,
        };
        let (p, c, n) = (node(prev, d.prev), node(current, d.current), node(next, d.next));
        let edges = [
            TraceEdge {
                source: p.id.clone(),
                target: c.id.clone(),
            },
            TraceEdge {
                source: c.id.clone(),
                target: n.id.clone(),
            },
        ];
        TraceRecord::Force {
            nodes: [p, c, n],
            edges,
        }
    }
}

impl<P, N: NodePosition + Clone> Force<N> for StraightenPaths<P, N> {
    fn initialize(&mut self, nodes: &[N]) -> Result<()> {
        let paths = resolve_paths(&self.config, Some(nodes), &self.raw_paths)?;
        self.nodes = Some(nodes.to_vec());
        self.paths = paths;
        Ok(())
    }

    fn apply(&mut self, nodes: &mut [N], _alpha: f64) {
        let Some(trace) = self.step(nodes) else {
            return;
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(trace);
        }
    }
}
