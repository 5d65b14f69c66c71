//! Force configuration: strategy functions and scalars.
//!
//! Upstream configures the force through chained mutator properties. Here the same knobs live in
//! an immutable-by-convention [`Config`] that is validated once by [`ConfigBuilder::build`]; the
//! force replaces individual values through its setters, re-resolving paths where needed.

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::resolve::PathEntry;
use std::fmt;
use std::sync::Arc;

/// Default per-tick damping applied to every displacement.
pub const DEFAULT_ANGLE_FORCE: f64 = 0.01;

/// Maps a node (and its structural index in the node set) to its identity.
pub type IdFn<N> = Arc<dyn Fn(usize, &N) -> NodeId + Send + Sync>;
/// Extracts the ordered node list of a raw path.
pub type PathNodesFn<P> = Arc<dyn Fn(&P) -> Vec<PathEntry> + Send + Sync>;
/// Extracts the strength of a raw path. `None` means "not a number" and falls back to `1.0`.
pub type PathStrengthFn<P> = Arc<dyn Fn(&P) -> Option<f64> + Send + Sync>;

pub struct Config<P, N> {
    pub(crate) id: IdFn<N>,
    pub(crate) angle_force: f64,
    pub(crate) path_nodes: PathNodesFn<P>,
    pub(crate) path_strength: PathStrengthFn<P>,
    pub(crate) debug: bool,
}

impl<P, N> Clone for Config<P, N> {
    fn clone(&self) -> Self {
        Self {
            id: Arc::clone(&self.id),
            angle_force: self.angle_force,
            path_nodes: Arc::clone(&self.path_nodes),
            path_strength: Arc::clone(&self.path_strength),
            debug: self.debug,
        }
    }
}

impl<P, N> fmt::Debug for Config<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("angle_force", &self.angle_force)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl<P, N> Config<P, N> {
    pub fn builder() -> ConfigBuilder<P, N> {
        ConfigBuilder::default()
    }

    pub fn id(&self) -> &IdFn<N> {
        &self.id
    }

    pub fn angle_force(&self) -> f64 {
        self.angle_force
    }

    pub fn path_nodes(&self) -> &PathNodesFn<P> {
        &self.path_nodes
    }

    pub fn path_strength(&self) -> &PathStrengthFn<P> {
        &self.path_strength
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn node_id(&self, index: usize, node: &N) -> NodeId {
        (self.id)(index, node)
    }
}

fn structural_index<N>(index: usize, _node: &N) -> NodeId {
    NodeId::Index(index)
}

pub(crate) fn validate_angle_force(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidAngleForce { value })
    }
}

pub struct ConfigBuilder<P, N> {
    id: Option<IdFn<N>>,
    angle_force: f64,
    path_nodes: Option<PathNodesFn<P>>,
    path_strength: Option<PathStrengthFn<P>>,
    debug: bool,
}

impl<P, N> Default for ConfigBuilder<P, N> {
    fn default() -> Self {
        Self {
            id: None,
            angle_force: DEFAULT_ANGLE_FORCE,
            path_nodes: None,
            path_strength: None,
            debug: false,
        }
    }
}

impl<P, N> ConfigBuilder<P, N> {
    pub fn id(mut self, f: impl Fn(usize, &N) -> NodeId + Send + Sync + 'static) -> Self {
        self.id = Some(Arc::new(f));
        self
    }

    pub fn angle_force(mut self, angle_force: f64) -> Self {
        self.angle_force = angle_force;
        self
    }

    pub fn path_nodes(mut self, f: impl Fn(&P) -> Vec<PathEntry> + Send + Sync + 'static) -> Self {
        self.path_nodes = Some(Arc::new(f));
        self
    }

    pub fn path_strength(mut self, f: impl Fn(&P) -> Option<f64> + Send + Sync + 'static) -> Self {
        self.path_strength = Some(Arc::new(f));
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> Result<Config<P, N>>
    where
        N: 'static,
    {
        let path_nodes = self.path_nodes.ok_or(Error::MissingExtractor { name: "path_nodes" })?;
        let path_strength = self.path_strength.ok_or(Error::MissingExtractor {
            name: "path_strength",
        })?;
        let angle_force = validate_angle_force(self.angle_force)?;
        let id: IdFn<N> = match self.id {
            Some(id) => id,
            None => Arc::new(structural_index::<N>),
        };
        Ok(Config {
            id,
            angle_force,
            path_nodes,
            path_strength,
            debug: self.debug,
        })
    }
}
