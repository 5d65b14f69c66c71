//! Path resolution: raw path descriptors to concrete node references.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::NodeId;
use rustc_hash::FxHashMap;

/// One entry of a raw path's node list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathEntry {
    /// Direct reference to a node, by its position in the node set.
    Node(usize),
    /// Identity to be looked up through the configured identity extractor.
    Id(NodeId),
}

impl From<NodeId> for PathEntry {
    fn from(value: NodeId) -> Self {
        PathEntry::Id(value)
    }
}

impl From<&str> for PathEntry {
    fn from(value: &str) -> Self {
        PathEntry::Id(NodeId::from(value))
    }
}

impl From<String> for PathEntry {
    fn from(value: String) -> Self {
        PathEntry::Id(NodeId::from(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    /// Indices into the node set the path was resolved against.
    pub nodes: Vec<usize>,
    pub strength: f64,
}

impl ResolvedPath {
    /// Paths need at least two edges to have an interior node.
    pub fn has_interior(&self) -> bool {
        self.nodes.len() >= 3
    }
}

/// Strength fallback for extractors that do not produce a usable number.
pub fn normalize_strength(strength: Option<f64>) -> f64 {
    strength.filter(|s| s.is_finite()).unwrap_or(1.0)
}

/// Identity -> node index lookup. Later nodes win when identities collide.
pub(crate) fn identity_index<P, N>(config: &Config<P, N>, nodes: &[N]) -> FxHashMap<NodeId, usize> {
    let mut index: FxHashMap<NodeId, usize> = FxHashMap::default();
    index.reserve(nodes.len());
    for (i, n) in nodes.iter().enumerate() {
        index.insert(config.node_id(i, n), i);
    }
    index
}

/// Resolves every raw path against `nodes`.
///
/// Returns an empty list when no node set has been supplied yet. Fails on the first entry that
/// cannot be resolved; callers replace their state only on success.
pub fn resolve_paths<P, N>(
    config: &Config<P, N>,
    nodes: Option<&[N]>,
    raw_paths: &[P],
) -> Result<Vec<ResolvedPath>> {
    let Some(nodes) = nodes else {
        return Ok(Vec::new());
    };

    let by_id = identity_index(config, nodes);
    let mut out: Vec<ResolvedPath> = Vec::with_capacity(raw_paths.len());
    for raw in raw_paths {
        let entries = (config.path_nodes)(raw);
        let mut resolved: Vec<usize> = Vec::with_capacity(entries.len());
        for entry in entries {
            let index = match entry {
                PathEntry::Node(index) => {
                    if index >= nodes.len() {
                        return Err(Error::NodeIndexOutOfBounds {
                            index,
                            len: nodes.len(),
                        });
                    }
                    index
                }
                PathEntry::Id(id) => match by_id.get(&id) {
                    Some(&index) => index,
                    None => return Err(Error::MissingNode { id }),
                },
            };
            resolved.push(index);
        }
        out.push(ResolvedPath {
            nodes: resolved,
            strength: normalize_strength((config.path_strength)(raw)),
        });
    }

    tracing::debug!(
        paths = out.len(),
        nodes = nodes.len(),
        "resolved straighten-paths input"
    );
    Ok(out)
}
