#![forbid(unsafe_code)]

//! Path-straightening force for force-directed graph layouts.
//!
//! `heron` ports `d3-force-straighten-paths`: given multi-hop paths through a node-link diagram,
//! it nudges every interior node on each simulation tick so the path bends less sharply. It only
//! computes incremental displacements; the host simulation owns the nodes, the tick loop and every
//! other force.
//!
//! ```
//! use heron::{Config, Force, Node, PathEntry, StraightenPaths};
//!
//! let config = Config::<Vec<&str>, Node>::builder()
//!     .id(|_, n| n.id.as_str().into())
//!     .path_nodes(|p| p.iter().map(|&id| PathEntry::from(id)).collect())
//!     .path_strength(|_| Some(1.0))
//!     .build()?;
//!
//! let mut nodes = vec![
//!     Node::new("a", -1.0, 0.0),
//!     Node::new("b", 0.0, 0.0),
//!     Node::new("c", 0.0, 1.0),
//! ];
//! let mut force = StraightenPaths::new(config, vec![vec!["a", "b", "c"]]);
//! force.initialize(&nodes)?;
//! force.apply(&mut nodes, 1.0);
//! assert!(nodes[1].x < 0.0 && nodes[1].y > 0.0);
//! # Ok::<(), heron::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod node;
pub mod resolve;
pub mod straighten;
pub mod trace;

pub use config::{Config, ConfigBuilder, DEFAULT_ANGLE_FORCE};
pub use error::{Error, Result};
pub use node::{Node, NodeId, NodePosition, Point};
pub use resolve::{PathEntry, ResolvedPath, resolve_paths};
pub use straighten::{Force, StraightenPaths};
pub use trace::{Trace, TraceRecord, TraceSink};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
