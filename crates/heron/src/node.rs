//! Node identities and the position capability the force mutates.
//!
//! The host simulation owns the node set (a plain slice); this crate only ever reads and writes
//! positions through [`NodePosition`].

use serde::Serialize;
use std::fmt;

/// Identity value used to reference a node from a raw path.
///
/// Serializes untagged, so debug traces carry a plain JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Structural position in the node set (the default identity).
    Index(usize),
    Key(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Index(i) => write!(f, "{i}"),
            NodeId::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId::Index(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Key(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Key(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mutable 2D position of a simulation node.
///
/// Everything else about the node is opaque to the force.
pub trait NodePosition {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    /// Offsets the node in place.
    fn translate(&mut self, dx: f64, dy: f64);

    fn position(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

impl NodePosition for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

/// Minimal simulation node, for hosts that do not bring their own node type.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }
}

impl NodePosition for Node {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}
