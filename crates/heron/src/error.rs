use crate::node::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node missing: {id}")]
    MissingNode { id: NodeId },

    #[error("path references node index {index}, but the node set only has {len} nodes")]
    NodeIndexOutOfBounds { index: usize, len: usize },

    #[error("missing required path extractor: {name}")]
    MissingExtractor { name: &'static str },

    #[error("angle force must be finite, got {value}")]
    InvalidAngleForce { value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
