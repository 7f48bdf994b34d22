//! Errors raised at the persistence boundary.

use thiserror::Error;

/// Why a floor-plan document was rejected. The graph being loaded is
/// discarded on any of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node key `{0}` is not a valid id")]
    InvalidKey(String),
    #[error("node stored under key {key} carries id {id}")]
    NodeKeyMismatch { key: u32, id: u32 },
    #[error("node id {0} appears more than once")]
    DuplicateNode(u32),
    #[error("node id {0} leaves no room for further ids")]
    IdSpaceExhausted(u32),
    #[error("node {0} has a non-finite coordinate")]
    NonFiniteCoordinate(u32),
    #[error("node {0} lies outside the supported coordinate range")]
    CoordinateOutOfRange(u32),
    #[error("document has {0} nodes, above the supported maximum")]
    TooManyNodes(usize),
    #[error("document has {0} edges, above the supported maximum")]
    TooManyEdges(usize),
    #[error("edge stored under ({key1}, {key2}) carries ({id1}, {id2})")]
    EdgeKeyMismatch { key1: u32, key2: u32, id1: u32, id2: u32 },
    #[error("edge ({id1}, {id2}) is not in canonical order")]
    NonCanonicalEdge { id1: u32, id2: u32 },
    #[error("edge ({id1}, {id2}) references a missing node")]
    DanglingEdge { id1: u32, id2: u32 },
    #[error("edge ({id1}, {id2}) appears more than once")]
    DuplicateEdge { id1: u32, id2: u32 },
    #[error("edge ({id1}, {id2}) has an empty or oversized stroke")]
    InvalidStroke { id1: u32, id2: u32 },
}

impl LoadError {
    /// Stable machine-readable code for API envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Json(_) => "invalid_json",
            LoadError::InvalidKey(_) => "invalid_key",
            LoadError::NodeKeyMismatch { .. } => "node_key_mismatch",
            LoadError::DuplicateNode(_) => "duplicate_node",
            LoadError::IdSpaceExhausted(_) => "id_space_exhausted",
            LoadError::NonFiniteCoordinate(_) => "non_finite",
            LoadError::CoordinateOutOfRange(_) => "out_of_range",
            LoadError::TooManyNodes(_) => "too_many_nodes",
            LoadError::TooManyEdges(_) => "too_many_edges",
            LoadError::EdgeKeyMismatch { .. } => "edge_key_mismatch",
            LoadError::NonCanonicalEdge { .. } => "non_canonical_edge",
            LoadError::DanglingEdge { .. } => "dangling_edge",
            LoadError::DuplicateEdge { .. } => "duplicate_edge",
            LoadError::InvalidStroke { .. } => "invalid_stroke",
        }
    }
}
