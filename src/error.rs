//! Error type shared by every graph operation.

use thiserror::Error;

use crate::edge::Edge;
use crate::grid::Node;

/// Contract violations reported by the graph, the storage creators and the
/// weight-assignment pass.
///
/// None of these are transient: each one means the caller handed in a node,
/// edge or size the graph was never built for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node lies outside the `down_count × right_count` lattice.
    #[error("node {0:?} doesn't exist")]
    NodeNotFound(Node),

    /// The edge is not part of the graph (includes malformed free rides).
    #[error("edge {0:?} doesn't exist")]
    EdgeNotFound(Edge),

    /// A single edge was requested but `count` edges were found.
    #[error("expected exactly one edge at node {node:?}, found {count}")]
    CardinalityViolation { node: Node, count: usize },

    /// Sequence lengths or storage capacity disagree with the grid dimensions.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
