//! Error types for graph operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error type for graph operations.
///
/// Every variant is a usage error: it indicates a construction mistake by the
/// caller, not a transient condition. Expected negative outcomes (unreachable
/// targets, cycles during topological sorting) are reported through return
/// values, never through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphError {
    /// A vertex referenced by the operation is not in the graph.
    ///
    /// Carries a `Debug` rendering of the offending vertex.
    VertexNotFound(String),
    /// Both endpoints of the requested edge are the same vertex.
    SelfLoop(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexNotFound(v) => write!(f, "Vertex not found: {v}"),
            Self::SelfLoop(v) => write!(f, "Self-loops are not allowed: {v}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
