//! Error types for the graph routines

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by the algorithm core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The routine has no implementation for this kind of graph
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// A requested node is not part of the graph
    #[error("Node {0} is not in the graph")]
    NodeNotFound(NodeId),

    /// A label that names no node of the graph
    #[error("Unknown node label: {0}")]
    UnknownLabel(String),

    /// A cycle of negative total weight makes shortest paths undefined
    #[error("Negative cycle through node {0}")]
    NegativeCycle(NodeId),

    /// An edge weight the routine cannot work with (negative, NaN or infinite)
    #[error("Invalid weight {weight} on edge ({u}, {v})")]
    InvalidWeight { u: NodeId, v: NodeId, weight: f64 },

    /// Shortest-path search started without any source node
    #[error("At least one source node is required")]
    EmptySources,
}

pub type GraphResult<T> = Result<T, GraphError>;
