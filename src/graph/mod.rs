//! Graph representation and read-only access

pub mod compressed;
pub mod builder;
pub mod view;

use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};

pub use builder::GraphBuilder;
pub use compressed::CompressedGraph;

/// Dense node handle, stable for the lifetime of a graph snapshot
pub type NodeId = u32;

/// Attribute name -> numeric value for a single edge
pub type EdgeAttrs = HashMap<String, f64>;

/// Which nodes a routine should run over
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeSelection {
    /// Every node, in the graph's node order
    #[default]
    All,
    /// Exactly one node; clustering collapses its result to a scalar
    Single(NodeId),
    /// An explicit list, processed in the given order
    Many(Vec<NodeId>),
}

impl From<NodeId> for NodeSelection {
    fn from(node: NodeId) -> Self {
        NodeSelection::Single(node)
    }
}

impl From<Vec<NodeId>> for NodeSelection {
    fn from(nodes: Vec<NodeId>) -> Self {
        NodeSelection::Many(nodes)
    }
}

/// Read-only adjacency access the algorithms are written against.
///
/// Implementors must not change while a routine holds a reference; the
/// routines themselves never mutate anything.
pub trait GraphAccess {
    /// Whether edges are directed
    fn is_directed(&self) -> bool;

    /// Number of edges; an undirected edge counts once
    fn number_of_edges(&self) -> usize;

    /// Number of nodes
    fn node_count(&self) -> usize;

    /// All node ids in a deterministic order
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    fn contains_node(&self, node: NodeId) -> bool;

    /// Neighbors (successors for directed graphs) of `node`, self-loops included.
    /// Yields nothing for an unknown node.
    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Attributes of the edge `u -> v`, if it exists
    fn edge_attrs(&self, u: NodeId, v: NodeId) -> Option<&EdgeAttrs>;

    fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edge_attrs(u, v).is_some()
    }

    /// Every stored adjacency entry `(u, v, attrs)`.
    /// Undirected edges appear once per direction.
    fn adjacency(&self) -> Box<dyn Iterator<Item = (NodeId, NodeId, &EdgeAttrs)> + '_>;

    /// Resolve a selection to the ordered list of nodes to process
    fn nbunch(&self, selection: &NodeSelection) -> GraphResult<Vec<NodeId>> {
        match selection {
            NodeSelection::All => Ok(self.node_ids().collect()),
            NodeSelection::Single(node) => {
                if self.contains_node(*node) {
                    Ok(vec![*node])
                } else {
                    Err(GraphError::NodeNotFound(*node))
                }
            }
            NodeSelection::Many(nodes) => {
                if let Some(&missing) = nodes.iter().find(|&&n| !self.contains_node(n)) {
                    return Err(GraphError::NodeNotFound(missing));
                }
                Ok(nodes.clone())
            }
        }
    }
}
