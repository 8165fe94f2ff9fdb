//! Local clustering coefficients

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::algorithms::triangles::{
    triangles_and_degree, weighted_triangles_and_degree, TriangleDegree, TriangleValue,
};
use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphAccess, NodeId, NodeSelection};

/// Result of a clustering query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Clustering {
    /// A single node was requested
    Scalar(f64),
    /// Coefficient of every queried node
    Mapping(BTreeMap<NodeId, f64>),
}

impl Clustering {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Clustering::Scalar(c) => Some(*c),
            Clustering::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<NodeId, f64>> {
        match self {
            Clustering::Scalar(_) => None,
            Clustering::Mapping(m) => Some(m),
        }
    }

    /// Mean coefficient; 0 for an empty mapping
    pub fn average(&self) -> f64 {
        match self {
            Clustering::Scalar(c) => *c,
            Clustering::Mapping(m) if m.is_empty() => 0.0,
            Clustering::Mapping(m) => m.values().sum::<f64>() / m.len() as f64,
        }
    }
}

/// Coefficient for one (degree, triangles) pair.
///
/// Zero triangles short-circuits to 0, which also covers degree 0 and 1.
fn coefficient<T: TriangleValue>(degree: usize, triangles: T) -> f64 {
    if triangles.is_zero() {
        return 0.0;
    }
    let d = degree as f64;
    triangles.to_f64() / (d * (d - 1.0))
}

/// Turn counter output into per-node coefficients
pub fn coefficients<T: TriangleValue>(triples: &[TriangleDegree<T>]) -> BTreeMap<NodeId, f64> {
    triples
        .iter()
        .map(|td| (td.node, coefficient(td.degree, td.triangles)))
        .collect()
}

/// Collapse to a scalar only when exactly one known node was requested
fn select_shape(coefficients: BTreeMap<NodeId, f64>, nodes: &NodeSelection) -> Clustering {
    match nodes {
        NodeSelection::Single(node) => match coefficients.get(node) {
            Some(&c) => Clustering::Scalar(c),
            None => Clustering::Mapping(coefficients),
        },
        _ => Clustering::Mapping(coefficients),
    }
}

/// Local clustering coefficient of the selected nodes of an undirected graph.
///
/// With `weight_key` set, triangles are weighted by the geometric mean of
/// their normalized edge weights. Directed graphs are rejected.
pub fn clustering<G>(
    graph: &G,
    nodes: &NodeSelection,
    weight_key: Option<&str>,
) -> GraphResult<Clustering>
where
    G: GraphAccess + ?Sized,
{
    if graph.is_directed() {
        return Err(GraphError::NotImplemented("clustering of directed graphs"));
    }

    let per_node = match weight_key {
        Some(key) => coefficients(&weighted_triangles_and_degree(graph, nodes, Some(key))?),
        None => coefficients(&triangles_and_degree(graph, nodes)?),
    };

    log::debug!("Computed clustering for {} nodes", per_node.len());

    Ok(select_shape(per_node, nodes))
}
