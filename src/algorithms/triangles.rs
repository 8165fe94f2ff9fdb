//! Per-node triangle enumeration, weighted and unweighted

use serde::{Serialize, Deserialize};

use crate::error::GraphResult;
use crate::graph::view::{max_weight, weight};
use crate::graph::{GraphAccess, NodeId, NodeSelection};

/// Degree and triangle value of a single node.
///
/// `triangles` counts every triangle twice: the unweighted counter sees each
/// one from both orientations, the weighted counter doubles its sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleDegree<T> {
    pub node: NodeId,
    pub degree: usize,
    pub triangles: T,
}

/// Numeric triangle value the clustering aggregator can consume
pub trait TriangleValue: Copy {
    fn is_zero(&self) -> bool;
    fn to_f64(&self) -> f64;
}

impl TriangleValue for u64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }
}

impl TriangleValue for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

/// Neighbors of `node` without `node` itself
fn neighbors_without_self<G>(graph: &G, node: NodeId) -> Vec<NodeId>
where
    G: GraphAccess + ?Sized,
{
    graph.neighbors(node).filter(|&n| n != node).collect()
}

/// Triangle count and degree for every selected node
pub fn triangles_and_degree<G>(
    graph: &G,
    nodes: &NodeSelection,
) -> GraphResult<Vec<TriangleDegree<u64>>>
where
    G: GraphAccess + ?Sized,
{
    let nodes = graph.nbunch(nodes)?;
    log::debug!("Counting triangles for {} nodes", nodes.len());

    let mut result = Vec::with_capacity(nodes.len());
    for v in nodes {
        let nbrs = neighbors_without_self(graph, v);

        let mut triangles = 0u64;
        for &w in &nbrs {
            for &x in &nbrs {
                if x != w && graph.has_edge(w, x) {
                    triangles += 1;
                }
            }
        }

        result.push(TriangleDegree { node: v, degree: nbrs.len(), triangles });
    }

    Ok(result)
}

/// Geometric-mean weighted triangle value and degree for every selected node.
///
/// Weights are read under `weight_key` (missing values count as 1) and scaled
/// by the largest weight in the whole graph before taking cube roots.
pub fn weighted_triangles_and_degree<G>(
    graph: &G,
    nodes: &NodeSelection,
    weight_key: Option<&str>,
) -> GraphResult<Vec<TriangleDegree<f64>>>
where
    G: GraphAccess + ?Sized,
{
    let max_weight = max_weight(graph, weight_key)?;
    let nodes = graph.nbunch(nodes)?;
    log::debug!(
        "Counting weighted triangles for {} nodes (max weight {})",
        nodes.len(),
        max_weight
    );

    let mut result = Vec::with_capacity(nodes.len());
    for i in nodes {
        let nbrs = neighbors_without_self(graph, i);

        let mut weighted_triangles = 0.0;
        for (pos, &j) in nbrs.iter().enumerate() {
            let wij = weight(graph, i, j, weight_key, max_weight);
            // Every neighbor before and including `j` is already seen, so each
            // unordered pair {j, k} is visited once.
            for &k in &nbrs[pos + 1..] {
                if !graph.has_edge(j, k) {
                    continue;
                }
                let wjk = weight(graph, j, k, weight_key, max_weight);
                let wki = weight(graph, k, i, weight_key, max_weight);
                weighted_triangles += (wij * wjk * wki).cbrt();
            }
        }

        result.push(TriangleDegree {
            node: i,
            degree: nbrs.len(),
            triangles: 2.0 * weighted_triangles,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::{EdgeAttrs, GraphBuilder};

    fn k4() -> crate::graph::CompressedGraph {
        let mut builder = GraphBuilder::new(false);
        let labels = ["a", "b", "c", "d"];
        for (i, u) in labels.iter().enumerate() {
            for v in &labels[i + 1..] {
                builder.add_edge(u, v, EdgeAttrs::new());
            }
        }
        builder.build()
    }

    #[test]
    fn complete_graph_counts_each_triangle_twice() {
        let graph = k4();
        let counts = triangles_and_degree(&graph, &NodeSelection::All).unwrap();

        assert_eq!(counts.len(), 4);
        for td in counts {
            // three triangles per node, seen from both orientations
            assert_eq!(td.degree, 3);
            assert_eq!(td.triangles, 6);
        }
    }

    #[test]
    fn self_loops_do_not_count_toward_degree() {
        let mut builder = GraphBuilder::new(false);
        builder.add_edge("a", "a", EdgeAttrs::new());
        builder.add_edge("a", "b", EdgeAttrs::new());
        let graph = builder.build();

        let counts = triangles_and_degree(&graph, &NodeSelection::Single(0)).unwrap();
        assert_eq!(counts, vec![TriangleDegree { node: 0, degree: 1, triangles: 0 }]);
    }

    #[test]
    fn selection_order_is_preserved() {
        let graph = k4();
        let counts = triangles_and_degree(&graph, &NodeSelection::Many(vec![3, 1])).unwrap();
        assert_eq!(counts.iter().map(|td| td.node).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let graph = k4();
        assert_eq!(
            triangles_and_degree(&graph, &NodeSelection::Many(vec![0, 9])),
            Err(GraphError::NodeNotFound(9))
        );
    }

    #[test]
    fn unit_weights_match_unweighted_counts() {
        let graph = k4();
        let plain = triangles_and_degree(&graph, &NodeSelection::All).unwrap();
        let weighted =
            weighted_triangles_and_degree(&graph, &NodeSelection::All, Some("weight")).unwrap();

        for (p, w) in plain.iter().zip(&weighted) {
            assert_eq!(p.node, w.node);
            assert_eq!(p.degree, w.degree);
            assert!((p.triangles as f64 - w.triangles).abs() < 1e-12);
        }
    }

    #[test]
    fn weights_are_normalized_by_global_maximum() {
        // triangle a-b-c with weights 1, 1, 8 and a far-away heavy edge
        let mut builder = GraphBuilder::new(false);
        builder.add_weighted_edge("a", "b", "weight", 1.0);
        builder.add_weighted_edge("b", "c", "weight", 1.0);
        builder.add_weighted_edge("c", "a", "weight", 8.0);
        builder.add_weighted_edge("x", "y", "weight", 64.0);
        let graph = builder.build();

        let result =
            weighted_triangles_and_degree(&graph, &NodeSelection::Single(0), Some("weight"))
                .unwrap();
        // cbrt(1/64 * 1/64 * 8/64) = 2/64
        let expected = 2.0 * (2.0 / 64.0);
        assert_eq!(result[0].degree, 2);
        assert!((result[0].triangles - expected).abs() < 1e-12);
    }
}
