//! Shortest-path algorithms
//!
//! Multi-source Dijkstra and Floyd-Warshall over edge weights read under a
//! caller-chosen attribute key (missing attributes weigh 1). Dijkstra needs
//! non-negative weights; Floyd-Warshall takes any finite weight and fails
//! only on a negative cycle.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use ndarray::Array2;

use crate::error::{GraphError, GraphResult};
use crate::graph::view::{finite_weight, non_negative_weight};
use crate::graph::{GraphAccess, NodeId};

/// Distance from the nearest source to every reachable node
pub type Distances = BTreeMap<NodeId, f64>;

/// All-pairs distance table
pub type DistanceTable = BTreeMap<NodeId, BTreeMap<NodeId, f64>>;

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; ties settle the smaller id first
        other.cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm from several sources at once.
///
/// Sources start at distance 0. When `target` is given the search stops as
/// soon as it is settled, so nodes farther away may be missing from the result.
pub fn dijkstra_multisource<G>(
    graph: &G,
    sources: &[NodeId],
    weight_key: Option<&str>,
    target: Option<NodeId>,
) -> GraphResult<Distances>
where
    G: GraphAccess + ?Sized,
{
    if sources.is_empty() {
        return Err(GraphError::EmptySources);
    }
    if let Some(&missing) = sources.iter().find(|&&s| !graph.contains_node(s)) {
        return Err(GraphError::NodeNotFound(missing));
    }

    let mut dist = Distances::new();
    let mut tentative: HashMap<NodeId, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();

    for &source in sources {
        tentative.insert(source, 0.0);
        heap.push(State { cost: 0.0, node: source });
    }

    while let Some(State { cost, node }) = heap.pop() {
        if dist.contains_key(&node) {
            continue;
        }
        dist.insert(node, cost);

        if target == Some(node) {
            break;
        }

        for next in graph.neighbors(node) {
            let w = non_negative_weight(graph, node, next, weight_key)?;
            if dist.contains_key(&next) {
                continue;
            }

            let next_cost = cost + w;
            if next_cost < *tentative.get(&next).unwrap_or(&f64::INFINITY) {
                tentative.insert(next, next_cost);
                heap.push(State { cost: next_cost, node: next });
            }
        }
    }

    log::debug!("Dijkstra settled {} nodes from {} sources", dist.len(), sources.len());

    Ok(dist)
}

/// Floyd-Warshall all-pairs shortest paths.
///
/// Every (u, v) pair is present in the result: 0 on the diagonal and
/// `f64::INFINITY` when `v` is unreachable from `u`. Negative edges are
/// allowed; a cycle of negative total weight is reported as `NegativeCycle`.
pub fn floyd<G>(graph: &G, weight_key: Option<&str>) -> GraphResult<DistanceTable>
where
    G: GraphAccess + ?Sized,
{
    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let index: HashMap<NodeId, usize> = nodes.iter()
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();
    let n = nodes.len();

    let mut dist = Array2::from_elem((n, n), f64::INFINITY);
    for i in 0..n {
        dist[[i, i]] = 0.0;
    }

    for (u, v, _) in graph.adjacency() {
        let w = finite_weight(graph, u, v, weight_key)?;
        let (i, j) = (index[&u], index[&v]);
        // a negative self-loop drops below the diagonal's 0
        if w < dist[[i, j]] {
            dist[[i, j]] = w;
        }
    }

    for k in 0..n {
        for i in 0..n {
            let dik = dist[[i, k]];
            if dik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let through = dik + dist[[k, j]];
                if through < dist[[i, j]] {
                    dist[[i, j]] = through;
                }
            }
        }
    }

    if let Some(i) = (0..n).find(|&i| dist[[i, i]] < 0.0) {
        return Err(GraphError::NegativeCycle(nodes[i]));
    }

    log::debug!("Floyd-Warshall computed {}x{} distance table", n, n);

    Ok(nodes.iter()
        .enumerate()
        .map(|(i, &u)| {
            let row: BTreeMap<NodeId, f64> = nodes.iter()
                .enumerate()
                .map(|(j, &v)| (v, dist[[i, j]]))
                .collect();
            (u, row)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompressedGraph, GraphBuilder};

    fn weighted(directed: bool, edges: &[(&str, &str, f64)]) -> CompressedGraph {
        let mut builder = GraphBuilder::new(directed);
        for &(u, v, w) in edges {
            builder.add_weighted_edge(u, v, "weight", w);
        }
        builder.build()
    }

    #[test]
    fn test_dijkstra() {
        // 1->2 (10.0), 2->3 (5.0), 1->3 (50.0)
        let graph = weighted(true, &[("1", "2", 10.0), ("2", "3", 5.0), ("1", "3", 50.0)]);
        let dist = dijkstra_multisource(&graph, &[0], Some("weight"), None).unwrap();

        assert_eq!(dist[&0], 0.0);
        assert_eq!(dist[&1], 10.0);
        assert_eq!(dist[&2], 15.0);
    }

    #[test]
    fn multiple_sources_take_the_nearest() {
        // a - b - c - d, sources a and d
        let graph = weighted(false, &[("a", "b", 1.0), ("b", "c", 5.0), ("c", "d", 1.0)]);
        let dist = dijkstra_multisource(&graph, &[0, 3], Some("weight"), None).unwrap();

        assert_eq!(dist[&1], 1.0);
        assert_eq!(dist[&2], 1.0);
    }

    #[test]
    fn target_stops_the_search() {
        let graph = weighted(false, &[("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0)]);
        let dist = dijkstra_multisource(&graph, &[0], Some("weight"), Some(1)).unwrap();

        assert_eq!(dist.get(&1), Some(&1.0));
        assert!(!dist.contains_key(&3));
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let graph = weighted(true, &[("a", "b", 1.0), ("c", "a", 1.0)]);
        let dist = dijkstra_multisource(&graph, &[0], None, None).unwrap();
        assert_eq!(dist.len(), 2);
        assert!(!dist.contains_key(&2));
    }

    #[test]
    fn bad_input_is_rejected() {
        let graph = weighted(false, &[("a", "b", -1.0)]);

        assert_eq!(
            dijkstra_multisource(&graph, &[], None, None),
            Err(GraphError::EmptySources)
        );
        assert_eq!(
            dijkstra_multisource(&graph, &[5], None, None),
            Err(GraphError::NodeNotFound(5))
        );
        assert!(matches!(
            dijkstra_multisource(&graph, &[0], Some("weight"), None),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn floyd_agrees_with_dijkstra() {
        let graph = weighted(false, &[
            ("a", "b", 4.0),
            ("a", "c", 1.0),
            ("c", "b", 2.0),
            ("b", "d", 5.0),
            ("c", "d", 8.0),
        ]);
        let table = floyd(&graph, Some("weight")).unwrap();

        for source in 0..4 {
            let dist = dijkstra_multisource(&graph, &[source], Some("weight"), None).unwrap();
            assert_eq!(&table[&source], &dist);
        }
        assert_eq!(table[&0][&3], 8.0);
    }

    #[test]
    fn floyd_marks_unreachable_pairs() {
        let graph = weighted(true, &[("a", "b", 2.0)]);
        let table = floyd(&graph, Some("weight")).unwrap();

        assert_eq!(table[&0][&1], 2.0);
        assert_eq!(table[&1][&0], f64::INFINITY);
        assert_eq!(table[&1][&1], 0.0);
    }

    #[test]
    fn floyd_accepts_negative_edges_without_cycles() {
        // a->b (2), b->c (-1), a->c (4)
        let graph = weighted(true, &[("a", "b", 2.0), ("b", "c", -1.0), ("a", "c", 4.0)]);
        let table = floyd(&graph, Some("weight")).unwrap();

        assert_eq!(table[&0][&2], 1.0);
        assert_eq!(table[&1][&2], -1.0);
        assert_eq!(table[&2][&0], f64::INFINITY);
        assert!(matches!(
            dijkstra_multisource(&graph, &[0], Some("weight"), None),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn floyd_rejects_negative_cycles() {
        let graph = weighted(true, &[("a", "b", 1.0), ("b", "c", -3.0), ("c", "a", 1.0)]);
        assert!(matches!(
            floyd(&graph, Some("weight")),
            Err(GraphError::NegativeCycle(_))
        ));

        // an undirected negative edge is a two-step negative cycle
        let graph = weighted(false, &[("a", "b", -1.0)]);
        assert!(matches!(
            floyd(&graph, Some("weight")),
            Err(GraphError::NegativeCycle(_))
        ));

        let graph = weighted(true, &[("a", "b", f64::NAN)]);
        assert!(matches!(
            floyd(&graph, Some("weight")),
            Err(GraphError::InvalidWeight { .. })
        ));
    }
}
