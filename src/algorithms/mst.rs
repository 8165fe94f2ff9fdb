//! Minimum spanning tree algorithms
//!
//! Prim and Kruskal over undirected graphs. Disconnected graphs yield a
//! spanning forest; self-loops are ignored.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::view::finite_weight;
use crate::graph::{GraphAccess, NodeId};

/// Union-Find over dense indices for Kruskal's algorithm
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Union the sets containing x and y; false if they were already joined
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        // Attach the smaller tree under the root of the larger one
        let (big, small) = if self.size[root_x] >= self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

/// Spanning tree (or forest) as a symmetric adjacency map.
///
/// Every node of the graph has an entry, isolated nodes an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl SpanningTree {
    fn with_nodes(nodes: impl Iterator<Item = NodeId>) -> Self {
        Self {
            adjacency: nodes.map(|n| (n, BTreeMap::new())).collect(),
        }
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId, weight: f64) {
        self.adjacency.entry(u).or_default().insert(v, weight);
        self.adjacency.entry(v).or_default().insert(u, weight);
    }

    /// Tree edges as (u, v, weight) with u < v
    pub fn edges(&self) -> Vec<(NodeId, NodeId, f64)> {
        self.adjacency.iter()
            .flat_map(|(&u, row)| {
                row.iter()
                    .filter(move |(&v, _)| u < v)
                    .map(move |(&v, &w)| (u, v, w))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges().iter().map(|&(_, _, w)| w).sum()
    }
}

#[derive(Copy, Clone, PartialEq)]
struct EdgeState {
    weight: f64,
    source: NodeId,
    target: NodeId,
}

impl Eq for EdgeState {}

impl Ord for EdgeState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other.weight
            .total_cmp(&self.weight)
            .then_with(|| other.target.cmp(&self.target))
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for EdgeState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn ensure_undirected<G>(graph: &G, what: &'static str) -> GraphResult<()>
where
    G: GraphAccess + ?Sized,
{
    if graph.is_directed() {
        return Err(GraphError::NotImplemented(what));
    }
    Ok(())
}

/// Prim's algorithm, restarted from every unvisited node in node order
pub fn prim<G>(graph: &G, weight_key: Option<&str>) -> GraphResult<SpanningTree>
where
    G: GraphAccess + ?Sized,
{
    ensure_undirected(graph, "minimum spanning tree of directed graphs")?;

    let mut tree = SpanningTree::with_nodes(graph.node_ids());
    let mut visited = HashSet::new();
    let mut heap = BinaryHeap::new();

    for start in graph.node_ids() {
        if !visited.insert(start) {
            continue;
        }
        push_edges(graph, start, weight_key, &mut heap, &visited)?;

        while let Some(EdgeState { weight, source, target }) = heap.pop() {
            if !visited.insert(target) {
                continue;
            }
            tree.insert_edge(source, target, weight);
            push_edges(graph, target, weight_key, &mut heap, &visited)?;
        }
    }

    log::debug!("Prim selected {} edges", tree.edge_count());

    Ok(tree)
}

fn push_edges<G>(
    graph: &G,
    u: NodeId,
    weight_key: Option<&str>,
    heap: &mut BinaryHeap<EdgeState>,
    visited: &HashSet<NodeId>,
) -> GraphResult<()>
where
    G: GraphAccess + ?Sized,
{
    for v in graph.neighbors(u) {
        if !visited.contains(&v) {
            let weight = finite_weight(graph, u, v, weight_key)?;
            heap.push(EdgeState { weight, source: u, target: v });
        }
    }
    Ok(())
}

/// Kruskal's algorithm: lightest edges first, skipping those that close a cycle
pub fn kruskal<G>(graph: &G, weight_key: Option<&str>) -> GraphResult<SpanningTree>
where
    G: GraphAccess + ?Sized,
{
    ensure_undirected(graph, "minimum spanning tree of directed graphs")?;

    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let index: HashMap<NodeId, usize> = nodes.iter()
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();

    let mut candidates = Vec::with_capacity(graph.number_of_edges());
    for (u, v, _) in graph.adjacency() {
        // each undirected edge once, self-loops never join two sets
        if index[&u] < index[&v] {
            candidates.push((finite_weight(graph, u, v, weight_key)?, u, v));
        }
    }

    let mut sets = DisjointSets::new(nodes.len());
    let mut tree = SpanningTree::with_nodes(nodes.iter().copied());
    let mut selected = 0;

    for (weight, u, v) in candidates
        .into_iter()
        .sorted_by(|a, b| a.0.total_cmp(&b.0).then_with(|| (a.1, a.2).cmp(&(b.1, b.2))))
    {
        if sets.union(index[&u], index[&v]) {
            tree.insert_edge(u, v, weight);
            selected += 1;
            if selected + 1 == nodes.len() {
                break;
            }
        }
    }

    log::debug!("Kruskal selected {} edges", selected);

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompressedGraph, EdgeAttrs, GraphBuilder};

    fn weighted(edges: &[(&str, &str, f64)]) -> CompressedGraph {
        let mut builder = GraphBuilder::new(false);
        for &(u, v, w) in edges {
            builder.add_weighted_edge(u, v, "weight", w);
        }
        builder.build()
    }

    #[test]
    fn test_prim_mst() {
        // Triangle: 1-2 (1), 2-3 (2), 1-3 (10)
        // MST should be 1-2, 2-3. Total 3.
        let graph = weighted(&[("1", "2", 1.0), ("2", "3", 2.0), ("1", "3", 10.0)]);
        let tree = prim(&graph, Some("weight")).unwrap();

        assert_eq!(tree.total_weight(), 3.0);
        assert_eq!(tree.edges(), vec![(0, 1, 1.0), (1, 2, 2.0)]);
        assert_eq!(tree.adjacency[&1][&0], 1.0);
    }

    #[test]
    fn prim_and_kruskal_agree() {
        let graph = weighted(&[
            ("a", "b", 7.0),
            ("a", "d", 5.0),
            ("b", "c", 8.0),
            ("b", "d", 9.0),
            ("b", "e", 7.0),
            ("c", "e", 5.0),
            ("d", "e", 15.0),
            ("d", "f", 6.0),
            ("e", "f", 8.0),
            ("e", "g", 9.0),
            ("f", "g", 11.0),
        ]);
        let p = prim(&graph, Some("weight")).unwrap();
        let k = kruskal(&graph, Some("weight")).unwrap();

        assert_eq!(p.total_weight(), 39.0);
        assert_eq!(k.total_weight(), 39.0);
        assert_eq!(p.edge_count(), 6);
        assert_eq!(k.edge_count(), 6);
    }

    #[test]
    fn disconnected_graph_gives_a_forest() {
        let mut builder = GraphBuilder::new(false);
        builder.add_weighted_edge("a", "b", "weight", 1.0);
        builder.add_weighted_edge("c", "d", "weight", 2.0);
        builder.add_edge("d", "d", EdgeAttrs::new());
        builder.add_node("lonely");
        let graph = builder.build();

        for tree in [prim(&graph, Some("weight")).unwrap(), kruskal(&graph, Some("weight")).unwrap()] {
            assert_eq!(tree.edge_count(), 2);
            assert_eq!(tree.total_weight(), 3.0);
            assert!(tree.adjacency[&4].is_empty());
            assert!(!tree.adjacency[&3].contains_key(&3));
        }
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let mut builder = GraphBuilder::new(true);
        builder.add_edge("a", "b", EdgeAttrs::new());
        let graph = builder.build();

        assert!(matches!(prim(&graph, None), Err(GraphError::NotImplemented(_))));
        assert!(matches!(kruskal(&graph, None), Err(GraphError::NotImplemented(_))));
    }

    #[test]
    fn disjoint_sets_merge_once() {
        let mut sets = DisjointSets::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(1, 2));
        assert!(!sets.union(0, 2));
        assert_eq!(sets.find(0), sets.find(2));
        assert_eq!(sets.find(4), 4);
        assert_ne!(sets.find(1), sets.find(4));
    }
}
