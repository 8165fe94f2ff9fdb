//! Graph construction module

use crate::graph::{CompressedGraph, EdgeAttrs, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Builder for incrementally constructing a CompressedGraph
pub struct GraphBuilder {
    /// Whether edges are directed
    directed: bool,

    /// Mapping from string labels to node indices
    id_to_index: HashMap<String, NodeId>,

    /// Node string labels
    node_ids: Vec<String>,

    /// Adjacency rows, kept sorted by target
    adjacency_lists: Vec<BTreeMap<NodeId, EdgeAttrs>>,

    /// Logical edge count (an undirected edge counts once)
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new(directed: bool) -> Self {
        Self::with_capacity(directed, 0)
    }

    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(directed: bool, capacity: usize) -> Self {
        Self {
            directed,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Get or create a node ID for the given label
    pub fn get_or_create_node(&mut self, label: &str) -> NodeId {
        if let Some(&idx) = self.id_to_index.get(label) {
            return idx;
        }

        let idx = self.node_ids.len() as NodeId;
        self.id_to_index.insert(label.to_string(), idx);
        self.node_ids.push(label.to_string());
        self.adjacency_lists.push(BTreeMap::new());

        idx
    }

    /// Add a node without edges
    pub fn add_node(&mut self, label: &str) -> NodeId {
        self.get_or_create_node(label)
    }

    /// Add an edge; adding the same edge again merges attributes, later values win
    pub fn add_edge(&mut self, src_label: &str, dst_label: &str, attrs: EdgeAttrs) {
        let src = self.get_or_create_node(src_label);
        let dst = self.get_or_create_node(dst_label);

        let row = &mut self.adjacency_lists[src as usize];
        if !row.contains_key(&dst) {
            self.edge_count += 1;
        }
        let entry = row.entry(dst).or_default();
        entry.extend(attrs);

        if !self.directed && src != dst {
            let merged = entry.clone();
            self.adjacency_lists[dst as usize].insert(src, merged);
        }
    }

    /// Add an edge carrying a single numeric attribute
    pub fn add_weighted_edge(&mut self, src_label: &str, dst_label: &str, key: &str, weight: f64) {
        let mut attrs = EdgeAttrs::new();
        attrs.insert(key.to_string(), weight);
        self.add_edge(src_label, dst_label, attrs);
    }

    /// Build the compressed graph
    pub fn build(self) -> CompressedGraph {
        let node_count = self.node_ids.len();
        let entry_count: usize = self.adjacency_lists.iter()
            .map(|row| row.len())
            .sum();

        let mut graph = CompressedGraph::with_capacity(node_count, entry_count, self.directed);

        graph.offsets.push(0);
        for row in self.adjacency_lists {
            // BTreeMap iteration keeps each row sorted for binary search
            for (target, attrs) in row {
                graph.targets.push(target);
                graph.attrs.push(attrs);
            }
            graph.offsets.push(graph.targets.len());
        }

        graph.edge_count = self.edge_count;
        graph.labels = Some(self.node_ids);

        log::debug!(
            "Built {} graph with {} nodes and {} edges",
            if graph.directed { "directed" } else { "undirected" },
            node_count,
            graph.edge_count
        );

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphAccess;

    #[test]
    fn repeated_edges_merge_attributes() {
        let mut builder = GraphBuilder::new(false);
        builder.add_weighted_edge("a", "b", "weight", 1.0);
        builder.add_weighted_edge("b", "a", "weight", 4.0);
        builder.add_weighted_edge("a", "b", "capacity", 9.0);
        let graph = builder.build();

        assert_eq!(graph.number_of_edges(), 1);
        let attrs = graph.edge_attrs(0, 1).unwrap();
        assert_eq!(attrs.get("weight"), Some(&4.0));
        assert_eq!(attrs.get("capacity"), Some(&9.0));
        assert_eq!(graph.edge_attrs(1, 0), Some(attrs));
    }

    #[test]
    fn isolated_nodes_keep_their_ids() {
        let mut builder = GraphBuilder::new(false);
        let lonely = builder.add_node("lonely");
        builder.add_edge("a", "b", EdgeAttrs::new());

        let graph = builder.build();
        assert_eq!(graph.node_by_label("a"), Some(1));
        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.neighbors(lonely).count(), 0);
    }

    #[test]
    fn directed_edges_stay_one_way() {
        let mut builder = GraphBuilder::new(true);
        builder.add_edge("a", "b", EdgeAttrs::new());
        builder.add_edge("b", "a", EdgeAttrs::new());
        let graph = builder.build();

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.out_degree(0), 1);
    }
}
