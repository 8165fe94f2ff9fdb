//! Memory-efficient graph representation

use std::mem;
use serde::{Serialize, Deserialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeAttrs, GraphAccess, NodeId, NodeSelection};

/// Compressed sparse representation of a graph with per-edge attributes.
///
/// Undirected graphs store every edge in both endpoint rows with identical
/// attributes. Rows are sorted by target and free of duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Whether edges are directed
    pub directed: bool,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<usize>,

    /// Edge array: concatenated, sorted lists of target nodes
    pub targets: Vec<NodeId>,

    /// Edge attributes, aligned with `targets`
    pub attrs: Vec<EdgeAttrs>,

    /// Number of logical edges (an undirected edge counts once)
    pub edge_count: usize,

    /// Optional mapping from internal node IDs to original string labels
    pub labels: Option<Vec<String>>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, entry_count: usize, directed: bool) -> Self {
        Self {
            node_count,
            directed,
            offsets: Vec::with_capacity(node_count + 1),
            targets: Vec::with_capacity(entry_count),
            attrs: Vec::with_capacity(entry_count),
            edge_count: 0,
            labels: None,
        }
    }

    /// Get outgoing edges for a node; empty for an unknown node
    pub fn outgoing_edges(&self, node: usize) -> &[NodeId] {
        if node >= self.node_count {
            return &[];
        }
        let start = self.offsets[node];
        let end = self.offsets[node + 1];
        &self.targets[start..end]
    }

    /// Position of `src -> dst` in the edge array
    fn position(&self, src: usize, dst: NodeId) -> Option<usize> {
        if src >= self.node_count {
            return None;
        }
        self.outgoing_edges(src)
            .binary_search(&dst)
            .ok()
            .map(|i| self.offsets[src] + i)
    }

    /// Get out-degree of a node (self-loops included); 0 for an unknown node
    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing_edges(node).len()
    }

    /// Largest out-degree in the graph
    pub fn max_degree(&self) -> usize {
        (0..self.node_count).map(|n| self.out_degree(n)).max().unwrap_or(0)
    }

    /// Label of a node, falling back to its numeric id
    pub fn label(&self, node: NodeId) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(node as usize).cloned())
            .unwrap_or_else(|| node.to_string())
    }

    /// Look a node up by label; numeric strings match unlabeled ids
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        match self.labels {
            Some(ref labels) => labels.iter().position(|l| l == label).map(|i| i as NodeId),
            None => label
                .parse::<NodeId>()
                .ok()
                .filter(|&id| (id as usize) < self.node_count),
        }
    }

    /// Resolve a label to its node id
    pub fn resolve_label(&self, label: &str) -> GraphResult<NodeId> {
        self.node_by_label(label)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    /// Node selection for a list of labels: none selects every node, one
    /// label a single node, anything longer an explicit list
    pub fn selection<S: AsRef<str>>(&self, labels: &[S]) -> GraphResult<NodeSelection> {
        Ok(match labels {
            [] => NodeSelection::All,
            [single] => NodeSelection::Single(self.resolve_label(single.as_ref())?),
            many => NodeSelection::Many(
                many.iter()
                    .map(|l| self.resolve_label(l.as_ref()))
                    .collect::<GraphResult<Vec<_>>>()?,
            ),
        })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<usize>();
        let targets = self.targets.capacity() * mem::size_of::<NodeId>();

        let attrs = self.attrs.iter()
            .map(|a| {
                mem::size_of::<EdgeAttrs>()
                    + a.keys().map(|k| k.capacity() + mem::size_of::<f64>()).sum::<usize>()
            })
            .sum::<usize>();

        let labels = self.labels.as_ref()
            .map(|labels| labels.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + offsets + targets + attrs + labels
    }
}

impl GraphAccess for CompressedGraph {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn number_of_edges(&self) -> usize {
        self.edge_count
    }

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new((0..self.node_count).map(|n| n as NodeId))
    }

    fn contains_node(&self, node: NodeId) -> bool {
        (node as usize) < self.node_count
    }

    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        if !self.contains_node(node) {
            return Box::new(std::iter::empty());
        }
        Box::new(self.outgoing_edges(node as usize).iter().copied())
    }

    fn edge_attrs(&self, u: NodeId, v: NodeId) -> Option<&EdgeAttrs> {
        self.position(u as usize, v).map(|pos| &self.attrs[pos])
    }

    fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.position(u as usize, v).is_some()
    }

    fn adjacency(&self) -> Box<dyn Iterator<Item = (NodeId, NodeId, &EdgeAttrs)> + '_> {
        Box::new((0..self.node_count).flat_map(move |src| {
            let start = self.offsets[src];
            let end = self.offsets[src + 1];
            (start..end).map(move |pos| (src as NodeId, self.targets[pos], &self.attrs[pos]))
        }))
    }
}
