//! A minimal weighted directed multigraph over dense integer node indices.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// One outgoing edge: its destination and a scalar weight.
///
/// Multiple edges between the same pair of nodes are permitted; the caller
/// decides whether that represents distinct occurrences worth merging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub weight: f64,
}

/// A directed multigraph whose nodes are labeled by an arbitrary string.
///
/// `DiGraph` itself never deduplicates nodes by label — callers that want
/// one node per unique label (as [`crate::tag_graph::TagGraph`] does) must
/// keep their own label -> index map and look it up before calling
/// [`DiGraph::add_node`]. There is no node or edge removal; the graph only
/// grows.
#[derive(Debug, Default)]
pub struct DiGraph {
    inner: StableDiGraph<String, f64>,
}

impl DiGraph {
    pub fn new() -> Self {
        DiGraph {
            inner: StableDiGraph::new(),
        }
    }

    /// Add a node with the given label, returning its index.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIndex {
        self.inner.add_node(label.into())
    }

    /// Add a directed edge `source -> target` with the given weight.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: f64) {
        self.inner.add_edge(source, target, weight);
    }

    pub fn num_nodes(&self) -> usize {
        self.inner.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn label(&self, node: NodeIndex) -> Option<&str> {
        self.inner.node_weight(node).map(String::as_str)
    }

    /// All node indices, in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    /// All outgoing edges from `source`, in no particular order.
    pub fn out_edges(&self, source: NodeIndex) -> impl Iterator<Item = Edge> + '_ {
        self.inner
            .edges_directed(source, Direction::Outgoing)
            .map(|edge_ref| Edge {
                target: edge_ref.target(),
                weight: *edge_ref.weight(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_edges_between_same_pair_are_kept_distinct() {
        let mut g = DiGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        g.add_edge(a, b, 1.0);
        g.add_edge(a, b, 2.0);

        assert_eq!(g.num_edges(), 2);
        let weights: Vec<f64> = g.out_edges(a).map(|e| e.weight).collect();
        assert_eq!(weights.len(), 2);
        assert!(weights.contains(&1.0) && weights.contains(&2.0));
    }

    #[test]
    fn node_count_grows_with_each_add_node_call_regardless_of_label() {
        let mut g = DiGraph::new();
        g.add_node("dup");
        g.add_node("dup");
        assert_eq!(g.num_nodes(), 2);
    }
}
