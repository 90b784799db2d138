//! File-reference graph built from a [`TagIndex`], ranked by PageRank and
//! then redistributed across each file's own definitions.

use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;

use crate::digraph::DiGraph;
use crate::tag_index::TagIndex;

const DAMPING: f64 = 0.85;
const ITERATIONS: usize = 100;

fn multiplier(ident: &str, mentioned_idents: &std::collections::HashSet<String>) -> f64 {
    if mentioned_idents.contains(ident) {
        10.0
    } else if ident.starts_with('_') {
        0.1
    } else {
        1.0
    }
}

/// One file and the share of total rank it was assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedFile {
    pub node: NodeIndex,
    pub rank: f64,
}

/// Graph of files connected by identifier references, weighted and ranked.
///
/// Built once from a [`TagIndex`] via [`TagGraph::from_tag_index`], then
/// [`TagGraph::calculate_and_distribute_ranks`] fills in
/// [`TagGraph::ranked_definitions`] and [`TagGraph::sorted_definitions`].
pub struct TagGraph {
    graph: DiGraph,
    node_indices: HashMap<String, NodeIndex>,
    ranked_definitions: HashMap<NodeIndex, f64>,
    sorted_definitions: Vec<RankedFile>,
}

impl TagGraph {
    pub fn new() -> Self {
        TagGraph {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            ranked_definitions: HashMap::new(),
            sorted_definitions: Vec::new(),
        }
    }

    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    pub fn node_for_path(&self, rel_path: &str) -> Option<NodeIndex> {
        self.node_indices.get(rel_path).copied()
    }

    /// Build the graph: one node per file seen in `tag_index`, one weighted
    /// edge per (referencer, definer) pair sharing a "common" identifier
    /// (an identifier that is both defined and referenced somewhere).
    ///
    /// `mentioned_idents` boosts identifiers a caller has flagged as
    /// especially relevant (for example, ones mentioned in a chat prompt);
    /// absent that context, pass an empty set.
    pub fn from_tag_index(
        tag_index: &TagIndex,
        mentioned_idents: &std::collections::HashSet<String>,
    ) -> Self {
        let mut tg = TagGraph::new();
        tg.populate_from_tag_index(tag_index, mentioned_idents);
        tg
    }

    fn get_or_create_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path);
        self.node_indices.insert(path.to_string(), idx);
        idx
    }

    fn populate_from_tag_index(
        &mut self,
        tag_index: &TagIndex,
        mentioned_idents: &std::collections::HashSet<String>,
    ) {
        for path in tag_index.file_to_tags.keys() {
            self.get_or_create_node(path);
        }

        for ident in &tag_index.common_tags {
            let mul = multiplier(ident, mentioned_idents);
            let num_refs = tag_index.references.get(ident).map_or(0, Vec::len) as f64;
            let scaled_refs = num_refs.sqrt();

            let Some(referencers) = tag_index.references.get(ident) else {
                continue;
            };
            let Some(definers) = tag_index.defines.get(ident) else {
                continue;
            };

            for referencer in referencers {
                for definer in definers {
                    if referencer == definer {
                        continue;
                    }
                    let referencer_idx = self.get_or_create_node(referencer);
                    let definer_idx = self.get_or_create_node(definer);
                    self.graph.add_edge(referencer_idx, definer_idx, mul * scaled_refs);
                }
            }
        }
    }

    /// PageRank over [`TagGraph::graph`].
    ///
    /// Deviates from the textbook formulation: a node's new rank accumulates
    /// `rank[target] * weight` over that node's own *outgoing* edges, rather
    /// than summing contributions from each edge's source over the node's
    /// *incoming* edges. This mirrors the direction the reference
    /// implementation actually walks and is preserved intentionally so that
    /// rankings stay bit-for-bit reproducible against it.
    pub fn calculate_page_ranks(&self) -> Option<Vec<f64>> {
        let num_nodes = self.graph.num_nodes();
        if num_nodes == 0 {
            return None;
        }

        let mut ranks = vec![1.0 / num_nodes as f64; num_nodes];

        for iteration in 0..ITERATIONS {
            let mut new_ranks = vec![(1.0 - DAMPING) / num_nodes as f64; num_nodes];
            for node in self.graph.node_indices() {
                let node_pos = node.index();
                for edge in self.graph.out_edges(node) {
                    new_ranks[node_pos] += DAMPING * ranks[edge.target.index()] * edge.weight;
                }
            }
            ranks = new_ranks;
            tracing::trace!("page rank iteration {iteration} complete over {num_nodes} node(s)");
        }

        tracing::debug!("page rank converged after {ITERATIONS} iteration(s) over {num_nodes} node(s)");
        Some(ranks)
    }

    pub fn ranked_definitions(&self) -> &HashMap<NodeIndex, f64> {
        &self.ranked_definitions
    }

    pub fn sorted_definitions(&self) -> &[RankedFile] {
        &self.sorted_definitions
    }

    pub fn path_for_node(&self, node: NodeIndex) -> Option<&str> {
        self.graph.label(node)
    }

    pub fn calculate_and_distribute_ranks(&mut self) {
        let Some(ranks) = self.calculate_page_ranks() else {
            return;
        };
        self.distribute_rank(&ranks);
        self.sort_by_rank();
    }

    /// Redistribute each node's PageRank proportionally across its own
    /// outgoing edges by weight share. A node with zero total outgoing
    /// weight keeps its entire rank rather than losing it — an asymmetry
    /// with PageRank's incoming-weighted accumulation that is deliberate,
    /// not a bug (see the ranking module notes).
    fn distribute_rank(&mut self, ranks: &[f64]) {
        for src in self.graph.node_indices() {
            let src_rank = ranks[src.index()];
            let total_outgoing_weight: f64 = self.graph.out_edges(src).map(|e| e.weight).sum();

            if total_outgoing_weight == 0.0 {
                self.ranked_definitions.insert(src, src_rank);
                continue;
            }

            for edge in self.graph.out_edges(src) {
                let new_weight = src_rank * edge.weight / total_outgoing_weight;
                *self.ranked_definitions.entry(edge.target).or_insert(0.0) += new_weight;
            }
        }

        for node in self.graph.node_indices() {
            self.ranked_definitions.entry(node).or_insert(0.0);
        }
    }

    fn sort_by_rank(&mut self) {
        let mut vec: Vec<RankedFile> = self
            .ranked_definitions
            .iter()
            .map(|(&node, &rank)| RankedFile { node, rank })
            .collect();
        vec.sort_by(|a, b| b.rank.partial_cmp(&a.rank).unwrap_or(std::cmp::Ordering::Equal));
        self.sorted_definitions = vec;
    }
}

impl Default for TagGraph {
    fn default() -> Self {
        Self::new()
    }
}
