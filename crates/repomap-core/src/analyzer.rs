//! Top-level entry point: turns a [`TagIndex`] into a flat, rank-ordered
//! list of definitions.

use std::collections::HashSet;

use crate::tag::Tag;
use crate::tag_graph::TagGraph;
use crate::tag_index::TagIndex;

/// Ranks the files in a [`TagIndex`] by PageRank and flattens their
/// definitions back into a single ordered list of [`Tag`]s.
pub struct TagAnalyzer<'a> {
    tag_index: &'a TagIndex,
    tag_graph: TagGraph,
}

impl<'a> TagAnalyzer<'a> {
    /// Every identifier that appears as a reference anywhere is treated as
    /// "mentioned" for the purposes of edge-weight boosting — there is no
    /// external prompt context at this layer, so everything referenced
    /// counts as relevant.
    pub fn new(tag_index: &'a TagIndex) -> Self {
        let mentioned_idents: HashSet<String> = tag_index.references.keys().cloned().collect();
        let tag_graph = TagGraph::from_tag_index(tag_index, &mentioned_idents);
        TagAnalyzer { tag_index, tag_graph }
    }

    pub fn tag_graph(&self) -> &TagGraph {
        &self.tag_graph
    }

    /// Definitions ordered by descending file rank, then ascending line
    /// number within each file.
    ///
    /// Falls back to every definition in the index, unordered by rank, when
    /// the graph produced no ranking at all (for example, an index with no
    /// cross-file references).
    pub fn ranked_tags(&mut self) -> Vec<Tag> {
        self.tag_graph.calculate_and_distribute_ranks();

        let sorted = self.tag_graph.sorted_definitions();
        if sorted.is_empty() {
            tracing::debug!("no ranking produced, falling back to all definitions unranked");
            return self.tag_index.all_definitions().cloned().collect();
        }
        tracing::info!("{} file(s) ranked", sorted.len());

        let mut tags = Vec::new();
        for ranked in sorted {
            let Some(node_path) = self.tag_graph.path_for_node(ranked.node) else {
                continue;
            };

            let mut file_tags: Vec<Tag> = self
                .tag_index
                .definitions_in_file(node_path)
                .cloned()
                .collect();
            file_tags.sort_by_key(|tag| tag.line);
            tags.extend(file_tags);
        }

        tags
    }
}
