//! Repomap Core — tag index, file-reference graph, PageRank ranking and
//! rank distribution over a repository's extracted definitions/references.

pub mod analyzer;
pub mod digraph;
pub mod error;
pub mod tag;
pub mod tag_graph;
pub mod tag_index;

#[cfg(test)]
pub mod tests;

#[cfg(test)]
pub mod test_utils;

pub use analyzer::TagAnalyzer;
pub use digraph::{DiGraph, Edge};
pub use error::{Error, Result};
pub use tag::{Tag, TagKind};
pub use tag_graph::{RankedFile, TagGraph};
pub use tag_index::TagIndex;
