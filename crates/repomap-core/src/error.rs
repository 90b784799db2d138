//! Error types shared across the ranking pipeline.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    /// Reserved for identifier-resolution failures; not produced by the
    /// current tag-extraction pipeline.
    #[error("symbol analysis error: {0}")]
    SymbolAnalysis(String),

    /// Reserved for graph-construction failures that aren't representable
    /// as an ordinary empty graph.
    #[error("graph analysis error: {0}")]
    GraphAnalysis(String),

    #[error("tree generation error: {0}")]
    TreeGeneration(String),

    #[error("filesystem error: {0}")]
    Filesystem(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
