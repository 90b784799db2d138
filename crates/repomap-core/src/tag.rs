//! A single definition/reference occurrence and its kind.

use std::path::PathBuf;

use serde::Serialize;

/// Whether a [`Tag`] marks where an identifier is defined or merely used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Definition,
    Reference,
}

/// One occurrence of an identifier in a source file.
///
/// Two tags are equal iff all five fields match; tags are immutable once
/// emitted by extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    /// Path relative to the repo root, forward-slash normalized.
    pub rel_path: String,
    /// Path as provided by the caller's file map.
    pub abs_path: PathBuf,
    /// 1-based source line.
    pub line: u32,
    pub name: String,
    pub kind: TagKind,
}

impl Tag {
    pub fn new(
        rel_path: impl Into<String>,
        abs_path: impl Into<PathBuf>,
        line: u32,
        name: impl Into<String>,
        kind: TagKind,
    ) -> Self {
        Tag {
            rel_path: rel_path.into(),
            abs_path: abs_path.into(),
            line,
            name: name.into(),
            kind,
        }
    }
}
