//! Fixture builders for ranking-pipeline tests.

use crate::tag::{Tag, TagKind};
use crate::tag_index::TagIndex;

/// Build a [`TagIndex`] from `(rel_path, identifier, kind)` triples and run
/// [`TagIndex::post_process`] on it.
pub fn tag_index_from(entries: &[(&str, &str, TagKind)]) -> TagIndex {
    let mut idx = TagIndex::new();
    for (i, (path, name, kind)) in entries.iter().enumerate() {
        idx.add_tag(Tag::new(*path, *path, i as u32 + 1, *name, *kind));
    }
    idx.post_process();
    idx
}

/// A small repo with one "hub" file (`lib.rs`) whose definitions are
/// referenced from several other files, and one isolated file with no
/// cross-file references at all.
pub fn hub_and_spoke_index() -> TagIndex {
    tag_index_from(&[
        ("lib.rs", "Widget", TagKind::Definition),
        ("lib.rs", "make_widget", TagKind::Definition),
        ("a.rs", "Widget", TagKind::Reference),
        ("a.rs", "make_widget", TagKind::Reference),
        ("b.rs", "Widget", TagKind::Reference),
        ("isolated.rs", "Standalone", TagKind::Definition),
    ])
}
