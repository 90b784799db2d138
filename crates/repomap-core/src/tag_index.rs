//! Aggregated indices over a batch of extracted [`Tag`]s.

use std::collections::{HashMap, HashSet};

use crate::tag::{Tag, TagKind};

/// Three inverted indices over a set of [`Tag`]s, plus the bookkeeping
/// needed to build the cross-file reference graph from them.
///
/// Mutations (via [`TagIndex::add_tag`]) are expected to happen during a
/// single extraction pass; callers that extract from multiple threads must
/// serialize those calls behind one exclusive lock (see the crate's
/// concurrency contract). Once [`TagIndex::post_process`] has run, the index
/// is read-only for the rest of the pipeline.
#[derive(Debug, Default)]
pub struct TagIndex {
    /// Identifier -> files that define it.
    pub defines: HashMap<String, HashSet<String>>,
    /// Identifier -> one entry per reference occurrence (a multiset).
    pub references: HashMap<String, Vec<String>>,
    /// (rel_path, name) -> the exact tag records.
    pub definitions: HashMap<(String, String), Vec<Tag>>,
    /// rel_path -> every identifier (def or ref) seen in that file.
    pub file_to_tags: HashMap<String, HashSet<String>>,
    /// Identifiers that are both defined and referenced somewhere.
    pub common_tags: HashSet<String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence. Call this for every tag extraction emits;
    /// call [`TagIndex::post_process`] once after the whole batch is in.
    pub fn add_tag(&mut self, tag: Tag) {
        let rel_path = tag.rel_path.clone();

        self.file_to_tags
            .entry(rel_path.clone())
            .or_default()
            .insert(tag.name.clone());

        match tag.kind {
            TagKind::Definition => {
                self.defines
                    .entry(tag.name.clone())
                    .or_default()
                    .insert(rel_path.clone());
                self.definitions
                    .entry((rel_path, tag.name.clone()))
                    .or_default()
                    .push(tag);
            }
            TagKind::Reference => {
                self.references.entry(tag.name.clone()).or_default().push(rel_path);
            }
        }
    }

    /// Degenerate-input fallback plus common-tag computation. Must run once,
    /// after all tags for the batch have been added via [`TagIndex::add_tag`].
    ///
    /// If no references were found at all, every definition is also treated
    /// as a reference at its defining file, which keeps the reference graph
    /// connected instead of empty.
    pub fn post_process(&mut self) {
        if self.references.is_empty() {
            for (name, files) in &self.defines {
                self.references
                    .insert(name.clone(), files.iter().cloned().collect());
            }
        }

        self.common_tags = self
            .defines
            .keys()
            .filter(|name| self.references.contains_key(*name))
            .cloned()
            .collect();
    }

    /// All definition tags in the index, in no particular order.
    pub fn all_definitions(&self) -> impl Iterator<Item = &Tag> {
        self.definitions.values().flatten()
    }

    /// Definition tags for one file.
    pub fn definitions_in_file<'a>(&'a self, rel_path: &'a str) -> impl Iterator<Item = &'a Tag> {
        self.definitions
            .iter()
            .filter(move |((path, _), _)| path == rel_path)
            .flat_map(|(_, tags)| tags.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(rel: &str, name: &str, line: u32) -> Tag {
        Tag::new(rel, rel, line, name, TagKind::Definition)
    }

    fn refr(rel: &str, name: &str, line: u32) -> Tag {
        Tag::new(rel, rel, line, name, TagKind::Reference)
    }

    #[test]
    fn common_tags_is_intersection_of_defines_and_references() {
        let mut idx = TagIndex::new();
        idx.add_tag(def("a.go", "Foo", 3));
        idx.add_tag(refr("b.go", "Foo", 5));
        idx.add_tag(def("a.go", "OnlyDefined", 9));
        idx.post_process();

        assert!(idx.common_tags.contains("Foo"));
        assert!(!idx.common_tags.contains("OnlyDefined"));
        assert!(idx.common_tags.is_subset(
            &idx.defines
                .keys()
                .cloned()
                .collect::<HashSet<_>>()
                .intersection(&idx.references.keys().cloned().collect())
                .cloned()
                .collect()
        ));
    }

    #[test]
    fn empty_references_fall_back_to_defines() {
        let mut idx = TagIndex::new();
        idx.add_tag(def("a.go", "Foo", 1));
        idx.add_tag(def("b.go", "Bar", 2));
        assert!(idx.references.is_empty());

        idx.post_process();

        assert_eq!(idx.references["Foo"], vec!["a.go".to_string()]);
        assert_eq!(idx.references["Bar"], vec!["b.go".to_string()]);
        assert!(idx.common_tags.contains("Foo"));
        assert!(idx.common_tags.contains("Bar"));
    }

    #[test]
    fn non_empty_references_are_not_touched_by_fallback() {
        let mut idx = TagIndex::new();
        idx.add_tag(def("a.go", "Foo", 1));
        idx.add_tag(refr("b.go", "Foo", 2));
        idx.add_tag(def("c.go", "Unreferenced", 3));
        idx.post_process();

        assert_eq!(idx.references.get("Unreferenced"), None);
    }
}
