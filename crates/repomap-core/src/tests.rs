//! Integration-style tests exercising the full ranking pipeline end to end.

use repomap_core::test_utils::hub_and_spoke_index;
use repomap_core::{TagAnalyzer, TagKind};

#[test]
fn hub_file_outranks_isolated_file() {
    let idx = hub_and_spoke_index();
    let mut analyzer = TagAnalyzer::new(&idx);
    let tags = analyzer.ranked_tags();

    let lib_pos = tags.iter().position(|t| t.rel_path == "lib.rs");
    let isolated_pos = tags.iter().position(|t| t.rel_path == "isolated.rs");
    assert!(lib_pos.is_some());
    assert!(isolated_pos.is_some());
    assert!(lib_pos < isolated_pos, "hub file should rank ahead of the isolated one");
}

#[test]
fn ranked_tags_only_contains_definitions() {
    let idx = hub_and_spoke_index();
    let mut analyzer = TagAnalyzer::new(&idx);
    let tags = analyzer.ranked_tags();
    assert!(tags.iter().all(|t| t.kind == TagKind::Definition));
}

#[test]
fn every_definition_appears_exactly_once() {
    let idx = hub_and_spoke_index();
    let mut analyzer = TagAnalyzer::new(&idx);
    let tags = analyzer.ranked_tags();
    assert_eq!(tags.len(), 3);

    let mut names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Standalone", "Widget", "make_widget"]);
}

#[test]
fn single_file_repo_with_no_references_returns_its_definitions() {
    use repomap_core::test_utils::tag_index_from;
    let idx = tag_index_from(&[
        ("only.rs", "One", TagKind::Definition),
        ("only.rs", "Two", TagKind::Definition),
    ]);
    let mut analyzer = TagAnalyzer::new(&idx);
    let tags = analyzer.ranked_tags();
    assert_eq!(tags.len(), 2);
}
