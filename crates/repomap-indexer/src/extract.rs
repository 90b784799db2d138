//! Tag extraction: parse each file with its grammar, run the language's tag
//! query, and fold the results into a [`TagIndex`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use repomap_core::error::Error;
use repomap_core::{Tag, TagIndex, TagKind};
use tree_sitter::{Parser, Query, QueryCursor};

use crate::config::config_for_extension;

fn extension_of(rel_path: &str) -> Option<String> {
    Path::new(rel_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn capture_kind_and_subtag(capture_name: &str) -> Option<(&str, &str)> {
    let mut parts = capture_name.splitn(2, '.');
    let kind = parts.next()?;
    let subtag = parts.next()?;
    Some((kind, subtag))
}

fn is_ignorable_name(name: &str) -> bool {
    name.is_empty() || name.contains(['(', ')', '[', ']', '{', '}'])
}

/// Parse and tag every file in `files`, merging the results into one
/// [`TagIndex`] covering the whole repo.
///
/// `files` maps `rel_path -> file bytes`, per the core's external input
/// contract: the caller, not this function, is responsible for resolving
/// relative paths against `repo_root`. Files whose extension isn't in the
/// language table are skipped silently, per the extraction contract.
///
/// All index mutation happens while a single exclusive lock is held,
/// matching the core's one-lock-for-the-whole-batch concurrency contract —
/// this function holds it for its own full single-threaded pass, but the
/// same lock is what a concurrent caller extracting in parallel would need
/// to serialize on.
pub fn generate_tag_index(
    repo_root: &Path,
    files: &HashMap<String, Vec<u8>>,
) -> Result<TagIndex, Error> {
    let index = Mutex::new(TagIndex::new());

    {
        let mut index = index.lock().expect("tag index lock poisoned");
        for (rel_path, content) in files {
            let Some(ext) = extension_of(rel_path) else {
                tracing::debug!("no extension, skipping: {rel_path}");
                continue;
            };
            let Some(config) = config_for_extension(&ext) else {
                tracing::debug!("no language configured for .{ext}, skipping: {rel_path}");
                continue;
            };

            tracing::debug!("extracting tags from {rel_path} as {}", config.name);
            let language = (config.language_fn)();
            let mut parser = Parser::new();
            parser
                .set_language(&language)
                .map_err(|e| Error::Parse(format!("{rel_path}: unsupported grammar ({e})")))?;

            let Some(tree) = parser.parse(content, None) else {
                tracing::warn!("parse failed: {rel_path}");
                return Err(Error::Parse(format!("{rel_path}: parse failed")));
            };

            let query = Query::new(&language, config.tags_query)
                .map_err(|e| Error::Parse(format!("{rel_path}: bad query ({e})")))?;

            let mut cursor = QueryCursor::new();
            let matches = cursor.matches(&query, tree.root_node(), content.as_slice());

            let abs_path = repo_root.join(rel_path);

            for m in matches {
                for capture in m.captures {
                    let capture_name = query.capture_names()[capture.index as usize];
                    let Some((kind, _subtag)) = capture_kind_and_subtag(capture_name) else {
                        continue;
                    };

                    let name = match capture.node.utf8_text(content) {
                        Ok(text) => text.to_string(),
                        Err(_) => continue,
                    };
                    if is_ignorable_name(&name) {
                        continue;
                    }

                    let line = capture.node.start_position().row as u32 + 1;
                    let tag_kind = match kind {
                        "def" => TagKind::Definition,
                        "ref" => TagKind::Reference,
                        _ => continue,
                    };

                    index.add_tag(Tag::new(rel_path.clone(), abs_path.clone(), line, name, tag_kind));
                }
            }
        }

        index.post_process();
    }

    let index = index.into_inner().expect("tag index lock poisoned");
    tracing::info!(
        "tag extraction complete: {} file(s), {} definition(s)",
        index.file_to_tags.len(),
        index.defines.len()
    );
    Ok(index)
}
