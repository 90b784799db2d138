//! CLI command implementations

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use repomap_core::{Tag, TagAnalyzer, TagIndex};
use repomap_indexer::{generate_tag_index, render_repo_map};

#[derive(Clone, Copy)]
pub enum Format {
    Text,
    Json,
}

/// Walk `root` respecting `.gitignore`, returning every regular file's
/// repo-relative path mapped to its contents.
fn walk_filesystem(root: &Path) -> anyhow::Result<HashMap<String, Vec<u8>>> {
    let mut files = HashMap::new();

    for entry in WalkBuilder::new(root).hidden(false).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("cannot read entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let rel_path = match path.strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
            Err(_) => continue,
        };

        match fs::read(path) {
            Ok(bytes) => {
                files.insert(rel_path, bytes);
            }
            Err(e) => {
                tracing::warn!("cannot read file {}: {e}", path.display());
            }
        }
    }

    Ok(files)
}

fn build_tag_index(root: &Path) -> anyhow::Result<TagIndex> {
    let files = walk_filesystem(root)?;
    tracing::debug!("found {} file(s) under {}", files.len(), root.display());
    let index = generate_tag_index(root, &files)?;
    Ok(index)
}

pub fn map(root: PathBuf, tokens: usize, format: Format) -> anyhow::Result<()> {
    let index = build_tag_index(&root)?;
    let mut analyzer = TagAnalyzer::new(&index);
    let ranked_tags = analyzer.ranked_tags();

    tracing::info!("ranked {} definition(s)", ranked_tags.len());

    let rendered = render_repo_map(&ranked_tags, tokens)?;

    match format {
        Format::Text => println!("{rendered}"),
        Format::Json => {
            let json = serde_json::json!({ "map": rendered, "token_budget": tokens });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

pub fn tags(root: PathBuf, format: Format) -> anyhow::Result<()> {
    let index = build_tag_index(&root)?;
    let mut analyzer = TagAnalyzer::new(&index);
    let ranked_tags: Vec<Tag> = analyzer.ranked_tags();

    match format {
        Format::Text => {
            for tag in &ranked_tags {
                println!("{}:{} {} ({:?})", tag.rel_path, tag.line, tag.name, tag.kind);
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked_tags)?);
        }
    }

    Ok(())
}
