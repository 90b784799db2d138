//! Token-budget search and multi-file tree assembly.

use std::path::Path;

use repomap_core::error::Error;
use repomap_core::Tag;
use tree_sitter::Parser;

use crate::config::{config_for_extension, fallback_language};
use crate::tree_context::TreeContext;

const TOKENS_PER_CHAR: f64 = 0.25;

fn token_count(text: &str) -> usize {
    (text.chars().count() as f64 * TOKENS_PER_CHAR) as usize
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase())
}

/// Render one file's `lois` (0-based line indices) via [`TreeContext`],
/// falling back to the JavaScript grammar for unrecognized extensions —
/// the renderer's intentional leniency, distinct from extraction's silent
/// skip of unsupported extensions.
fn render_file(abs_path: &Path, content: &[u8], lois: &[usize]) -> Option<String> {
    let mut code = String::from_utf8_lossy(content).into_owned();
    if !code.ends_with('\n') {
        code.push('\n');
    }

    let language = extension_of(abs_path)
        .and_then(|ext| config_for_extension(&ext))
        .map(|cfg| (cfg.language_fn)())
        .unwrap_or_else(fallback_language);

    let mut parser = Parser::new();
    parser.set_language(&language).ok()?;
    let tree = parser.parse(&code, None)?;

    let mut ctx = TreeContext::new(&code);
    ctx.init(&tree);
    ctx.add_lois(lois);
    ctx.add_context();

    Some(ctx.format())
}

/// Group `tags` by `rel_path`, preserving rank order, and render each
/// group's definition lines via [`TreeContext`].
///
/// Buffers each file's `(rel_path, abs_path, lois)` and flushes on the file
/// boundary using the buffered file's own paths — the source
/// implementation this is grounded on flushes using the *next* tag's path
/// fields on transition, which is a bug; this implementation fixes it.
fn to_tree(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    let mut current: Option<(&str, &std::path::Path)> = None;
    let mut lois: Vec<usize> = Vec::new();

    let flush = |output: &mut String, rel_path: &str, abs_path: &Path, lois: &[usize]| {
        if lois.is_empty() {
            return;
        }
        let Ok(bytes) = std::fs::read(abs_path) else {
            tracing::warn!("cannot read {} for rendering: {rel_path}", abs_path.display());
            return;
        };
        let Some(rendered) = render_file(abs_path, &bytes, lois) else {
            tracing::warn!("render failed, skipping file: {rel_path}");
            return;
        };
        output.push('\n');
        output.push_str(&abs_path.to_string_lossy());
        output.push_str(":\n");
        output.push_str(&rendered);
    };

    for tag in tags {
        let this_file = (tag.rel_path.as_str(), tag.abs_path.as_path());

        match current {
            Some((rel_path, abs_path)) if rel_path != this_file.0 => {
                flush(&mut output, rel_path, abs_path, &lois);
                lois.clear();
                current = Some(this_file);
            }
            None => current = Some(this_file),
            _ => {}
        }

        if tag.line > 0 {
            lois.push(tag.line as usize - 1);
        }
    }

    if let Some((rel_path, abs_path)) = current {
        flush(&mut output, rel_path, abs_path, &lois);
    }

    output
}

/// Binary search over the ranked tag prefix length for the longest
/// rendering whose token estimate stays under `max_tokens`.
fn find_best_tree(ranked_tags: &[Tag], max_map_tokens: usize) -> String {
    let num_tags = ranked_tags.len();
    if num_tags == 0 {
        return String::new();
    }

    let mut lo: i64 = 0;
    let mut hi: i64 = num_tags as i64;
    let mut best = String::new();
    let mut best_tokens = 0usize;
    let mut mid = (max_map_tokens / 25).min(num_tags) as i64;

    while lo <= hi {
        let m = if mid == 0 { 1 } else { mid };
        let prefix_len = (m as usize).min(num_tags);
        let tree = to_tree(&ranked_tags[..prefix_len]);
        let tokens = token_count(&tree);

        if tokens < max_map_tokens && tokens > best_tokens {
            best = tree;
            best_tokens = tokens;
        }

        if tokens < max_map_tokens {
            lo = m + 1;
        } else {
            hi = m - 1;
        }
        mid = (lo + hi) / 2;
    }

    best
}

/// Render a full repository map from a ranked tag list within `token_budget`.
///
/// Falls back to rendering every tag if the binary search's best candidate
/// is empty but tags exist; returns [`Error::TreeGeneration`] only if even
/// that fails to produce output (for example, every file is unreadable).
pub fn render_repo_map(ranked_tags: &[Tag], token_budget: usize) -> Result<String, Error> {
    tracing::debug!("rendering repo map from {} tag(s), budget {token_budget} tokens", ranked_tags.len());
    let mut tree = find_best_tree(ranked_tags, token_budget);

    if tree.is_empty() && !ranked_tags.is_empty() {
        tracing::debug!("binary search produced no candidate, rendering full tag list");
        tree = to_tree(ranked_tags);
    }

    if tree.is_empty() {
        tracing::warn!("no tree generated for repo map");
        return Err(Error::TreeGeneration("no tree generated".to_string()));
    }

    tracing::info!("repo map rendered: {} tokens", token_count(&tree));
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_count_uses_quarter_char_heuristic() {
        assert_eq!(token_count("a".repeat(400).as_str()), 100);
    }

    #[test]
    fn empty_tag_list_yields_empty_tree() {
        assert_eq!(find_best_tree(&[], 1000), "");
    }
}
