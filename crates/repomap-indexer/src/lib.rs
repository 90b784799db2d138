//! Repomap Indexer — tree-sitter-backed tag extraction, scope-aware tree
//! rendering, and token-budget repository map assembly.

pub mod config;
pub mod extract;
pub mod languages;
pub mod repo_map;
pub mod tree_context;


pub use config::{config_for_extension, LanguageConfig};
pub use extract::generate_tag_index;
pub use repo_map::render_repo_map;
pub use tree_context::TreeContext;
