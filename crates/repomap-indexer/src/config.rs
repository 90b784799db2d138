//! Frozen extension -> grammar/query lookup table.
//!
//! Built once on first access and never mutated afterward — the Rust
//! equivalent of `types.go`'s package-level `tsLanguages` map, but computed
//! lazily behind a `LazyLock` instead of an `init()` function.

use std::collections::HashMap;
use std::sync::LazyLock;

use tree_sitter::Language;

use crate::languages;

/// One entry in the extension table: the grammar to parse with and the
/// query string used to extract tags from it.
#[derive(Clone, Copy)]
pub struct LanguageConfig {
    pub name: &'static str,
    pub language_fn: fn() -> Language,
    pub tags_query: &'static str,
}

pub static LANGUAGE_TABLE: LazyLock<HashMap<&'static str, LanguageConfig>> = LazyLock::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "go",
        LanguageConfig {
            name: "go",
            language_fn: || tree_sitter_go::LANGUAGE.into(),
            tags_query: languages::go::TAGS_QUERY,
        },
    );
    table.insert(
        "js",
        LanguageConfig {
            name: "javascript",
            language_fn: || tree_sitter_javascript::LANGUAGE.into(),
            tags_query: languages::javascript::TAGS_QUERY,
        },
    );
    table.insert(
        "jsx",
        LanguageConfig {
            name: "javascript",
            language_fn: || tree_sitter_javascript::LANGUAGE.into(),
            tags_query: languages::javascript::TAGS_QUERY,
        },
    );
    table.insert(
        "ts",
        LanguageConfig {
            name: "typescript",
            language_fn: || tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tags_query: languages::typescript::TAGS_QUERY,
        },
    );
    table.insert(
        "tsx",
        LanguageConfig {
            name: "typescript",
            language_fn: || tree_sitter_typescript::LANGUAGE_TSX.into(),
            tags_query: languages::typescript::TAGS_QUERY,
        },
    );
    table.insert(
        "py",
        LanguageConfig {
            name: "python",
            language_fn: || tree_sitter_python::LANGUAGE.into(),
            tags_query: languages::python::TAGS_QUERY,
        },
    );
    table.insert(
        "rs",
        LanguageConfig {
            name: "rust",
            language_fn: || tree_sitter_rust::LANGUAGE.into(),
            tags_query: languages::rust::TAGS_QUERY,
        },
    );
    table.insert(
        "java",
        LanguageConfig {
            name: "java",
            language_fn: || tree_sitter_java::LANGUAGE.into(),
            tags_query: languages::java::TAGS_QUERY,
        },
    );
    table.insert(
        "c",
        LanguageConfig {
            name: "c",
            language_fn: || tree_sitter_c::LANGUAGE.into(),
            tags_query: languages::c::TAGS_QUERY,
        },
    );
    table.insert(
        "h",
        LanguageConfig {
            name: "c",
            language_fn: || tree_sitter_c::LANGUAGE.into(),
            tags_query: languages::c::TAGS_QUERY,
        },
    );
    table.insert(
        "cpp",
        LanguageConfig {
            name: "cpp",
            language_fn: || tree_sitter_cpp::LANGUAGE.into(),
            tags_query: languages::cpp::TAGS_QUERY,
        },
    );
    table.insert(
        "cc",
        LanguageConfig {
            name: "cpp",
            language_fn: || tree_sitter_cpp::LANGUAGE.into(),
            tags_query: languages::cpp::TAGS_QUERY,
        },
    );
    table.insert(
        "hpp",
        LanguageConfig {
            name: "cpp",
            language_fn: || tree_sitter_cpp::LANGUAGE.into(),
            tags_query: languages::cpp::TAGS_QUERY,
        },
    );

    table
});

/// Look up the grammar/query config for a lowercase, dot-stripped extension.
pub fn config_for_extension(ext: &str) -> Option<&'static LanguageConfig> {
    LANGUAGE_TABLE.get(ext)
}

/// The fallback grammar used by the renderer for files with an unknown
/// extension — matches `types.go`'s `renderTree` fallback to JavaScript.
pub fn fallback_language() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_and_javascript_are_present() {
        assert!(config_for_extension("go").is_some());
        assert!(config_for_extension("js").is_some());
    }

    #[test]
    fn unknown_extension_is_absent() {
        assert!(config_for_extension("xyz").is_none());
    }
}
