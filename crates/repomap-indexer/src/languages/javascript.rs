//! JavaScript tag query.
//!
//! Mirrors `tag.go`'s `jsQuery` constant verbatim: function/method/class
//! definitions, plus generic identifier and property-identifier references.
pub const TAGS_QUERY: &str = r#"
(function_declaration
	name: (identifier) @def.function)
(method_definition
	name: (property_identifier) @def.method)
(class_declaration
	name: (identifier) @def.class)
(identifier) @ref.ident
(property_identifier) @ref.prop
"#;
