//! Python tag query: function/class definitions, plus identifier and
//! attribute references.
pub const TAGS_QUERY: &str = r#"
(function_definition
	name: (identifier) @def.function)
(class_definition
	name: (identifier) @def.class)
(identifier) @ref.ident
(attribute
	attribute: (identifier) @ref.field)
"#;
