//! Rust tag query: function/struct/enum/trait definitions, plus identifier
//! and field references.
pub const TAGS_QUERY: &str = r#"
(function_item
	name: (identifier) @def.function)
(struct_item
	name: (type_identifier) @def.type)
(enum_item
	name: (type_identifier) @def.type)
(trait_item
	name: (type_identifier) @def.type)
(identifier) @ref.ident
(field_identifier) @ref.field
"#;
