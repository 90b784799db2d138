//! C tag query: function/struct definitions, plus identifier and field
//! references.
pub const TAGS_QUERY: &str = r#"
(function_definition
	declarator: (function_declarator
		declarator: (identifier) @def.function))
(struct_specifier
	name: (type_identifier) @def.type)
(identifier) @ref.ident
(field_identifier) @ref.field
"#;
