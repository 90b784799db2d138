//! C++ tag query: the C pattern plus class definitions.
pub const TAGS_QUERY: &str = r#"
(function_definition
	declarator: (function_declarator
		declarator: (identifier) @def.function))
(struct_specifier
	name: (type_identifier) @def.type)
(class_specifier
	name: (type_identifier) @def.class)
(identifier) @ref.ident
(field_identifier) @ref.field
"#;
