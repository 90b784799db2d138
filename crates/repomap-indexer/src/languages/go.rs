//! Go tag query.
//!
//! Mirrors `tag.go`'s `goQuery` constant verbatim: function/method/type
//! definitions, plus generic identifier and field-identifier references.
pub const TAGS_QUERY: &str = r#"
(function_declaration
	name: (identifier) @def.function)
(method_declaration
	receiver: (parameter_list)
	name: (field_identifier) @def.method)
(type_declaration
	(type_spec
		name: (type_identifier) @def.type))
(identifier) @ref.ident
(field_identifier) @ref.field
"#;
