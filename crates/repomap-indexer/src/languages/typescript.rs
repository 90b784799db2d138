//! TypeScript tag query, extending the JavaScript pattern with interfaces
//! and type aliases.
pub const TAGS_QUERY: &str = r#"
(function_declaration
	name: (identifier) @def.function)
(method_definition
	name: (property_identifier) @def.method)
(class_declaration
	name: (type_identifier) @def.class)
(interface_declaration
	name: (type_identifier) @def.type)
(type_alias_declaration
	name: (type_identifier) @def.type)
(identifier) @ref.ident
(property_identifier) @ref.prop
"#;
