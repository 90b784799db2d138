//! Java tag query: method/class/interface definitions, plus identifier
//! references.
pub const TAGS_QUERY: &str = r#"
(method_declaration
	name: (identifier) @def.method)
(class_declaration
	name: (identifier) @def.class)
(interface_declaration
	name: (identifier) @def.class)
(identifier) @ref.ident
(field_access
	field: (identifier) @ref.field)
"#;
