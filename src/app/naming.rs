// Identifier helpers for generated C# names.

/// Used when a raw name has no usable characters left.
pub const FALLBACK_IDENTIFIER: &str = "Entity";
/// Used by `to_camel_case` when the Pascal form comes out empty.
pub const FALLBACK_PARAMETER: &str = "field";

/// Keeps letters, digits and `_`. Never returns an empty string or one starting with a digit.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if cleaned.is_empty() {
        cleaned = FALLBACK_IDENTIFIER.to_string();
    }
    if cleaned.chars().next().is_some_and(char::is_numeric) {
        cleaned.insert(0, '_');
    }
    cleaned
}

/// `order_items`, `ORDER-ITEMS` and `order items` all become `OrderItems`.
///
/// Segments written entirely in upper case are lowercased first. Mixed-case
/// segments keep their inner casing, so `OrderId` stays `OrderId`.
pub fn to_pascal_case(raw: &str) -> String {
    let joined: String = raw
        .split(['_', '-', ' '])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let normalized = if segment.chars().any(char::is_lowercase) {
                segment.to_string()
            } else {
                segment.to_lowercase()
            };
            let mut chars = normalized.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect();

    sanitize_identifier(&joined)
}

pub fn to_camel_case(raw: &str) -> String {
    let pascal = to_pascal_case(raw);
    let mut chars = pascal.chars();
    match chars.next() {
        None => FALLBACK_PARAMETER.to_string(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

// C# reserved keywords. Contextual keywords (`value`, `var`, ...) are valid parameter names.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_csharp_keyword(ident: &str) -> bool {
    CSHARP_KEYWORDS.contains(&ident)
}

/// Camel-cased parameter name, written as a verbatim identifier (`@default`)
/// when it collides with a reserved keyword.
pub fn to_parameter_name(raw: &str) -> String {
    let camel = to_camel_case(raw);
    if is_csharp_keyword(&camel) {
        format!("@{camel}")
    } else {
        camel
    }
}
