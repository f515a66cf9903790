//! Python annotation → TypeScript type, and parameter location heuristics.

use crate::model::ParameterLocation;

/// Target type used when nothing better is known.
pub const ANY: &str = "any";

/// Source type recorded for parameters without an annotation.
pub const UNKNOWN_SOURCE: &str = "unknown";

const TYPE_TABLE: &[(&str, &str)] = &[
    ("str", "string"),
    ("int", "number"),
    ("float", "number"),
    ("bool", "boolean"),
    ("dict", "object"),
    ("Dict", "object"),
    ("list", "any[]"),
    ("List", "any[]"),
    ("Any", "any"),
];

const PRIMITIVES: &[&str] = &[
    "string", "number", "boolean", "any", "object", "any[]", "unknown", "void",
];

/// Map an annotation to a TypeScript type name. Never fails.
///
/// Bare identifiers outside the table pass through unchanged (custom
/// types); dotted names keep their last segment; generic subscripts map by
/// their container; everything else is `any`.
pub fn map_type(annotation: Option<&str>) -> String {
    let Some(raw) = annotation else {
        return ANY.to_string();
    };
    let text = raw.trim();

    if let Some(unquoted) = strip_quotes(text) {
        // Forward reference: "User"
        if strip_quotes(unquoted.trim()).is_some() {
            return ANY.to_string();
        }
        return map_type(Some(unquoted));
    }

    if let Some(mapped) = lookup(text) {
        return mapped.to_string();
    }

    if is_identifier(text) {
        return text.to_string();
    }

    if let Some(last) = dotted_tail(text) {
        return lookup(last).unwrap_or(last).to_string();
    }

    if let Some((container, _)) = text.split_once('[') {
        let container = container.trim();
        let container = dotted_tail(container).unwrap_or(container);
        if let Some(mapped) = lookup(container) {
            return mapped.to_string();
        }
    }

    ANY.to_string()
}

/// Whether a TypeScript type name needs no declaration.
pub fn is_primitive(ts_type: &str) -> bool {
    PRIMITIVES.contains(&ts_type)
}

/// Explicit parameter markers used as defaults, e.g. `x: str = Header()`.
pub fn marker_location(marker: &str) -> Option<ParameterLocation> {
    let name = dotted_tail(marker).unwrap_or(marker);
    match name {
        "Path" => Some(ParameterLocation::Path),
        "Query" => Some(ParameterLocation::Query),
        "Header" | "Cookie" => Some(ParameterLocation::Header),
        "Body" => Some(ParameterLocation::Body),
        "Form" | "File" | "UploadFile" => Some(ParameterLocation::Form),
        _ => None,
    }
}

/// Classify where a parameter travels. First matching rule wins:
/// explicit marker, path placeholder binding, name heuristics, custom
/// model type, then query.
pub fn classify_location(
    name: &str,
    target_type: &str,
    marker: Option<ParameterLocation>,
    path_placeholders: &[&str],
) -> ParameterLocation {
    if let Some(location) = marker {
        return location;
    }
    if path_placeholders.contains(&name) {
        return ParameterLocation::Path;
    }

    let lower = name.to_lowercase();
    if lower.contains("path") || lower.contains("id") {
        return ParameterLocation::Path;
    }
    if lower.contains("body") || lower.contains("data") {
        return ParameterLocation::Body;
    }
    if !is_primitive(target_type) {
        return ParameterLocation::Body;
    }
    ParameterLocation::Query
}

/// Python annotation implied by a Flask-style converter (`<int:id>`).
pub fn converter_annotation(converter: &str) -> Option<&'static str> {
    match converter {
        "int" => Some("int"),
        "float" => Some("float"),
        "string" | "str" | "path" | "uuid" | "slug" | "any" => Some("str"),
        _ => None,
    }
}

/// Whether `text` is a valid ASCII identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn lookup(name: &str) -> Option<&'static str> {
    TYPE_TABLE
        .iter()
        .find(|(py, _)| *py == name)
        .map(|(_, ts)| *ts)
}

fn strip_quotes(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        text.strip_prefix(q).and_then(|t| t.strip_suffix(q))
    })
}

/// `models.User` → `User`, only for dotted identifier chains.
fn dotted_tail(text: &str) -> Option<&str> {
    if !text.contains('.') {
        return None;
    }
    let mut parts = text.split('.');
    if parts.all(is_identifier) {
        text.rsplit('.').next()
    } else {
        None
    }
}
