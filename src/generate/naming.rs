//! Identifier hygiene for generated TypeScript.

use crate::model::{Endpoint, EndpointParameter};
use std::collections::HashSet;

/// Words a TypeScript parameter may not be named, plus locals the method
/// bodies declare.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "as", "implements", "interface",
    "let", "package", "private", "protected", "public", "static", "yield", "await", "arguments",
    "eval", "formData",
];

/// Keep `[A-Za-z0-9_]`, prefix a leading digit with `method`, and fall back
/// to `unknownMethod` for an empty result.
pub fn sanitize_method_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match kept.chars().next() {
        None => "unknownMethod".to_string(),
        Some(c) if c.is_ascii_digit() => format!("method{kept}"),
        Some(_) => kept,
    }
}

/// A parameter name usable as a TypeScript identifier.
pub fn parameter_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if ident.is_empty() {
        ident.push_str("param");
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Identifiers for one handler's parameters, unique within the signature.
/// A clash gets the next free numeric suffix starting at 2.
pub fn parameter_identifiers(params: &[EndpointParameter]) -> Vec<String> {
    let mut taken = HashSet::new();
    params
        .iter()
        .map(|p| {
            let base = parameter_identifier(&p.name);
            let mut ident = base.clone();
            let mut n = 2;
            while !taken.insert(ident.clone()) {
                ident = format!("{base}{n}");
                n += 1;
            }
            ident
        })
        .collect()
}

/// Hands out unique method names in endpoint order.
#[derive(Debug, Default)]
pub struct MethodNamer {
    taken: HashSet<String>,
}

impl MethodNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first request for a name gets it unchanged; later ones get the
    /// next free numeric suffix starting at 2.
    pub fn assign(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{n}");
            if self.taken.insert(candidate.clone()) {
                tracing::warn!(
                    method = base,
                    renamed = %candidate,
                    "client method name collision"
                );
                return candidate;
            }
            n += 1;
        }
    }
}

/// Final client method names for `endpoints`, in order: derived, sanitised,
/// then made unique.
pub fn client_method_names(endpoints: &[Endpoint]) -> Vec<String> {
    let mut namer = MethodNamer::new();
    endpoints
        .iter()
        .map(|e| namer.assign(&sanitize_method_name(&e.client_method_name())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_method_names() {
        assert_eq!(sanitize_method_name("getUsers"), "getUsers");
        assert_eq!(sanitize_method_name("get.users-all"), "getusersall");
        assert_eq!(sanitize_method_name("404page"), "method404page");
        assert_eq!(sanitize_method_name("*&^"), "unknownMethod");
    }

    #[test]
    fn reserved_parameters_get_suffix() {
        assert_eq!(parameter_identifier("class"), "class_");
        assert_eq!(parameter_identifier("default"), "default_");
        assert_eq!(parameter_identifier("user_id"), "user_id");
        assert_eq!(parameter_identifier("2fa"), "_2fa");
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut namer = MethodNamer::new();
        assert_eq!(namer.assign("getUsers"), "getUsers");
        assert_eq!(namer.assign("getUsers"), "getUsers2");
        assert_eq!(namer.assign("getUsers"), "getUsers3");
        assert_eq!(namer.assign("postUsers"), "postUsers");
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let mut namer = MethodNamer::new();
        namer.assign("getItem2");
        namer.assign("getItem");
        assert_eq!(namer.assign("getItem"), "getItem3");
    }

    #[test]
    fn parameter_identifiers_never_repeat() {
        use crate::model::ParameterLocation;

        let params: Vec<EndpointParameter> = ["default", "default_", "default"]
            .iter()
            .map(|name| EndpointParameter {
                name: name.to_string(),
                target_type: "string".to_string(),
                source_type: "str".to_string(),
                location: ParameterLocation::Query,
                required: true,
                default_value: None,
                description: None,
            })
            .collect();
        assert_eq!(
            parameter_identifiers(&params),
            vec!["default_", "default_2", "default_3"]
        );
    }
}
