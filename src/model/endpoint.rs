use super::path_template::is_placeholder_segment;
use serde::Serialize;
use std::path::PathBuf;

/// Path segments that carry no meaning for a method name.
const GENERIC_SEGMENTS: &[&str] = &["api", "v1", "v2", "v3", "v4", "v5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method: {s}"))
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    Form,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::Form => "form",
        };
        f.write_str(s)
    }
}

/// Source location of a route handler.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-indexed line of the `def`
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointParameter {
    pub name: String,
    /// TypeScript type name
    pub target_type: String,
    /// Annotation as written, or `unknown`
    pub source_type: String,
    pub location: ParameterLocation,
    /// Always true: optional parameters are not detected.
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointResponse {
    pub status_code: u16,
    pub target_type: String,
    pub source_type: String,
}

/// One discovered route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    /// Raw route template, placeholders kept as written
    pub path: String,
    pub method: HttpMethod,
    pub handler_name: String,
    pub parameters: Vec<EndpointParameter>,
    pub responses: Vec<EndpointResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub location: SourceLocation,
}

impl Endpoint {
    /// Client method name derived from the method and the path.
    ///
    /// Placeholder and generic segments are dropped, the rest is camel-joined
    /// behind the lower-cased method. With more than one segment left, a
    /// plural first word loses its trailing `s`. The result is not yet
    /// sanitised for the target language.
    pub fn client_method_name(&self) -> String {
        let prefix = self.method.as_str().to_lowercase();

        let segments: Vec<&str> = self
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .filter(|s| !is_placeholder_segment(s))
            .filter(|s| !GENERIC_SEGMENTS.contains(&s.to_lowercase().as_str()))
            .collect();

        if segments.is_empty() {
            return prefix;
        }

        let mut words: Vec<String> = Vec::new();
        for segment in &segments {
            let normalized = segment.replace('-', "_");
            let mut parts = normalized.split('_');
            if let Some(first) = parts.next() {
                words.push(first.to_lowercase());
            }
            words.extend(parts.map(capitalize));
        }

        if segments.len() > 1 {
            if let Some(first) = words.first_mut() {
                if first.ends_with('s') {
                    first.pop();
                }
            }
        }

        let mut name = prefix;
        for word in &words {
            name.push_str(&capitalize(word));
        }
        name
    }

    pub fn parameters_in(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &EndpointParameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method,
            handler_name: "handler".to_string(),
            parameters: vec![],
            responses: vec![],
            description: None,
            tags: vec![],
            deprecated: false,
            location: SourceLocation {
                file: PathBuf::from("app.py"),
                line: 1,
            },
        }
    }

    #[test]
    fn single_segment_is_not_singularized() {
        let name = |m: HttpMethod, p: &str| endpoint(m, p).client_method_name();
        assert_eq!(name(HttpMethod::Get, "/users"), "getUsers");
        assert_eq!(name(HttpMethod::Get, "/users/{id}"), "getUsers");
        assert_eq!(name(HttpMethod::Post, "/users"), "postUsers");
    }

    #[test]
    fn plural_first_segment_singularized_when_nested() {
        assert_eq!(
            endpoint(HttpMethod::Get, "/users/{user_id}/posts").client_method_name(),
            "getUserPosts"
        );
    }

    #[test]
    fn generic_segments_and_hyphens() {
        assert_eq!(
            endpoint(HttpMethod::Post, "/api/user-profiles").client_method_name(),
            "postUserProfiles"
        );
        assert_eq!(
            endpoint(HttpMethod::Get, "/API/V2/order_items").client_method_name(),
            "getOrderItems"
        );
    }

    #[test]
    fn flask_placeholders_are_dropped() {
        assert_eq!(
            endpoint(HttpMethod::Delete, "/users/<int:id>").client_method_name(),
            "deleteUsers"
        );
    }

    #[test]
    fn root_path_is_method_only() {
        assert_eq!(endpoint(HttpMethod::Get, "/").client_method_name(), "get");
        assert_eq!(
            endpoint(HttpMethod::Options, "").client_method_name(),
            "options"
        );
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("Get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("route".parse::<HttpMethod>().is_err());
    }
}
