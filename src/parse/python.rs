use super::convention::RouteConvention;
use crate::model::path_template::{placeholders, Placeholder};
use crate::model::{
    Endpoint, EndpointParameter, EndpointResponse, Framework, HttpMethod, SourceLocation,
};
use crate::typemap;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Every function that carries at least one decorator, at any depth.
const HANDLER_QUERY: &str = r#"(decorated_definition definition: (function_definition) @handler)"#;

/// Keyword arguments the extractor reads off a route decorator.
const STATUS_KEYWORD: &str = "status_code";
const METHODS_KEYWORD: &str = "methods";
const TAGS_KEYWORD: &str = "tags";
const DEPRECATED_KEYWORD: &str = "deprecated";
const SUMMARY_KEYWORDS: &[&str] = &["summary", "description"];

/// Default-value calls that inject a dependency instead of reading the request.
const DEPENDENCY_MARKERS: &[&str] = &["Depends", "Security"];

const DEFAULT_STATUS: u16 = 200;

/// Route extractor for one framework. Holds a tree-sitter parser, so each
/// worker thread needs its own.
pub struct PythonRouteParser {
    framework: Framework,
    parser: Parser,
    query: Query,
}

impl PythonRouteParser {
    pub fn new(framework: Framework) -> Self {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .expect("failed to set Python language");
        let query =
            Query::new(&language, HANDLER_QUERY).expect("failed to compile Python handler query");
        Self {
            framework,
            parser,
            query,
        }
    }

    /// Extract the endpoints declared in one source file.
    ///
    /// Returns `None` when the file does not parse cleanly; a tree with error
    /// nodes is treated the same as no tree at all.
    pub fn extract(&mut self, source: &str, file: &Path) -> Option<Vec<Endpoint>> {
        let tree = self.parser.parse(source, None)?;
        if tree.root_node().has_error() {
            return None;
        }

        let src = source.as_bytes();
        let convention = self.framework.convention();
        let mut endpoints = Vec::new();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), src);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let function = capture.node;
                let Some(decorated) = function.parent() else {
                    continue;
                };
                collect_handler(decorated, function, src, file, convention, &mut endpoints);
            }
        }

        Some(endpoints)
    }
}

/// A route decorator reduced to the parts the endpoint needs.
#[derive(Debug, Default)]
struct RouteDecorator {
    methods: Vec<HttpMethod>,
    path: String,
    response: Option<EndpointResponse>,
    tags: Vec<String>,
    deprecated: bool,
    summary: Option<String>,
}

fn collect_handler(
    decorated: Node,
    function: Node,
    src: &[u8],
    file: &Path,
    convention: &RouteConvention,
    out: &mut Vec<Endpoint>,
) {
    let routes: Vec<RouteDecorator> = {
        let mut cursor = decorated.walk();
        decorated
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "decorator")
            .filter_map(|decorator| route_decorator(decorator, src, convention))
            .collect()
    };
    if routes.is_empty() {
        return;
    }

    let handler_name = function
        .child_by_field_name("name")
        .map(|n| text(n, src).to_string())
        .unwrap_or_default();
    let line = function.start_position().row + 1;
    let docstring = docstring(function, src);

    for route in routes {
        let parameters = handler_parameters(function, src, convention, &route.path);
        let description = docstring.clone().or_else(|| route.summary.clone());
        for method in &route.methods {
            out.push(Endpoint {
                path: route.path.clone(),
                method: *method,
                handler_name: handler_name.clone(),
                parameters: parameters.clone(),
                responses: route.response.iter().cloned().collect(),
                description: description.clone(),
                tags: route.tags.clone(),
                deprecated: route.deprecated,
                location: SourceLocation {
                    file: file.to_path_buf(),
                    line,
                },
            });
        }
    }
}

/// Recognise `<object>.<name>(<args>)` where `<name>` is an HTTP method or
/// the framework's multi-method decorator.
fn route_decorator(
    decorator: Node,
    src: &[u8],
    convention: &RouteConvention,
) -> Option<RouteDecorator> {
    let call = decorator.named_child(0)?;
    if call.kind() != "call" {
        return None;
    }
    let function = call.child_by_field_name("function")?;
    if function.kind() != "attribute" {
        return None;
    }
    let name = text(function.child_by_field_name("attribute")?, src);
    let arguments = call.child_by_field_name("arguments")?;
    if arguments.kind() != "argument_list" {
        return None;
    }
    let args = Arguments::collect(arguments, src);

    let methods = if let Ok(method) = name.parse::<HttpMethod>() {
        vec![method]
    } else if convention.multi_method_decorator == Some(name) {
        match args.keyword(METHODS_KEYWORD) {
            Some(list) => method_list(list, src),
            None => vec![HttpMethod::Get],
        }
    } else {
        return None;
    };

    let path_node = args.positional.first().copied().or_else(|| {
        convention
            .path_keywords
            .iter()
            .find_map(|kw| args.keyword(kw))
    })?;
    let Some(path) = string_literal(path_node, src) else {
        tracing::debug!(
            decorator = name,
            line = decorator.start_position().row + 1,
            "skipping route with a non-literal path"
        );
        return None;
    };

    let response = convention
        .response_keyword
        .and_then(|kw| args.keyword(kw))
        .map(|model| {
            let source_type = text(model, src).to_string();
            EndpointResponse {
                status_code: args
                    .keyword(STATUS_KEYWORD)
                    .filter(|n| n.kind() == "integer")
                    .and_then(|n| text(n, src).parse().ok())
                    .unwrap_or(DEFAULT_STATUS),
                target_type: typemap::map_type(Some(&source_type)),
                source_type,
            }
        });

    Some(RouteDecorator {
        methods,
        path,
        response,
        tags: args
            .keyword(TAGS_KEYWORD)
            .map(|list| string_elements(list, src))
            .unwrap_or_default(),
        deprecated: args
            .keyword(DEPRECATED_KEYWORD)
            .is_some_and(|n| n.kind() == "true"),
        summary: SUMMARY_KEYWORDS
            .iter()
            .find_map(|kw| args.keyword(kw))
            .and_then(|n| string_literal(n, src)),
    })
}

/// Positional and keyword arguments of a call, splats dropped.
struct Arguments<'tree> {
    positional: Vec<Node<'tree>>,
    keywords: Vec<(&'tree str, Node<'tree>)>,
}

impl<'tree> Arguments<'tree> {
    fn collect(list: Node<'tree>, src: &'tree [u8]) -> Self {
        let mut positional = Vec::new();
        let mut keywords = Vec::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            match child.kind() {
                "keyword_argument" => {
                    if let (Some(name), Some(value)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("value"),
                    ) {
                        keywords.push((text(name, src), value));
                    }
                }
                "comment" | "list_splat" | "dictionary_splat" => {}
                _ => positional.push(child),
            }
        }
        Self {
            positional,
            keywords,
        }
    }

    fn keyword(&self, name: &str) -> Option<Node<'tree>> {
        self.keywords
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }
}

/// `methods=["GET", "POST"]`, unknown verbs and duplicates dropped.
fn method_list(list: Node, src: &[u8]) -> Vec<HttpMethod> {
    let mut methods = Vec::new();
    for verb in string_elements(list, src) {
        match verb.parse::<HttpMethod>() {
            Ok(m) if !methods.contains(&m) => methods.push(m),
            Ok(_) => {}
            Err(e) => tracing::debug!("{e}"),
        }
    }
    methods
}

/// String literals of a list or tuple expression.
fn string_elements(node: Node, src: &[u8]) -> Vec<String> {
    if !matches!(node.kind(), "list" | "tuple") {
        return Vec::new();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|n| string_literal(n, src))
        .collect()
}

/// Contents of a plain string literal.
///
/// f-strings, byte strings, interpolations and implicit concatenations are
/// rejected. Escape sequences are kept as written.
fn string_literal(node: Node, src: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut raw = false;
    let mut content = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "string_start" => {
                let prefix = text(child, src)
                    .trim_end_matches(['"', '\''])
                    .to_ascii_lowercase();
                if prefix.contains(['f', 'b']) {
                    return None;
                }
                raw = prefix.contains('r');
            }
            "string_content" | "escape_sequence" => content.push_str(text(child, src)),
            "interpolation" => return None,
            _ => {}
        }
    }
    if raw {
        Some(content)
    } else {
        Some(decode_escapes(&content))
    }
}

/// Decode the simple backslash escapes of a non-raw Python string. Unknown
/// escapes are kept as written, as Python does.
fn decode_escapes(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn handler_parameters(
    function: Node,
    src: &[u8],
    convention: &RouteConvention,
    path: &str,
) -> Vec<EndpointParameter> {
    let Some(params) = function.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let path_placeholders = placeholders(path);
    let placeholder_names: Vec<&str> = path_placeholders.iter().map(|p| p.name).collect();

    let mut out = Vec::new();
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        let Some((name, annotation, default)) = split_parameter(param, src) else {
            continue;
        };
        if convention.is_implicit(name) {
            continue;
        }

        let marker_call = default
            .filter(|d| d.kind() == "call")
            .and_then(|d| d.child_by_field_name("function"))
            .map(|f| text(f, src));
        if marker_call.is_some_and(is_dependency_marker) {
            continue;
        }

        let annotation =
            annotation.or_else(|| converter_annotation(&path_placeholders, name));
        let target_type = typemap::map_type(annotation);
        let location = typemap::classify_location(
            name,
            &target_type,
            marker_call.and_then(typemap::marker_location),
            &placeholder_names,
        );

        out.push(EndpointParameter {
            name: name.to_string(),
            target_type,
            source_type: annotation.unwrap_or(typemap::UNKNOWN_SOURCE).to_string(),
            location,
            required: true,
            default_value: default.map(|d| text(d, src).to_string()),
            description: None,
        });
    }
    out
}

/// Name, annotation and default of a declared parameter. Splats and the
/// bare `*` / `/` separators yield `None`.
fn split_parameter<'tree>(
    param: Node<'tree>,
    src: &'tree [u8],
) -> Option<(&'tree str, Option<&'tree str>, Option<Node<'tree>>)> {
    match param.kind() {
        "identifier" => Some((text(param, src), None, None)),
        "typed_parameter" => {
            let name = param.named_child(0).filter(|n| n.kind() == "identifier")?;
            let annotation = param.child_by_field_name("type").map(|t| text(t, src));
            Some((text(name, src), annotation, None))
        }
        "default_parameter" | "typed_default_parameter" => {
            let name = param
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")?;
            let annotation = param.child_by_field_name("type").map(|t| text(t, src));
            Some((text(name, src), annotation, param.child_by_field_name("value")))
        }
        _ => None,
    }
}

fn is_dependency_marker(call: &str) -> bool {
    let tail = call.rsplit('.').next().unwrap_or(call);
    DEPENDENCY_MARKERS.contains(&tail)
}

fn converter_annotation(placeholders: &[Placeholder<'_>], name: &str) -> Option<&'static str> {
    placeholders
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.converter)
        .and_then(typemap::converter_annotation)
}

fn docstring(function: Node, src: &[u8]) -> Option<String> {
    let body = function.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = first.named_child(0)?;
    clean_docstring(&string_literal(literal, src)?)
}

/// Dedent a docstring the way `inspect.cleandoc` does: the first line is
/// left-trimmed, the common indentation of the rest is removed, and blank
/// lines at either end are dropped.
fn clean_docstring(raw: &str) -> Option<String> {
    let lines: Vec<String> = raw.lines().map(expand_indent_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let line = if i == 0 {
            line.trim_start()
        } else {
            strip_chars(line, margin)
        };
        cleaned.push(line.trim_end());
    }

    while cleaned.first().is_some_and(|l| l.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("\n"))
    }
}

/// Tabs in the leading indentation count as eight columns.
fn expand_indent_tabs(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    format!("{}{body}", indent.replace('\t', "        "))
}

/// `line` without its first `n` characters.
fn strip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((at, _)) => &line[at..],
        None => "",
    }
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}
