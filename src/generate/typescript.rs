//! TypeScript client emitter.

use super::naming::{client_method_names, parameter_identifiers};
use super::transport::Transport;
use super::ClientOptions;
use crate::errors::Result;
use crate::model::path_template::{pieces, Piece};
use crate::model::{Endpoint, EndpointParameter, ParameterLocation};
use crate::typemap::{self, ANY};
use std::collections::BTreeSet;
use std::io::Write;

const REQUEST_OPTIONS: &str = r#"export interface RequestOptions {
  query?: Record<string, unknown>;
  body?: unknown;
  form?: FormData;
  headers?: Record<string, string>;
}
"#;

/// A parameter and its identifier in the generated signature.
type Named<'e> = (&'e EndpointParameter, &'e str);

/// Write a complete client module for `endpoints`.
pub fn write_client(
    w: &mut dyn Write,
    endpoints: &[Endpoint],
    options: &ClientOptions,
    transport: &dyn Transport,
) -> Result<()> {
    writeln!(w, "// Generated by spout. Do not edit by hand.")?;
    writeln!(w)?;
    transport.write_imports(w)?;

    if options.include_types {
        write_type_declarations(w, endpoints)?;
    }

    w.write_all(REQUEST_OPTIONS.as_bytes())?;
    writeln!(w)?;

    writeln!(w, "export class ApiClient {{")?;
    let base_url = serde_json::to_string(&options.base_url)?;
    transport.write_constructor(w, &base_url)?;
    writeln!(w)?;
    transport.write_request_helper(w)?;

    for (endpoint, name) in endpoints.iter().zip(client_method_names(endpoints)) {
        writeln!(w)?;
        write_method(w, endpoint, &name, options.include_types)?;
    }

    writeln!(w, "}}")?;
    writeln!(w)?;
    writeln!(w, "export const apiClient = new ApiClient();")?;
    Ok(())
}

/// Distinct non-primitive types referenced by parameters or responses.
pub fn referenced_types(endpoints: &[Endpoint]) -> BTreeSet<&str> {
    let params = endpoints
        .iter()
        .flat_map(|e| e.parameters.iter().map(|p| p.target_type.as_str()));
    let responses = endpoints
        .iter()
        .flat_map(|e| e.responses.iter().map(|r| r.target_type.as_str()));
    params
        .chain(responses)
        .filter(|t| !typemap::is_primitive(t) && typemap::is_identifier(t))
        .collect()
}

fn write_type_declarations(w: &mut dyn Write, endpoints: &[Endpoint]) -> Result<()> {
    let types = referenced_types(endpoints);
    if types.is_empty() {
        return Ok(());
    }
    writeln!(w, "// Type definitions")?;
    for name in types {
        writeln!(w, "export interface {name} {{")?;
        writeln!(w, "  // TODO: declare the fields of {name}")?;
        writeln!(w, "  [key: string]: any;")?;
        writeln!(w, "}}")?;
        writeln!(w)?;
    }
    Ok(())
}

fn render_type(ts_type: &str, include_types: bool) -> &str {
    let declared = include_types && typemap::is_identifier(ts_type);
    if typemap::is_primitive(ts_type) || declared {
        ts_type
    } else {
        ANY
    }
}

fn write_method(
    w: &mut dyn Write,
    endpoint: &Endpoint,
    name: &str,
    include_types: bool,
) -> Result<()> {
    write_doc(w, endpoint)?;

    let idents = parameter_identifiers(&endpoint.parameters);
    let params: Vec<Named<'_>> = endpoint
        .parameters
        .iter()
        .zip(idents.iter().map(String::as_str))
        .collect();
    let located = |location: ParameterLocation| {
        params
            .iter()
            .filter(|(p, _)| p.location == location)
            .copied()
            .collect::<Vec<_>>()
    };

    let signature: Vec<String> = params
        .iter()
        .map(|(p, ident)| format!("{ident}: {}", render_type(&p.target_type, include_types)))
        .collect();
    let returns = endpoint
        .responses
        .first()
        .map(|r| render_type(&r.target_type, include_types))
        .unwrap_or(ANY);

    writeln!(
        w,
        "  async {name}({}): Promise<{returns}> {{",
        signature.join(", ")
    )?;

    let url = bind_path(endpoint);
    let mut option_lines: Vec<String> = Vec::new();

    let query: Vec<Named<'_>> = params
        .iter()
        .filter(|(p, _)| {
            p.location == ParameterLocation::Query
                || (p.location == ParameterLocation::Path && url.unbound.contains(&p.name.as_str()))
        })
        .copied()
        .collect();
    if !query.is_empty() {
        option_lines.push(format!("query: {}", object_literal(&query, false)));
    }

    let body = located(ParameterLocation::Body);
    let form = located(ParameterLocation::Form);
    if form.is_empty() {
        match body.as_slice() {
            [] => {}
            [(_, ident)] => option_lines.push(format!("body: {ident}")),
            several => option_lines.push(format!("body: {}", object_literal(several, false))),
        }
    } else {
        // Multipart requests carry body fields as form fields.
        writeln!(w, "    const formData = new FormData();")?;
        for (p, ident) in params.iter().filter(|(p, _)| {
            matches!(p.location, ParameterLocation::Form | ParameterLocation::Body)
        }) {
            let encoded = if p.location == ParameterLocation::Body {
                format!("JSON.stringify({ident})")
            } else {
                format!("String({ident})")
            };
            writeln!(
                w,
                "    formData.append({}, {ident} instanceof Blob ? {ident} : {encoded});",
                quote(&p.name)
            )?;
        }
        option_lines.push("form: formData".to_string());
    }

    let headers = located(ParameterLocation::Header);
    if !headers.is_empty() {
        option_lines.push(format!("headers: {}", object_literal(&headers, true)));
    }

    let call = format!(
        "this.request<{returns}>({}, `{}`",
        quote(endpoint.method.as_str()),
        url.template
    );
    if option_lines.is_empty() {
        writeln!(w, "    return {call});")?;
    } else {
        writeln!(w, "    return {call}, {{")?;
        for line in option_lines {
            writeln!(w, "      {line},")?;
        }
        writeln!(w, "    }});")?;
    }
    writeln!(w, "  }}")?;
    Ok(())
}

fn write_doc(w: &mut dyn Write, endpoint: &Endpoint) -> Result<()> {
    let mut sections: Vec<Vec<String>> = Vec::new();
    if let Some(description) = &endpoint.description {
        sections.push(description.lines().map(escape_comment).collect());
    }
    if endpoint.deprecated {
        sections.push(vec!["@deprecated".to_string()]);
    }
    sections.push(vec![escape_comment(&format!(
        "{} {}",
        endpoint.method, endpoint.path
    ))]);

    writeln!(w, "  /**")?;
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(w, "   *")?;
        }
        for line in section {
            if line.is_empty() {
                writeln!(w, "   *")?;
            } else {
                writeln!(w, "   * {line}")?;
            }
        }
    }
    writeln!(w, "   */")?;
    Ok(())
}

/// Template literal body for the request path.
struct BoundPath<'e> {
    template: String,
    /// Path parameters with no placeholder to fill
    unbound: Vec<&'e str>,
}

/// Interpolate path parameters into the route template.
///
/// Placeholders bind to the path parameter of the same name; any left over
/// take the remaining path parameters in declaration order. Placeholders with
/// nothing to bind stay in the URL as written.
fn bind_path(endpoint: &Endpoint) -> BoundPath<'_> {
    let idents = parameter_identifiers(&endpoint.parameters);
    let path_params: Vec<(&EndpointParameter, &str)> = endpoint
        .parameters
        .iter()
        .zip(idents.iter().map(String::as_str))
        .filter(|(p, _)| p.location == ParameterLocation::Path)
        .collect();
    let pieces = pieces(&endpoint.path);
    let mut used = vec![false; path_params.len()];

    let mut slots: Vec<Option<usize>> = pieces
        .iter()
        .map(|piece| match piece {
            Piece::Placeholder(ph) => {
                let i = path_params.iter().position(|(p, _)| p.name == ph.name)?;
                if used[i] {
                    None
                } else {
                    used[i] = true;
                    Some(i)
                }
            }
            Piece::Literal(_) => None,
        })
        .collect();

    for (piece, slot) in pieces.iter().zip(slots.iter_mut()) {
        if matches!(piece, Piece::Placeholder(_)) && slot.is_none() {
            if let Some(i) = used.iter().position(|u| !u) {
                used[i] = true;
                *slot = Some(i);
            }
        }
    }

    let mut template = String::new();
    for (piece, slot) in pieces.iter().zip(&slots) {
        match (piece, slot) {
            (Piece::Placeholder(_), Some(i)) => {
                let ident = path_params[*i].1;
                template.push_str(&format!("${{encodeURIComponent(String({ident}))}}"));
            }
            (Piece::Placeholder(ph), None) => template.push_str(&escape_template(ph.raw)),
            (Piece::Literal(text), _) => template.push_str(&escape_template(text)),
        }
    }

    let unbound = path_params
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|((p, _), _)| p.name.as_str())
        .collect();

    BoundPath { template, unbound }
}

/// `{ "name": ident, ... }`, values stringified for headers.
fn object_literal(params: &[Named<'_>], header_names: bool) -> String {
    let entries: Vec<String> = params
        .iter()
        .map(|(p, ident)| {
            if header_names {
                format!("{}: String({ident})", quote(&p.name.replace('_', "-")))
            } else {
                format!("{}: {ident}", quote(&p.name))
            }
        })
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}
