//! Route template handling shared by the extractor and the generator.
//!
//! Two placeholder syntaxes are recognised:
//! - braces: `{id}`, `{file_path:path}` (FastAPI), `{int:id}` (Django Ninja)
//! - angle brackets: `<id>`, `<int:id>` (Flask)

/// Converter names that may precede or follow the placeholder name.
const CONVERTERS: &[&str] = &[
    "int", "str", "string", "float", "path", "uuid", "slug", "any",
];

/// A variable fragment inside a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Text including the delimiters, e.g. `{id}`
    pub raw: &'a str,
    pub name: &'a str,
    pub converter: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Literal(&'a str),
    Placeholder(Placeholder<'a>),
}

/// Split a template into literal runs and placeholders, in order.
pub fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;
    let bytes = template.as_bytes();

    while i < bytes.len() {
        let close = match bytes[i] {
            b'{' => b'}',
            b'<' => b'>',
            _ => {
                i += 1;
                continue;
            }
        };
        let Some(offset) = template[i + 1..].find(close as char) else {
            break;
        };
        let end = i + 1 + offset;
        let inner = &template[i + 1..end];
        if inner.is_empty() || inner.contains('/') {
            i += 1;
            continue;
        }
        if literal_start < i {
            out.push(Piece::Literal(&template[literal_start..i]));
        }
        out.push(Piece::Placeholder(parse_inner(
            &template[i..=end],
            inner,
            close == b'>',
        )));
        i = end + 1;
        literal_start = i;
    }

    if literal_start < template.len() {
        out.push(Piece::Literal(&template[literal_start..]));
    }
    out
}

/// All placeholders of a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    pieces(template)
        .into_iter()
        .filter_map(|p| match p {
            Piece::Placeholder(ph) => Some(ph),
            Piece::Literal(_) => None,
        })
        .collect()
}

/// Whether a whole path segment is a placeholder (`{x}` or `<x>`).
pub fn is_placeholder_segment(segment: &str) -> bool {
    (segment.starts_with('{') && segment.ends_with('}'))
        || (segment.starts_with('<') && segment.ends_with('>'))
}

fn parse_inner<'a>(raw: &'a str, inner: &'a str, angle: bool) -> Placeholder<'a> {
    let Some((left, right)) = inner.split_once(':') else {
        return Placeholder {
            raw,
            name: inner.trim(),
            converter: None,
        };
    };
    let (left, right) = (left.trim(), right.trim());
    // Flask always puts the converter first; brace styles disagree, so look
    // at which side is a known converter.
    let converter_first = angle || (CONVERTERS.contains(&left) && !CONVERTERS.contains(&right));
    if converter_first {
        Placeholder {
            raw,
            name: right,
            converter: Some(left),
        }
    } else {
        Placeholder {
            raw,
            name: left,
            converter: Some(right),
        }
    }
}
