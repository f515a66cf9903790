use crate::errors::{Result, SpoutError};
use serde::Serialize;
use std::io::Write;

/// HTTP library the generated client calls through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Fetch,
    Axios,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::Fetch, TransportKind::Axios];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Fetch => "fetch",
            TransportKind::Axios => "axios",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TransportKind::Fetch => "global fetch with URLSearchParams, no dependencies",
            TransportKind::Axios => "axios instance created with the base URL",
        }
    }

    /// Comma-separated list of every kind, for error messages.
    pub fn available() -> String {
        TransportKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::str::FromStr for TransportKind {
    type Err = SpoutError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TransportKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpoutError::UnsupportedClientType {
                kind: s.to_string(),
                available: TransportKind::available(),
            })
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parts of the client that depend on the HTTP library.
///
/// Every generated method funnels through a private
/// `request<T>(method, path, options)` helper; a transport supplies that
/// helper together with the imports and constructor it needs.
pub trait Transport {
    fn kind(&self) -> TransportKind;

    fn write_imports(&self, w: &mut dyn Write) -> Result<()>;

    /// Fields and constructor of `ApiClient`. `base_url` is already a quoted
    /// TypeScript string literal.
    fn write_constructor(&self, w: &mut dyn Write, base_url: &str) -> Result<()>;

    fn write_request_helper(&self, w: &mut dyn Write) -> Result<()>;
}

pub struct FetchTransport;

impl Transport for FetchTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Fetch
    }

    fn write_imports(&self, _w: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    fn write_constructor(&self, w: &mut dyn Write, base_url: &str) -> Result<()> {
        writeln!(w, "  private readonly baseUrl: string;")?;
        writeln!(w)?;
        writeln!(w, "  constructor(baseUrl: string = {base_url}) {{")?;
        writeln!(w, "    this.baseUrl = baseUrl.replace(/\\/+$/, \"\");")?;
        writeln!(w, "  }}")?;
        Ok(())
    }

    fn write_request_helper(&self, w: &mut dyn Write) -> Result<()> {
        w.write_all(FETCH_REQUEST.as_bytes())?;
        Ok(())
    }
}

pub struct AxiosTransport;

impl Transport for AxiosTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Axios
    }

    fn write_imports(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "import axios, {{ AxiosInstance }} from \"axios\";")?;
        writeln!(w)?;
        Ok(())
    }

    fn write_constructor(&self, w: &mut dyn Write, base_url: &str) -> Result<()> {
        writeln!(w, "  private readonly http: AxiosInstance;")?;
        writeln!(w)?;
        writeln!(w, "  constructor(baseUrl: string = {base_url}) {{")?;
        writeln!(w, "    this.http = axios.create({{ baseURL: baseUrl }});")?;
        writeln!(w, "  }}")?;
        Ok(())
    }

    fn write_request_helper(&self, w: &mut dyn Write) -> Result<()> {
        w.write_all(AXIOS_REQUEST.as_bytes())?;
        Ok(())
    }
}

/// Build the transport for a kind.
pub fn create_transport(kind: TransportKind) -> Box<dyn Transport> {
    match kind {
        TransportKind::Fetch => Box::new(FetchTransport),
        TransportKind::Axios => Box::new(AxiosTransport),
    }
}

const FETCH_REQUEST: &str = r#"  private async request<T>(
    method: string,
    path: string,
    options: RequestOptions = {},
  ): Promise<T> {
    let url = this.baseUrl + path;
    if (options.query) {
      const params = new URLSearchParams();
      for (const [key, value] of Object.entries(options.query)) {
        if (value !== undefined && value !== null) {
          params.append(key, String(value));
        }
      }
      const search = params.toString();
      if (search) {
        url += `?${search}`;
      }
    }

    const headers: Record<string, string> = { ...options.headers };
    let body: BodyInit | undefined;
    if (options.form) {
      body = options.form;
    } else if (options.body !== undefined) {
      headers["Content-Type"] = "application/json";
      body = JSON.stringify(options.body);
    }

    const response = await fetch(url, { method, headers, body });
    if (!response.ok) {
      throw new Error(`${method} ${path} failed: ${response.status} ${response.statusText}`);
    }
    if (response.status === 204) {
      return undefined as T;
    }
    return (await response.json()) as T;
  }
"#;

const AXIOS_REQUEST: &str = r#"  private async request<T>(
    method: string,
    path: string,
    options: RequestOptions = {},
  ): Promise<T> {
    const response = await this.http.request<T>({
      method,
      url: path,
      params: options.query,
      data: options.form ?? options.body,
      headers: options.headers,
    });
    return response.data;
  }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("fetch".parse::<TransportKind>().unwrap(), TransportKind::Fetch);
        assert_eq!("Axios".parse::<TransportKind>().unwrap(), TransportKind::Axios);
    }

    #[test]
    fn unknown_kind_lists_alternatives() {
        let err = "jquery".parse::<TransportKind>().unwrap_err();
        match err {
            SpoutError::UnsupportedClientType { kind, available } => {
                assert_eq!(kind, "jquery");
                assert_eq!(available, "fetch, axios");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn factory_returns_matching_transport() {
        for kind in TransportKind::ALL {
            assert_eq!(create_transport(kind).kind(), kind);
        }
    }

    #[test]
    fn axios_imports_the_library() {
        let mut out = Vec::new();
        AxiosTransport.write_imports(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("from \"axios\""));
    }
}
