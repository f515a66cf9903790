pub mod naming;
pub mod transport;
pub mod typescript;

pub use transport::{create_transport, AxiosTransport, FetchTransport, Transport, TransportKind};

use crate::errors::Result;
use crate::model::Endpoint;

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub transport: TransportKind,
    /// Default base URL baked into the client constructor
    pub base_url: String,
    /// Emit placeholder interfaces for custom types
    pub include_types: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            transport: TransportKind::Fetch,
            base_url: String::new(),
            include_types: true,
        }
    }
}

impl ClientOptions {
    /// Build options from a client kind name. Unknown kinds fail here, before
    /// any project is scanned.
    pub fn new(client_type: &str, base_url: impl Into<String>, include_types: bool) -> Result<Self> {
        Ok(Self {
            transport: client_type.parse()?,
            base_url: base_url.into(),
            include_types,
        })
    }
}

/// Render a complete TypeScript client module.
///
/// Output is deterministic: the same endpoints and options always produce
/// byte-identical text.
pub fn generate(endpoints: &[Endpoint], options: &ClientOptions) -> Result<String> {
    let transport = create_transport(options.transport);
    let mut buf: Vec<u8> = Vec::new();
    typescript::write_client(&mut buf, endpoints, options, transport.as_ref())?;

    tracing::info!(
        transport = %options.transport,
        methods = endpoints.len(),
        "generated client"
    );
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
