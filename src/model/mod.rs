pub mod endpoint;
pub mod path_template;

pub use endpoint::{
    Endpoint, EndpointParameter, EndpointResponse, HttpMethod, ParameterLocation, SourceLocation,
};

use serde::Serialize;
use std::path::PathBuf;

/// Supported Python web frameworks.
///
/// Declaration order doubles as the tie-break order during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Framework {
    #[serde(rename = "fastapi")]
    FastApi,
    #[serde(rename = "django-ninja")]
    DjangoNinja,
    #[serde(rename = "flask")]
    Flask,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::FastApi, Framework::DjangoNinja, Framework::Flask];

    /// Stable identifier used in config files and reports.
    pub fn key(&self) -> &'static str {
        match self {
            Framework::FastApi => "fastapi",
            Framework::DjangoNinja => "django-ninja",
            Framework::Flask => "flask",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::FastApi => "FastAPI",
            Framework::DjangoNinja => "Django Ninja",
            Framework::Flask => "Flask",
        }
    }
}

impl std::str::FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fastapi" => Ok(Framework::FastApi),
            "django-ninja" | "ninja" => Ok(Framework::DjangoNinja),
            "flask" => Ok(Framework::Flask),
            _ => Err(format!("unsupported framework: {s}")),
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Outcome of a successful detection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkMatch {
    pub framework: Framework,
    /// Summed rule weights, clamped to 1.0
    pub confidence: f64,
    /// Files that contributed a signal, first-seen order, no duplicates
    pub evidence_files: Vec<PathBuf>,
}
