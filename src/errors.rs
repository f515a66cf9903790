use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SpoutError {
    #[error("No supported framework detected in {path}")]
    #[diagnostic(
        code(spout::no_framework),
        help("supported frameworks: fastapi, django-ninja, flask")
    )]
    NoFrameworkDetected { path: PathBuf },

    #[error("Unsupported client type: {kind}. Available: {available}")]
    #[diagnostic(code(spout::unsupported_client_type))]
    UnsupportedClientType { kind: String, available: String },

    #[error("Not a project directory: {path}")]
    #[diagnostic(code(spout::invalid_path))]
    InvalidPath { path: PathBuf },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(spout::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(spout::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(spout::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(spout::toml))]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(code(spout::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, SpoutError>;
