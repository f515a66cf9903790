//! Framework detection, route extraction and TypeScript client generation
//! for Python web applications.
//!
//! The pipeline runs in three steps: [`detect_framework`] scores a project
//! tree against the known frameworks, [`extract_endpoints`] pulls route
//! handlers out of the evidence files, and [`generate::generate`] renders
//! the client module. [`generate_client`] runs all three.

pub mod cli;
pub mod config;
pub mod detect;
pub mod errors;
pub mod generate;
pub mod model;
pub mod output;
pub mod parse;
pub mod typemap;
pub mod walk;

pub use detect::DetectorRegistry;
pub use errors::{Result, SpoutError};
pub use generate::ClientOptions;
pub use model::{Endpoint, Framework, FrameworkMatch};

use std::path::Path;
use walk::{ScanOptions, ScanSet};

/// Detect the framework of the project at `root` with the built-in detectors.
pub fn detect_framework(root: &Path) -> Result<Option<FrameworkMatch>> {
    detect_framework_with(root, &ScanOptions::default(), &DetectorRegistry::builtin())
}

/// Detect with explicit scan options and detector thresholds.
pub fn detect_framework_with(
    root: &Path,
    options: &ScanOptions,
    registry: &DetectorRegistry,
) -> Result<Option<FrameworkMatch>> {
    if !root.is_dir() {
        return Err(SpoutError::InvalidPath {
            path: root.to_path_buf(),
        });
    }
    let scan = ScanSet::scan(root, options)?;
    Ok(detect::detect(&scan, registry))
}

/// Endpoints declared in the evidence files of a detection result.
pub fn extract_endpoints(found: &FrameworkMatch) -> Vec<Endpoint> {
    parse::extract(found.framework, &found.evidence_files)
}

/// Detect, extract and render a client for the project at `root`.
pub fn generate_client(root: &Path, options: &ClientOptions) -> Result<String> {
    let found = detect_framework(root)?.ok_or_else(|| SpoutError::NoFrameworkDetected {
        path: root.to_path_buf(),
    })?;
    let endpoints = extract_endpoints(&found);
    generate::generate(&endpoints, options)
}
