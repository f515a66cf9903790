use crate::detect::FrameworkScore;
use crate::errors::Result;
use crate::generate::TransportKind;
use crate::model::{Endpoint, FrameworkMatch};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct DetectOutput {
    pub root: PathBuf,
    pub detected: Option<FrameworkMatch>,
    /// Every framework's score, qualifying or not
    pub scores: Vec<FrameworkScore>,
}

#[derive(Debug, Serialize)]
pub struct EndpointsOutput<'a> {
    pub root: PathBuf,
    pub framework: &'a FrameworkMatch,
    pub endpoints: Vec<EndpointEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EndpointEntry<'a> {
    pub client_method: String,
    #[serde(flatten)]
    pub endpoint: &'a Endpoint,
}

#[derive(Debug, Serialize)]
pub struct GeneratorEntry {
    pub name: TransportKind,
    pub description: &'static str,
}

pub fn write_detect_json<W: Write>(writer: &mut W, output: &DetectOutput) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_endpoints_json<W: Write>(writer: &mut W, output: &EndpointsOutput<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_generators_json<W: Write>(writer: &mut W) -> Result<()> {
    let entries: Vec<GeneratorEntry> = TransportKind::ALL
        .iter()
        .map(|k| GeneratorEntry {
            name: *k,
            description: k.description(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &entries)?;
    writeln!(writer)?;
    Ok(())
}
