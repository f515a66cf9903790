use crate::errors::Result;
use crate::generate::TransportKind;
use crate::model::{Endpoint, FrameworkMatch, ParameterLocation};
use crate::output::display_path;
use crate::output::json::DetectOutput;
use std::io::Write;
use std::path::Path;

/// Evidence files listed before the remainder is summarised.
const EVIDENCE_SHOWN: usize = 5;

pub fn write_detect_text<W: Write>(writer: &mut W, output: &DetectOutput) -> Result<()> {
    let Some(found) = &output.detected else {
        writeln!(writer, "No supported framework detected")?;
        writeln!(writer, "Supported frameworks: FastAPI, Django Ninja, Flask")?;
        return Ok(());
    };

    writeln!(
        writer,
        "Framework detected: {}",
        found.framework.display_name()
    )?;
    writeln!(writer, "   Confidence: {:.2}", found.confidence)?;
    writeln!(writer, "   Files: {}", found.evidence_files.len())?;

    if !found.evidence_files.is_empty() {
        writeln!(writer, "   Detected in:")?;
        for file in found.evidence_files.iter().take(EVIDENCE_SHOWN) {
            writeln!(writer, "     - {}", display_path(&output.root, file))?;
        }
        if found.evidence_files.len() > EVIDENCE_SHOWN {
            writeln!(
                writer,
                "     ... and {} more",
                found.evidence_files.len() - EVIDENCE_SHOWN
            )?;
        }
    }
    Ok(())
}

pub fn write_endpoints_text<W: Write>(
    writer: &mut W,
    root: &Path,
    framework: &FrameworkMatch,
    endpoints: &[Endpoint],
    method_names: &[String],
) -> Result<()> {
    writeln!(
        writer,
        "{} endpoints ({}): {}",
        framework.framework.display_name(),
        root.display(),
        endpoints.len()
    )?;
    writeln!(writer, "{:-<72}", "")?;

    for (endpoint, name) in endpoints.iter().zip(method_names) {
        let deprecated = if endpoint.deprecated {
            "  [deprecated]"
        } else {
            ""
        };
        writeln!(
            writer,
            "{:<7} {:<40} {}{}",
            endpoint.method.as_str(),
            endpoint.path,
            name,
            deprecated
        )?;
        writeln!(
            writer,
            "        {}:{} {}()",
            display_path(root, &endpoint.location.file),
            endpoint.location.line,
            endpoint.handler_name
        )?;
        for param in &endpoint.parameters {
            writeln!(
                writer,
                "          {:<7} {}: {}",
                location_label(param.location),
                param.name,
                param.target_type
            )?;
        }
        if let Some(response) = endpoint.responses.first() {
            writeln!(
                writer,
                "          -> {} {}",
                response.status_code, response.target_type
            )?;
        }
    }
    Ok(())
}

pub fn write_generators_text<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Available TypeScript client generators:")?;
    for kind in TransportKind::ALL {
        writeln!(writer, "  - {}: {}", kind, kind.description())?;
    }
    Ok(())
}

fn location_label(location: ParameterLocation) -> String {
    format!("[{location}]")
}
