use crate::cli::TargetArgs;
use crate::detect::{detect, score_all};
use crate::errors::{Result, SpoutError};
use crate::output::json::DetectOutput;
use crate::output::{json, text, OutputFormat};
use crate::walk::ScanSet;
use clap::Args;

#[derive(Debug, Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Print the detection report. Exits with `NoFrameworkDetected` after
/// printing when no framework qualifies.
pub fn run(args: &DetectArgs) -> Result<()> {
    let (root, config) = args.target.resolve(&args.target.overrides())?;
    let registry = config.registry()?;
    let scan = ScanSet::scan(&root, &config.scan_options())?;

    let output = DetectOutput {
        detected: detect(&scan, &registry),
        scores: score_all(&scan, &registry),
        root: root.clone(),
    };

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => text::write_detect_text(&mut stdout, &output)?,
        OutputFormat::Json => json::write_detect_json(&mut stdout, &output)?,
    }

    if output.detected.is_none() {
        return Err(SpoutError::NoFrameworkDetected { path: root });
    }
    Ok(())
}
