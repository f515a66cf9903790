use crate::cli::TargetArgs;
use crate::errors::{Result, SpoutError};
use crate::generate::naming::client_method_names;
use crate::output::json::{EndpointEntry, EndpointsOutput};
use crate::output::{json, text, OutputFormat};
use clap::Args;

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &EndpointsArgs) -> Result<()> {
    let (root, config) = args.target.resolve(&args.target.overrides())?;
    let found = crate::detect_framework_with(&root, &config.scan_options(), &config.registry()?)?
        .ok_or_else(|| SpoutError::NoFrameworkDetected { path: root.clone() })?;

    let endpoints = crate::extract_endpoints(&found);
    let names = client_method_names(&endpoints);

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            text::write_endpoints_text(&mut stdout, &root, &found, &endpoints, &names)
        }
        OutputFormat::Json => {
            let output = EndpointsOutput {
                root: root.clone(),
                framework: &found,
                endpoints: endpoints
                    .iter()
                    .zip(names)
                    .map(|(endpoint, client_method)| EndpointEntry {
                        client_method,
                        endpoint,
                    })
                    .collect(),
            };
            json::write_endpoints_json(&mut stdout, &output)
        }
    }
}
