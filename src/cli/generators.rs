use crate::errors::Result;
use crate::output::{json, text, OutputFormat};
use clap::Args;

#[derive(Debug, Args)]
pub struct ListGeneratorsArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &ListGeneratorsArgs) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => text::write_generators_text(&mut stdout),
        OutputFormat::Json => json::write_generators_json(&mut stdout),
    }
}
