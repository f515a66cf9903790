use crate::cli::project_root;
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::show::render_show;
use crate::errors::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show {
        /// Project directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show { path } => {
            let dir = path.clone().unwrap_or_else(|| PathBuf::from("."));
            let working_dir = project_root(&dir)?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            render_show(&mut std::io::stdout().lock(), &config)?;
        }
    }
    Ok(())
}
