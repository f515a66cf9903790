pub mod config;
pub mod detect;
pub mod endpoints;
pub mod generate;
pub mod generators;

use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{Result, SpoutError};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "spout",
    version,
    about = "Generate TypeScript API clients from Python web applications"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a TypeScript client for a project
    Generate(generate::GenerateArgs),
    /// Report which framework a project uses
    Detect(detect::DetectArgs),
    /// List the endpoints the generator would see
    Endpoints(endpoints::EndpointsArgs),
    /// List available client generators
    ListGenerators(generators::ListGeneratorsArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Detect(args) => detect::run(&args),
        Commands::Endpoints(args) => endpoints::run(&args),
        Commands::ListGenerators(args) => generators::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

/// Canonical project root. Fails with `InvalidPath` unless `path` is an
/// existing directory.
pub(crate) fn project_root(path: &Path) -> Result<PathBuf> {
    let invalid = || SpoutError::InvalidPath {
        path: path.to_path_buf(),
    };
    let root = path.canonicalize().map_err(|_| invalid())?;
    if !root.is_dir() {
        return Err(invalid());
    }
    Ok(root)
}

/// Project selection flags shared by the scanning commands.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Explicit config file (.toml or .json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl TargetArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            ..CliOverrides::default()
        }
    }

    /// Canonical root plus the configuration resolved for it.
    pub fn resolve(&self, overrides: &CliOverrides) -> Result<(PathBuf, ResolvedConfig)> {
        let root = project_root(&self.path)?;
        let config = resolve_config(&root, overrides)?;
        Ok((root, config))
    }
}
