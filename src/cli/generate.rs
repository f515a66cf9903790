use crate::cli::TargetArgs;
use crate::config::resolve::CliOverrides;
use crate::errors::{Result, SpoutError};
use crate::generate::generate;
use crate::parse::extract_with_progress;
use crate::walk::is_source_file;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output file for the generated client
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// HTTP transport used by the client (fetch, axios)
    #[arg(short = 'c', long)]
    pub client_type: Option<String>,

    /// Base URL baked into the client constructor
    #[arg(short = 'b', long)]
    pub base_url: Option<String>,

    /// Type every custom model as `any` instead of emitting interfaces
    #[arg(long)]
    pub no_types: bool,

    /// Print the client to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            client_type: self.client_type.clone(),
            base_url: self.base_url.clone(),
            no_types: self.no_types,
            output: self.output.clone(),
            ..self.target.overrides()
        }
    }
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let start = Instant::now();
    let (root, config) = args.target.resolve(&args.overrides())?;
    let options = config.client_options()?;

    let found = crate::detect_framework_with(&root, &config.scan_options(), &config.registry()?)?
        .ok_or_else(|| SpoutError::NoFrameworkDetected { path: root.clone() })?;

    if !args.quiet {
        eprintln!(
            "Detected {} (confidence {:.2})",
            found.framework.display_name(),
            found.confidence
        );
    }

    let source_count = found
        .evidence_files
        .iter()
        .filter(|p| is_source_file(p))
        .count();
    let progress = if !args.quiet {
        let pb = indicatif::ProgressBar::new(source_count as u64);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let endpoints = extract_with_progress(found.framework, &found.evidence_files, &|| {
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let client = generate(&endpoints, &options)?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(client.as_bytes())?;
        return Ok(());
    }

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.output, client)?;

    if !args.quiet {
        eprintln!(
            "Generated {} client with {} methods -> {} in {:.2}s",
            options.transport,
            endpoints.len(),
            config.output.display(),
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}
