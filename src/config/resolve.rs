use crate::config::ignore::load_spoutignore;
use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{Result, SpoutError};
use crate::model::Framework;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = ".spout.toml";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub client_type: Option<String>,
    pub base_url: Option<String>,
    pub no_types: bool,
    pub output: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/spout/config.toml)
/// 3. Project config (nearest .spout.toml walking up from project_dir)
/// 4. Explicit `--config` file
/// 5. Environment variables
/// 6. CLI overrides
pub fn resolve_config(project_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let env = |key: &str| std::env::var(key).ok();
    resolve_layers(project_dir, cli, find_user_config().as_deref(), &env)
}

/// [`resolve_config`] with the user config location and the environment
/// supplied by the caller.
pub fn resolve_layers(
    project_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<&Path>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = std::mem::take(&mut config.provenance);
    let mut loaded_files = Vec::new();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file = FileConfig::load(path)?;
        apply_file_config(&mut config, &file, Source::UserConfig(path.to_path_buf()), &mut prov)?;
        loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(project_dir) {
        let file = FileConfig::load(&path)?;
        apply_file_config(&mut config, &file, Source::ProjectConfig(path.clone()), &mut prov)?;
        loaded_files.push(path);
    }

    if let Some(path) = &cli.config_file {
        if !path.is_file() {
            return Err(SpoutError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let file = FileConfig::load(path)?;
        apply_file_config(&mut config, &file, Source::ExplicitConfig(path.clone()), &mut prov)?;
        loaded_files.push(path.clone());
    }

    apply_env_vars(&mut config, env, &mut prov)?;
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = load_spoutignore(project_dir);
    config.provenance = prov;
    config.loaded_files = loaded_files;

    tracing::debug!(
        files = config.loaded_files.len(),
        client_type = %config.client_type,
        "resolved configuration"
    );
    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spout").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    // Client
    if let Some(ref client_type) = file.client.client_type {
        config.client_type = client_type.clone();
        prov.set("client.client_type", source.clone());
    }
    if let Some(ref base_url) = file.client.base_url {
        config.base_url = base_url.clone();
        prov.set("client.base_url", source.clone());
    }
    if let Some(include_types) = file.client.include_types {
        config.include_types = include_types;
        prov.set("client.include_types", source.clone());
    }
    if let Some(ref output) = file.client.output {
        config.output = PathBuf::from(output);
        prov.set("client.output", source.clone());
    }

    // Targeting
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }

    // Detection
    for (key, min) in &file.detection.min_confidence {
        let framework = key.parse::<Framework>().map_err(|_| {
            SpoutError::Config(format!(
                "unknown framework in detection.min_confidence: {key}"
            ))
        })?;
        set_min_confidence(config, framework, *min)?;
        prov.set(format!("detection.min_confidence.{framework}"), source.clone());
    }

    Ok(())
}

fn set_min_confidence(config: &mut ResolvedConfig, framework: Framework, min: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&min) {
        return Err(SpoutError::Config(format!(
            "detection.min_confidence.{framework} must be within 0.0..=1.0, got {min}"
        )));
    }
    config.min_confidence.insert(framework, min);
    Ok(())
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    env: &dyn Fn(&str) -> Option<String>,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(val) = env("SPOUT_CLIENT_TYPE") {
        config.client_type = val;
        prov.set("client.client_type", Source::EnvVar("SPOUT_CLIENT_TYPE".into()));
    }
    if let Some(val) = env("SPOUT_BASE_URL") {
        config.base_url = val;
        prov.set("client.base_url", Source::EnvVar("SPOUT_BASE_URL".into()));
    }
    if let Some(val) = env("SPOUT_INCLUDE_TYPES") {
        config.include_types = parse_bool(&val).ok_or_else(|| {
            SpoutError::Config(format!("SPOUT_INCLUDE_TYPES must be true or false, got {val}"))
        })?;
        prov.set(
            "client.include_types",
            Source::EnvVar("SPOUT_INCLUDE_TYPES".into()),
        );
    }
    if let Some(val) = env("SPOUT_OUTPUT") {
        config.output = PathBuf::from(val);
        prov.set("client.output", Source::EnvVar("SPOUT_OUTPUT".into()));
    }
    if let Some(val) = env("SPOUT_INCLUDE") {
        config.include = split_list(&val);
        prov.set("targeting.include", Source::EnvVar("SPOUT_INCLUDE".into()));
    }
    if let Some(val) = env("SPOUT_EXCLUDE") {
        config.exclude = split_list(&val);
        prov.set("targeting.exclude", Source::EnvVar("SPOUT_EXCLUDE".into()));
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(ref client_type) = cli.client_type {
        config.client_type = client_type.clone();
        prov.set("client.client_type", Source::CliFlag("--client-type".into()));
    }
    if let Some(ref base_url) = cli.base_url {
        config.base_url = base_url.clone();
        prov.set("client.base_url", Source::CliFlag("--base-url".into()));
    }
    if cli.no_types {
        config.include_types = false;
        prov.set("client.include_types", Source::CliFlag("--no-types".into()));
    }
    if let Some(ref output) = cli.output {
        config.output = output.clone();
        prov.set("client.output", Source::CliFlag("--output".into()));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include".into()));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude".into()));
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
