use crate::config::ResolvedConfig;
use crate::model::Framework;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }

    if !config.ignore_patterns.is_empty() {
        writeln!(w)?;
        writeln!(w, "Ignore patterns (.spoutignore):")?;
        for pattern in &config.ignore_patterns {
            writeln!(w, "  {pattern}")?;
        }
    }

    Ok(())
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    if let Some(fw) = key.strip_prefix("detection.min_confidence.") {
        return fw
            .parse::<Framework>()
            .ok()
            .and_then(|fw| config.min_confidence.get(&fw))
            .map_or("(unknown)".to_string(), |v| v.to_string());
    }
    match key {
        "client.client_type" => config.client_type.clone(),
        "client.base_url" => {
            if config.base_url.is_empty() {
                "(relative)".to_string()
            } else {
                config.base_url.clone()
            }
        }
        "client.include_types" => config.include_types.to_string(),
        "client.output" => config.output.display().to_string(),
        "targeting.include" => format!("{:?}", config.include),
        "targeting.exclude" => format!("{:?}", config.exclude),
        _ => "(unknown)".to_string(),
    }
}
