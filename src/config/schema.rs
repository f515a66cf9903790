use crate::errors::{Result, SpoutError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Deserializable config file. All fields are Option for layered merging.
///
/// Client settings may also sit at the top level (`{"clientType": "axios"}`),
/// the flat shape older JSON config files used; [`FileConfig::migrate_flat`]
/// moves them into `[client]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub client: ClientFileConfig,
    #[serde(default)]
    pub targeting: TargetingFileConfig,
    #[serde(default)]
    pub detection: DetectionFileConfig,

    #[serde(flatten)]
    pub flat: ClientFileConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClientFileConfig {
    #[serde(alias = "clientType")]
    pub client_type: Option<String>,
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(alias = "includeTypes")]
    pub include_types: Option<bool>,
    #[serde(alias = "outputPath", alias = "output_path")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TargetingFileConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DetectionFileConfig {
    /// Framework key → minimum confidence; keys are validated on resolve
    #[serde(default, alias = "minConfidence")]
    pub min_confidence: BTreeMap<String, f64>,
}

impl FileConfig {
    /// Load from a TOML string.
    pub fn from_toml(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load from a JSON string.
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Read a config file, JSON when the extension says so, TOML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpoutError::Config(format!("could not read {}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let mut config = if is_json {
            Self::from_json(&content).map_err(|e| {
                SpoutError::Config(format!("invalid config {}: {e}", path.display()))
            })?
        } else {
            Self::from_toml(&content).map_err(|e| {
                SpoutError::Config(format!("invalid config {}: {e}", path.display()))
            })?
        };
        config.migrate_flat();
        Ok(config)
    }

    /// Move top-level client keys into `[client]` where that section does not
    /// already set them.
    pub fn migrate_flat(&mut self) {
        let flat = std::mem::take(&mut self.flat);
        let client = &mut self.client;
        if client.client_type.is_none() {
            client.client_type = flat.client_type;
        }
        if client.base_url.is_none() {
            client.base_url = flat.base_url;
        }
        if client.include_types.is_none() {
            client.include_types = flat.include_types;
        }
        if client.output.is_none() {
            client.output = flat.output;
        }
    }
}
