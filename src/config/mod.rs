pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::detect::DetectorRegistry;
use crate::errors::Result;
use crate::generate::{ClientOptions, TransportKind};
use crate::model::Framework;
use crate::walk::ScanOptions;
use provenance::{ProvenanceMap, Source};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "client.ts";

/// Fully resolved configuration, no Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Client
    /// Kept as written so an unknown kind is reported when options are built
    pub client_type: String,
    pub base_url: String,
    pub include_types: bool,
    pub output: PathBuf,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Detection
    pub min_confidence: BTreeMap<Framework, f64>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let min_confidence = DetectorRegistry::builtin()
            .definitions()
            .iter()
            .map(|d| (d.framework, d.min_confidence))
            .collect();
        let mut provenance = ProvenanceMap::new();
        let keys = [
            "client.client_type",
            "client.base_url",
            "client.include_types",
            "client.output",
            "targeting.include",
            "targeting.exclude",
        ];
        for key in keys {
            provenance.set(key, Source::Default);
        }
        for fw in Framework::ALL {
            provenance.set(format!("detection.min_confidence.{fw}"), Source::Default);
        }

        Self {
            client_type: TransportKind::Fetch.to_string(),
            base_url: String::new(),
            include_types: true,
            output: PathBuf::from(DEFAULT_OUTPUT),
            include: Vec::new(),
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            min_confidence,
            provenance,
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Include/exclude globs for the scanner, `.spoutignore` patterns folded
    /// into the excludes.
    pub fn scan_options(&self) -> ScanOptions {
        let mut exclude = self.exclude.clone();
        exclude.extend(self.ignore_patterns.iter().cloned());
        ScanOptions {
            include: self.include.clone(),
            exclude,
        }
    }

    /// Generator options. Fails with `UnsupportedClientType` for an unknown
    /// client kind.
    pub fn client_options(&self) -> Result<ClientOptions> {
        ClientOptions::new(&self.client_type, self.base_url.clone(), self.include_types)
    }

    /// Built-in detector registry with the configured thresholds applied.
    pub fn registry(&self) -> Result<DetectorRegistry> {
        self.min_confidence
            .iter()
            .try_fold(DetectorRegistry::builtin(), |registry, (fw, min)| {
                registry.with_min_confidence(*fw, *min)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpoutError;

    #[test]
    fn defaults_match_builtin_thresholds() {
        let config = ResolvedConfig::default();
        assert_eq!(config.min_confidence[&Framework::DjangoNinja], 0.4);
        assert_eq!(config.client_type, "fetch");
        assert_eq!(config.output, PathBuf::from("client.ts"));
    }

    #[test]
    fn ignore_patterns_become_excludes() {
        let config = ResolvedConfig {
            exclude: vec!["tests/**".to_string()],
            ignore_patterns: vec!["scripts/**".to_string()],
            ..ResolvedConfig::default()
        };
        assert_eq!(config.scan_options().exclude, vec!["tests/**", "scripts/**"]);
    }

    #[test]
    fn unknown_client_type_surfaces_on_options() {
        let config = ResolvedConfig {
            client_type: "superagent".to_string(),
            ..ResolvedConfig::default()
        };
        assert!(matches!(
            config.client_options(),
            Err(SpoutError::UnsupportedClientType { .. })
        ));
    }
}
