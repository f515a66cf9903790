pub mod rules;

pub use rules::{builtin_definitions, FrameworkDefinition, SignalKind, SignalRule};

use crate::errors::{Result, SpoutError};
use crate::model::{Framework, FrameworkMatch};
use crate::walk::ScanSet;
use serde::Serialize;
use std::path::PathBuf;

/// The framework definitions consulted by [`detect`].
///
/// Built once at start-up (built-ins plus configured thresholds) and passed
/// down explicitly.
#[derive(Debug, Clone)]
pub struct DetectorRegistry {
    definitions: Vec<FrameworkDefinition>,
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DetectorRegistry {
    pub fn builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    pub fn new(definitions: Vec<FrameworkDefinition>) -> Self {
        Self { definitions }
    }

    /// Override the minimum confidence for one framework.
    pub fn with_min_confidence(mut self, framework: Framework, min: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&min) {
            return Err(SpoutError::Config(format!(
                "detection.min_confidence.{framework} must be within 0.0..=1.0, got {min}"
            )));
        }
        for def in self.definitions.iter_mut().filter(|d| d.framework == framework) {
            def.min_confidence = min;
        }
        Ok(self)
    }

    pub fn definitions(&self) -> &[FrameworkDefinition] {
        &self.definitions
    }
}

/// Accumulated score of one framework, qualifying or not.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkScore {
    pub framework: Framework,
    pub confidence: f64,
    pub min_confidence: f64,
    pub evidence_files: Vec<PathBuf>,
}

impl FrameworkScore {
    pub fn qualifies(&self) -> bool {
        self.confidence >= self.min_confidence
    }
}

/// Score a single framework definition against a scan.
///
/// Each rule adds its weight once if it matches at least one file; every
/// matching file is recorded as evidence, first-seen order.
pub fn score(definition: &FrameworkDefinition, scan: &ScanSet) -> FrameworkScore {
    let mut confidence = 0.0;
    let mut evidence_files: Vec<PathBuf> = Vec::new();

    for rule in &definition.rules {
        let matched = rule.matching_files(scan);
        if matched.is_empty() {
            continue;
        }
        confidence += rule.weight;
        for path in matched {
            if !evidence_files.iter().any(|p| p == path) {
                evidence_files.push(path.to_path_buf());
            }
        }
    }

    FrameworkScore {
        framework: definition.framework,
        confidence: round_confidence(confidence.min(1.0)),
        min_confidence: definition.min_confidence,
        evidence_files,
    }
}

/// Score every registered framework, in registry order.
pub fn score_all(scan: &ScanSet, registry: &DetectorRegistry) -> Vec<FrameworkScore> {
    registry
        .definitions()
        .iter()
        .map(|def| score(def, scan))
        .collect()
}

/// Pick the highest-confidence qualifying framework.
///
/// Ties go to the framework registered first. Returns `None` when every
/// score is below its minimum.
pub fn detect(scan: &ScanSet, registry: &DetectorRegistry) -> Option<FrameworkMatch> {
    let mut best: Option<FrameworkScore> = None;

    for candidate in score_all(scan, registry) {
        tracing::debug!(
            framework = %candidate.framework,
            confidence = candidate.confidence,
            min = candidate.min_confidence,
            evidence = candidate.evidence_files.len(),
            "framework score"
        );
        if !candidate.qualifies() {
            continue;
        }
        let better = best
            .as_ref()
            .map_or(true, |b| candidate.confidence > b.confidence);
        if better {
            best = Some(candidate);
        }
    }

    best.map(|s| FrameworkMatch {
        framework: s.framework,
        confidence: s.confidence,
        evidence_files: s.evidence_files,
    })
}

/// Sums of float weights drift (0.1 + 0.2); keep six decimals.
fn round_confidence(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
