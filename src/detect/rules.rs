use crate::model::Framework;
use crate::walk::ScanSet;
use regex::Regex;
use std::path::Path;

/// What a signal rule looks for.
#[derive(Debug, Clone)]
pub enum SignalKind {
    /// Case-insensitive substring of a root-level dependency manifest
    Manifest(String),
    /// Import statement pattern in a source file
    Import(Regex),
    /// Application/router construction pattern in a source file
    Instantiation(Regex),
    /// A file with this exact name exists anywhere in the tree
    ConventionFile(String),
}

/// A weighted piece of evidence for one framework.
#[derive(Debug, Clone)]
pub struct SignalRule {
    pub kind: SignalKind,
    pub weight: f64,
}

impl SignalRule {
    pub fn manifest(needle: &str, weight: f64) -> Self {
        Self {
            kind: SignalKind::Manifest(needle.to_lowercase()),
            weight,
        }
    }

    pub fn import(pattern: &str, weight: f64) -> Self {
        Self {
            kind: SignalKind::Import(compile(pattern)),
            weight,
        }
    }

    pub fn instantiation(pattern: &str, weight: f64) -> Self {
        Self {
            kind: SignalKind::Instantiation(compile(pattern)),
            weight,
        }
    }

    pub fn convention_file(name: &str, weight: f64) -> Self {
        Self {
            kind: SignalKind::ConventionFile(name.to_string()),
            weight,
        }
    }

    /// Files in the scan that satisfy this rule, in scan order.
    pub fn matching_files<'a>(&self, scan: &'a ScanSet) -> Vec<&'a Path> {
        match &self.kind {
            SignalKind::Manifest(needle) => scan
                .manifests
                .iter()
                .filter(|m| m.text.to_lowercase().contains(needle.as_str()))
                .map(|m| m.path.as_path())
                .collect(),
            SignalKind::Import(re) | SignalKind::Instantiation(re) => scan
                .sources
                .iter()
                .filter(|s| re.is_match(&s.text))
                .map(|s| s.path.as_path())
                .collect(),
            SignalKind::ConventionFile(name) => {
                scan.files_named(name)
                    .into_iter()
                    .map(|p| p.as_path())
                    .collect()
            }
        }
    }
}

/// Detection recipe for one framework.
#[derive(Debug, Clone)]
pub struct FrameworkDefinition {
    pub framework: Framework,
    /// Minimum accumulated confidence for the framework to qualify
    pub min_confidence: f64,
    pub rules: Vec<SignalRule>,
}

/// Built-in definitions, in tie-break order.
pub fn builtin_definitions() -> Vec<FrameworkDefinition> {
    vec![
        FrameworkDefinition {
            framework: Framework::FastApi,
            min_confidence: 0.3,
            rules: vec![
                SignalRule::manifest("fastapi", 0.3),
                SignalRule::import(r"from\s+fastapi\s+import|import\s+fastapi", 0.2),
                SignalRule::instantiation(r"FastAPI\s*\(|APIRouter\s*\(", 0.3),
            ],
        },
        FrameworkDefinition {
            framework: Framework::DjangoNinja,
            min_confidence: 0.4,
            rules: vec![
                SignalRule::manifest("django-ninja", 0.4),
                SignalRule::convention_file("settings.py", 0.2),
                SignalRule::import(r"from\s+ninja\s+import|import\s+ninja", 0.3),
                SignalRule::instantiation(r"NinjaAPI\s*\(|\bRouter\s*\(", 0.3),
            ],
        },
        FrameworkDefinition {
            framework: Framework::Flask,
            min_confidence: 0.3,
            rules: vec![
                SignalRule::manifest("flask", 0.3),
                SignalRule::import(r"from\s+flask\s+import|import\s+flask", 0.3),
                SignalRule::instantiation(r"Flask\s*\(|Blueprint\s*\(", 0.3),
            ],
        },
    ]
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in signal patterns are valid regexes")
}
