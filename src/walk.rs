use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Extension of the source files the extractor understands.
pub const SOURCE_EXTENSION: &str = "py";

/// Dependency manifests checked at the project root.
pub const MANIFEST_FILES: &[&str] = &["requirements.txt", "pyproject.toml", "Pipfile"];

/// Directories that hold third-party code rather than project code.
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.venv/**",
    "**/venv/**",
    "**/site-packages/**",
    "**/node_modules/**",
    "**/__pycache__/**",
];

/// Include/exclude globs applied while scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// A readable source file and its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Snapshot of a project tree that detectors query.
///
/// Every list is sorted by path, so queries do not depend on the order in
/// which the filesystem or the thread pool produced results.
#[derive(Debug, Clone)]
pub struct ScanSet {
    pub root: PathBuf,
    /// Every non-excluded file, any extension
    pub files: Vec<PathBuf>,
    /// Readable `.py` files with their contents
    pub sources: Vec<SourceFile>,
    /// Root-level dependency manifests that exist and are readable
    pub manifests: Vec<SourceFile>,
}

impl ScanSet {
    pub fn scan(root: &Path, options: &ScanOptions) -> Result<Self> {
        let files = list_files(root, &options.include, &options.exclude)?;

        let source_paths: Vec<&PathBuf> = files.iter().filter(|p| is_source_file(p)).collect();
        let sources: Vec<SourceFile> = source_paths
            .par_iter()
            .filter_map(|path| {
                read_text_safe(path).map(|text| SourceFile {
                    path: (*path).clone(),
                    text,
                })
            })
            .collect();

        let manifests = MANIFEST_FILES
            .iter()
            .map(|name| root.join(name))
            .filter(|p| p.is_file())
            .filter_map(|path| read_text_safe(&path).map(|text| SourceFile { path, text }))
            .collect();

        tracing::debug!(
            root = %root.display(),
            files = files.len(),
            sources = sources.len(),
            "scanned project"
        );

        Ok(Self {
            root: root.to_path_buf(),
            files,
            sources,
            manifests,
        })
    }

    /// Files whose file name equals `name`, in sorted order.
    pub fn files_named(&self, name: &str) -> Vec<&PathBuf> {
        self.files
            .iter()
            .filter(|p| p.file_name().and_then(|f| f.to_str()) == Some(name))
            .collect()
    }
}

/// Whether the path has the source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Discover every file under `root`.
///
/// - Respects `.gitignore`
/// - Applies include/exclude glob patterns
/// - Skips virtualenvs and vendored packages by default
/// - Returns sorted paths for deterministic output
pub fn list_files(
    root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in exclude_patterns {
        exclude_builder.add(Glob::new(pattern)?);
    }
    let exclude_set = exclude_builder.build()?;

    let mut default_builder = GlobSetBuilder::new();
    for pattern in DEFAULT_EXCLUDES {
        default_builder.add(Glob::new(pattern)?);
    }
    let default_set = default_builder.build()?;

    let include_set = if include_patterns.is_empty() {
        None
    } else {
        let mut builder = GlobSetBuilder::new();
        for pattern in include_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Some(builder.build()?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        // Built-in excludes only look below the root, so a project that
        // itself lives under e.g. `venv/` is still scanned.
        if default_set.is_match(relative) || is_excluded(&exclude_set, relative, path) {
            continue;
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}

fn is_excluded(set: &GlobSet, relative: &Path, absolute: &Path) -> bool {
    if set.is_match(relative) || set.is_match(absolute) {
        return true;
    }
    // Also check just the filename for patterns like *_test.py
    absolute
        .file_name()
        .is_some_and(|name| set.is_match(Path::new(name)))
}

/// Read a file as UTF-8 text. I/O and decode failures yield `None`.
pub fn read_text_safe(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("could not read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn lists_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.py", "");
        write(tmp.path(), "a/z.py", "");
        write(tmp.path(), "a/readme.md", "");

        let files = list_files(tmp.path(), &[], &[]).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/readme.md"),
                PathBuf::from("a/z.py"),
                PathBuf::from("b.py")
            ]
        );
    }

    #[test]
    fn skips_virtualenv_and_excluded_globs() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "app.py", "");
        write(tmp.path(), ".venv/lib/fastapi/applications.py", "");
        write(tmp.path(), "tests/test_app.py", "");

        let files = list_files(tmp.path(), &[], &["tests/**".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.py"));
    }

    #[test]
    fn include_patterns_restrict_results() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "api/routes.py", "");
        write(tmp.path(), "scripts/seed.py", "");

        let files = list_files(tmp.path(), &["api/**".to_string()], &[]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("api/routes.py"));
    }

    #[test]
    fn read_text_safe_never_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_text_safe(&tmp.path().join("missing.py")).is_none());

        let binary = tmp.path().join("blob.py");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(read_text_safe(&binary).is_none());
    }

    #[test]
    fn scan_collects_manifests_and_sources() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "requirements.txt", "fastapi==0.110\n");
        write(tmp.path(), "main.py", "print('hi')\n");
        write(tmp.path(), "proj/settings.py", "");

        let scan = ScanSet::scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(scan.manifests.len(), 1);
        assert_eq!(scan.sources.len(), 2);
        assert_eq!(scan.files_named("settings.py").len(), 1);
    }
}
