pub mod convention;
pub mod python;

pub use convention::RouteConvention;
pub use python::PythonRouteParser;

use crate::model::{Endpoint, Framework};
use crate::walk::{is_source_file, read_text_safe};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Extract endpoints from the evidence files of a detected framework.
///
/// Non-Python evidence (manifests, settings) is ignored. Unreadable files and
/// files with syntax errors are skipped with a warning. The result is ordered
/// by file path, then by line, with decorator order kept for handlers that
/// declare several routes.
pub fn extract(framework: Framework, evidence_files: &[PathBuf]) -> Vec<Endpoint> {
    extract_with_progress(framework, evidence_files, &|| {})
}

/// [`extract`], calling `on_file` once per Python file processed.
pub fn extract_with_progress(
    framework: Framework,
    evidence_files: &[PathBuf],
    on_file: &(dyn Fn() + Sync),
) -> Vec<Endpoint> {
    let files: Vec<&PathBuf> = evidence_files
        .iter()
        .filter(|p| is_source_file(p))
        .collect();

    let mut endpoints: Vec<Endpoint> = files
        .par_iter()
        .map_init(
            || PythonRouteParser::new(framework),
            |parser, path| {
                let found = extract_file(parser, path);
                on_file();
                found
            },
        )
        .flatten()
        .collect();

    endpoints.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
    });

    tracing::info!(
        framework = %framework,
        files = files.len(),
        endpoints = endpoints.len(),
        "extracted endpoints"
    );
    endpoints
}

/// Extract endpoints from in-memory source. `None` on a syntax error.
pub fn extract_source(framework: Framework, source: &str, file: &Path) -> Option<Vec<Endpoint>> {
    PythonRouteParser::new(framework).extract(source, file)
}

fn extract_file(parser: &mut PythonRouteParser, path: &Path) -> Vec<Endpoint> {
    let Some(source) = read_text_safe(path) else {
        tracing::warn!("skipping unreadable file {}", path.display());
        return Vec::new();
    };
    match parser.extract(&source, path) {
        Some(endpoints) => {
            tracing::debug!(
                file = %path.display(),
                endpoints = endpoints.len(),
                "parsed"
            );
            endpoints
        }
        None => {
            tracing::warn!("skipping {}: Python syntax error", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn broken_file_does_not_stop_extraction() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("a_good.py");
        let broken = tmp.path().join("b_broken.py");
        let other = tmp.path().join("c_other.py");
        fs::write(&good, "@app.get('/a')\ndef a():\n    pass\n").unwrap();
        fs::write(&broken, "@app.get('/b')\ndef b(:\n").unwrap();
        fs::write(&other, "@app.post('/c')\ndef c():\n    pass\n").unwrap();

        let endpoints = extract(Framework::FastApi, &[other.clone(), broken, good.clone()]);
        let paths: Vec<_> = endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/c"]);
        assert_eq!(endpoints[0].location.file, good);
        assert_eq!(endpoints[1].location.file, other);
    }

    #[test]
    fn non_python_evidence_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("requirements.txt");
        fs::write(&manifest, "fastapi\n").unwrap();
        let missing = tmp.path().join("gone.py");

        assert!(extract(Framework::FastApi, &[manifest, missing]).is_empty());
    }

    #[test]
    fn progress_called_per_python_file() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let tmp = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for name in ["a.py", "b.py", "requirements.txt"] {
            let path = tmp.path().join(name);
            fs::write(&path, "").unwrap();
            files.push(path);
        }

        let seen = AtomicUsize::new(0);
        extract_with_progress(Framework::Flask, &files, &|| {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(seen.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn same_line_routes_keep_decorator_order() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("views.py");
        fs::write(
            &file,
            "@bp.put('/items/<id>')\n@bp.patch('/items/<id>')\ndef update(id):\n    pass\n",
        )
        .unwrap();

        let endpoints = extract(Framework::Flask, &[file]);
        let methods: Vec<_> = endpoints.iter().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["PUT", "PATCH"]);
    }
}
