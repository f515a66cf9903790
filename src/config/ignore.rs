use std::path::Path;

pub const IGNORE_FILE: &str = ".spoutignore";

/// Load `.spoutignore` by walking up from the given directory.
/// Blank lines and `#` comments are skipped.
pub fn load_spoutignore(start: &Path) -> Vec<String> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(IGNORE_FILE);
        if ignore_path.is_file() {
            if let Ok(content) = std::fs::read_to_string(&ignore_path) {
                tracing::debug!("loaded {}", ignore_path.display());
                return parse_ignore_patterns(&content);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    Vec::new()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| {
            // A trailing slash names a directory; match everything below it.
            match l.strip_suffix('/') {
                Some(dir) => format!("{dir}/**"),
                None => l.to_string(),
            }
        })
        .collect()
}
