//! Architectural Enforcement Integration Tests
//!
//! This package contains tests that enforce architectural principles on the
//! production sources:
//! - No blocking sleeps on the dispatch path
//! - No blocking HTTP client
//!
//! Test modules (everything from the first `#[cfg(test)]` in a file) and
//! comment lines are not scanned.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Calls that would stall the single-threaded event loop
pub const BLOCKING_PATTERNS: &[&str] = &["std::thread::sleep", "thread::sleep(", "reqwest::blocking"];

/// Production source trees that must stay non-blocking
pub const SOURCE_DIRS: &[&str] = &["core/src", "tui/src"];

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub pattern: &'static str,
    pub text: String,
}

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from("../.."))
}

/// Scan one file's text for banned patterns
pub fn scan_source(path: &Path, source: &str, patterns: &[&'static str]) -> Vec<Violation> {
    let mut found = Vec::new();

    for (i, line) in source.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        for &pattern in patterns {
            if line.contains(pattern) {
                found.push(Violation {
                    path: path.to_path_buf(),
                    line: i + 1,
                    pattern,
                    text: line.trim().to_string(),
                });
            }
        }
    }

    found
}

/// Scan every `.rs` file under `dir`
pub fn scan_dir(dir: &Path, patterns: &[&'static str]) -> std::io::Result<Vec<Violation>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "rs") {
            continue;
        }
        let source = fs::read_to_string(path)?;
        found.extend(scan_source(path, &source, patterns));
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_blocking_sleep() {
        let source = "fn f() {\n    std::thread::sleep(d);\n}\n";
        let found = scan_source(Path::new("x.rs"), source, BLOCKING_PATTERNS);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_ignores_comments_and_test_modules() {
        let source = "// std::thread::sleep is banned\nfn f() {}\n#[cfg(test)]\nmod tests {\n    use reqwest::blocking;\n}\n";
        assert!(scan_source(Path::new("x.rs"), source, BLOCKING_PATTERNS).is_empty());
    }
}
