//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce the workspace layout:
//! - `botsrig-core` stays headless (no terminal crates, no TUI imports)
//! - No blocking HTTP or sleeping in production code
//! - No `unwrap()`/`expect()` in production code
//!
//! The helpers here walk the workspace sources; the checks live in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from("../.."))
}

/// A line that broke a rule
#[derive(Debug)]
pub struct Violation {
    /// File, relative to the workspace root
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// The offending line, trimmed
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line_number, self.line)
    }
}

/// Production lines of every `.rs` file under `dir` (relative to the root)
///
/// A file's production part ends at its first `#[cfg(test)]`. Line comments
/// are stripped.
pub fn production_lines(dir: &str) -> Vec<(PathBuf, usize, String)> {
    let root = workspace_root();
    let mut lines = Vec::new();

    for entry in walkdir::WalkDir::new(root.join(dir))
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        let relative = path.strip_prefix(&root).unwrap_or(path).to_path_buf();

        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            let code_part = line.split("//").next().unwrap_or(line);
            lines.push((relative.clone(), idx + 1, code_part.to_string()));
        }
    }

    lines
}

/// Production lines under `dir` containing any of `patterns`
pub fn find_violations(dir: &str, patterns: &[&str]) -> Vec<Violation> {
    production_lines(dir)
        .into_iter()
        .filter(|(_, _, code)| patterns.iter().any(|p| code.contains(p)))
        .map(|(path, line_number, code)| Violation {
            path,
            line_number,
            line: code.trim().to_string(),
        })
        .collect()
}

/// Fail with a readable report if `violations` is non-empty
pub fn assert_clean(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    for violation in violations {
        eprintln!("  {violation}");
    }
    panic!("\n{rule}: found {} violation(s).", violations.len());
}
