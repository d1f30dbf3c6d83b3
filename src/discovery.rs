//! Project discovery: find the project root, its name, and its build artifacts.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// How far the root search looks above and below the starting directory.
pub const MAX_SEARCH_DEPTH: usize = 3;

static PROJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bproject\s*\(\s*([A-Za-z0-9_.\-]+)").unwrap());

/// Find the project root starting from CWD.
///
/// Falls back to CWD with a warning when no directory carries every marker.
/// Failing to read CWD at all is fatal.
pub fn find_root(markers: &[String]) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Cannot get current directory")?;
    match find_root_from(&cwd, markers) {
        Some(root) => Ok(root),
        None => {
            eprintln!(
                "Warning: project root could not be found, using current directory as fallback"
            );
            Ok(cwd)
        }
    }
}

/// Search for a directory containing every marker file.
///
/// Candidates, in order:
/// - `start` itself
/// - up to `MAX_SEARCH_DEPTH` ancestors, nearest first
/// - descendants of `start`, breadth-first, down to `MAX_SEARCH_DEPTH` levels
pub fn find_root_from(start: &Path, markers: &[String]) -> Option<PathBuf> {
    let mut candidates = vec![start.to_path_buf()];
    candidates.extend(start.ancestors().skip(1).take(MAX_SEARCH_DEPTH).map(Path::to_path_buf));
    candidates.extend(descendant_dirs(start, MAX_SEARCH_DEPTH));

    candidates.into_iter().find(|dir| {
        log::debug!("Checking directory {}", dir.display());
        has_all_markers(dir, markers)
    })
}

/// Whether `dir` holds every marker as a regular file.
pub fn has_all_markers(dir: &Path, markers: &[String]) -> bool {
    let missing: Vec<&str> = markers
        .iter()
        .filter(|m| !dir.join(m.as_str()).is_file())
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        return true;
    }
    log::debug!("Directory {} missing markers: {}", dir.display(), missing.join(", "));
    false
}

fn descendant_dirs(start: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut result = Vec::new();
    let mut level = vec![start.to_path_buf()];
    for _ in 0..max_depth {
        let mut next = Vec::new();
        for dir in &level {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Cannot open directory {}: {}", dir.display(), e);
                    continue;
                }
            };
            let mut subdirs: Vec<PathBuf> = entries
                .flatten()
                .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .map(|e| e.path())
                .collect();
            subdirs.sort();
            next.extend(subdirs);
        }
        result.extend(next.iter().cloned());
        level = next;
    }
    result
}

/// Read the project name from the root `CMakeLists.txt`.
pub fn project_name(root: &Path) -> Option<String> {
    let cmake = root.join("CMakeLists.txt");
    let content = match std::fs::read(&cmake) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::warn!("Could not open {}: {}", cmake.display(), e);
            return None;
        }
    };
    let name = content
        .lines()
        .find_map(|line| PROJECT_RE.captures(line).map(|c| c[1].to_string()));
    if name.is_none() {
        log::warn!("Could not parse project name from {}", cmake.display());
    }
    name
}

/// Collect the file names found anywhere under the build directory.
pub fn collect_build_artifacts(root: &Path, build_dir: &str) -> HashSet<String> {
    let mut artifacts = HashSet::new();
    let build = root.join(build_dir);
    if !build.is_dir() {
        log::info!("No build directory at {}", build.display());
        return artifacts;
    }
    log::info!("Collecting build files from {}", build.display());

    let pattern = format!(
        "{}/**/*",
        glob::Pattern::escape(&build.to_string_lossy())
    );
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Bad build directory pattern {}: {}", pattern, e);
            return artifacts;
        }
    };
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    log::debug!("Added build file {}", name);
                    artifacts.insert(name.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Cannot read build entry: {}", e),
        }
    }
    artifacts
}
