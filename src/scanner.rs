//! Project walk: collect files of interest and the references they make.

use crate::extract::extract_references;
use crate::index::MultiIndex;
use crate::types::{basename, JanitorConfig};
use std::collections::HashSet;
use std::path::Path;

/// Everything the walk learned about the project.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Every file of interest, in discovery order.
    pub all_files: Vec<String>,
    /// Basename -> paths where a file with that name exists.
    pub found: MultiIndex,
    /// Referenced name -> paths of the files referring to it.
    pub referenced: MultiIndex,
    /// Immediate subdirectories of the root that are not excluded.
    pub subfolders: Vec<String>,
    /// Directories the walk refused to enter.
    pub pruned_dirs: Vec<String>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file of interest and, when readable, the references it makes.
    pub fn record(&mut self, path: &str, content: Option<&str>) {
        self.all_files.push(path.to_string());
        self.found.put(basename(path), path);
        if let Some(content) = content {
            let n = extract_references(path, content, &mut self.referenced);
            log::debug!("Processed {} ({} references)", path, n);
        }
    }
}

/// Walk `root` and record every file of interest.
///
/// Files whose name appears in `artifacts` are skipped wherever they live.
/// Symbolic links are never followed.
pub fn scan_project(root: &Path, config: &JanitorConfig, artifacts: &HashSet<String>) -> ScanResult {
    fn walk(
        dir: &Path,
        depth: usize,
        config: &JanitorConfig,
        artifacts: &HashSet<String>,
        result: &mut ScanResult,
    ) {
        log::info!("Analyzing directory {}", dir.display());
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot open directory {}: {}", dir.display(), e);
                return;
            }
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Cannot read entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping non UTF-8 name {}", path.display());
                continue;
            };
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };
            let display = path.to_string_lossy().to_string();

            if file_type.is_symlink() {
                log::warn!("Skipping symlink {}", display);
            } else if file_type.is_dir() {
                if depth == 0 && !config.exclude_dirs.contains(&name) {
                    result.subfolders.push(name.clone());
                }
                if config.is_excluded_dir(&name) {
                    log::info!("Skipping excluded directory {}", display);
                    result.pruned_dirs.push(display);
                    continue;
                }
                walk(&path, depth + 1, config, artifacts, result);
            } else if file_type.is_file() {
                if !config.accepts(&name) || artifacts.contains(&name) {
                    continue;
                }
                log::info!("Processing file {}", display);
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        let content = String::from_utf8_lossy(&bytes);
                        result.record(&display, Some(&*content));
                    }
                    Err(e) => {
                        log::warn!("Could not open file {}: {}", display, e);
                        result.record(&display, None);
                    }
                }
            }
        }
    }

    let mut result = ScanResult::new();
    walk(root, 0, config, artifacts, &mut result);
    log::info!("Found {} files of interest", result.all_files.len());
    result
}
