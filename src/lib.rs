//! Audit a project tree for duplicate, orphaned, and missing source files.

mod discovery;
mod extract;
mod index;
mod report;
mod scanner;
mod types;

pub use discovery::{collect_build_artifacts, find_root, find_root_from, project_name};
pub use extract::{extract_references, include_target, SourceList};
pub use index::MultiIndex;
pub use report::{compare_paths, reconcile, Duplicate, Missing, Reconciliation, Report};
pub use scanner::{scan_project, ScanResult};
pub use types::JanitorConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Scan `root` and render the audit report.
pub fn audit(root: &Path, config: &JanitorConfig) -> String {
    let name = project_name(root).unwrap_or_else(|| "Unknown".to_string());
    let artifacts = collect_build_artifacts(root, &config.build_dir);
    let scan = scan_project(root, config, &artifacts);
    if scan.all_files.is_empty() {
        log::warn!("No files of interest found in {}", root.display());
    }

    let result = reconcile(&scan.all_files, &scan.found, &scan.referenced);
    Report {
        project_name: &name,
        root: &root.to_string_lossy(),
        subfolders: &scan.subfolders,
        pruned_dirs: &scan.pruned_dirs,
        result: &result,
    }
    .to_string()
}

/// Pick the project root: the override made absolute, or the marker search result.
pub fn resolve_root(config: &JanitorConfig, root_override: Option<&Path>) -> Result<PathBuf> {
    match root_override {
        Some(p) => p
            .canonicalize()
            .with_context(|| format!("Cannot resolve project root {}", p.display())),
        None => find_root(&config.root_markers),
    }
}

/// Run the full audit with the given configuration, printing the report to stdout.
///
/// Findings never make this fail; only an unusable root does.
pub fn run(config: &JanitorConfig, root_override: Option<&Path>) -> Result<()> {
    let root = resolve_root(config, root_override)?;
    println!("Project root set to: {}", root.display());

    std::env::set_current_dir(&root)
        .with_context(|| format!("Cannot change to project root {}", root.display()))?;

    println!("Analyzing project files...\n");
    print!("{}", audit(&root, config));
    Ok(())
}
