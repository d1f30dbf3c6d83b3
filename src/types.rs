//! Core types for project auditing.

use std::path::Path;

/// Configuration for project discovery and auditing.
///
/// Built once at startup and passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct JanitorConfig {
    /// Accepted file extensions (leading `.`) or literal filenames.
    pub extensions: Vec<String>,

    /// Directory names skipped during the walk, matched exactly.
    pub exclude_dirs: Vec<String>,

    /// Files that must all be present for a directory to count as the project root.
    pub root_markers: Vec<String>,

    /// Build-output directory, relative to the root. Never pruned by `exclude_dirs`;
    /// its file names feed the artifact suppression set.
    pub build_dir: String,
}

impl JanitorConfig {
    /// Config for ESP-IDF style CMake projects.
    pub fn esp_idf() -> Self {
        Self {
            extensions: owned(&[
                ".c",
                ".h",
                ".json",
                ".py",
                ".cmake",
                ".md",
                ".sh",
                "CMakeLists.txt",
            ]),
            exclude_dirs: owned(&[".git", "build", "build_logs", "doc"]),
            root_markers: owned(&["LICENSE", "sdkconfig", "dependencies.lock", "CMakeLists.txt"]),
            build_dir: "build".to_string(),
        }
    }

    /// Replace the accepted extensions with a comma-separated list.
    pub fn with_extensions(mut self, list: &str) -> Self {
        self.extensions = split_list(list).map(normalize_extension).collect();
        self
    }

    /// Replace the excluded directory names with a comma-separated list.
    pub fn with_exclude_dirs(mut self, list: &str) -> Self {
        self.exclude_dirs = split_list(list).map(str::to_string).collect();
        self
    }

    /// Replace the root marker files with a comma-separated list.
    pub fn with_root_markers(mut self, list: &str) -> Self {
        self.root_markers = split_list(list).map(str::to_string).collect();
        self
    }

    /// Whether a filename is a file of interest by extension or literal name.
    pub fn accepts(&self, filename: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext == filename || (ext.starts_with('.') && filename.ends_with(ext.as_str())))
    }

    /// Whether the walk should skip a directory with this name.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name != self.build_dir && self.exclude_dirs.iter().any(|d| d == name)
    }
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self::esp_idf()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// `c` -> `.c`; `.c` and literal names such as `CMakeLists.txt` are kept as given.
fn normalize_extension(entry: &str) -> String {
    if entry.starts_with('.') || entry.contains('.') {
        entry.to_string()
    } else {
        format!(".{}", entry)
    }
}

/// Final path component as a string, or the whole input when there is none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Parent directory as a string; `.` for a bare filename.
pub fn dirname(path: &str) -> &str {
    match Path::new(path).parent().and_then(|p| p.to_str()) {
        Some("") | None => ".",
        Some(p) => p,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_extensions_and_literal_names() {
        let config = JanitorConfig::esp_idf();
        assert!(config.accepts("main.c"));
        assert!(config.accepts("util.h"));
        assert!(config.accepts("CMakeLists.txt"));
        assert!(config.accepts("project.cmake"));
        assert!(config.accepts("README.md"));
    }

    #[test]
    fn accepts_rejects() {
        let config = JanitorConfig::esp_idf();
        assert!(!config.accepts("notes.txt"));
        assert!(!config.accepts("main.cpp"));
        assert!(!config.accepts("cmakelists.txt"));
        assert!(!config.accepts("Makefile"));
    }

    #[test]
    fn literal_name_without_dot_is_exact_match() {
        let config = JanitorConfig::esp_idf().with_extensions(".c,Makefile");
        assert!(config.accepts("Makefile"));
        assert!(!config.accepts("GNUMakefile"));
    }

    #[test]
    fn with_extensions_normalizes() {
        let config = JanitorConfig::esp_idf().with_extensions("c, .h,,CMakeLists.txt");
        assert_eq!(config.extensions, vec![".c", ".h", "CMakeLists.txt"]);
    }

    #[test]
    fn with_lists_replace_defaults() {
        let config = JanitorConfig::esp_idf()
            .with_exclude_dirs("target")
            .with_root_markers("Cargo.toml");
        assert_eq!(config.exclude_dirs, vec!["target"]);
        assert_eq!(config.root_markers, vec!["Cargo.toml"]);
    }

    #[test]
    fn excluded_dir_is_exact_name() {
        let config = JanitorConfig::esp_idf();
        assert!(config.is_excluded_dir("doc"));
        assert!(config.is_excluded_dir(".git"));
        assert!(!config.is_excluded_dir("docs"));
        assert!(!config.is_excluded_dir("Doc"));
    }

    #[test]
    fn build_dir_is_never_excluded() {
        let config = JanitorConfig::esp_idf();
        assert!(config.exclude_dirs.iter().any(|d| d == "build"));
        assert!(!config.is_excluded_dir("build"));
    }

    #[test]
    fn basename_and_dirname() {
        assert_eq!(basename("src/util.c"), "util.c");
        assert_eq!(basename("util.c"), "util.c");
        assert_eq!(dirname("src/util.c"), "src");
        assert_eq!(dirname("/p/lib/util.c"), "/p/lib");
        assert_eq!(dirname("util.c"), ".");
    }
}
