//! Reconcile found files against references and render the audit report.

use crate::index::MultiIndex;
use crate::types::{basename, dirname};
use std::cmp::Ordering;
use std::fmt;

/// File kinds counted in the statistics section. A leading `.` means a suffix
/// match; anything else must equal the basename. First match wins.
pub const STAT_KINDS: &[&str] = &[
    ".c",
    ".h",
    "CMakeLists.txt",
    ".cmake",
    ".sh",
    ".json",
    ".py",
    ".md",
];

/// Extensions checked for identically named files.
pub const DUPLICATE_EXTENSIONS: &[&str] = &[".c", ".h", ".py", ".sh"];

/// Order paths by parent directory, then by basename.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    dirname(a)
        .cmp(dirname(b))
        .then_with(|| basename(a).cmp(basename(b)))
}

pub fn sort_paths(paths: &mut [String]) {
    paths.sort_by(|a, b| compare_paths(a, b));
}

fn stat_kind(path: &str) -> Option<&'static str> {
    let name = basename(path);
    STAT_KINDS.iter().copied().find(|kind| {
        if kind.starts_with('.') {
            path.ends_with(kind)
        } else {
            name == *kind
        }
    })
}

/// A basename found in more than one place.
#[derive(Debug, PartialEq, Eq)]
pub struct Duplicate {
    pub name: String,
    pub paths: Vec<String>,
}

/// A referenced name with no file behind it.
#[derive(Debug, PartialEq, Eq)]
pub struct Missing {
    pub name: String,
    pub referenced_by: Vec<String>,
}

/// The outcome of cross-checking files against references. Every list is sorted.
#[derive(Debug)]
pub struct Reconciliation {
    pub files: Vec<String>,
    pub stats: Vec<(&'static str, usize)>,
    pub duplicates: Vec<(&'static str, Vec<Duplicate>)>,
    pub orphans: Vec<String>,
    pub missing: Vec<Missing>,
}

/// Classify duplicates, orphans, and missing files. Neither index is modified.
pub fn reconcile(all_files: &[String], found: &MultiIndex, referenced: &MultiIndex) -> Reconciliation {
    let mut files = all_files.to_vec();
    sort_paths(&mut files);

    let stats = STAT_KINDS
        .iter()
        .map(|kind| {
            let n = files.iter().filter(|f| stat_kind(f) == Some(*kind)).count();
            (*kind, n)
        })
        .collect();

    let duplicates = DUPLICATE_EXTENSIONS
        .iter()
        .map(|ext| {
            let mut dups: Vec<Duplicate> = found
                .iter()
                .filter(|(name, paths)| paths.len() > 1 && name.ends_with(*ext))
                .map(|(name, paths)| {
                    let mut paths = paths.to_vec();
                    sort_paths(&mut paths);
                    Duplicate {
                        name: name.to_string(),
                        paths,
                    }
                })
                .collect();
            dups.sort_by(|a, b| a.name.cmp(&b.name));
            (*ext, dups)
        })
        .collect();

    let orphans = files
        .iter()
        .filter(|f| !referenced.contains_key(basename(f)))
        .cloned()
        .collect();

    let mut missing: Vec<Missing> = referenced
        .iter()
        .filter(|(name, _)| !found.contains_key(name))
        .map(|(name, refs)| {
            let mut referenced_by = refs.to_vec();
            sort_paths(&mut referenced_by);
            referenced_by.dedup();
            Missing {
                name: name.to_string(),
                referenced_by,
            }
        })
        .collect();
    missing.sort_by(|a, b| compare_paths(&a.name, &b.name));

    Reconciliation {
        files,
        stats,
        duplicates,
        orphans,
        missing,
    }
}

/// A renderable audit report.
pub struct Report<'a> {
    pub project_name: &'a str,
    pub root: &'a str,
    pub subfolders: &'a [String],
    pub pruned_dirs: &'a [String],
    pub result: &'a Reconciliation,
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "  (None)");
    }
    for item in items {
        writeln!(f, "  - {}", item)?;
    }
    Ok(())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        writeln!(f, "=== Summary ===")?;
        writeln!(f, "Project name: {}", self.project_name)?;
        writeln!(f, "Project root folder: {}", self.root)?;
        writeln!(f, "Key subfolders:")?;
        let mut subfolders = self.subfolders.to_vec();
        subfolders.sort();
        write_list(f, &subfolders)?;
        writeln!(f, "Excluded directories:")?;
        let mut pruned = self.pruned_dirs.to_vec();
        sort_paths(&mut pruned);
        write_list(f, &pruned)?;
        writeln!(f, "File structure:")?;
        write_list(f, &r.files)?;

        writeln!(f, "\n=== Statistics ===")?;
        writeln!(f, "Total # of files of interest: {}", r.files.len())?;
        for (kind, n) in &r.stats {
            writeln!(f, "# of {}: {}", kind, n)?;
        }

        writeln!(f, "\n=== Warnings ===")?;
        for (ext, dups) in &r.duplicates {
            writeln!(f, "{} files with identical names:", ext)?;
            if dups.is_empty() {
                writeln!(f, "  (None)")?;
            }
            for dup in dups {
                writeln!(f, "  {}:", dup.name)?;
                for path in &dup.paths {
                    writeln!(f, "    {}", path)?;
                }
            }
        }

        writeln!(f, "\n=== Errors ===")?;
        writeln!(f, "Orphan files: {}", r.orphans.len())?;
        writeln!(f, "Missing files: {}", r.missing.len())?;

        writeln!(f, "\n=== Details of Orphan Files ===")?;
        if r.orphans.is_empty() {
            writeln!(f, "(None)")?;
        }
        for path in &r.orphans {
            writeln!(f, "- {}", path)?;
        }

        writeln!(f, "\n=== Details of Missing Files ===")?;
        if r.missing.is_empty() {
            writeln!(f, "(None)")?;
        }
        for m in &r.missing {
            writeln!(f, "- {}", m.name)?;
            writeln!(f, "    referenced by:")?;
            for path in &m.referenced_by {
                writeln!(f, "      {}", path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanResult;

    fn scan(files: &[(&str, &str)]) -> ScanResult {
        let mut result = ScanResult::new();
        for (path, content) in files {
            result.record(path, Some(*content));
        }
        result
    }

    fn reconcile_scan(s: &ScanResult) -> Reconciliation {
        reconcile(&s.all_files, &s.found, &s.referenced)
    }

    fn render(s: &ScanResult) -> String {
        let result = reconcile_scan(s);
        Report {
            project_name: "demo",
            root: "/p",
            subfolders: &s.subfolders,
            pruned_dirs: &s.pruned_dirs,
            result: &result,
        }
        .to_string()
    }

    // --- compare_paths ---

    #[test]
    fn compare_paths_directory_first() {
        assert_eq!(compare_paths("lib/util.c", "src/util.c"), Ordering::Less);
        assert_eq!(compare_paths("src/b.c", "src/a.c"), Ordering::Greater);
        assert_eq!(compare_paths("src/a.c", "src/a.c"), Ordering::Equal);
    }

    #[test]
    fn compare_paths_does_not_interleave_directories() {
        // '-' sorts before '/', so raw order splits the "a" directory.
        let mut paths = vec![
            "a-x/z.c".to_string(),
            "a/b.c".to_string(),
            "a/a.c".to_string(),
        ];
        sort_paths(&mut paths);
        assert_eq!(paths, vec!["a/a.c", "a/b.c", "a-x/z.c"]);

        let mut raw = paths.clone();
        raw.sort();
        assert_eq!(raw, vec!["a-x/z.c", "a/a.c", "a/b.c"]);
    }

    #[test]
    fn compare_paths_root_files_first() {
        let mut paths = vec!["src/a.c".to_string(), "CMakeLists.txt".to_string()];
        sort_paths(&mut paths);
        assert_eq!(paths, vec!["CMakeLists.txt", "src/a.c"]);
    }

    // --- reconcile ---

    #[test]
    fn missing_include_is_reported() {
        let s = scan(&[("src/a.c", "#include \"missing.h\"\n")]);
        let r = reconcile_scan(&s);
        assert_eq!(
            r.missing,
            vec![Missing {
                name: "missing.h".to_string(),
                referenced_by: vec!["src/a.c".to_string()],
            }]
        );
    }

    #[test]
    fn duplicates_sorted_by_directory() {
        let s = scan(&[("src/util.c", ""), ("lib/util.c", "")]);
        let r = reconcile_scan(&s);
        let (ext, dups) = &r.duplicates[0];
        assert_eq!(*ext, ".c");
        assert_eq!(
            dups,
            &vec![Duplicate {
                name: "util.c".to_string(),
                paths: vec!["lib/util.c".to_string(), "src/util.c".to_string()],
            }]
        );
        assert!(r.duplicates[1..].iter().all(|(_, d)| d.is_empty()));
    }

    #[test]
    fn duplicates_restricted_to_checked_extensions() {
        let s = scan(&[
            ("a/README.md", ""),
            ("b/README.md", ""),
            ("a/CMakeLists.txt", ""),
            ("b/CMakeLists.txt", ""),
            ("a/tool.py", ""),
            ("b/tool.py", ""),
        ]);
        let r = reconcile_scan(&s);
        let names: Vec<&str> = r
            .duplicates
            .iter()
            .flat_map(|(_, d)| d.iter().map(|d| d.name.as_str()))
            .collect();
        assert_eq!(names, vec!["tool.py"]);
    }

    #[test]
    fn set_src_references_clear_orphans() {
        let s = scan(&[
            ("CMakeLists.txt", "set(SRC foo.c bar.c)\n"),
            ("foo.c", ""),
            ("bar.c", ""),
            ("baz.c", ""),
        ]);
        let r = reconcile_scan(&s);
        assert_eq!(r.orphans, vec!["CMakeLists.txt", "baz.c"]);
        assert!(r.missing.is_empty());
    }

    #[test]
    fn orphans_include_every_location_of_unreferenced_name() {
        let s = scan(&[("src/util.c", ""), ("lib/util.c", ""), ("src/main.c", "")]);
        let r = reconcile_scan(&s);
        assert_eq!(r.orphans, vec!["lib/util.c", "src/main.c", "src/util.c"]);
    }

    #[test]
    fn orphan_and_missing_are_disjoint_from_referenced_and_found() {
        let s = scan(&[
            ("src/a.c", "#include \"a.h\"\n#include \"gone.h\"\n"),
            ("include/a.h", ""),
        ]);
        let r = reconcile_scan(&s);
        assert_eq!(r.orphans, vec!["src/a.c"]);
        let missing: Vec<&str> = r.missing.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(missing, vec!["gone.h"]);
    }

    #[test]
    fn missing_lists_each_referencer_once_sorted() {
        let s = scan(&[
            ("src/b.c", "#include \"x.h\"\n#include \"x.h\"\n"),
            ("lib/a.c", "#include \"x.h\"\n"),
        ]);
        assert_eq!(s.referenced.get("x.h").unwrap().len(), 3);
        let r = reconcile_scan(&s);
        assert_eq!(r.missing[0].referenced_by, vec!["lib/a.c", "src/b.c"]);
    }

    #[test]
    fn missing_names_sorted() {
        let s = scan(&[("a.c", "#include \"z.h\"\n#include \"b.h\"\n#include \"m.h\"\n")]);
        let r = reconcile_scan(&s);
        let names: Vec<&str> = r.missing.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b.h", "m.h", "z.h"]);
    }

    #[test]
    fn stats_first_matching_kind() {
        let s = scan(&[
            ("CMakeLists.txt", ""),
            ("cmake/tools.cmake", ""),
            ("a.c", ""),
            ("b.h", ""),
            ("run.sh", ""),
            ("README.md", ""),
        ]);
        let r = reconcile_scan(&s);
        let get = |k: &str| r.stats.iter().find(|(kind, _)| *kind == k).unwrap().1;
        assert_eq!(get("CMakeLists.txt"), 1);
        assert_eq!(get(".cmake"), 1);
        assert_eq!(get(".c"), 1);
        assert_eq!(get(".h"), 1);
        assert_eq!(get(".sh"), 1);
        assert_eq!(get(".md"), 1);
        assert_eq!(get(".json"), 0);
    }

    #[test]
    fn reconcile_leaves_indices_untouched() {
        let s = scan(&[("src/a.c", "#include \"missing.h\"\n")]);
        let found_before = s.found.len();
        let referenced_before = s.referenced.len();
        let _ = reconcile_scan(&s);
        assert_eq!(s.found.len(), found_before);
        assert_eq!(s.referenced.len(), referenced_before);
    }

    // --- Report ---

    #[test]
    fn report_section_order() {
        let text = render(&scan(&[("src/a.c", "#include \"missing.h\"\n")]));
        let sections = [
            "=== Summary ===",
            "=== Statistics ===",
            "=== Warnings ===",
            "=== Errors ===",
            "=== Details of Orphan Files ===",
            "=== Details of Missing Files ===",
        ];
        let positions: Vec<usize> = sections.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn report_details() {
        let text = render(&scan(&[
            ("src/util.c", "#include \"missing.h\"\n"),
            ("lib/util.c", ""),
        ]));
        assert!(text.contains("Project name: demo\n"));
        assert!(text.contains("Total # of files of interest: 2\n"));
        assert!(text.contains("# of .c: 2\n"));
        assert!(text.contains("  util.c:\n    lib/util.c\n    src/util.c\n"));
        assert!(text.contains("Orphan files: 2\nMissing files: 1\n"));
        assert!(text.contains("- missing.h\n    referenced by:\n      src/util.c\n"));
        assert!(text.contains(".h files with identical names:\n  (None)\n"));
    }

    #[test]
    fn report_empty_project() {
        let text = render(&ScanResult::new());
        assert!(text.contains("File structure:\n  (None)\n"));
        assert!(text.contains("=== Details of Orphan Files ===\n(None)\n"));
        assert!(text.contains("=== Details of Missing Files ===\n(None)\n"));
    }

    #[test]
    fn report_is_idempotent() {
        let files = [
            ("CMakeLists.txt", "set(SRC b.c a.c)\n"),
            ("a.c", "#include \"x.h\"\n#include \"y.h\"\n"),
            ("b.c", "#include \"y.h\"\n"),
            ("z/a.c", ""),
        ];
        let first = render(&scan(&files));
        let mut reversed = files;
        reversed.reverse();
        let second = render(&scan(&reversed));
        assert_eq!(first, second);
    }
}
