//! Heuristic reference extraction from file contents.
//!
//! Two line-oriented heuristics, neither of which parses the language:
//! - quoted `#include "name"` directives, in any file
//! - `set(SRC ...)` / `target_sources(...)` lists in CMake files

use crate::index::MultiIndex;

const INCLUDE_TOKEN: &str = "#include \"";
const LIST_OPENERS: &[&str] = &["set(SRC", "target_sources("];
const LIST_KEYWORDS: &[&str] = &["set", "SRC", "target_sources"];

/// Longest include target accepted, in bytes.
pub const MAX_NAME_LEN: usize = 4096;

/// Capacity of the source-list accumulation buffer, in bytes.
pub const MAX_LIST_LEN: usize = 2048 * 100;

/// Whether a path is a CMake build file subject to source-list extraction.
pub fn is_build_file(path: &str) -> bool {
    path.ends_with("CMakeLists.txt") || path.ends_with(".cmake")
}

/// Return the quoted include target on a trimmed line, if any.
pub fn include_target(line: &str) -> Option<&str> {
    let start = line.find(INCLUDE_TOKEN)? + INCLUDE_TOKEN.len();
    let rest = &line[start..];
    let name = &rest[..rest.find('"')?];
    if name.is_empty() || name.len() >= MAX_NAME_LEN || name.contains('<') {
        return None;
    }
    Some(name)
}

/// Source-list accumulation state for one file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum SourceList {
    #[default]
    Idle,
    Accumulating(String),
}

impl SourceList {
    /// Feed one trimmed line. Returns the names of a list closed by this line.
    pub fn feed(&mut self, line: &str) -> Vec<String> {
        if LIST_OPENERS.iter().any(|o| line.contains(o)) {
            if line.len() >= MAX_LIST_LEN {
                log::debug!("Source list opener too long ({} bytes), abandoned", line.len());
                *self = SourceList::Idle;
                return Vec::new();
            }
            *self = SourceList::Accumulating(line.to_string());
        } else if let SourceList::Accumulating(buf) = self {
            if buf.len() + line.len() + 1 >= MAX_LIST_LEN {
                log::debug!("Source list overflowed {} bytes, abandoned", MAX_LIST_LEN);
                *self = SourceList::Idle;
                return Vec::new();
            }
            buf.push(' ');
            buf.push_str(line);
        } else {
            return Vec::new();
        }

        if !line.contains(')') {
            return Vec::new();
        }
        match std::mem::take(self) {
            SourceList::Accumulating(buf) => list_tokens(&buf),
            SourceList::Idle => Vec::new(),
        }
    }
}

fn list_tokens(buf: &str) -> Vec<String> {
    buf.split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .filter(|t| !t.is_empty() && !LIST_KEYWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Scan `content` and record every reference it makes under `path`.
///
/// Returns the number of references recorded.
pub fn extract_references(path: &str, content: &str, referenced: &mut MultiIndex) -> usize {
    let build_file = is_build_file(path);
    let mut list = SourceList::Idle;
    let mut found = 0;

    for raw in content.lines() {
        let line = raw.trim();

        if line.contains(INCLUDE_TOKEN) {
            if let Some(name) = include_target(line) {
                log::debug!("Found include reference {} in {}", name, path);
                referenced.put(name, path);
                found += 1;
            }
            continue;
        }

        if build_file {
            for name in list.feed(line) {
                log::debug!("Found source list reference {} in {}", name, path);
                referenced.put(&name, path);
                found += 1;
            }
        }
    }

    if list != SourceList::Idle {
        log::debug!("Unterminated source list in {}", path);
    }
    found
}
