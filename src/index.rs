//! Multi-valued name index.

use std::collections::HashMap;

/// Maps a name to every path recorded under it, in insertion order.
///
/// Values are never de-duplicated: the same path recorded twice under one
/// key is two entries. Key iteration order is unspecified; callers sort
/// before display.
#[derive(Debug, Default, Clone)]
pub struct MultiIndex {
    entries: HashMap<String, Vec<String>>,
}

impl MultiIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the bucket for `key`, creating the bucket if needed.
    ///
    /// An empty key or value is ignored with a warning.
    pub fn put(&mut self, key: &str, value: &str) {
        if key.is_empty() || value.is_empty() {
            log::warn!("Ignoring empty index entry ({:?} -> {:?})", key, value);
            return;
        }
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// The values recorded for `key`, or `None` if the key was never put.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
