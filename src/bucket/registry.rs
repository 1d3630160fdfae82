//! Unassigned file pool
//!
//! Holds changed files that do not belong to any bucket yet.

use crate::types::FileRef;
use std::collections::BTreeMap;

/// Changed files not assigned to any bucket, keyed by path
#[derive(Debug, Clone, Default)]
pub struct FilePool {
    files: BTreeMap<String, FileRef>,
}

impl FilePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool contents with `entries`
    ///
    /// Paths for which `is_owned` returns true already live in a bucket and
    /// are left out. Duplicate paths in `entries` keep the first occurrence.
    /// Returns the number of files now in the pool.
    pub fn load<I, F>(&mut self, entries: I, is_owned: F) -> usize
    where
        I: IntoIterator<Item = FileRef>,
        F: Fn(&str) -> bool,
    {
        let mut files = BTreeMap::new();
        for file in entries {
            if is_owned(&file.path) {
                continue;
            }
            files.entry(file.path.clone()).or_insert(file);
        }
        self.files = files;
        self.files.len()
    }

    /// Remove and return a file
    pub fn take(&mut self, path: &str) -> Option<FileRef> {
        self.files.remove(path)
    }

    /// Insert a file; keeps the existing entry if the path is already pooled
    pub fn give(&mut self, file: FileRef) -> bool {
        if self.files.contains_key(&file.path) {
            return false;
        }
        self.files.insert(file.path.clone(), file);
        true
    }

    /// Whether the pool holds `path`
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Look up a pooled file
    pub fn get(&self, path: &str) -> Option<&FileRef> {
        self.files.get(path)
    }

    /// Files in path order
    pub fn iter(&self) -> impl Iterator<Item = &FileRef> {
        self.files.values()
    }

    /// Number of pooled files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
