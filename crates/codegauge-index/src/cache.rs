//! Two-level metrics cache.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use codegauge_core::{DirectoryMetrics, FileMetrics};

/// Shared store of per-file and per-directory metrics.
///
/// Both maps are concurrent, so external readers (decorations, status
/// surfaces) may query at any time, including mid-run. There is no
/// transactional isolation between the two levels: directory totals reflect
/// the last completed aggregation pass, not files counted since.
#[derive(Debug, Default)]
pub struct MetricsCache {
    files: DashMap<PathBuf, FileMetrics>,
    directories: DashMap<PathBuf, DirectoryMetrics>,
}

impl MetricsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up metrics for a file.
    pub fn file(&self, path: &Path) -> Option<FileMetrics> {
        self.files.get(path).map(|entry| entry.clone())
    }

    /// Look up metrics for a directory.
    pub fn directory(&self, path: &Path) -> Option<DirectoryMetrics> {
        self.directories.get(path).map(|entry| entry.clone())
    }

    /// Check whether a file entry exists.
    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Insert or overwrite a file entry.
    pub fn insert_file(&self, metrics: FileMetrics) {
        self.files.insert(metrics.path.clone(), metrics);
    }

    /// Insert or overwrite a directory entry.
    pub fn insert_directory(&self, metrics: DirectoryMetrics) {
        self.directories.insert(metrics.path.clone(), metrics);
    }

    /// Snapshot of all current file entries, in no particular order.
    pub fn file_snapshot(&self) -> Vec<FileMetrics> {
        self.files.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of cached file entries.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of cached directory entries.
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Drop every cached entry, both levels.
    ///
    /// Must be called when the counting configuration changes: cached
    /// indicators were computed under the old thresholds. There is no
    /// per-entry invalidation.
    pub fn clear(&self) {
        self.files.clear();
        self.directories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let cache = MetricsCache::new();
        cache.insert_file(FileMetrics::new("/r/a.rs", 10, 30, "⚪"));

        assert!(cache.contains_file(Path::new("/r/a.rs")));
        assert_eq!(cache.file(Path::new("/r/a.rs")).unwrap().line_count, 10);
        assert!(cache.file(Path::new("/r/b.rs")).is_none());
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let cache = MetricsCache::new();
        cache.insert_file(FileMetrics::new("/r/a.rs", 10, 30, "⚪"));
        cache.insert_file(FileMetrics::new("/r/a.rs", 12, 36, "🔵"));

        assert_eq!(cache.file_count(), 1);
        assert_eq!(cache.file(Path::new("/r/a.rs")).unwrap().line_count, 12);
    }

    #[test]
    fn test_clear_drops_both_levels() {
        let cache = MetricsCache::new();
        cache.insert_file(FileMetrics::new("/r/a.rs", 10, 30, "⚪"));
        cache.insert_directory(DirectoryMetrics::empty("/r"));

        cache.clear();

        assert_eq!(cache.file_count(), 0);
        assert_eq!(cache.directory_count(), 0);
    }
}
