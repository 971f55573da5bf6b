//! Directory tree aggregation.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use codegauge_core::{DirectoryMetrics, FileMetrics, MetricsEntry};

use crate::cache::MetricsCache;

/// Rebuild the directory tree and rollup totals for `root` from the files
/// currently in the cache, writing every directory node back into the cache.
///
/// The pass structure removes any dependency on file visit order:
/// accumulation first walks every cached file's ancestor chain into a side
/// table of per-directory totals, then nodes are materialized deepest-first
/// so each parent embeds fully-totaled children, attached exactly once.
/// Totals reflect only files resident in the cache at snapshot time; files
/// not yet counted by an in-progress run are absent from their ancestors'
/// totals until the next aggregation pass.
pub fn aggregate(root: &Path, cache: &MetricsCache) {
    let files = cache.file_snapshot();

    // Pass 1: accumulate per-ancestor totals in a side table, separate from
    // the tree being built so repeated ancestor visits sum rather than
    // overwrite. The root always gets a slot, even with nothing under it.
    let mut totals: HashMap<PathBuf, (u64, u64)> = HashMap::new();
    totals.insert(root.to_path_buf(), (0, 0));
    let mut files_by_parent: HashMap<PathBuf, Vec<FileMetrics>> = HashMap::new();

    for file in files {
        if !file.path.starts_with(root) {
            continue;
        }
        let Some(parent) = file.path.parent().map(Path::to_path_buf) else {
            continue;
        };
        if !parent.starts_with(root) {
            continue;
        }

        let mut dir = parent.clone();
        loop {
            let slot = totals.entry(dir.clone()).or_insert((0, 0));
            slot.0 += file.line_count;
            slot.1 += file.token_count;

            if dir == root {
                break;
            }
            match dir.parent() {
                Some(up) => dir = up.to_path_buf(),
                None => break,
            }
        }

        files_by_parent.entry(parent).or_default().push(file);
    }

    // Pass 2: wire parent/child directory edges. Every ancestor of a known
    // directory is itself known, so each non-root directory has its parent
    // in the table.
    let mut dirs: Vec<PathBuf> = totals.keys().cloned().collect();
    dirs.sort_by_key(|dir| Reverse(dir.components().count()));

    let mut subdirs_by_parent: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    for dir in &dirs {
        if dir == root {
            continue;
        }
        if let Some(parent) = dir.parent() {
            subdirs_by_parent
                .entry(parent.to_path_buf())
                .or_default()
                .push(dir.clone());
        }
    }

    // Pass 3: materialize nodes deepest-first and apply the accumulated
    // totals, attaching each child exactly once.
    let mut built: HashMap<PathBuf, DirectoryMetrics> = HashMap::new();
    for dir in dirs {
        let (total_line_count, total_token_count) = totals[&dir];
        let mut node = DirectoryMetrics {
            path: dir.clone(),
            total_line_count,
            total_token_count,
            children: Vec::new(),
        };

        for file in files_by_parent.remove(&dir).unwrap_or_default() {
            if !node.has_child(&file.path) {
                node.children.push(MetricsEntry::File(file));
            }
        }
        for subdir in subdirs_by_parent.remove(&dir).unwrap_or_default() {
            if let Some(child) = built.get(&subdir) {
                if !node.has_child(&subdir) {
                    node.children.push(MetricsEntry::Directory(child.clone()));
                }
            }
        }
        node.children.sort_by(|a, b| a.path().cmp(b.path()));

        built.insert(dir, node);
    }

    for node in built.into_values() {
        cache.insert_directory(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with(files: &[(&str, u64, u64)]) -> MetricsCache {
        let cache = MetricsCache::new();
        for (path, lines, tokens) in files {
            cache.insert_file(FileMetrics::new(*path, *lines, *tokens, "⚪"));
        }
        cache
    }

    #[test]
    fn test_nested_rollup() {
        let cache = cache_with(&[
            ("/r/a.txt", 2, 4),
            ("/r/sub/b.txt", 1, 1),
            ("/r/sub/deep/c.txt", 5, 10),
        ]);

        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        assert_eq!(root.total_line_count, 8);
        assert_eq!(root.total_token_count, 15);

        let sub = cache.directory(Path::new("/r/sub")).unwrap();
        assert_eq!(sub.total_line_count, 6);

        let deep = cache.directory(Path::new("/r/sub/deep")).unwrap();
        assert_eq!(deep.total_line_count, 5);
    }

    #[test]
    fn test_no_double_counting_across_levels() {
        let cache = cache_with(&[("/r/x/y/z/f.txt", 7, 7)]);

        aggregate(Path::new("/r"), &cache);

        for dir in ["/r", "/r/x", "/r/x/y", "/r/x/y/z"] {
            let node = cache.directory(Path::new(dir)).unwrap();
            assert_eq!(node.total_line_count, 7, "wrong total for {dir}");
        }
    }

    #[test]
    fn test_children_attached_once_and_ordered() {
        let cache = cache_with(&[
            ("/r/b.txt", 1, 1),
            ("/r/a.txt", 1, 1),
            ("/r/sub/c.txt", 1, 1),
        ]);

        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        assert_eq!(root.child_count(), 3);

        let paths: Vec<_> = root.children.iter().map(|c| c.path().to_path_buf()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);

        // Exactly one edge per child path.
        for path in &paths {
            let count = root.children.iter().filter(|c| c.path() == path).count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_parent_embeds_totaled_subdirectory() {
        let cache = cache_with(&[("/r/sub/deep/c.txt", 3, 3)]);

        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        let MetricsEntry::Directory(sub) = &root.children[0] else {
            panic!("expected directory child");
        };
        assert_eq!(sub.total_line_count, 3);
        let MetricsEntry::Directory(deep) = &sub.children[0] else {
            panic!("expected nested directory child");
        };
        assert_eq!(deep.total_line_count, 3);
    }

    #[test]
    fn test_empty_root_gets_zero_node() {
        let cache = MetricsCache::new();

        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        assert_eq!(root.total_line_count, 0);
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn test_files_outside_root_are_ignored() {
        let cache = cache_with(&[("/other/f.txt", 9, 9), ("/r/a.txt", 1, 1)]);

        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        assert_eq!(root.total_line_count, 1);
        assert!(cache.directory(Path::new("/other")).is_none());
    }

    #[test]
    fn test_reaggregation_replaces_tree() {
        let cache = cache_with(&[("/r/a.txt", 1, 1)]);
        aggregate(Path::new("/r"), &cache);

        cache.insert_file(FileMetrics::new("/r/b.txt", 4, 4, "⚪"));
        aggregate(Path::new("/r"), &cache);

        let root = cache.directory(Path::new("/r")).unwrap();
        assert_eq!(root.total_line_count, 5);
        assert_eq!(root.child_count(), 2);
    }
}
