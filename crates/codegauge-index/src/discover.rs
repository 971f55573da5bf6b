//! Candidate file discovery.

use std::path::{Component, Path, PathBuf};

use jwalk::WalkDir;
use tokio_util::sync::CancellationToken;

use codegauge_core::{CountingConfig, IndexWarning};

/// Path segments excluded from discovery: dependency, output, and
/// version-control directories.
pub const EXCLUDED_SEGMENTS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "target",
    ".github",
    ".vscode-test",
];

/// Files larger than this are excluded from both file and directory results.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Source of candidate files for an indexing run.
///
/// Implementations must honor the extension allowlist, the excluded path
/// segments, and the size ceiling. The default walks the filesystem
/// directly; a host environment's file-search facility satisfies the same
/// contract.
pub trait FileDiscovery: Send + Sync {
    /// Enumerate candidate files under `root`.
    ///
    /// Enumeration stops early once `cancel` fires. Unreadable entries are
    /// skipped with a warning, producing partial results for the affected
    /// subtree.
    fn discover(
        &self,
        root: &Path,
        config: &CountingConfig,
        cancel: &CancellationToken,
        warnings: &mut Vec<IndexWarning>,
    ) -> Vec<PathBuf>;
}

/// Default discovery walking the filesystem with jwalk.
#[derive(Debug, Default)]
pub struct WalkDiscovery;

impl WalkDiscovery {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }
}

impl FileDiscovery for WalkDiscovery {
    fn discover(
        &self,
        root: &Path,
        config: &CountingConfig,
        cancel: &CancellationToken,
        warnings: &mut Vec<IndexWarning>,
    ) -> Vec<PathBuf> {
        let mut files = Vec::new();

        // Exclusion is segment-based, so hidden entries are walked and the
        // excluded list decides what is dropped.
        for entry_result in WalkDir::new(root).skip_hidden(false) {
            if cancel.is_cancelled() {
                break;
            }

            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry under {}: {err}", root.display());
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warnings.push(IndexWarning::walk_error(path, err.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if has_excluded_segment(&path, root) {
                continue;
            }
            if !config.matches_extension(&path) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) if metadata.len() > MAX_FILE_SIZE => {
                    tracing::debug!(
                        path = %path.display(),
                        size = metadata.len(),
                        "skipping oversized file"
                    );
                    continue;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(path = %path.display(), "skipping file without metadata: {err}");
                    warnings.push(IndexWarning::read_error(
                        &path,
                        &std::io::Error::other(err.to_string()),
                    ));
                    continue;
                }
            }

            files.push(path);
        }

        files
    }
}

/// Check whether any path segment below `root` is in the excluded list.
fn has_excluded_segment(path: &Path, root: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    relative.components().any(|component| {
        matches!(
            component,
            Component::Normal(name)
                if name.to_str().is_some_and(|name| EXCLUDED_SEGMENTS.contains(&name))
        )
    })
}
