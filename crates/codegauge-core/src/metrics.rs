//! Per-file and per-directory metric nodes.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_INDICATOR;
use crate::config::CountMode;

/// Counts and classification for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Absolute path of the counted file.
    pub path: PathBuf,

    /// Number of lines in the file.
    pub line_count: u64,

    /// Number of whitespace-delimited tokens in the file.
    pub token_count: u64,

    /// Severity indicator for the configured count mode.
    pub indicator: CompactString,
}

impl FileMetrics {
    /// Create metrics for a file.
    pub fn new(
        path: impl Into<PathBuf>,
        line_count: u64,
        token_count: u64,
        indicator: impl Into<CompactString>,
    ) -> Self {
        Self {
            path: path.into(),
            line_count,
            token_count,
            indicator: indicator.into(),
        }
    }

    /// Zero-metrics entry with the minimum-severity indicator, used when a
    /// file cannot be read or decoded.
    pub fn zero(path: impl Into<PathBuf>) -> Self {
        Self::new(path, 0, 0, DEFAULT_INDICATOR)
    }

    /// The count selected by `mode`.
    pub fn count_for(&self, mode: CountMode) -> u64 {
        match mode {
            CountMode::Lines => self.line_count,
            CountMode::Tokens => self.token_count,
        }
    }
}

/// Rolled-up totals for a directory subtree.
///
/// Totals reflect every file transitively contained in the directory that is
/// present in the cache at aggregation time. Rebuilt wholesale each
/// aggregation pass, never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryMetrics {
    /// Absolute path of the directory.
    pub path: PathBuf,

    /// Sum of line counts over all cached descendant files.
    pub total_line_count: u64,

    /// Sum of token counts over all cached descendant files.
    pub total_token_count: u64,

    /// Direct children, each path unique within the parent, ordered by path.
    pub children: Vec<MetricsEntry>,
}

impl DirectoryMetrics {
    /// Create an empty directory node with zero totals.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            total_line_count: 0,
            total_token_count: 0,
            children: Vec::new(),
        }
    }

    /// The total selected by `mode`.
    pub fn total_for(&self, mode: CountMode) -> u64 {
        match mode {
            CountMode::Lines => self.total_line_count,
            CountMode::Tokens => self.total_token_count,
        }
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check whether a child with the given path is already attached.
    pub fn has_child(&self, path: &Path) -> bool {
        self.children.iter().any(|child| child.path() == path)
    }
}

/// A tree child: file or subdirectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricsEntry {
    /// A counted file.
    File(FileMetrics),
    /// An aggregated subdirectory.
    Directory(DirectoryMetrics),
}

impl MetricsEntry {
    /// Path of the underlying file or directory.
    pub fn path(&self) -> &Path {
        match self {
            MetricsEntry::File(file) => &file.path,
            MetricsEntry::Directory(dir) => &dir.path,
        }
    }

    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, MetricsEntry::File(_))
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, MetricsEntry::Directory(_))
    }

    /// Line count for files, rolled-up line total for directories.
    pub fn line_count(&self) -> u64 {
        match self {
            MetricsEntry::File(file) => file.line_count,
            MetricsEntry::Directory(dir) => dir.total_line_count,
        }
    }

    /// Token count for files, rolled-up token total for directories.
    pub fn token_count(&self) -> u64 {
        match self {
            MetricsEntry::File(file) => file.token_count,
            MetricsEntry::Directory(dir) => dir.total_token_count,
        }
    }

    /// The count selected by `mode`.
    pub fn count_for(&self, mode: CountMode) -> u64 {
        match mode {
            CountMode::Lines => self.line_count(),
            CountMode::Tokens => self.token_count(),
        }
    }

    /// Indicator for files; directories carry no indicator of their own.
    pub fn indicator(&self) -> Option<&str> {
        match self {
            MetricsEntry::File(file) => Some(&file.indicator),
            MetricsEntry::Directory(_) => None,
        }
    }
}
