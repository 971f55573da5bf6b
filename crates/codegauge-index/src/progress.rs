//! Indexing progress reporting.

use std::path::PathBuf;

/// Progress snapshot for one root, emitted after each batch.
#[derive(Debug, Clone)]
pub struct IndexProgress {
    /// Root currently being indexed.
    pub root: PathBuf,
    /// Files handed to the counter so far, cached skips included.
    pub files_processed: usize,
    /// Total candidate files discovered for this root.
    pub total_files: usize,
}

impl IndexProgress {
    /// Completion fraction in `[0, 1]` for this root.
    pub fn fraction(&self) -> f64 {
        if self.total_files == 0 {
            1.0
        } else {
            self.files_processed as f64 / self.total_files as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let progress = IndexProgress {
            root: PathBuf::from("/r"),
            files_processed: 40,
            total_files: 80,
        };
        assert!((progress.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_with_no_candidates() {
        let progress = IndexProgress {
            root: PathBuf::from("/r"),
            files_processed: 0,
            total_files: 0,
        };
        assert!((progress.fraction() - 1.0).abs() < f64::EPSILON);
    }
}
