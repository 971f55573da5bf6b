//! File metric counting.

use std::path::Path;

use codegauge_core::{classify, CountMode, FileMetrics, Threshold};

/// Compute `(line_count, token_count)` for file content.
///
/// Line count is the number of `\n` characters, plus one when the content is
/// non-empty and does not end in a newline, so a file without a trailing
/// newline still counts its last line. An empty file has zero lines. Token
/// count is the number of maximal non-whitespace runs.
pub(crate) fn count_content(content: &str) -> (u64, u64) {
    let newlines = content.bytes().filter(|b| *b == b'\n').count() as u64;
    let line_count = if content.is_empty() {
        0
    } else if content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    };

    let token_count = content.split_whitespace().count() as u64;

    (line_count, token_count)
}

/// Count one file and classify the configured metric.
///
/// Fails softly: a file that cannot be read or decoded yields a zero-metrics
/// entry with the minimum-severity indicator and a warning log, never an
/// error. Oversized files are the caller's responsibility; discovery filters
/// them out before this point.
pub async fn count_file(path: &Path, mode: CountMode, thresholds: &[Threshold]) -> FileMetrics {
    let owned = path.to_path_buf();
    let read = tokio::task::spawn_blocking(move || std::fs::read(owned)).await;

    let bytes = match read {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(err)) => {
            tracing::warn!(path = %path.display(), "skipping unreadable file: {err}");
            return FileMetrics::zero(path);
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "read task failed: {err}");
            return FileMetrics::zero(path);
        }
    };

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), "skipping undecodable file: {err}");
            return FileMetrics::zero(path);
        }
    };

    let (line_count, token_count) = count_content(&content);
    let counted = match mode {
        CountMode::Lines => line_count,
        CountMode::Tokens => token_count,
    };

    FileMetrics::new(path, line_count, token_count, classify(counted, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegauge_core::DEFAULT_INDICATOR;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_line_count_without_trailing_newline() {
        assert_eq!(count_content("a\nb\nc"), (3, 3));
    }

    #[test]
    fn test_line_count_with_trailing_newline() {
        assert_eq!(count_content("x\ny\n"), (2, 2));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(count_content(""), (0, 0));
    }

    #[test]
    fn test_token_count_collapses_whitespace_runs() {
        let (lines, tokens) = count_content("a b\nc\n\nd");
        assert_eq!(tokens, 4);
        assert_eq!(lines, 4);
    }

    #[test]
    fn test_whitespace_only_content() {
        let (lines, tokens) = count_content("  \n\t\n");
        assert_eq!(lines, 2);
        assert_eq!(tokens, 0);
    }

    #[tokio::test]
    async fn test_count_file_classifies_chosen_metric() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample.txt");
        fs::write(&path, "alpha beta gamma\ndelta\n").unwrap();

        let thresholds = vec![
            Threshold::new(0, "⚪", "Tiny size"),
            Threshold::new(3, "🔵", "Small size"),
        ];

        let by_lines = count_file(&path, CountMode::Lines, &thresholds).await;
        assert_eq!(by_lines.line_count, 2);
        assert_eq!(by_lines.token_count, 4);
        assert_eq!(by_lines.indicator, "⚪");

        let by_tokens = count_file(&path, CountMode::Tokens, &thresholds).await;
        assert_eq!(by_tokens.indicator, "🔵");
    }

    #[tokio::test]
    async fn test_count_file_missing_path_fails_softly() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let metrics = count_file(&path, CountMode::Lines, &[]).await;
        assert_eq!(metrics.line_count, 0);
        assert_eq!(metrics.token_count, 0);
        assert_eq!(metrics.indicator, DEFAULT_INDICATOR);
        assert_eq!(metrics.path, path);
    }

    #[tokio::test]
    async fn test_count_file_invalid_utf8_fails_softly() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let metrics = count_file(&path, CountMode::Lines, &[]).await;
        assert_eq!(metrics.line_count, 0);
        assert_eq!(metrics.indicator, DEFAULT_INDICATOR);
    }
}
