//! Error and warning types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced when assembling a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No built-in preset with this name.
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    /// No built-in symbol set with this name.
    #[error("Unknown symbol set: {name}")]
    UnknownSymbolSet { name: String },

    /// A symbol set was paired with more threshold values than it has symbols.
    #[error("Symbol set '{name}' has {available} symbols but {needed} were requested")]
    NotEnoughSymbols {
        name: String,
        available: usize,
        needed: usize,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Kind of indexing warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A file could not be read or decoded.
    ReadError,
    /// A directory entry could not be enumerated.
    WalkError,
}

/// Non-fatal condition encountered during an indexing run.
///
/// Warnings never abort a run; affected files land in the cache as
/// zero-metrics entries and affected subtrees produce partial results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl IndexWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::ReadError,
        }
    }

    /// Create a walk error warning.
    pub fn walk_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind: WarningKind::WalkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownPreset {
            name: "huge".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown preset: huge");
    }

    #[test]
    fn test_warning_creation() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = IndexWarning::read_error("/test/path", &io);
        assert_eq!(warning.kind, WarningKind::ReadError);
        assert!(warning.message.contains("denied"));
    }
}
