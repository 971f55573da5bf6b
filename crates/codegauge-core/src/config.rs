//! Counting configuration types.

use std::path::Path;

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which metric drives indicator classification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CountMode {
    /// Classify by line count.
    #[default]
    Lines,
    /// Classify by whitespace-delimited token count.
    Tokens,
}

/// A severity cut-point: counts at or above `value` map to `indicator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Minimum count for this bucket.
    pub value: u64,
    /// Symbol shown for counts in this bucket.
    pub indicator: CompactString,
    /// Human-readable bucket description.
    pub description: String,
}

impl Threshold {
    /// Create a new threshold.
    pub fn new(
        value: u64,
        indicator: impl Into<CompactString>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            value,
            indicator: indicator.into(),
            description: description.into(),
        }
    }
}

/// Configuration for counting operations.
///
/// The indexing engine treats this as an immutable snapshot per run; swapping
/// it invalidates all cached results because cached indicators were computed
/// under the old thresholds and count mode.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CountingConfig {
    /// Metric used for classification.
    #[builder(default)]
    #[serde(default)]
    pub count_mode: CountMode,

    /// File extensions eligible for counting, with leading dot (e.g. ".rs").
    pub extensions: Vec<String>,

    /// Severity cut-points. Stored order is not significant; the classifier
    /// sorts before lookup. May be empty, in which case every count maps to
    /// the default minimum indicator.
    #[builder(default)]
    #[serde(default)]
    pub thresholds: Vec<Threshold>,
}

impl CountingConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.extensions {
            Some(extensions) if extensions.is_empty() => {
                Err("At least one file extension is required".to_string())
            }
            None => Err("File extensions are required".to_string()),
            _ => Ok(()),
        }
    }
}

impl CountingConfig {
    /// Create a new config builder.
    pub fn builder() -> CountingConfigBuilder {
        CountingConfigBuilder::default()
    }

    /// Create a config from its parts.
    pub fn new(
        count_mode: CountMode,
        extensions: impl IntoIterator<Item = impl Into<String>>,
        thresholds: Vec<Threshold>,
    ) -> Self {
        Self {
            count_mode,
            extensions: extensions.into_iter().map(Into::into).collect(),
            thresholds,
        }
    }

    /// Check whether a path carries one of the configured extensions.
    ///
    /// Comparison is case-insensitive and tolerates configured entries both
    /// with and without the leading dot.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.extensions
            .iter()
            .any(|candidate| candidate.trim_start_matches('.').to_lowercase() == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_builder() {
        let config = CountingConfig::builder()
            .extensions(vec![".rs".to_string(), ".toml".to_string()])
            .count_mode(CountMode::Tokens)
            .build()
            .unwrap();

        assert_eq!(config.count_mode, CountMode::Tokens);
        assert_eq!(config.extensions.len(), 2);
        assert!(config.thresholds.is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_extensions() {
        let result = CountingConfig::builder()
            .extensions(Vec::<String>::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_count_mode_parsing() {
        assert_eq!("lines".parse::<CountMode>().unwrap(), CountMode::Lines);
        assert_eq!("Tokens".parse::<CountMode>().unwrap(), CountMode::Tokens);
        assert!("chars".parse::<CountMode>().is_err());
        assert_eq!(CountMode::Lines.to_string(), "lines");
    }

    #[test]
    fn test_matches_extension() {
        let config = CountingConfig::new(
            CountMode::Lines,
            [".rs", "toml"],
            Vec::new(),
        );

        assert!(config.matches_extension(&PathBuf::from("src/main.rs")));
        assert!(config.matches_extension(&PathBuf::from("Cargo.TOML")));
        assert!(!config.matches_extension(&PathBuf::from("notes.md")));
        assert!(!config.matches_extension(&PathBuf::from("Makefile")));
    }
}
