//! Core types for codegauge.
//!
//! This crate provides the fundamental data structures used throughout the
//! codegauge ecosystem: counting configuration and thresholds, built-in
//! presets and symbol sets, per-file and per-directory metric nodes, and the
//! threshold classifier.

mod classify;
mod config;
mod error;
mod metrics;
mod presets;
mod symbols;

pub use classify::{classify, DEFAULT_INDICATOR};
pub use config::{CountMode, CountingConfig, CountingConfigBuilder, Threshold};
pub use error::{ConfigError, IndexWarning, WarningKind};
pub use metrics::{DirectoryMetrics, FileMetrics, MetricsEntry};
pub use presets::{preset, PRESET_NAMES};
pub use symbols::{symbol_set, thresholds_with_symbols, SymbolSet, SYMBOL_SETS};
