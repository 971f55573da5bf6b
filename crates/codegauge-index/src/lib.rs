//! Indexing engine for codegauge.
//!
//! This crate scans trees of source files, counts lines and tokens per file,
//! and aggregates the results bottom-up into per-directory totals. Key
//! pieces:
//!
//! - **Candidate discovery** behind the [`FileDiscovery`] seam, with a
//!   default jwalk-based filesystem walker
//! - **Batched counting** with bounded parallelism and cooperative
//!   cancellation at batch boundaries
//! - **Two-level cache** readable at any time, including mid-run
//! - **Directory aggregation** rebuilding rollup totals per root
//!
//! # Example
//!
//! ```rust,no_run
//! use codegauge_core::preset;
//! use codegauge_index::{IndexOptions, Indexer};
//!
//! # async fn run() {
//! let config = preset("default").unwrap();
//! let indexer = Indexer::new(vec!["/path/to/project".into()], config);
//!
//! let handle = indexer.start(IndexOptions::default()).unwrap();
//! let outcome = handle.await.unwrap();
//!
//! let root = indexer.directory_metrics("/path/to/project".as_ref()).unwrap();
//! println!("{} lines total ({outcome:?})", root.total_line_count);
//! # }
//! ```
//!
//! # State notifications
//!
//! Subscribe to the indexing state and progress channels:
//!
//! ```rust,no_run
//! use codegauge_core::preset;
//! use codegauge_index::Indexer;
//!
//! let indexer = Indexer::new(vec!["/path".into()], preset("default").unwrap());
//! let mut state_rx = indexer.subscribe_state();
//!
//! tokio::spawn(async move {
//!     while state_rx.changed().await.is_ok() {
//!         println!("indexing: {}", *state_rx.borrow());
//!     }
//! });
//! ```

mod aggregate;
mod cache;
mod counter;
mod discover;
mod indexer;
mod progress;

pub use aggregate::aggregate;
pub use cache::MetricsCache;
pub use counter::count_file;
pub use discover::{FileDiscovery, WalkDiscovery, EXCLUDED_SEGMENTS, MAX_FILE_SIZE};
pub use indexer::{IndexOptions, IndexOutcome, Indexer, DEFAULT_BATCH_SIZE};
pub use progress::IndexProgress;

// Re-export core types for convenience
pub use codegauge_core::{
    CountMode, CountingConfig, DirectoryMetrics, FileMetrics, MetricsEntry, Threshold,
};
