//! Indexing controller.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use codegauge_core::{CountingConfig, DirectoryMetrics, FileMetrics, IndexWarning};

use crate::aggregate::aggregate;
use crate::cache::MetricsCache;
use crate::counter::count_file;
use crate::discover::{FileDiscovery, WalkDiscovery};
use crate::progress::IndexProgress;

/// Number of files counted concurrently within one batch. Batches run
/// strictly sequentially, so this is also the parallelism bound.
pub const DEFAULT_BATCH_SIZE: usize = 20;

const PROGRESS_CHANNEL_SIZE: usize = 100;

/// Terminal state of the most recent indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// All roots were processed.
    Finished,
    /// The run stopped at a cancellation point.
    Canceled,
}

/// Options for starting an indexing run.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Re-count files even when a cached entry exists. Does not clear the
    /// cache; each recomputed file overwrites its prior entry.
    pub force_refresh: bool,

    /// Files to count before all others, e.g. those currently visible in
    /// the host. Ordering among the rest is stable.
    pub priority_paths: Vec<PathBuf>,
}

#[derive(Default)]
struct RunState {
    running: bool,
    cancel: Option<CancellationToken>,
    last_outcome: Option<IndexOutcome>,
    last_warnings: Vec<IndexWarning>,
}

fn lock_run(run: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    run.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything one run needs, snapshotted at start so a concurrent
/// `update_config` cannot shift semantics mid-run.
struct RunContext {
    config: Arc<CountingConfig>,
    roots: Vec<PathBuf>,
    cache: Arc<MetricsCache>,
    discovery: Arc<dyn FileDiscovery>,
    batch_size: usize,
    options: IndexOptions,
    cancel: CancellationToken,
    progress_tx: broadcast::Sender<IndexProgress>,
}

/// Drives indexing runs over a fixed set of roots.
///
/// State machine: `Idle → Running → {Finished, Canceled} → Idle`. Only one
/// run may be active at a time; a start request while running is a no-op.
/// The caller's thread is never blocked: [`Indexer::start`] spawns the run
/// onto the tokio runtime and returns immediately.
pub struct Indexer {
    roots: Vec<PathBuf>,
    config: RwLock<CountingConfig>,
    cache: Arc<MetricsCache>,
    discovery: Arc<dyn FileDiscovery>,
    batch_size: usize,
    state_tx: Arc<watch::Sender<bool>>,
    progress_tx: broadcast::Sender<IndexProgress>,
    run: Arc<Mutex<RunState>>,
}

impl Indexer {
    /// Create an indexer over `roots` with the default filesystem walker.
    pub fn new(roots: Vec<PathBuf>, config: CountingConfig) -> Self {
        let (state_tx, _) = watch::channel(false);
        let (progress_tx, _) = broadcast::channel(PROGRESS_CHANNEL_SIZE);

        Self {
            roots,
            config: RwLock::new(config),
            cache: Arc::new(MetricsCache::new()),
            discovery: Arc::new(WalkDiscovery::new()),
            batch_size: DEFAULT_BATCH_SIZE,
            state_tx: Arc::new(state_tx),
            progress_tx,
            run: Arc::new(Mutex::new(RunState::default())),
        }
    }

    /// Replace the discovery implementation, e.g. with a host-delegated
    /// search facility.
    pub fn with_discovery(mut self, discovery: Arc<dyn FileDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// Override the batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Begin an indexing run.
    ///
    /// Returns a handle to the spawned run, or `None` when a run is already
    /// in progress. The state channel flips to `true` before this returns
    /// and back to `false` once the run finishes or is canceled.
    pub fn start(&self, options: IndexOptions) -> Option<JoinHandle<IndexOutcome>> {
        let cancel = CancellationToken::new();
        {
            let mut run = lock_run(&self.run);
            if run.running {
                return None;
            }
            run.running = true;
            run.cancel = Some(cancel.clone());
            run.last_outcome = None;
            run.last_warnings.clear();
        }
        let _ = self.state_tx.send(true);

        let config = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let ctx = RunContext {
            config: Arc::new(config),
            roots: self.roots.clone(),
            cache: Arc::clone(&self.cache),
            discovery: Arc::clone(&self.discovery),
            batch_size: self.batch_size,
            options,
            cancel,
            progress_tx: self.progress_tx.clone(),
        };
        let run = Arc::clone(&self.run);
        let state_tx = Arc::clone(&self.state_tx);

        Some(tokio::spawn(async move {
            let (outcome, warnings) = run_index(ctx).await;
            {
                let mut state = lock_run(&run);
                state.running = false;
                state.cancel = None;
                state.last_outcome = Some(outcome);
                state.last_warnings = warnings;
            }
            let _ = state_tx.send(false);
            outcome
        }))
    }

    /// Request cancellation of the active run.
    ///
    /// No effect when idle. The stop point is the next batch boundary, not
    /// immediate: a batch already dispatched runs to completion and its
    /// results are still committed to the cache.
    pub fn cancel(&self) {
        let run = lock_run(&self.run);
        if let Some(cancel) = run.cancel.as_ref() {
            cancel.cancel();
        }
    }

    /// Whether a run is currently active.
    pub fn is_indexing(&self) -> bool {
        lock_run(&self.run).running
    }

    /// Terminal state of the most recent run, if any completed.
    pub fn last_outcome(&self) -> Option<IndexOutcome> {
        lock_run(&self.run).last_outcome
    }

    /// Non-fatal warnings collected by the most recent run.
    pub fn last_warnings(&self) -> Vec<IndexWarning> {
        lock_run(&self.run).last_warnings.clone()
    }

    /// Subscribe to indexing-state changes: `true` on run start, `false` on
    /// run end (finished or canceled).
    pub fn subscribe_state(&self) -> watch::Receiver<bool> {
        self.state_tx.subscribe()
    }

    /// Subscribe to per-batch progress updates. Lossy: receivers that lag
    /// miss intermediate snapshots.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<IndexProgress> {
        self.progress_tx.subscribe()
    }

    /// Look up metrics for a file. Readable at any time, including mid-run.
    pub fn file_metrics(&self, path: &Path) -> Option<FileMetrics> {
        self.cache.file(path)
    }

    /// Look up metrics for a directory. Totals reflect the last completed
    /// aggregation pass.
    pub fn directory_metrics(&self, path: &Path) -> Option<DirectoryMetrics> {
        self.cache.directory(path)
    }

    /// Drop all cached metrics, both levels.
    ///
    /// Callable at any time. A running scan keeps writing into the emptied
    /// maps; that race is documented behavior, not corrected with locking.
    pub fn clear_caches(&self) {
        self.cache.clear();
    }

    /// Swap the counting configuration and clear both caches, since every
    /// cached indicator was computed under the old thresholds.
    pub fn update_config(&self, config: CountingConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        self.cache.clear();
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> CountingConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Roots this indexer scans.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

async fn run_index(ctx: RunContext) -> (IndexOutcome, Vec<IndexWarning>) {
    let mut warnings = Vec::new();

    for root in &ctx.roots {
        if ctx.cancel.is_cancelled() {
            break;
        }
        index_root(&ctx, root, &mut warnings).await;
    }

    let outcome = if ctx.cancel.is_cancelled() {
        IndexOutcome::Canceled
    } else {
        IndexOutcome::Finished
    };
    tracing::info!(
        files = ctx.cache.file_count(),
        directories = ctx.cache.directory_count(),
        warnings = warnings.len(),
        outcome = ?outcome,
        "indexing run complete"
    );
    (outcome, warnings)
}

async fn index_root(ctx: &RunContext, root: &Path, warnings: &mut Vec<IndexWarning>) {
    let candidates = {
        let discovery = Arc::clone(&ctx.discovery);
        let config = Arc::clone(&ctx.config);
        let cancel = ctx.cancel.clone();
        let root_buf = root.to_path_buf();
        let walk = tokio::task::spawn_blocking(move || {
            let mut walk_warnings = Vec::new();
            let files = discovery.discover(&root_buf, &config, &cancel, &mut walk_warnings);
            (files, walk_warnings)
        });
        match walk.await {
            Ok((files, walk_warnings)) => {
                warnings.extend(walk_warnings);
                files
            }
            Err(err) => {
                tracing::warn!(root = %root.display(), "discovery task failed: {err}");
                Vec::new()
            }
        }
    };

    if ctx.cancel.is_cancelled() {
        return;
    }

    let candidates = order_candidates(candidates, &ctx.options.priority_paths);
    let total_files = candidates.len();
    let mut files_processed = 0usize;

    for batch in candidates.chunks(ctx.batch_size) {
        // Cancellation is checked only here: an in-flight batch always runs
        // to completion and commits its results.
        if ctx.cancel.is_cancelled() {
            return;
        }

        let mut handles = Vec::with_capacity(batch.len());
        for path in batch {
            if !ctx.options.force_refresh && ctx.cache.contains_file(path) {
                continue;
            }
            let path = path.clone();
            let config = Arc::clone(&ctx.config);
            let cache = Arc::clone(&ctx.cache);
            handles.push(tokio::spawn(async move {
                let metrics = count_file(&path, config.count_mode, &config.thresholds).await;
                cache.insert_file(metrics);
            }));
        }
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::warn!("count task failed: {err}");
            }
        }

        files_processed += batch.len();
        let _ = ctx.progress_tx.send(IndexProgress {
            root: root.to_path_buf(),
            files_processed,
            total_files,
        });

        // Keep the host responsive between batches.
        tokio::task::yield_now().await;
    }

    if ctx.cancel.is_cancelled() {
        return;
    }
    aggregate(root, &ctx.cache);
}

/// Order candidates so priority paths sort first; stable otherwise.
fn order_candidates(mut candidates: Vec<PathBuf>, priority_paths: &[PathBuf]) -> Vec<PathBuf> {
    if priority_paths.is_empty() {
        return candidates;
    }
    let priority: HashSet<&Path> = priority_paths.iter().map(PathBuf::as_path).collect();
    candidates.sort_by_key(|path| !priority.contains(path.as_path()));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_candidates_puts_priority_first() {
        let candidates = vec![
            PathBuf::from("/r/a.rs"),
            PathBuf::from("/r/b.rs"),
            PathBuf::from("/r/c.rs"),
            PathBuf::from("/r/d.rs"),
        ];
        let priority = vec![PathBuf::from("/r/c.rs")];

        let ordered = order_candidates(candidates, &priority);

        assert_eq!(ordered[0], PathBuf::from("/r/c.rs"));
        // Remaining order is stable.
        assert_eq!(ordered[1], PathBuf::from("/r/a.rs"));
        assert_eq!(ordered[2], PathBuf::from("/r/b.rs"));
        assert_eq!(ordered[3], PathBuf::from("/r/d.rs"));
    }

    #[test]
    fn test_order_candidates_without_priority_is_untouched() {
        let candidates = vec![PathBuf::from("/r/b.rs"), PathBuf::from("/r/a.rs")];
        let ordered = order_candidates(candidates.clone(), &[]);
        assert_eq!(ordered, candidates);
    }
}
