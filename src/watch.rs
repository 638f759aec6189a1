//! Live tree reload.
//!
//! Watches the tree document (or the builder's source directory) with
//! `notify`, debounces bursts of change events, and installs the reloaded
//! tree into a [`TreeSlot`]. A failed reload keeps the previous tree.

use crate::error::ApiError;
use crate::store::{load_document, TreeSlot};
use crate::tree::{FileTree, TreeBuilder};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// What to rebuild when something changes
#[derive(Debug, Clone)]
pub enum ReloadPlan {
    /// Re-read a tree document
    Document(PathBuf),
    /// Re-run the builder over its source directory
    Directory(TreeBuilder),
}

impl ReloadPlan {
    /// Produce a fresh tree.
    pub fn reload(&self) -> Result<FileTree, ApiError> {
        match self {
            ReloadPlan::Document(path) => load_document(path),
            ReloadPlan::Directory(builder) => builder.build(),
        }
    }

    /// Whether `event` can affect the reloaded tree.
    pub fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        match self {
            ReloadPlan::Document(path) => {
                let Some(name) = path.file_name() else {
                    return false;
                };
                event.paths.iter().any(|p| p.file_name() == Some(name))
            }
            ReloadPlan::Directory(builder) => event.paths.iter().any(|p| {
                !p.components().any(|c| {
                    builder
                        .walker_config()
                        .is_ignored(&c.as_os_str().to_string_lossy())
                })
            }),
        }
    }

    /// Path handed to the watcher and its recursion mode.
    ///
    /// A document is watched through its parent directory so editors that
    /// replace the file on save are still seen.
    fn watch_target(&self) -> Result<(PathBuf, RecursiveMode), ApiError> {
        match self {
            ReloadPlan::Document(path) => {
                let absolute = dunce::canonicalize(path)?;
                let parent = absolute
                    .parent()
                    .map(Path::to_path_buf)
                    .ok_or_else(|| ApiError::Watch(format!("{} has no parent", path.display())))?;
                Ok((parent, RecursiveMode::NonRecursive))
            }
            ReloadPlan::Directory(builder) => Ok((
                dunce::canonicalize(builder.source())?,
                RecursiveMode::Recursive,
            )),
        }
    }
}

/// Watcher settings
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Quiet period after the last relevant event before reloading
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

/// Reloads a [`TreeSlot`] when its source changes
pub struct TreeWatcher {
    slot: TreeSlot,
    plan: ReloadPlan,
    config: WatchConfig,
    running: Arc<RwLock<bool>>,
}

impl TreeWatcher {
    pub fn new(slot: TreeSlot, plan: ReloadPlan, config: WatchConfig) -> Self {
        Self {
            slot,
            plan,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Reload once and install the result.
    ///
    /// On failure a `Ready` slot keeps its tree; any other slot is marked
    /// unavailable.
    pub fn reload_now(&self) -> Result<(), ApiError> {
        match self.plan.reload() {
            Ok(tree) => {
                let stats = tree.stats();
                info!(folders = stats.folders, files = stats.files, "Reloaded file tree");
                self.slot.install(tree);
                Ok(())
            }
            Err(e) => {
                if self.slot.is_ready() {
                    warn!(error = %e, "Tree reload failed, keeping previous tree");
                } else {
                    warn!(error = %e, "Tree reload failed");
                    self.slot.fail(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Start watching on a background thread.
    pub fn spawn(self) -> Result<WatchHandle, ApiError> {
        let (target, mode) = self.plan.watch_target()?;
        let (tx, rx) = mpsc::channel();
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })
        .map_err(|e| ApiError::Watch(format!("Failed to create watcher: {}", e)))?;
        watcher
            .watch(&target, mode)
            .map_err(|e| ApiError::Watch(format!("Failed to watch {}: {}", target.display(), e)))?;
        info!(target = %target.display(), "Watching tree source");

        *self.running.write() = true;
        let running = Arc::clone(&self.running);
        let thread = std::thread::Builder::new()
            .name("termfolio-watch".to_string())
            .spawn(move || {
                let _watcher = watcher;
                self.run(rx);
            })?;

        Ok(WatchHandle {
            running,
            thread: Some(thread),
        })
    }

    fn run(&self, rx: mpsc::Receiver<notify::Result<Event>>) {
        let debounce = Duration::from_millis(self.config.debounce_ms);
        let mut pending_since: Option<Instant> = None;

        while *self.running.read() {
            match rx.recv_timeout(debounce) {
                Ok(Ok(event)) => {
                    if self.plan.is_relevant(&event) {
                        debug!(paths = ?event.paths, "Tree source changed");
                        pending_since = Some(Instant::now());
                    }
                }
                Ok(Err(e)) => {
                    warn!("Watch error: {}", e);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if let Some(since) = pending_since {
                if since.elapsed() >= debounce {
                    pending_since = None;
                    let _ = self.reload_now();
                }
            }
        }
        debug!("Watcher stopped");
    }
}

/// Handle to a running [`TreeWatcher`]
pub struct WatchHandle {
    running: Arc<RwLock<bool>>,
    thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub fn is_running(&self) -> bool {
        *self.running.read()
    }

    /// Stop the watcher and wait for its thread to exit.
    pub fn stop(mut self) {
        *self.running.write() = false;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Watcher thread panicked");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        *self.running.write() = false;
    }
}
