//! Per-path locking
//!
//! Every resolved path gets its own `RwLock`, created on first use.
//! Readers of one path share it, writers are exclusive, and different
//! paths never contend. Once the registry grows past
//! [`PathLocks::PRUNE_THRESHOLD`] entries, the ones nobody holds are
//! pruned before the next lock is handed out.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Registry of locks keyed by resolved path.
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    locks: Arc<DashMap<PathBuf, Arc<RwLock<()>>>>,
}

impl PathLocks {
    /// Registry size above which idle entries are pruned.
    pub const PRUNE_THRESHOLD: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire shared access to `path`.
    pub async fn read(&self, path: &Path) -> OwnedRwLockReadGuard<()> {
        self.lock_for(path).read_owned().await
    }

    /// Acquire exclusive access to `path`.
    pub async fn write(&self, path: &Path) -> OwnedRwLockWriteGuard<()> {
        self.lock_for(path).write_owned().await
    }

    /// Number of paths currently tracked.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn lock_for(&self, path: &Path) -> Arc<RwLock<()>> {
        if self.locks.len() > Self::PRUNE_THRESHOLD {
            // An entry only the registry references has no holder or waiter
            self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        self.locks
            .entry(path.to_path_buf())
            .or_default()
            .value()
            .clone()
    }
}
