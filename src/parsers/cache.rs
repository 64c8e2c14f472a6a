use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DirectiveSource, Include};
use crate::error::Result;

/// Memoizes the include directives of every file read during a run.
///
/// A header reached through many branches is read and scanned once. The
/// cache is keyed by the joined path the walker asks for and is safe to share
/// between worker threads. Failed reads are not cached.
pub struct DirectiveCache<S> {
    inner: S,
    entries: DashMap<PathBuf, Vec<Include>>,
    misses: AtomicUsize,
}

impl<S: DirectiveSource> DirectiveCache<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            misses: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl<S: DirectiveSource> DirectiveSource for DirectiveCache<S> {
    fn includes(&self, file_path: &Path) -> Result<Vec<Include>> {
        if let Some(entry) = self.entries.get(file_path) {
            return Ok(entry.value().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let includes = self.inner.includes(file_path)?;
        self.entries
            .insert(file_path.to_path_buf(), includes.clone());
        Ok(includes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub misses: usize,
}
