//! Per-kind registry of built search indices.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, warn};

use crate::dict::{DictionaryKind, DictionarySource, SourceError};
use crate::index::{IndexBuilder, IndexError, SearchIndex};
use crate::settings::{settings, FileSettings, Settings};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

type Slot = Mutex<Option<Arc<SearchIndex>>>;

/// Builds at most one [`SearchIndex`] per dictionary kind and hands out
/// shared references to it.
pub struct DictionaryCatalog {
    source_dir: PathBuf,
    cache_dir: PathBuf,
    files: FileSettings,
    ready_timeout: Duration,
    slots: [Slot; DictionaryKind::ALL.len()],
}

impl DictionaryCatalog {
    /// Catalog using the global settings.
    pub fn new(source_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_settings(source_dir, cache_dir, settings())
    }

    pub fn with_settings(
        source_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
        settings: &Settings,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            cache_dir: cache_dir.into(),
            files: settings.files.clone(),
            ready_timeout: settings.index.ready_timeout(),
            slots: Default::default(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn source_path(&self, kind: DictionaryKind) -> PathBuf {
        self.source_dir.join(self.files.source(kind))
    }

    pub fn cache_path(&self, kind: DictionaryKind) -> PathBuf {
        self.cache_dir.join(self.files.cache(kind))
    }

    /// Return the index for `kind`, loading the dictionary and starting the
    /// index build on first use.
    ///
    /// The returned index may still be building; its lookups wait for the
    /// table they need. Callers racing on the same kind block until the first
    /// one has stored its index and then share it. An index whose build
    /// failed is replaced by a fresh build.
    pub fn get(&self, kind: DictionaryKind) -> Result<Arc<SearchIndex>, CatalogError> {
        let mut slot = self.lock(kind);
        match slot.as_ref() {
            Some(index) if !index.has_failed() => return Ok(Arc::clone(index)),
            Some(_) => {
                warn!(kind = kind.name(), "index build failed, rebuilding");
                *slot = None;
            }
            None => {}
        }

        let _span = info_span!("catalog_get", kind = kind.name()).entered();
        let started = Instant::now();
        let source = DictionarySource::load(kind, &self.source_path(kind), &self.cache_path(kind))?;
        let index = Arc::new(SearchIndex::with_ready_timeout(
            kind,
            Arc::clone(source.words()),
            self.ready_timeout,
        ));
        // Workers run detached; each pass records success or failure on the index.
        IndexBuilder::spawn(&index)?;

        info!(
            records = source.len(),
            origin = ?source.origin(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dictionary loaded, indexing started"
        );
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    pub fn is_loaded(&self, kind: DictionaryKind) -> bool {
        self.lock(kind).is_some()
    }

    /// Drop every built index. A `get` in progress finishes first. Indices
    /// already handed out stay usable by their holders.
    pub fn evict_all(&self) {
        for kind in DictionaryKind::ALL {
            if self.lock(kind).take().is_some() {
                debug!(kind = kind.name(), "evicted");
            }
        }
    }

    fn lock(&self, kind: DictionaryKind) -> MutexGuard<'_, Option<Arc<SearchIndex>>> {
        self.slots[kind.slot()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
