use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, debug_span, info, warn};

use super::cache::{self, CacheError};
use super::WordRecord;
use crate::edict::{is_skippable, parse_line};
use crate::settings::settings;

/// Which built-in dictionary to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictionaryKind {
    /// EDICT2 general dictionary.
    General,
    /// ENAMDICT proper-noun dictionary.
    Names,
}

impl DictionaryKind {
    pub const ALL: [DictionaryKind; 2] = [DictionaryKind::General, DictionaryKind::Names];

    pub fn is_proper_noun(self) -> bool {
        matches!(self, DictionaryKind::Names)
    }

    pub fn name(self) -> &'static str {
        match self {
            DictionaryKind::General => "general",
            DictionaryKind::Names => "names",
        }
    }

    /// Source file name from the global settings.
    pub fn source_file_name(self) -> &'static str {
        settings().files.source(self)
    }

    /// Cache file name from the global settings.
    pub fn cache_file_name(self) -> &'static str {
        settings().files.cache(self)
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            DictionaryKind::General => 0,
            DictionaryKind::Names => 1,
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the records of a `DictionarySource` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Parsed,
    Memory,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("dictionary source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// All records of one dictionary.
pub struct DictionarySource {
    kind: DictionaryKind,
    words: Arc<[Arc<WordRecord>]>,
    origin: Origin,
}

impl DictionarySource {
    /// Load from the cache when it is up to date, otherwise re-parse the
    /// source file and rewrite the cache.
    pub fn load(
        kind: DictionaryKind,
        source_path: &Path,
        cache_path: &Path,
    ) -> Result<Self, SourceError> {
        let _span = debug_span!("load_dictionary", kind = kind.name()).entered();

        let stale = match cache::is_stale(source_path, cache_path) {
            Ok(stale) => stale,
            Err(CacheError::SourceMissing(path)) => return Err(SourceError::SourceMissing(path)),
            Err(e) => {
                warn!(error = %e, cache = %cache_path.display(), "cannot stat cache, rebuilding");
                true
            }
        };

        if stale {
            info!(cache = %cache_path.display(), "cache missing or outdated");
        } else {
            let started = Instant::now();
            match cache::open(cache_path) {
                Ok(words) => {
                    debug!(
                        records = words.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "loaded cache"
                    );
                    return Ok(Self::new(kind, words, Origin::Cache));
                }
                Err(e) => {
                    warn!(error = %e, cache = %cache_path.display(), "cache unusable, rebuilding");
                }
            }
        }

        let words = Self::parse_file(kind, source_path)?;
        if let Err(e) = cache::save(cache_path, &words) {
            warn!(error = %e, cache = %cache_path.display(), "failed to write cache");
        }
        Ok(Self::new(kind, words, Origin::Parsed))
    }

    /// Parse every entry line of a source file.
    pub fn parse_file(kind: DictionaryKind, path: &Path) -> Result<Vec<WordRecord>, SourceError> {
        let started = Instant::now();
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::SourceMissing(path.to_path_buf())
            } else {
                SourceError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let content = content.trim_start_matches('\u{FEFF}');

        let mut words = Vec::new();
        let mut total_lines = 0u64;
        let mut skipped = 0u64;
        for line in content.lines() {
            total_lines += 1;
            if is_skippable(line) {
                skipped += 1;
                continue;
            }
            words.extend(parse_line(line, kind.is_proper_noun()));
        }

        info!(
            kind = kind.name(),
            records = words.len(),
            lines = total_lines,
            skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parsed dictionary source"
        );
        Ok(words)
    }

    /// Wrap records that are already in memory.
    pub fn from_words(kind: DictionaryKind, words: Vec<WordRecord>) -> Self {
        Self::new(kind, words, Origin::Memory)
    }

    fn new(kind: DictionaryKind, words: Vec<WordRecord>, origin: Origin) -> Self {
        Self {
            kind,
            words: words.into_iter().map(Arc::new).collect(),
            origin,
        }
    }

    pub fn kind(&self) -> DictionaryKind {
        self.kind
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn words(&self) -> &Arc<[Arc<WordRecord>]> {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
