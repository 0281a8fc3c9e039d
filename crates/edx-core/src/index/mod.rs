//! N-gram search index over one dictionary.
//!
//! Five tables, grouped by the build pass that fills them:
//!
//! - kanji: first canonical kanji of the headword (starts-with) and every
//!   other kanji in it (contains)
//! - digram: first canonical pair of headword / reading (starts-with) and
//!   every later pair (contains)
//! - description: every raw character triple of the gloss
//!
//! Each group sits behind its own [`Gate`], so a lookup either sees a fully
//! built table or waits for it, up to the index's ready timeout.

mod builder;
mod gate;

pub use builder::{BuildHandle, IndexBuilder};

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dict::{DictionaryKind, WordRecord};
use crate::ngram::{Digram, Trigram};
use crate::settings::settings;
use crate::unicode::to_canonical;

use gate::{Gate, WaitError};

/// Positions into the index's word list.
pub(crate) type Bucket = Vec<u32>;

pub(crate) struct KanjiTables {
    pub starts_with: HashMap<char, Bucket>,
    pub contains: HashMap<char, Bucket>,
}

pub(crate) struct DigramTables {
    pub starts_with: HashMap<Digram, Bucket>,
    pub contains: HashMap<Digram, Bucket>,
}

pub(crate) struct DescriptionTable {
    pub trigrams: HashMap<Trigram, Bucket>,
}

/// Table group, one per build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Kanji,
    Digram,
    Description,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Kanji, Table::Digram, Table::Description];

    pub fn name(self) -> &'static str {
        match self {
            Table::Kanji => "kanji",
            Table::Digram => "digram",
            Table::Description => "description",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("{table} index not ready after {}ms", .waited.as_millis())]
    NotReady { table: Table, waited: Duration },

    #[error("invalid query key {key:?}: expected 1 to 3 characters")]
    InvalidKey { key: String },

    #[error("failed to spawn index worker: {0}")]
    Spawn(io::Error),

    #[error("{0} index build failed")]
    BuildFailed(Table),
}

/// A raw lookup key as produced by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Kanji(char),
    Digram(Digram),
    Description(Trigram),
}

impl Query {
    /// One character is a kanji lookup, two a digram, three a gloss trigram.
    pub fn from_key(key: &str) -> Result<Self, IndexError> {
        let chars: Vec<char> = key.chars().collect();
        match chars.as_slice() {
            &[c] => Ok(Query::Kanji(c)),
            &[a, b] => Ok(Query::Digram(Digram::new(a, b))),
            &[a, b, c] => Ok(Query::Description(Trigram::new(a, b, c))),
            _ => Err(IndexError::InvalidKey {
                key: key.to_string(),
            }),
        }
    }
}

/// Bucket counts per table; `None` while a table is still being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub words: usize,
    pub kanji_starts_with: Option<usize>,
    pub kanji_contains: Option<usize>,
    pub digram_starts_with: Option<usize>,
    pub digram_contains: Option<usize>,
    pub description_trigrams: Option<usize>,
}

pub struct SearchIndex {
    kind: DictionaryKind,
    words: Arc<[Arc<WordRecord>]>,
    kanji: Gate<KanjiTables>,
    digram: Gate<DigramTables>,
    description: Gate<DescriptionTable>,
    ready_timeout: Duration,
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("kind", &self.kind)
            .field("words", &self.words.len())
            .field("kanji", &self.kanji.is_open())
            .field("digram", &self.digram.is_open())
            .field("description", &self.description.is_open())
            .finish()
    }
}

impl SearchIndex {
    /// Empty index over `words`; tables are filled by [`IndexBuilder`].
    pub fn new(kind: DictionaryKind, words: Arc<[Arc<WordRecord>]>) -> Self {
        Self::with_ready_timeout(kind, words, settings().index.ready_timeout())
    }

    pub fn with_ready_timeout(
        kind: DictionaryKind,
        words: Arc<[Arc<WordRecord>]>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            words,
            kanji: Gate::new(),
            digram: Gate::new(),
            description: Gate::new(),
            ready_timeout,
        }
    }

    pub fn kind(&self) -> DictionaryKind {
        self.kind
    }

    pub fn words(&self) -> &Arc<[Arc<WordRecord>]> {
        &self.words
    }

    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    pub fn is_ready(&self, table: Table) -> bool {
        match table {
            Table::Kanji => self.kanji.is_open(),
            Table::Digram => self.digram.is_open(),
            Table::Description => self.description.is_open(),
        }
    }

    /// Block until `table` is built, bounded by the ready timeout.
    pub fn wait_ready(&self, table: Table) -> Result<(), IndexError> {
        match table {
            Table::Kanji => self.wait_for(&self.kanji, table).map(|_| ()),
            Table::Digram => self.wait_for(&self.digram, table).map(|_| ()),
            Table::Description => self.wait_for(&self.description, table).map(|_| ()),
        }
    }

    pub fn wait_all(&self) -> Result<(), IndexError> {
        Table::ALL.into_iter().try_for_each(|t| self.wait_ready(t))
    }

    /// Whether any build pass ended without publishing its tables. Lookups
    /// on that table fail immediately; the index has to be rebuilt.
    pub fn has_failed(&self) -> bool {
        self.kanji.is_failed() || self.digram.is_failed() || self.description.is_failed()
    }

    pub(crate) fn mark_failed(&self, table: Table) -> bool {
        match table {
            Table::Kanji => self.kanji.fail(),
            Table::Digram => self.digram.fail(),
            Table::Description => self.description.fail(),
        }
    }

    /// Words whose headword starts with kanji `c`, plus (unless
    /// `starts_with_only`) words containing it later on.
    pub fn lookup_kanji(
        &self,
        c: char,
        starts_with_only: bool,
    ) -> Result<Vec<Arc<WordRecord>>, IndexError> {
        let tables = self.wait_for(&self.kanji, Table::Kanji)?;
        let key = to_canonical(c);
        let mut out = self.resolve(tables.starts_with.get(&key));
        if !starts_with_only {
            out.extend(self.resolve(tables.contains.get(&key)));
        }
        Ok(out)
    }

    /// Words whose headword or reading starts with `digram`, plus (unless
    /// `starts_with_only`) words containing it later on. The key is
    /// canonicalised, so katakana and hiragana keys are equivalent.
    pub fn lookup_digram(
        &self,
        digram: Digram,
        starts_with_only: bool,
    ) -> Result<Vec<Arc<WordRecord>>, IndexError> {
        let tables = self.wait_for(&self.digram, Table::Digram)?;
        let key = Digram::new(to_canonical(digram.0[0]), to_canonical(digram.0[1]));
        let mut out = self.resolve(tables.starts_with.get(&key));
        if !starts_with_only {
            out.extend(self.resolve(tables.contains.get(&key)));
        }
        Ok(out)
    }

    /// Words whose gloss contains `trigram` verbatim. A word is listed once
    /// per occurrence.
    pub fn lookup_description(&self, trigram: Trigram) -> Result<Vec<Arc<WordRecord>>, IndexError> {
        let table = self.wait_for(&self.description, Table::Description)?;
        Ok(self.resolve(table.trigrams.get(&trigram)))
    }

    pub fn query(
        &self,
        query: &Query,
        starts_with_only: bool,
    ) -> Result<Vec<Arc<WordRecord>>, IndexError> {
        match *query {
            Query::Kanji(c) => self.lookup_kanji(c, starts_with_only),
            Query::Digram(d) => self.lookup_digram(d, starts_with_only),
            Query::Description(t) => self.lookup_description(t),
        }
    }

    /// Snapshot of bucket counts. Never blocks.
    pub fn stats(&self) -> IndexStats {
        let kanji = self.kanji.get();
        let digram = self.digram.get();
        let description = self.description.get();
        IndexStats {
            words: self.words.len(),
            kanji_starts_with: kanji.map(|t| t.starts_with.len()),
            kanji_contains: kanji.map(|t| t.contains.len()),
            digram_starts_with: digram.map(|t| t.starts_with.len()),
            digram_contains: digram.map(|t| t.contains.len()),
            description_trigrams: description.map(|t| t.trigrams.len()),
        }
    }

    fn wait_for<'a, T>(&self, gate: &'a Gate<T>, table: Table) -> Result<&'a T, IndexError> {
        let started = Instant::now();
        gate.wait(self.ready_timeout).map_err(|e| match e {
            WaitError::Failed => IndexError::BuildFailed(table),
            WaitError::TimedOut => IndexError::NotReady {
                table,
                waited: started.elapsed(),
            },
        })
    }

    fn resolve(&self, bucket: Option<&Bucket>) -> Vec<Arc<WordRecord>> {
        bucket
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.words.get(id as usize).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
