use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, debug_span, error, warn};

use super::{Bucket, DescriptionTable, DigramTables, IndexError, KanjiTables, SearchIndex, Table};
use crate::dict::WordRecord;
use crate::ngram::{Digram, Trigram};
use crate::unicode::{is_kanji, to_canonical_str};

/// Fills a [`SearchIndex`] with one worker thread per table group.
///
/// Each pass walks the whole word list once, builds its tables privately and
/// publishes them in one step, so a pass never shares a bucket with another
/// thread while writing.
pub struct IndexBuilder;

/// Join handles of the three passes of one build.
pub struct BuildHandle {
    workers: Vec<(Table, JoinHandle<()>)>,
}

impl IndexBuilder {
    /// Start all three passes and return immediately.
    pub fn spawn(index: &Arc<SearchIndex>) -> Result<BuildHandle, IndexError> {
        let mut workers = Vec::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let index = Arc::clone(index);
            let handle = thread::Builder::new()
                .name(format!("edx-{}", table.name()))
                .spawn(move || run_pass(&index, table))
                .map_err(IndexError::Spawn)?;
            workers.push((table, handle));
        }
        Ok(BuildHandle { workers })
    }

    /// Build every table before returning.
    pub fn build(index: &Arc<SearchIndex>) -> Result<(), IndexError> {
        Self::spawn(index)?.join()
    }
}

impl BuildHandle {
    /// Wait for every pass. Reports the first pass that did not finish.
    pub fn join(self) -> Result<(), IndexError> {
        let mut result = Ok(());
        for (table, handle) in self.workers {
            if handle.join().is_err() && result.is_ok() {
                result = Err(IndexError::BuildFailed(table));
            }
        }
        result
    }
}

/// Marks the pass's table failed if the pass exits without publishing, so
/// waiters return at once instead of running into the ready timeout.
pub(crate) struct PassGuard<'a> {
    index: &'a SearchIndex,
    table: Table,
}

impl<'a> PassGuard<'a> {
    pub fn new(index: &'a SearchIndex, table: Table) -> Self {
        Self { index, table }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        if !self.index.is_ready(self.table) && self.index.mark_failed(self.table) {
            error!(
                kind = self.index.kind().name(),
                table = self.table.name(),
                "index pass ended without publishing"
            );
        }
    }
}

fn run_pass(index: &SearchIndex, table: Table) {
    let _span = debug_span!("index_pass", kind = index.kind().name(), table = table.name()).entered();
    let _guard = PassGuard::new(index, table);
    let started = Instant::now();
    let words = index.words();

    let (published, buckets) = match table {
        Table::Kanji => {
            let tables = build_kanji(words);
            let buckets = tables.starts_with.len() + tables.contains.len();
            (index.kanji.publish(tables), buckets)
        }
        Table::Digram => {
            let tables = build_digram(words);
            let buckets = tables.starts_with.len() + tables.contains.len();
            (index.digram.publish(tables), buckets)
        }
        Table::Description => {
            let table = build_description(words);
            let buckets = table.trigrams.len();
            (index.description.publish(table), buckets)
        }
    };

    if published {
        debug!(
            words = words.len(),
            buckets,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "index pass done"
        );
    } else {
        warn!("index pass finished for an already built table, result dropped");
    }
}

fn push<K: std::hash::Hash + Eq>(map: &mut HashMap<K, Bucket>, key: K, id: u32) {
    map.entry(key).or_default().push(id);
}

/// Pass A. Only words whose canonical headword starts with a kanji are
/// indexed; each kanji is recorded once per word.
pub(crate) fn build_kanji(words: &[Arc<WordRecord>]) -> KanjiTables {
    let mut starts_with = HashMap::new();
    let mut contains = HashMap::new();
    let mut seen = HashSet::new();

    for (id, word) in words.iter().enumerate() {
        let id = id as u32;
        let headword = to_canonical_str(word.headword());
        let mut chars = headword.chars();
        let Some(first) = chars.next().filter(|&c| is_kanji(c)) else {
            continue;
        };
        push(&mut starts_with, first, id);

        seen.clear();
        seen.insert(first);
        for c in chars {
            if is_kanji(c) && seen.insert(c) {
                push(&mut contains, c, id);
            }
        }
    }

    KanjiTables {
        starts_with,
        contains,
    }
}

/// Pass B. Headword and reading share one seen set per word, and the
/// leading pairs are claimed first, so a word is listed at most once per
/// digram across both tables.
pub(crate) fn build_digram(words: &[Arc<WordRecord>]) -> DigramTables {
    let mut starts_with = HashMap::new();
    let mut contains = HashMap::new();
    let mut seen: HashSet<Digram> = HashSet::new();

    for (id, word) in words.iter().enumerate() {
        let id = id as u32;
        let headword: Vec<char> = to_canonical_str(word.headword()).chars().collect();
        let reading: Vec<char> = to_canonical_str(word.reading()).chars().collect();

        seen.clear();
        for chars in [&headword, &reading] {
            if let Some(first) = Digram::windows(chars).next() {
                if seen.insert(first) {
                    push(&mut starts_with, first, id);
                }
            }
        }
        for chars in [&headword, &reading] {
            for digram in Digram::windows(chars).skip(1) {
                if seen.insert(digram) {
                    push(&mut contains, digram, id);
                }
            }
        }
    }

    DigramTables {
        starts_with,
        contains,
    }
}

/// Pass C. Raw gloss text, every occurrence recorded.
pub(crate) fn build_description(words: &[Arc<WordRecord>]) -> DescriptionTable {
    let mut trigrams = HashMap::new();
    let mut chars = Vec::new();

    for (id, word) in words.iter().enumerate() {
        let id = id as u32;
        chars.clear();
        chars.extend(word.gloss().chars());
        for trigram in Trigram::windows(&chars) {
            push(&mut trigrams, trigram, id);
        }
    }

    DescriptionTable { trigrams }
}
