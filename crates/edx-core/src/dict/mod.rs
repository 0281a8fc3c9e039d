//! Dictionary records, the binary cache and source loading.
//!
//! `DictionarySource` owns the parsed `WordRecord`s of one dictionary. It is
//! filled from the `EDXC` cache when the cache is newer than the source file,
//! and by re-parsing the source (then rewriting the cache) otherwise.

pub mod cache;
mod source;
#[cfg(test)]
mod tests;
mod word;

pub use cache::CacheError;
pub use source::{DictionaryKind, DictionarySource, Origin, SourceError};
pub use word::{WordRecord, COMMON_MARKER};
