use std::sync::Arc;

use edx_core::catalog::DictionaryCatalog;
use edx_core::dict::WordRecord;
use edx_core::index::Query;
use edx_core::ngram::{Digram, Trigram};

use super::{EdxDictionaryKind, EdxError, EdxWord};

#[derive(uniffi::Object)]
pub struct EdxCatalog {
    inner: DictionaryCatalog,
}

#[uniffi::export]
impl EdxCatalog {
    #[uniffi::constructor]
    fn new(source_dir: String, cache_dir: String) -> Arc<Self> {
        Arc::new(Self {
            inner: DictionaryCatalog::new(source_dir, cache_dir),
        })
    }

    /// Load the dictionary and start indexing without waiting for it.
    fn preload(&self, kind: EdxDictionaryKind) -> Result<(), EdxError> {
        self.inner.get(kind.into())?;
        Ok(())
    }

    fn is_loaded(&self, kind: EdxDictionaryKind) -> bool {
        self.inner.is_loaded(kind.into())
    }

    fn evict_all(&self) {
        self.inner.evict_all();
    }

    fn lookup_kanji(
        &self,
        kind: EdxDictionaryKind,
        key: String,
        starts_with_only: bool,
    ) -> Result<Vec<EdxWord>, EdxError> {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(EdxError::InvalidKey {
                msg: format!("expected one character, got {key:?}"),
            });
        };
        let index = self.inner.get(kind.into())?;
        Ok(to_words(index.lookup_kanji(c, starts_with_only)?))
    }

    fn lookup_digram(
        &self,
        kind: EdxDictionaryKind,
        key: String,
        starts_with_only: bool,
    ) -> Result<Vec<EdxWord>, EdxError> {
        let digram = Digram::try_from(key.as_str())?;
        let index = self.inner.get(kind.into())?;
        Ok(to_words(index.lookup_digram(digram, starts_with_only)?))
    }

    fn lookup_description(
        &self,
        kind: EdxDictionaryKind,
        key: String,
    ) -> Result<Vec<EdxWord>, EdxError> {
        let trigram = Trigram::try_from(key.as_str())?;
        let index = self.inner.get(kind.into())?;
        Ok(to_words(index.lookup_description(trigram)?))
    }

    /// Dispatch on key length: one character is a kanji lookup, two a
    /// digram, three a gloss trigram.
    fn search(
        &self,
        kind: EdxDictionaryKind,
        key: String,
        starts_with_only: bool,
    ) -> Result<Vec<EdxWord>, EdxError> {
        let query = Query::from_key(&key)?;
        let index = self.inner.get(kind.into())?;
        Ok(to_words(index.query(&query, starts_with_only)?))
    }
}

fn to_words(words: Vec<Arc<WordRecord>>) -> Vec<EdxWord> {
    words.iter().map(|w| EdxWord::from(w.as_ref())).collect()
}
