use edx_core::catalog::CatalogError;
use edx_core::dict::{DictionaryKind, WordRecord};
use edx_core::index::IndexError;
use edx_core::ngram::NgramError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum EdxError {
    /// Dictionary source missing or unreadable.
    #[error("dictionary unavailable: {msg}")]
    Unavailable { msg: String },
    #[error("invalid key: {msg}")]
    InvalidKey { msg: String },
    /// The needed table was not built within the ready timeout.
    #[error("timed out: {msg}")]
    Timeout { msg: String },
    #[error("internal error: {msg}")]
    Internal { msg: String },
}

impl From<IndexError> for EdxError {
    fn from(e: IndexError) -> Self {
        let msg = e.to_string();
        match e {
            IndexError::NotReady { .. } => EdxError::Timeout { msg },
            IndexError::InvalidKey { .. } => EdxError::InvalidKey { msg },
            IndexError::Spawn(_) | IndexError::BuildFailed(_) => EdxError::Internal { msg },
        }
    }
}

impl From<CatalogError> for EdxError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Source(e) => EdxError::Unavailable { msg: e.to_string() },
            CatalogError::Index(e) => e.into(),
        }
    }
}

impl From<NgramError> for EdxError {
    fn from(e: NgramError) -> Self {
        EdxError::InvalidKey { msg: e.to_string() }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct EdxWord {
    pub headword: String,
    pub reading: String,
    pub gloss: String,
    pub is_common: bool,
    pub is_proper_noun: bool,
    pub kanji_count: u32,
}

impl From<&WordRecord> for EdxWord {
    fn from(w: &WordRecord) -> Self {
        Self {
            headword: w.headword().to_string(),
            reading: w.reading().to_string(),
            gloss: w.gloss().to_string(),
            is_common: w.is_common(),
            is_proper_noun: w.is_proper_noun(),
            kanji_count: w.kanji_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum EdxDictionaryKind {
    General,
    Names,
}

impl From<EdxDictionaryKind> for DictionaryKind {
    fn from(kind: EdxDictionaryKind) -> Self {
        match kind {
            EdxDictionaryKind::General => DictionaryKind::General,
            EdxDictionaryKind::Names => DictionaryKind::Names,
        }
    }
}
