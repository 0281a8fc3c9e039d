use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::unicode::kanji_count;

/// Gloss marker for a common (priority) word.
pub const COMMON_MARKER: &str = "(P)";

/// One dictionary entry after multi-headword / multi-reading splitting.
///
/// Equality and hashing only look at `(headword, reading)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    headword: String,
    reading: String,
    gloss: String,
    is_proper_noun: bool,
    is_common: bool,
    kanji_count: u32,
}

impl WordRecord {
    pub fn new(
        headword: impl Into<String>,
        reading: impl Into<String>,
        gloss: impl Into<String>,
        is_proper_noun: bool,
    ) -> Self {
        let headword = headword.into();
        let gloss = gloss.into();
        let is_common = gloss.contains(COMMON_MARKER);
        let kanji_count = kanji_count(&headword) as u32;
        Self {
            headword,
            reading: reading.into(),
            gloss,
            is_proper_noun,
            is_common,
            kanji_count,
        }
    }

    pub fn headword(&self) -> &str {
        &self.headword
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    /// English senses, one per line.
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    pub fn is_proper_noun(&self) -> bool {
        self.is_proper_noun
    }

    pub fn is_common(&self) -> bool {
        self.is_common
    }

    pub fn kanji_count(&self) -> u32 {
        self.kanji_count
    }
}

impl PartialEq for WordRecord {
    fn eq(&self, other: &Self) -> bool {
        self.headword == other.headword && self.reading == other.reading
    }
}

impl Eq for WordRecord {}

impl Hash for WordRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.headword.hash(state);
        self.reading.hash(state);
    }
}
