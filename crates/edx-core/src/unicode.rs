//! Character-level Unicode classification and canonicalisation for Japanese text.
//!
//! Canonical forms are only used as index keys. Display text always keeps the
//! dictionary's original spelling.

/// Stand-in for a vertically set prolonged sound mark in the source dictionaries.
pub const VERTICAL_BAR: char = '\u{FF5C}';

/// Kanji repetition mark.
pub const ITERATION_MARK: char = '\u{3005}';

/// Last katakana code point that has a hiragana counterpart 0x60 below it (ヶ).
/// Everything above (ヷ..ヺ, ・, ー, ヽ, ヾ, ヿ) is left as is.
const KATAKANA_FOLD_LAST: char = '\u{30F6}';

const KATAKANA_HIRAGANA_OFFSET: u32 = 0x60;

/// Look-alike characters folded together after the katakana shift.
const SYNONYMS: &[(char, char)] = &[
    ('っ', 'つ'),
    ('\u{3095}', 'か'), // ゕ, folded from ヵ
    ('\u{3096}', 'け'), // ゖ, folded from ヶ
    (VERTICAL_BAR, 'ー'),
    ('\u{2010}', 'ー'),
    ('\u{2015}', 'ー'),
    ('\u{FF0D}', 'ー'),
    ('\u{301C}', '\u{FF5E}'),
    ('\u{3007}', '\u{25CB}'),
];

/// Hiragana block minus the unassigned U+3040.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || c == VERTICAL_BAR
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || c == ITERATION_MARK
}

/// Number of kanji code points in `s`.
pub fn kanji_count(s: &str) -> usize {
    s.chars().filter(|&c| is_kanji(c)).count()
}

/// Fold a character to its index key form: katakana → hiragana, then the
/// synonym table. Characters outside both are returned unchanged.
pub fn to_canonical(c: char) -> char {
    let folded = if ('\u{30A1}'..=KATAKANA_FOLD_LAST).contains(&c) {
        char::from_u32(c as u32 - KATAKANA_HIRAGANA_OFFSET).unwrap_or(c)
    } else {
        c
    };
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == folded)
        .map_or(folded, |&(_, to)| to)
}

/// Canonicalise every character of `s`, preserving order.
pub fn to_canonical_str(s: &str) -> String {
    s.chars().map(to_canonical).collect()
}
