
use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

use super::WordRecord;

pub(super) fn sample_words() -> Vec<WordRecord> {
    vec![
        WordRecord::new("食べる", "たべる", "(v1,vt) to eat\n(P)", false),
        WordRecord::new("言う", "ゆう", "(v5u) to say", false),
        WordRecord::new("キャンセル", "キャンセル", "(n) cancellation", false),
        WordRecord::new("阿部", "あべ", "(s) Abe", true),
    ]
}

/// Field-by-field comparison; `==` on `WordRecord` only looks at
/// headword and reading.
pub(super) fn assert_same_records(a: &[WordRecord], b: &[WordRecord]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.headword(), y.headword());
        assert_eq!(x.reading(), y.reading());
        assert_eq!(x.gloss(), y.gloss());
        assert_eq!(x.is_proper_noun(), y.is_proper_noun());
        assert_eq!(x.is_common(), y.is_common());
        assert_eq!(x.kanji_count(), y.kanji_count());
    }
}

pub(super) fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

pub(super) fn hours_ago(hours: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(hours * 3600)
}
