use proptest::prelude::*;

use super::*;

fn pairs(records: &[WordRecord]) -> Vec<(&str, &str)> {
    records
        .iter()
        .map(|w| (w.headword(), w.reading()))
        .collect()
}

#[test]
fn no_reading_uses_headword() {
    let records = parse_line("食べる /to eat/", false);
    assert_eq!(records.len(), 1);
    let w = &records[0];
    assert_eq!(w.headword(), "食べる");
    assert_eq!(w.reading(), "食べる");
    assert_eq!(w.gloss(), "to eat");
    assert!(!w.is_proper_noun());
    assert!(!w.is_common());
}

#[test]
fn default_reading_applies_to_every_headword() {
    let records = parse_line("言う;いう [ゆう] /to say/", false);
    assert_eq!(pairs(&records), vec![("言う", "ゆう"), ("いう", "ゆう")]);
    assert!(records.iter().all(|w| w.gloss() == "to say"));
}

#[test]
fn multiple_default_readings_split() {
    let records = parse_line("今日 [きょう;こんにち] /today/this day/", false);
    assert_eq!(pairs(&records), vec![("今日", "きょう"), ("今日", "こんにち")]);
    assert_eq!(records[0].gloss(), "today\nthis day");
}

#[test]
fn restricted_reading_overrides_default() {
    let line = "言う(P);云う;謂う [いう(P);ゆう(言う,云う)] /(v5u) to say/(P)/EntL1587040X/";
    let records = parse_line(line, false);
    assert_eq!(
        pairs(&records),
        vec![("言う", "ゆう"), ("云う", "ゆう"), ("謂う", "いう")]
    );
    for w in &records {
        assert_eq!(w.gloss(), "(v5u) to say\n(P)");
        assert!(w.is_common());
    }
}

#[test]
fn several_restrictions_for_one_headword() {
    let records = parse_line("甲;乙 [あ(甲);い(甲);う] /x/", false);
    assert_eq!(pairs(&records), vec![("甲", "あ"), ("甲", "い"), ("乙", "う")]);
}

#[test]
fn ascii_parenthetical_is_not_a_restriction() {
    let records = parse_line("甲;乙 [あ(ok)] /x/", false);
    assert_eq!(pairs(&records), vec![("甲", "あ"), ("乙", "あ")]);
}

#[test]
fn restriction_without_match_falls_back_to_headword() {
    // 阿 has no applicable reading at all.
    let records = parse_line("亜;阿 [あ(亜)] /Asia/", false);
    assert_eq!(pairs(&records), vec![("亜", "あ"), ("阿", "阿")]);
}

#[test]
fn annotations_stripped_from_headword() {
    let records = parse_line("キャンセル(P) /(n) cancel/(P)/", false);
    assert_eq!(pairs(&records), vec![("キャンセル", "キャンセル")]);

    let records = parse_line("遣る(ok);行る(iK) /to do/", false);
    assert_eq!(
        pairs(&records),
        vec![("遣る", "遣る"), ("行る", "行る")]
    );
}

#[test]
fn embedded_parenthetical_truncated() {
    let records = parse_line("御飯(ごはん) [ごはん] /rice/", false);
    assert_eq!(pairs(&records), vec![("御飯", "ごはん")]);
}

#[test]
fn kana_only_entry() {
    let records = parse_line("あいさつ /greeting/", false);
    assert_eq!(pairs(&records), vec![("あいさつ", "あいさつ")]);
}

#[test]
fn names_pair_every_headword_with_every_reading() {
    let records = parse_line("阿部;安部 [あべ;あんべ] /(s) Abe/", true);
    assert_eq!(
        pairs(&records),
        vec![
            ("阿部", "あべ"),
            ("阿部", "あんべ"),
            ("安部", "あべ"),
            ("安部", "あんべ")
        ]
    );
    assert!(records.iter().all(|w| w.is_proper_noun()));
}

#[test]
fn names_ignore_restriction_syntax() {
    let records = parse_line("東;西 [ひがし(東)] /(p) place/", true);
    assert_eq!(pairs(&records), vec![("東", "ひがし"), ("西", "ひがし")]);
}

#[test]
fn names_without_reading() {
    let records = parse_line("あべ /(s) Abe/", true);
    assert_eq!(pairs(&records), vec![("あべ", "あべ")]);
    assert_eq!(records[0].gloss(), "(s) Abe");
}

#[test]
fn delimiters_never_leak() {
    let lines = [
        "食べる [たべる] /to eat/",
        "食べる [[たべる]] /to eat/",
        "食]べる [たべる] /to eat/",
        "食べる [たべる /to eat/",
        "言う;いう [ゆう] /to say/",
        "食べる [たべ/る] /to eat/",
        "[/]う/",
    ];
    for line in lines {
        for w in parse_line(line, false) {
            for field in [w.headword(), w.reading()] {
                assert!(!field.is_empty(), "{line}");
                assert_eq!(field, field.trim(), "{line}");
                assert!(!field.contains(['[', ']', '/']), "{line}: {field}");
            }
        }
    }
}

#[test]
fn slash_inside_reading_ends_the_reading() {
    let records = parse_line("食べる [たべ/る] /to eat/", false);
    assert_eq!(pairs(&records), vec![("食べる", "たべ")]);
    assert_eq!(records[0].gloss(), "る]\nto eat");
    for w in parse_line("[/]う/", false) {
        assert!(!w.reading().contains('/'));
    }
}

#[test]
fn malformed_line_without_slash() {
    let records = parse_line("食べる [たべる] to eat", false);
    assert_eq!(pairs(&records), vec![("食べる", "たべる")]);
    assert_eq!(records[0].gloss(), "to eat");

    let records = parse_line("食べる to eat", false);
    assert_eq!(pairs(&records), vec![("食べる", "食べる")]);
    assert_eq!(records[0].gloss(), "to eat");
}

#[test]
fn malformed_unclosed_bracket() {
    let records = parse_line("食べる [たべる /to eat/", false);
    assert_eq!(pairs(&records), vec![("食べる", "たべる")]);
    assert_eq!(records[0].gloss(), "to eat");
}

#[test]
fn degenerate_lines_do_not_panic() {
    for line in ["", "/", "//", "[", "]", "[]", "[/]", ";;", "(P)", " / / ", "。"] {
        let _ = parse_line(line, false);
        let _ = parse_line(line, true);
    }
    assert!(parse_line("", false).is_empty());
    assert!(parse_line("(P) /x/", false).is_empty());
}

#[test]
fn entry_ids() {
    assert!(is_entry_id("EntL1587040X"));
    assert!(is_entry_id("EntL1587040"));
    assert!(!is_entry_id("EntL"));
    assert!(!is_entry_id("EntLabc"));
    assert!(!is_entry_id("to eat"));
}

#[test]
fn skippable_lines() {
    assert!(is_skippable(""));
    assert!(is_skippable("   "));
    assert!(is_skippable("# comment"));
    assert!(is_skippable("　？？？ /EDICT, EDRDG, 2024/"));
    assert!(!is_skippable("食べる /to eat/"));
}

#[test]
fn split_line_segments() {
    assert_eq!(
        split_line("A;B [a;b] /x/y/"),
        RawEntry {
            headwords: "A;B".to_string(),
            readings: Some("a;b".to_string()),
            gloss: "x\ny".to_string(),
        }
    );
}

proptest! {
    #[test]
    fn parse_is_idempotent(line in "[食べる言うあいア;\\[\\] /()PxEntL0-9,]{0,40}", names in any::<bool>()) {
        let first = parse_line(&line, names);
        let second = parse_line(&line, names);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(a.headword(), b.headword());
            prop_assert_eq!(a.reading(), b.reading());
            prop_assert_eq!(a.gloss(), b.gloss());
            prop_assert_eq!(a.is_proper_noun(), b.is_proper_noun());
        }
    }

    #[test]
    fn records_never_contain_delimiters(line in "[食べる言うあ;\\[\\] /()P]{0,40}", names in any::<bool>()) {
        for w in parse_line(&line, names) {
            prop_assert!(!w.headword().is_empty());
            prop_assert!(!w.reading().is_empty());
            prop_assert!(!w.headword().contains(['[', ']', '/']));
            prop_assert!(!w.reading().contains(['[', ']', '/']));
        }
    }
}
