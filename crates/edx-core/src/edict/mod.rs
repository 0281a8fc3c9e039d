//! EDICT / ENAMDICT line parser.
//!
//! Line format: `headword;headword [reading;reading] /gloss/gloss/.../`
//!
//! A reading written as `kana(headword,headword)` only applies to the listed
//! headwords. ASCII parentheticals such as `(P)` or `(iK)` are annotations and
//! never become part of a headword or reading. Every resulting
//! (headword, reading) pair becomes one [`WordRecord`] sharing the gloss.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use crate::dict::WordRecord;

/// Annotations removed from headwords and readings before they are used.
const ANNOTATIONS: &[&str] = &["(P)", "(ok)", "(oK)", "(ik)", "(iK)", "()", "(gikun)"];

/// Headword of the EDICT header line (`　？？？ /EDICT, EDRDG.../`).
const HEADER_HEADWORD: &str = "？？？";

/// Raw segments of one line before any splitting.
#[derive(Debug, Default, PartialEq)]
struct RawEntry {
    headwords: String,
    readings: Option<String>,
    gloss: String,
}

/// Whether the loader should skip `line` without parsing it.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(HEADER_HEADWORD)
}

/// Parse one source line into zero or more records. Never fails; a malformed
/// line yields whatever fields could be recovered.
pub fn parse_line(line: &str, is_proper_noun: bool) -> Vec<WordRecord> {
    let raw = split_line(line);
    let headwords: Vec<&str> = raw
        .headwords
        .split(';')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect();

    let pairs = if is_proper_noun {
        name_pairs(&headwords, raw.readings.as_deref())
    } else {
        word_pairs(&headwords, raw.readings.as_deref())
    };

    pairs
        .into_iter()
        .filter_map(|(headword, reading)| {
            let headword = clean(&headword);
            if headword.is_empty() {
                return None;
            }
            let reading = clean(&reading);
            let reading = if reading.is_empty() {
                headword.clone()
            } else {
                reading
            };
            Some(WordRecord::new(
                headword,
                reading,
                raw.gloss.clone(),
                is_proper_noun,
            ))
        })
        .collect()
}

/// The gloss starts at the first `/`, even when a `[` before it is never
/// closed; headwords and readings never contain a slash.
fn split_line(line: &str) -> RawEntry {
    let Some(slash) = line.find('/') else {
        return split_malformed(line);
    };

    let mut entry = RawEntry::default();
    let mut in_brackets = false;
    for c in line[..slash].chars() {
        match c {
            '[' if !in_brackets => {
                in_brackets = true;
                let readings = entry.readings.get_or_insert_with(String::new);
                if !readings.is_empty() {
                    readings.push(';');
                }
            }
            ']' if in_brackets => in_brackets = false,
            '[' | ']' => {}
            c if in_brackets => {
                if let Some(readings) = entry.readings.as_mut() {
                    readings.push(c);
                }
            }
            c if c.is_whitespace() => {}
            c => entry.headwords.push(c),
        }
    }
    entry.gloss = parse_gloss(&line[slash + 1..]);
    entry
}

/// Fallback for a line without any `/`: the headword ends at the first
/// space, an optional `[...]` follows, and the remainder is the gloss.
fn split_malformed(line: &str) -> RawEntry {
    let line = line.trim();
    let head_end = line
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(line.len());
    let headwords: String = line[..head_end].chars().filter(|&c| c != ']').collect();
    let mut rest = line[head_end..].trim_start();

    let mut readings = None;
    if let Some(inner) = rest.strip_prefix('[') {
        let end = inner
            .find(|c: char| c == ']' || c == '/')
            .unwrap_or(inner.len());
        readings = Some(inner[..end].chars().filter(|&c| c != '[').collect());
        rest = inner[end..].strip_prefix(']').unwrap_or(&inner[end..]);
    }

    RawEntry {
        headwords,
        readings,
        gloss: parse_gloss(rest.trim().trim_start_matches('/')),
    }
}

/// Gloss fields joined by newlines. The trailing empty field and EDICT2
/// entry ids (`EntL1234567X`) are dropped.
fn parse_gloss(body: &str) -> String {
    let mut fields: Vec<&str> = body.split('/').map(str::trim).collect();
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields.retain(|f| !is_entry_id(f));
    fields.join("\n")
}

fn is_entry_id(field: &str) -> bool {
    let Some(rest) = field.strip_prefix("EntL") else {
        return false;
    };
    let digits = rest.strip_suffix('X').unwrap_or(rest);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn strip_annotations(s: &str) -> String {
    let mut out = s.to_string();
    for annotation in ANNOTATIONS {
        if out.contains(annotation) {
            out = out.replace(annotation, "");
        }
    }
    out
}

/// Final form of a headword or reading: annotations removed, anything from
/// the first remaining `(` on cut off, trimmed.
fn clean(s: &str) -> String {
    let stripped = strip_annotations(s);
    let cut = stripped.find('(').map_or(stripped.as_str(), |i| &stripped[..i]);
    cut.trim().to_string()
}

/// `kana(headword,headword)` → `(kana, [headword, ...])`. Only parentheses
/// holding non-ASCII text are restrictions; ASCII ones are annotations.
fn parse_restriction(snippet: &str) -> Option<(String, Vec<String>)> {
    let body = strip_annotations(snippet);
    let body = body.trim();
    let inner_end = body.strip_suffix(')')?;
    let open = inner_end.rfind('(')?;
    let inner = &inner_end[open + 1..];
    if inner.is_ascii() {
        return None;
    }
    let kana = clean(&inner_end[..open]);
    if kana.is_empty() {
        return None;
    }
    let targets: Vec<String> = inner
        .split(',')
        .map(clean)
        .filter(|t| !t.is_empty())
        .collect();
    if targets.is_empty() {
        return None;
    }
    Some((kana, targets))
}

fn push_joined(target: &mut String, value: &str) {
    if value.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(';');
    }
    target.push_str(value);
}

/// General-dictionary pairing: restricted readings first, then the default.
fn word_pairs(headwords: &[&str], readings: Option<&str>) -> Vec<(String, String)> {
    let mut restricted: HashMap<String, String> = HashMap::new();
    let mut default = String::new();

    if let Some(segment) = readings {
        for snippet in segment.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            match parse_restriction(snippet) {
                Some((kana, targets)) => {
                    for target in targets {
                        push_joined(restricted.entry(target).or_default(), &kana);
                    }
                }
                None => push_joined(&mut default, &clean(snippet)),
            }
        }
    }

    let mut pairs = Vec::new();
    for &headword in headwords {
        let key = clean(headword);
        let reading = match restricted.get(&key) {
            Some(r) => r.as_str(),
            None if !default.is_empty() => default.as_str(),
            None => key.as_str(),
        };
        for r in reading.split(';') {
            pairs.push((headword.to_string(), r.to_string()));
        }
    }
    pairs
}

/// Names-dictionary pairing: every headword with every reading, no
/// restrictions.
fn name_pairs(headwords: &[&str], readings: Option<&str>) -> Vec<(String, String)> {
    let readings: Vec<String> = readings
        .map(|segment| {
            segment
                .split(';')
                .map(clean)
                .filter(|r| !r.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut pairs = Vec::new();
    for &headword in headwords {
        if readings.is_empty() {
            pairs.push((headword.to_string(), clean(headword)));
        } else {
            for r in &readings {
                pairs.push((headword.to_string(), r.clone()));
            }
        }
    }
    pairs
}
