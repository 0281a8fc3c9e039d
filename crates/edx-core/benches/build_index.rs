use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use edx_core::dict::{DictionaryKind, DictionarySource};
use edx_core::edict::parse_line;
use edx_core::index::{IndexBuilder, SearchIndex};
use edx_core::ngram::{Digram, Trigram};

static LINES: &[&str] = &[
    "日本 [にほん] /(n) Japan/(P)/",
    "日本語 [にほんご] /(n) Japanese (language)/(P)/",
    "食べる [たべる] /(v1,vt) (1) to eat/(2) to live on (e.g. a salary)/(P)/",
    "言う;云う [いう;ゆう] /(v5u,vt) to say/to call/(P)/",
    "今日 [きょう;こんにち] /(n-t) (1) today/this day/(P)/",
    "天気 [てんき] /(n) (1) weather/the elements/(2) fair weather/(P)/",
    "カタカナ;片仮名 [かたかな] /(n) katakana/(P)/",
    "時々 [ときどき] /(adv,n) sometimes/at times/(P)/",
    "面倒臭い [めんどうくさい] /(adj-i) bothersome/tiresome/",
    "頑張る [がんばる] /(v5r,vi) to persevere/to persist/(P)/",
];

fn bench_source(copies: usize) -> DictionarySource {
    let words = (0..copies)
        .flat_map(|_| LINES.iter().flat_map(|line| parse_line(line, false)))
        .collect();
    DictionarySource::from_words(DictionaryKind::General, words)
}

fn built_index(source: &DictionarySource) -> Arc<SearchIndex> {
    let index = Arc::new(SearchIndex::with_ready_timeout(
        source.kind(),
        Arc::clone(source.words()),
        Duration::from_secs(60),
    ));
    IndexBuilder::build(&index).expect("index build");
    index
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/build");
    for copies in [10, 100, 1000] {
        let source = bench_source(copies);
        group.bench_with_input(BenchmarkId::from_parameter(source.len()), &source, |b, source| {
            b.iter(|| built_index(source));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("edict/parse_line", |b| {
        b.iter(|| LINES.iter().map(|line| parse_line(line, false).len()).sum::<usize>());
    });
}

fn bench_lookup(c: &mut Criterion) {
    let index = built_index(&bench_source(1000));
    let mut group = c.benchmark_group("index/lookup");
    group.bench_function("kanji", |b| b.iter(|| index.lookup_kanji('日', false)));
    group.bench_function("digram", |b| {
        b.iter(|| index.lookup_digram(Digram::new('か', 'た'), false))
    });
    group.bench_function("description", |b| {
        b.iter(|| index.lookup_description(Trigram::new('t', 'o', ' ')))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_parse, bench_lookup);
criterion_main!(benches);
