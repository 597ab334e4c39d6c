use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pisearch::{date_candidates, format_context, name_candidates, normalize, search, Corpus};

/// A million pseudo-random digits, wrapped at 50 per line like published digit files
fn create_raw_corpus() -> String {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut text = String::with_capacity(1_020_001);
    text.push_str("3.");
    for i in 0..1_000_000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        text.push(char::from(b'0' + (state % 10) as u8));
        if i % 50 == 49 {
            text.push('\n');
        }
    }
    text
}

fn bench_normalize(c: &mut Criterion) {
    let raw = create_raw_corpus();
    c.bench_function("normalize_million", |b| {
        b.iter(|| black_box(normalize(black_box(&raw)).len()));
    });
    c.bench_function("corpus_from_raw", |b| {
        b.iter(|| black_box(Corpus::from_raw(black_box(&raw)).unwrap()));
    });
}

fn bench_search(c: &mut Criterion) {
    let corpus = Corpus::from_raw(&create_raw_corpus()).unwrap();

    let mut group = c.benchmark_group("Search");
    let queries = [
        ("date_short_month", date_candidates(7, 20, 1991)),
        ("date_long_month", date_candidates(12, 5, 1991)),
        ("name_short", name_candidates("Ada")),
        ("name_long", name_candidates("Ada Lovelace")),
    ];
    for (label, candidates) in &queries {
        group.bench_function(*label, |b| {
            b.iter(|| black_box(search(&corpus, black_box(candidates))));
        });
    }
    group.finish();

    c.bench_function("format_context", |b| {
        b.iter(|| black_box(format_context(&corpus, black_box(500_000), 8, 25)));
    });
}

criterion_group!(benches, bench_normalize, bench_search);
criterion_main!(benches);
