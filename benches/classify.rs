//! Classifier throughput benchmarks.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench classify
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use habitual_be::{
    Classifier, Corpus, TokenSequence, TreebankTokenizer, UtteranceRow, WhitespaceTokenizer,
};

const UTTERANCES: &[&str] = &[
    "they be working all the time",
    "you should be studying for that test",
    "don't be silly, they don't be home",
    "I'm gonna be there when she be getting off work",
    "and always be careful out there",
    "would you really be okay with that?",
    "my brother be at the store on Sundays.",
    "I wish I could be",
];

fn bench_tokenize(c: &mut Criterion) {
    let text = UTTERANCES.join(" ");
    c.bench_function("tokenize/treebank", |b| {
        b.iter(|| TokenSequence::new(&TreebankTokenizer, black_box(&text)))
    });
}

fn bench_classify(c: &mut Criterion) {
    let treebank = Classifier::new();
    let whitespace = Classifier::with_tokenizer(WhitespaceTokenizer);

    let mut group = c.benchmark_group("classify");
    for text in UTTERANCES {
        let count = habitual_be::count_be_instances(text);
        group.bench_with_input(BenchmarkId::new("treebank", text), text, |b, t| {
            b.iter(|| treebank.classify(black_box(t), count))
        });
    }
    group.bench_function("whitespace/mixed", |b| {
        b.iter(|| whitespace.classify(black_box(UTTERANCES[2]), 2))
    });
    group.finish();
}

fn bench_corpus(c: &mut Criterion) {
    let rows: Vec<UtteranceRow> = UTTERANCES
        .iter()
        .cycle()
        .take(2_000)
        .map(|t| UtteranceRow::new(*t, habitual_be::count_be_instances(t)))
        .collect();
    let classifier = Classifier::new();

    let mut group = c.benchmark_group("annotate");
    group.throughput(Throughput::Elements(rows.len() as u64));
    for parallel in [false, true] {
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter_batched(
                || Corpus::from_rows(rows.clone()),
                |mut corpus| corpus.annotate(&classifier, parallel),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_classify, bench_corpus);
criterion_main!(benches);
