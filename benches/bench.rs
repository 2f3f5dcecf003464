//! Criterion benchmarks for bayesfilter.
//!
//! Covers the three hot paths of the filter:
//! - Phrase normalization and tokenization
//! - Training from a corpus
//! - Scoring phrases and encoding the model

use std::hint::black_box;
use std::io::Cursor;

use bayesfilter::analysis::analyzer::{Analyzer, PhraseAnalyzer};
use bayesfilter::analysis::normalize;
use bayesfilter::classifier::{BAD_CLASS, GOOD_CLASS, NaiveBayesClassifier, Trainer, codec};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

/// Generate corpus lines from a fixed word list.
fn generate_lines(count: usize, words: &[&str]) -> Vec<String> {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let line_length = 3 + (i % 12);
        let mut line_words = Vec::with_capacity(line_length);

        for j in 0..line_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            line_words.push(words[word_idx]);
        }

        lines.push(format!("  {}!\r\n", line_words.join(",  ")));
    }
    lines
}

const GOOD_WORDS: &[&str] = &[
    "great", "nice", "lovely", "excellent", "happy", "wonderful", "friendly", "bright", "calm",
    "fresh", "day", "service", "work", "team", "food",
];

const BAD_WORDS: &[&str] = &[
    "awful", "terrible", "rude", "broken", "slow", "dirty", "angry", "late", "noisy", "cold",
    "day", "service", "work", "team", "food",
];

fn trained_classifier() -> NaiveBayesClassifier {
    let analyzer = PhraseAnalyzer::default();
    let mut classifier = NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS]).unwrap();
    {
        let mut trainer = Trainer::new(&mut classifier, &analyzer);
        trainer
            .feed_reader(Cursor::new(generate_lines(2000, GOOD_WORDS).concat()), GOOD_CLASS)
            .unwrap();
        trainer
            .feed_reader(Cursor::new(generate_lines(2000, BAD_WORDS).concat()), BAD_CLASS)
            .unwrap();
    }
    classifier
}

/// Benchmark normalization and tokenization.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = PhraseAnalyzer::default();
    let lines = generate_lines(1000, GOOD_WORDS);

    group.bench_function("normalize_single_line", |b| {
        b.iter(|| black_box(normalize(black_box(&lines[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_lines", |b| {
        b.iter(|| {
            for line in lines.iter().take(100) {
                let result = analyzer.analyze_to_strings(black_box(line));
                let _ = black_box(result);
            }
        })
    });

    group.finish();
}

/// Benchmark training from an in-memory corpus.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");

    let analyzer = PhraseAnalyzer::default();
    let corpus = generate_lines(1000, GOOD_WORDS).concat();

    group.throughput(Throughput::Elements(1000));
    group.bench_function("feed_1000_lines", |b| {
        b.iter_with_setup(
            || NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS]).unwrap(),
            |mut classifier| {
                let stats = Trainer::new(&mut classifier, &analyzer)
                    .feed_reader(Cursor::new(corpus.as_bytes()), GOOD_CLASS)
                    .unwrap();
                black_box(stats)
            },
        )
    });

    group.finish();
}

/// Benchmark scoring and model encoding.
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let analyzer = PhraseAnalyzer::default();
    let classifier = trained_classifier();

    group.bench_function("score_phrase", |b| {
        b.iter(|| {
            let scores = classifier.score_phrase(&analyzer, black_box("What a lovely, calm day!"));
            black_box(scores)
        })
    });

    group.bench_function("encode_model", |b| {
        b.iter(|| black_box(codec::encode(black_box(&classifier))))
    });

    let bytes = codec::encode(&classifier).unwrap();
    group.bench_function("decode_model", |b| {
        b.iter(|| black_box(codec::decode(black_box(&bytes))))
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_training, bench_scoring);

criterion_main!(benches);
