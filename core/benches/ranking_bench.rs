use criterion::{criterion_group, criterion_main, Criterion};
use questions_core::{compute_idfs, score_files, tokenize, Query, Units};

const TEXT: &str = "Artificial intelligence is the study of agents that perceive their environment and take actions. \
Search problems ask how an agent can find a sequence of actions that reaches a goal. \
Knowledge-based agents reason over sentences in a formal language to draw new conclusions. \
Machine learning lets a program improve at a task through experience rather than explicit instructions.";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenize(TEXT)));
}

fn bench_rank(c: &mut Criterion) {
    let units: Units = (0..200).map(|i| (format!("doc{i:03}.txt"), tokenize(&TEXT.repeat(1 + i % 5)))).collect();
    let query = Query::from_tokens(tokenize("how do agents reason about actions"));
    c.bench_function("compute_idfs_200", |b| b.iter(|| compute_idfs(&units)));
    let idfs = compute_idfs(&units).expect("non-empty corpus");
    c.bench_function("score_files_200", |b| b.iter(|| score_files(&query, &units, &idfs)));
}

criterion_group!(benches, bench_tokenize, bench_rank);
criterion_main!(benches);
