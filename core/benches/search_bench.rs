use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{DocumentStatus, SearchEngine};

fn build_engine() -> SearchEngine {
    let mut engine = SearchEngine::from_stop_words_text("a an and in of the to").unwrap();
    let vocabulary = ["cat", "dog", "bird", "fish", "collar", "tail", "fancy", "curly", "big", "small"];
    for id in 0..2_000 {
        let text: Vec<&str> = (0..12).map(|i| vocabulary[(id as usize * 7 + i * 3) % vocabulary.len()]).collect();
        engine
            .add_document(id, &text.join(" "), DocumentStatus::Actual, &[id % 10, 3])
            .unwrap();
    }
    engine
}

fn bench_find_top(c: &mut Criterion) {
    let engine = build_engine();
    c.bench_function("find_top_documents", |b| {
        b.iter(|| engine.find_top_documents("curly cat fancy -fish").unwrap())
    });
}

criterion_group!(benches, bench_find_top);
criterion_main!(benches);
