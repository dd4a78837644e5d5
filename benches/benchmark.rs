// Query benchmarks for the similarity index and engine
use bookrec_core::{
    Availability, CollaborativeModel, DisplayRecord, EngineConfig, MetadataResolver, PivotIndex,
    RecommendationEngine, SimilarityIndex, SimilarityMatrix, DEFAULT_NEIGHBORS,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::sync::Arc;

fn generate_model(n: usize) -> CollaborativeModel {
    let mut rng = rand::rng();
    let titles: Vec<String> = (0..n).map(|i| format!("Book {}", i)).collect();

    let mut rows = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        rows[i][i] = 1.0;
        for j in (i + 1)..n {
            let score = rng.random_range(0.0..1.0);
            rows[i][j] = score;
            rows[j][i] = score;
        }
    }

    let metadata = titles
        .iter()
        .map(|t| DisplayRecord::new(t.clone(), "Author", "http://img", 4.0, 10))
        .collect();
    let index = SimilarityIndex::new(
        PivotIndex::new(titles).unwrap(),
        SimilarityMatrix::from_rows(rows).unwrap(),
    )
    .unwrap();
    CollaborativeModel::new(index, MetadataResolver::new(metadata))
}

fn benchmark_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");

    for size in [100, 1000, 4000].iter() {
        let model = generate_model(*size);
        group.bench_with_input(BenchmarkId::new("top9", size), size, |b, &size| {
            let title = format!("Book {}", size / 2);
            b.iter(|| {
                black_box(model.index.neighbors(&title, DEFAULT_NEIGHBORS).unwrap());
            });
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let engine = RecommendationEngine::new(
        EngineConfig::default(),
        Availability::Unavailable("not loaded".to_string()),
        Availability::Ready(Arc::new(generate_model(1000))),
    );

    c.bench_function("recommend_similar_1000", |b| {
        b.iter(|| {
            black_box(engine.recommend_similar("Book 500").unwrap());
        });
    });
}

criterion_group!(benches, benchmark_neighbors, benchmark_recommend);
criterion_main!(benches);
