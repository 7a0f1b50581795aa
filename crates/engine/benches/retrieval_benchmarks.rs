//! Retrieval Benchmarks
//!
//! Run with: cargo bench -p marquee-engine --bench retrieval_benchmarks
//!
//! Covers the request-path operations over a published snapshot and the
//! cost of a full generation switch:
//! - similar_to / for_user: brute-force cosine scan over all movie vectors
//! - top / by_genre: catalog listings sorted by aggregate rating
//! - switch_model: stage, validate and publish a generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use marquee_core::{Movie, Rating, SortBy};
use marquee_engine::{
    GenerationSpec, IngestBatch, MarqueeConfig, MemoryNamespaceStore, NamespaceStore,
    ServingContext, SourceDescriptor,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Fixed seed for reproducible benchmarks
const BENCH_SEED: u64 = 0xDEADBEEF_CAFEBABE;

const DIMENSION: usize = 32;
const CATALOG_SIZES: [usize; 3] = [1_000, 5_000, 20_000];
const K_VALUES: [usize; 3] = [1, 10, 100];
const GENRES: [&str; 4] = ["Action", "Comedy", "Drama", "Horror"];

fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn random_vector(dimension: usize, seed: u64) -> String {
    let mut state = seed;
    (0..dimension)
        .map(|_| {
            let bits = lcg_next(&mut state);
            format!("{:.5}", (bits as f32 / u64::MAX as f32) * 2.0 - 1.0)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_context(movies: usize) -> Arc<ServingContext> {
    let users = 100u32;
    let store = Arc::new(MemoryNamespaceStore::new());
    let mut batch = IngestBatch::default();
    let mut seed = BENCH_SEED;

    for id in 1..=movies as u32 {
        let genre = GENRES[id as usize % GENRES.len()];
        batch.movies.push(Movie::new(id, format!("Movie {}", id), Some(1950 + (id % 70) as u16), &[genre]));
        store.put(format!("i2vEmb:{}", id), random_vector(DIMENSION, lcg_next(&mut seed)));
    }
    for user in 1..=users {
        store.put(format!("uEmb:{}", user), random_vector(DIMENSION, lcg_next(&mut seed)));
        for n in 0..20u32 {
            let movie = (lcg_next(&mut seed) % movies as u64) as u32 + 1;
            let score = (lcg_next(&mut seed) % 5) as f32 + 1.0;
            batch.ratings.push(Rating::new(user, movie, score, n as i64));
        }
    }

    let spec = GenerationSpec::new(
        "BENCH",
        "Benchmark Version",
        SourceDescriptor::namespace("i2vEmb:"),
        SourceDescriptor::namespace("uEmb:"),
    );
    let config = MarqueeConfig {
        default_generation: "BENCH".into(),
        model_dir: std::env::temp_dir(),
        generations: vec![spec],
    };
    let store: Arc<dyn NamespaceStore> = store;
    ServingContext::open(&config, batch, Some(store)).unwrap()
}

// ============================================================================
// Request path
// ============================================================================

fn retrieval_similar_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieval_similar_to");
    for &size in &CATALOG_SIZES {
        let ctx = build_context(size);
        for &k in &K_VALUES {
            group.bench_with_input(BenchmarkId::new(format!("k={}", k), size), &k, |b, &k| {
                b.iter(|| ctx.with_retrieval(|engine| black_box(engine.similar_to(1, k))))
            });
        }
    }
    group.finish();
}

fn retrieval_for_user(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieval_for_user");
    for &size in &CATALOG_SIZES {
        let ctx = build_context(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| ctx.with_retrieval(|engine| black_box(engine.for_user(42, 10))))
        });
    }
    group.finish();
}

fn retrieval_listings(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieval_listings");
    let ctx = build_context(5_000);
    group.bench_function("top/rating", |b| {
        b.iter(|| ctx.with_retrieval(|engine| black_box(engine.top(50, SortBy::Rating))))
    });
    group.bench_function("by_genre/release_year", |b| {
        b.iter(|| {
            ctx.with_retrieval(|engine| black_box(engine.by_genre("Drama", 50, SortBy::ReleaseYear)))
        })
    });
    group.finish();
}

// ============================================================================
// Generation switch
// ============================================================================

fn switch_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("switch_model");
    group.sample_size(10);
    for &size in &CATALOG_SIZES {
        let ctx = build_context(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| ctx.switch_model("BENCH").unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    retrieval_similar_to,
    retrieval_for_user,
    retrieval_listings,
    switch_model
);
criterion_main!(benches);
