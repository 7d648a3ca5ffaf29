use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use mnemos_core::memory::{ImportanceLevel, Memory, MemoryType};
use mnemos_scoring::ScoringEngine;

fn make_candidates(n: usize) -> Vec<Memory> {
    let now = Utc::now();
    (0..n)
        .map(|i| {
            let content = format!("note {i} about tokio runtimes, sqlite pools and compaction");
            let importance = (i % 10) as f64 / 10.0;
            Memory {
                id: format!("m{i}"),
                content_hash: Memory::compute_content_hash(&content),
                content,
                summary: None,
                source_path: "memory/bench.md".to_string(),
                memory_type: MemoryType::Note,
                importance_level: ImportanceLevel::from_score(importance),
                importance_score: importance,
                base_importance: importance,
                compression_level: 0,
                compressed_from: vec![],
                tags: vec![],
                created_at: now - Duration::days((i % 60) as i64),
                updated_at: now,
                accessed_at: None,
                access_count: (i % 7) as u64,
            }
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let candidates = make_candidates(1000);
    let now = Utc::now();
    c.bench_function("rank 1k candidates", |b| {
        b.iter(|| engine.rank(candidates.clone(), "tokio compaction", now))
    });
}

fn bench_recalculate(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let candidates = make_candidates(1000);
    let now = Utc::now();
    c.bench_function("recalculate 1k", |b| {
        b.iter(|| {
            candidates
                .iter()
                .map(|m| engine.recalculate(m, now))
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_rank, bench_recalculate);
criterion_main!(benches);
