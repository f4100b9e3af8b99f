use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use coherence_core::models::{ContextRecord, PHASE_ORDER};
use coherence_core::traits::IContextStore;
use coherence_embeddings::HashingVectorizer;
use coherence_retrieval::{CorpusStats, RelevanceRanker};
use coherence_storage::MemoryContextStore;

const WORDS: &[&str] = &[
    "reservas", "restaurantes", "pago", "integrado", "clientes", "encuesta", "conversión",
    "prototipo", "aplicación", "móvil", "métricas", "retención", "pivote", "corporativos",
    "satisfacción", "entrevistas", "precio", "captación", "usuarios", "iteración",
];

/// `n` artifacts spread over all phases with overlapping vocabulary.
fn build_corpus(n: usize) -> Vec<ContextRecord> {
    let vectorizer = HashingVectorizer::default();
    let now = Utc::now();
    (0..n)
        .map(|i| {
            let content: Vec<&str> = (0..40).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
            let name = format!("Artefacto {}", WORDS[i % WORDS.len()]);
            let content = content.join(" ");
            let embedding = vectorizer.embed_with_terms(&ContextRecord::embedding_text(&name, &content));
            let ts = now - Duration::minutes(i as i64);
            ContextRecord {
                hypothesis_id: "bench".to_string(),
                artifact_id: format!("a{i}"),
                phase: PHASE_ORDER[i % PHASE_ORDER.len()],
                name,
                content,
                vector: embedding.vector,
                metadata: embedding.metadata,
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

fn bench_compute_idf_1k(c: &mut Criterion) {
    let records = build_corpus(1_000);
    c.bench_function("compute_idf_1k_records", |b| {
        b.iter(|| CorpusStats::compute(&records, 256));
    });
}

fn bench_rank_100(c: &mut Criterion) {
    let records = build_corpus(100);
    let ranker = RelevanceRanker::default();
    c.bench_function("rank_100_records", |b| {
        b.iter(|| ranker.rank(&records, PHASE_ORDER[1], "Encuesta de satisfacción de clientes"));
    });
}

fn bench_find_relevant_memory_store_1k(c: &mut Criterion) {
    let store = MemoryContextStore::new();
    for record in build_corpus(1_000) {
        store.upsert(&record).unwrap();
    }
    let ranker = RelevanceRanker::default();
    c.bench_function("find_relevant_memory_store_1k", |b| {
        b.iter(|| {
            ranker
                .find_relevant(&store, "bench", PHASE_ORDER[2], "Aprendizajes de retención")
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_compute_idf_1k,
    bench_rank_100,
    bench_find_relevant_memory_store_1k
);
criterion_main!(benches);
