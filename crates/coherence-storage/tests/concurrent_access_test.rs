//! Concurrent writers and readers on a shared store.

use std::sync::Arc;
use std::thread;

use chrono::Utc;

use coherence_core::models::{ContextRecord, Phase, RecordMetadata};
use coherence_core::traits::IContextStore;
use coherence_storage::{MemoryContextStore, SqliteContextStore};

fn record(hypothesis: &str, artifact: &str) -> ContextRecord {
    let now = Utc::now();
    ContextRecord {
        hypothesis_id: hypothesis.to_string(),
        artifact_id: artifact.to_string(),
        phase: Phase::Pivotar,
        name: artifact.to_string(),
        content: String::new(),
        vector: vec![1.0; 8],
        metadata: RecordMetadata::default(),
        created_at: now,
        updated_at: now,
    }
}

fn hammer(store: Arc<dyn IContextStore>) {
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let hypothesis = format!("h{}", t % 2);
                for i in 0..25 {
                    store
                        .upsert(&record(&hypothesis, &format!("t{t}-a{i}")))
                        .unwrap();
                    let listed = store.list_by_hypothesis(&hypothesis).unwrap();
                    assert!(listed.iter().all(|r| r.hypothesis_id == hypothesis));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.count("h0").unwrap(), 100);
    assert_eq!(store.count("h1").unwrap(), 100);
}

#[test]
fn memory_store_handles_parallel_writers() {
    hammer(Arc::new(MemoryContextStore::new()));
}

#[test]
fn sqlite_store_handles_parallel_writers() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteContextStore::open(&dir.path().join("concurrent.db")).unwrap();
    hammer(Arc::new(store));
}

#[test]
fn memory_store_drops_empty_hypotheses() {
    let store = MemoryContextStore::new();
    store.upsert(&record("h", "a")).unwrap();
    assert_eq!(store.hypothesis_count(), 1);
    store.delete("h", "a").unwrap();
    assert_eq!(store.hypothesis_count(), 0);
}
