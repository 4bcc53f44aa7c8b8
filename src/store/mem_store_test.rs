use serde_json::json;

use super::*;

#[tokio::test]
async fn upsert_then_fetch_returns_the_document() {
    let store = MemoryStore::new();

    let cas = store.upsert("user:1", json!({"name": "Bob"})).await.unwrap();
    let outcome = store.fetch_one("user:1").await.unwrap();

    assert_eq!(
        outcome,
        KeyOutcome::Found(DocumentEnvelope::new(json!({"name": "Bob"}), cas))
    );
}

#[tokio::test]
async fn fetch_one_reports_miss_as_outcome() {
    let store = MemoryStore::new();
    assert_eq!(store.fetch_one("ghost").await.unwrap(), KeyOutcome::NotFound);
}

#[tokio::test]
async fn every_mutation_gets_a_fresh_cas() {
    let store = MemoryStore::new();

    let first = store.upsert("k", json!(1)).await.unwrap();
    let second = store.upsert("k", json!(2)).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn fetch_many_answers_every_distinct_key() {
    let store = MemoryStore::new();
    store.upsert("a", json!("A")).await.unwrap();

    let keys = vec!["a".to_string(), "b".to_string(), "a".to_string()];
    let answer = store.fetch_many(&keys).await.unwrap();

    assert_eq!(answer.len(), 2);
    assert!(answer["a"].as_ref().unwrap().is_found());
    assert_eq!(answer["b"], Ok(KeyOutcome::NotFound));
}

#[tokio::test]
async fn remove_missing_document_is_an_error() {
    let store = MemoryStore::new();
    store.upsert("k", json!({})).await.unwrap();

    assert!(store.remove("k").await.is_ok());
    assert_eq!(
        store.remove("k").await,
        Err(StoreError::DocumentMissing("k".to_string()))
    );
}

#[tokio::test]
async fn flush_empties_the_store() {
    let store = MemoryStore::new();
    store.upsert("a", json!(1)).await.unwrap();
    store.upsert("b", json!(2)).await.unwrap();

    store.flush();

    assert!(store.is_empty());
}
