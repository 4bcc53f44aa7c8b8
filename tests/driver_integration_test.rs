//! End-to-end driver scenarios against a flushed sled bucket.

mod common;

use bucket_driver::BatchStrategy;
use bucket_driver::Driver;
use bucket_driver::KeyOutcome;
use bucket_driver::MemoryStore;
use bucket_driver::RetrievalConfig;
use bucket_driver::OPERATIONS;
use common::mock_keys;
use common::mock_values;
use common::seeded_driver;
use serde_json::json;
use tokio::sync::oneshot;

fn strategies() -> Vec<RetrievalConfig> {
    vec![
        RetrievalConfig::default(),
        RetrievalConfig {
            batch_strategy: BatchStrategy::Bulk,
            ..RetrievalConfig::default()
        },
    ]
}

#[test]
fn operation_kinds_are_exported() {
    let driver = Driver::create(MemoryStore::new());

    assert_eq!(OPERATIONS.all().len(), 3);
    assert_eq!(driver.operations().upsert, OPERATIONS.upsert);
    assert_eq!(driver.operations().remove, OPERATIONS.remove);
    assert_eq!(driver.operations().noop, OPERATIONS.noop);
}

#[tokio::test]
async fn should_get_a_document_with_callback() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;
    let (tx, rx) = oneshot::channel();

    driver.get("driver_test_mock_1").on_complete(move |result| {
        let _ = tx.send(result);
    });

    let doc = rx.await.unwrap().expect("document");
    assert_eq!(doc.value, json!({"foo": "bar"}));
}

#[tokio::test]
async fn should_get_a_document_when_awaited() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;

    let doc = driver.get("driver_test_mock_1").await.unwrap();
    let again = driver.get("driver_test_mock_1").await.unwrap();

    assert_eq!(doc.value, json!({"foo": "bar"}));
    assert_eq!(doc.cas, again.cas);
}

#[tokio::test]
async fn should_fail_with_not_found_for_missing_key() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;

    assert!(driver.get("driver_test_mock_404").await.unwrap_err().is_not_found());

    let (tx, rx) = oneshot::channel();
    driver.get("driver_test_mock_404").on_complete(move |result| {
        let _ = tx.send(result);
    });
    assert!(rx.await.unwrap().unwrap_err().is_not_found());
}

#[tokio::test]
async fn should_get_an_array_of_documents() {
    for config in strategies() {
        let (_dir, driver) = seeded_driver(config).await;
        let (tx, rx) = oneshot::channel();

        driver.get(mock_keys()).on_complete(move |result| {
            let _ = tx.send(result.map(|batch| batch.into_parts()));
        });

        let (hits, misses) = rx.await.unwrap().unwrap();
        assert!(misses.is_empty());
        let actual: Vec<_> = hits.into_iter().map(|doc| doc.value).collect();
        assert_eq!(actual, mock_values());
    }
}

#[tokio::test]
async fn should_get_an_array_of_documents_and_return_misses() {
    for config in strategies() {
        let (_dir, driver) = seeded_driver(config).await;
        let keys = [
            "driver_test_mock_1",
            "driver_test_mock_2",
            "driver_test_mock_4",
            "driver_test_mock_3",
        ];

        let batch = driver.get(keys).await.unwrap();

        assert_eq!(batch.misses(), &["driver_test_mock_4".to_string()]);
        let actual: Vec<_> = batch.hits().iter().map(|doc| doc.value.clone()).collect();
        assert_eq!(actual, mock_values());
    }
}

#[tokio::test]
async fn should_resolve_empty_batch_immediately() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;

    let batch = driver.get(Vec::<String>::new()).await.unwrap();

    assert!(batch.hits().is_empty());
    assert!(batch.misses().is_empty());
}

#[tokio::test]
async fn should_upsert_then_get_all_documents() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;

    driver
        .upsert("driver_test_mock_4", json!({"somedata": 1234}))
        .await
        .unwrap();

    let mut keys = mock_keys();
    keys.push("driver_test_mock_4".to_string());
    let batch = driver.get(&keys).await.unwrap();

    let mut expected = mock_values();
    expected.push(json!({"somedata": 1234}));
    let actual: Vec<_> = batch.hits().iter().map(|doc| doc.value.clone()).collect();
    assert!(batch.is_complete());
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn should_call_get_multi_as_is() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;
    driver
        .upsert("driver_test_mock_4", json!({"somedata": 1234}))
        .await
        .unwrap();

    let answer = driver
        .get_multi(&["driver_test_mock_3", "driver_test_mock_4", "driver_test_mock_5"])
        .await
        .unwrap();

    let value_of = |key: &str| match answer[key].clone().unwrap() {
        KeyOutcome::Found(doc) => Some(doc.value),
        KeyOutcome::NotFound => None,
    };
    assert_eq!(
        value_of("driver_test_mock_3"),
        Some(json!({"firstName": "Bill", "lastName": "Jones"}))
    );
    assert_eq!(value_of("driver_test_mock_4"), Some(json!({"somedata": 1234})));
    assert_eq!(value_of("driver_test_mock_5"), None);
}

#[tokio::test]
async fn should_remove_documents() {
    let (_dir, driver) = seeded_driver(RetrievalConfig::default()).await;

    driver.remove("driver_test_mock_2").await.unwrap();

    let batch = driver.get(mock_keys()).await.unwrap();
    assert_eq!(batch.misses(), &["driver_test_mock_2".to_string()]);
    assert_eq!(batch.hits().len(), 2);
}
