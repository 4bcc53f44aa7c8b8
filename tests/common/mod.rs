use bucket_driver::Driver;
use bucket_driver::RetrievalConfig;
use bucket_driver::SledStore;
use bucket_driver::StorageConfig;
use bucket_driver::StoreClient;
use serde_json::json;
use serde_json::Value;
use tempfile::TempDir;

pub const BUCKET: &str = "driver_test";

pub fn mock_data() -> Vec<(&'static str, Value)> {
    vec![
        ("driver_test_mock_1", json!({"foo": "bar"})),
        ("driver_test_mock_2", json!({"firstName": "Bob", "lastName": "Smith"})),
        ("driver_test_mock_3", json!({"firstName": "Bill", "lastName": "Jones"})),
    ]
}

pub fn mock_keys() -> Vec<String> {
    mock_data().into_iter().map(|(k, _)| k.to_string()).collect()
}

pub fn mock_values() -> Vec<Value> {
    mock_data().into_iter().map(|(_, v)| v).collect()
}

/// Opens a fresh sled bucket, flushes it and seeds the mock documents
/// directly through the store, bypassing the driver.
pub async fn seeded_driver(config: RetrievalConfig) -> (TempDir, Driver<SledStore>) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let storage = StorageConfig {
        db_path: dir.path().join("db"),
        bucket: BUCKET.to_string(),
        ..StorageConfig::default()
    };
    let store = SledStore::open(&storage).expect("open bucket");
    store.flush().expect("flush bucket");

    for (key, value) in mock_data() {
        store.upsert(key, value).await.expect("seed document");
    }

    (dir, Driver::with_config(store, config))
}
