//! Integration tests for the data facade
//!
//! Exercises stores and sources together through the public API.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use data_facade::{
    DataError, DocumentStore, DocumentStreamSource, Granularity, JsonLinesStore,
    MemoryDocumentStore, MissingValuePolicy, SequenceSource, SeriesConfig, SeriesConfigBuilder,
};
use serde_json::json;
use tempfile::tempdir;

fn write_jsonl(dir: &Path, collection: &str, rows: &[serde_json::Value]) {
    let mut file = File::create(dir.join(format!("{}.jsonl", collection))).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
}

#[test]
fn test_jsonl_store_monthly_sales() {
    let dir = tempdir().unwrap();
    write_jsonl(
        dir.path(),
        "inventory",
        &[
            json!({"id": "i1", "timestamp": "2023-01-03T09:00:00Z", "sales": 60}),
            json!({"id": "i2", "timestamp": "2023-01-28T17:30:00Z", "sales": 40}),
            json!({"id": "i3", "timestamp": {"_seconds": 1675900800, "_nanoseconds": 0}, "sales": 120}),
            json!({"id": "i4", "timestamp": "2023-03-15", "sales": "150"}),
        ],
    );

    let store = JsonLinesStore::new(dir.path());
    let config = SeriesConfigBuilder::new()
        .collection("inventory")
        .value_field("sales")
        .timestamp_field("timestamp")
        .granularity(Granularity::Monthly)
        .build()
        .unwrap();

    let mut source = DocumentStreamSource::new(&store, config);
    assert_eq!(source.load_sequence().unwrap(), vec![100.0, 120.0, 150.0]);
    assert_eq!(source.name(), "jsonl:inventory");
}

#[test]
fn test_same_config_over_different_stores() {
    let rows = vec![json!({"sales": 1}), json!({"sales": 2}), json!({"sales": 4})];

    let dir = tempdir().unwrap();
    write_jsonl(dir.path(), "c", &rows);
    let on_disk = JsonLinesStore::new(dir.path());
    let in_memory = MemoryDocumentStore::new().with_values("c", rows);

    let stores: Vec<&dyn DocumentStore> = vec![&on_disk, &in_memory];
    for store in stores {
        let mut source = DocumentStreamSource::new(store, SeriesConfig::new("c", "sales"));
        assert_eq!(source.load_sequence().unwrap(), vec![1.0, 2.0, 4.0]);
    }
}

#[test]
fn test_each_missing_policy_on_a_collection() {
    let store = MemoryDocumentStore::new().with_values(
        "c",
        vec![json!({"v": 2}), json!({"v": null}), json!({}), json!({"v": 8})],
    );

    let cases = [
        (MissingValuePolicy::Skip, vec![2.0, 8.0]),
        (MissingValuePolicy::Zero, vec![2.0, 0.0, 0.0, 8.0]),
        (MissingValuePolicy::Previous, vec![2.0, 2.0, 2.0, 8.0]),
        (MissingValuePolicy::Interpolate, vec![2.0, 4.0, 6.0, 8.0]),
    ];
    for (policy, expected) in cases {
        let mut config = SeriesConfig::new("c", "v");
        config.missing = policy;
        let mut source = DocumentStreamSource::new(&store, config);
        assert_eq!(source.load_sequence().unwrap(), expected, "policy {}", policy);
    }
}

#[test]
fn test_broken_line_stops_the_load() {
    let dir = tempdir().unwrap();
    let mut file = File::create(dir.path().join("c.jsonl")).unwrap();
    writeln!(file, r#"{{"sales": 1}}"#).unwrap();
    writeln!(file, "not json").unwrap();

    let store = JsonLinesStore::new(dir.path());
    let mut source = DocumentStreamSource::new(&store, SeriesConfig::new("c", "sales"));
    assert!(matches!(source.load_sequence(), Err(DataError::Parse(_))));
}
