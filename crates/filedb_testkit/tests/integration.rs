//! End-to-end tests over real database directories.

use filedb_core::{Config, CoreError, Database, RecordId};
use filedb_testkit::prelude::*;
use proptest::prelude::*;
use serde_json::json;
use std::fs;

fn ids(db: &Database, table: &str) -> Vec<u64> {
    db.records(table)
        .unwrap()
        .iter()
        .map(|r| r.id.as_u64())
        .collect()
}

#[test]
fn create_add_delete_reopen_scenario() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("d1");

    {
        let db = Database::open(&path).unwrap();
        db.create_table("t1").unwrap();

        assert_eq!(db.add_record("t1", json!({"x": 1})).unwrap(), RecordId::new(1));
        assert_eq!(db.add_record("t1", json!({"x": 2})).unwrap(), RecordId::new(2));

        db.delete_record("t1", RecordId::new(1)).unwrap();

        // One live record remains, so the new ID is 2 and collides with it.
        let id = db.add_record("t1", json!({"x": 3})).unwrap();
        assert_eq!(id, RecordId::new(2));
        assert_eq!(ids(&db, "t1"), vec![2, 2]);
    }

    let db = Database::open(&path).unwrap();
    let records = db.records("t1").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].data, json!({"x": 2}));
    assert_eq!(records[1].data, json!({"x": 3}));

    // Lookup by a duplicated ID returns the earlier record.
    assert_eq!(db.get_record("t1", RecordId::new(2)).unwrap().data, json!({"x": 2}));
}

#[test]
fn ids_are_sequential_without_deletes() {
    let test_db = scenarios::populated_database("items", 25);
    assert_eq!(ids(&test_db, "items"), (1..=25).collect::<Vec<_>>());
}

#[test]
fn deleting_the_last_record_frees_its_id() {
    let test_db = scenarios::populated_database("items", 3);
    test_db.delete_record("items", RecordId::new(3)).unwrap();

    let id = test_db.add_record("items", json!("again")).unwrap();
    assert_eq!(id, RecordId::new(3));
    assert_eq!(ids(&test_db, "items"), vec![1, 2, 3]);
}

#[test]
fn dropped_table_is_not_resurrected() {
    let mut test_db = scenarios::multi_table_database(&["keep", "gone"]);
    test_db.add_record("gone", json!(1)).unwrap();

    test_db.drop_table("gone").unwrap();
    assert!(!test_db.path().join("gone.json").exists());

    test_db.reopen();
    assert_eq!(test_db.table_names(), vec!["keep"]);
}

#[test]
fn drop_table_twice_reports_not_found() {
    let test_db = scenarios::multi_table_database(&["t"]);
    test_db.drop_table("t").unwrap();

    let err = test_db.drop_table("t").unwrap_err();
    assert!(matches!(err, CoreError::TableNotFound { .. }));
}

#[test]
fn save_through_stale_handle_after_drop_recreates_file() {
    // Persistence runs outside the table-map lock, so a write that was
    // already in flight when the table was dropped still lands on disk.
    // A stale handle reproduces that write deterministically.
    let mut test_db = scenarios::multi_table_database(&["t"]);
    let handle = test_db.table("t").unwrap();

    test_db.drop_table("t").unwrap();
    assert!(!test_db.has_table("t"));

    handle.add(json!("late write"));
    handle.save(&test_db.table_path("t")).unwrap();
    assert!(test_db.path().join("t.json").exists());

    // The in-memory map does not know about it, but the next open does.
    assert!(!test_db.has_table("t"));
    test_db.reopen();
    assert_eq!(
        test_db.get_record("t", RecordId::new(1)).unwrap().data,
        json!("late write")
    );
}

#[test]
fn open_ignores_non_table_files() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("README.txt"), b"not a table").unwrap();
    fs::create_dir(temp.path().join("subdir")).unwrap();
    fs::write(
        temp.path().join("users.json"),
        br#"{"name":"users","records":[{"id":1,"data":"ada"}]}"#,
    )
    .unwrap();

    let db = Database::open(temp.path()).unwrap();
    assert_eq!(db.table_names(), vec!["users"]);
    assert_eq!(db.get_record("users", RecordId::new(1)).unwrap().data, json!("ada"));
}

#[test]
fn open_loads_file_written_by_hand_with_other_name() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("people.json"),
        br#"{"name":"persons","records":[]}"#,
    )
    .unwrap();

    // Registered under the file stem; the stored name is kept on the table.
    let db = Database::open(temp.path()).unwrap();
    assert!(db.has_table("people"));
    assert_eq!(db.table("people").unwrap().name(), "persons");
}

#[test]
fn corrupt_table_aborts_open() {
    let test_db = scenarios::multi_table_database(&["good", "bad"]);
    fs::write(test_db.path().join("bad.json"), b"{\"records\": [").unwrap();

    let err = Database::open(test_db.path()).unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}

#[test]
fn truncated_file_is_a_serialization_error() {
    let test_db = scenarios::populated_database("t", 10);
    let path = test_db.table_path("t");
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = Database::open(test_db.path()).unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}

#[test]
fn missing_database_without_create_fails() {
    let temp = tempfile::tempdir().unwrap();
    let config = Config::new().create_if_missing(false);

    let err = Database::open_with_config(temp.path().join("absent"), config).unwrap_err();
    assert!(matches!(err, CoreError::InvalidFormat { .. }));
}

#[test]
fn regular_file_in_place_of_directory_is_io_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plain");
    fs::write(&path, b"x").unwrap();

    let err = Database::open(&path).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn table_file_holding_null_opens_empty() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("t.json"), b"null").unwrap();

    let db = Database::open(temp.path()).unwrap();
    assert!(db.has_table("t"));
    assert!(db.records("t").unwrap().is_empty());
    assert_eq!(db.table("t").unwrap().name(), "t");
}

#[test]
fn sync_on_save_round_trips() {
    let mut test_db = TestDatabase::with_config(Config::new().sync_on_save(true).pretty(false));
    test_db.create_table("t").unwrap();
    test_db.add_record("t", json!({"nested": {"deep": [1, 2, 3]}})).unwrap();

    test_db.reopen();
    assert_eq!(
        test_db.get_record("t", RecordId::new(1)).unwrap().data,
        json!({"nested": {"deep": [1, 2, 3]}})
    );
}

#[test]
fn failed_save_leaves_memory_ahead_of_disk() {
    let test_db = scenarios::populated_database("t", 1);
    let path = test_db.table_path("t");

    // Replace the table file with a directory so the next write fails.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = test_db.add_record("t", json!("unsaved")).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));

    // The record is in memory even though the write failed.
    assert_eq!(test_db.records("t").unwrap().len(), 2);
    assert_eq!(test_db.stats().errors(), 1);
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn payloads_round_trip_through_disk(values in prop::collection::vec(json_value_strategy(), 0..12)) {
        let mut test_db = TestDatabase::new();
        test_db.create_table("t").unwrap();
        for value in &values {
            test_db.add_record("t", value.clone()).unwrap();
        }

        test_db.reopen();
        let stored: Vec<_> = test_db.records("t").unwrap().into_iter().map(|r| r.data).collect();
        prop_assert_eq!(stored, values);
    }

    #[test]
    fn random_operations_match_model(ops in record_ops_strategy(40)) {
        let mut harness = IntegrationHarness::new("model");
        for op in ops {
            harness.apply(op);
        }
        harness.verify_all();
        harness.reopen_and_verify();
    }

    #[test]
    fn created_tables_are_listed(
        names in prop::collection::btree_set(table_name_strategy().prop_map(|n| n.to_lowercase()), 1..6)
    ) {
        let mut test_db = TestDatabase::new();
        for name in &names {
            test_db.create_table(name).unwrap();
        }

        test_db.reopen();
        let expected: Vec<String> = names.into_iter().collect();
        prop_assert_eq!(test_db.table_names(), expected);
    }
}
