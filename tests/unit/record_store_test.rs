//! Unit tests for record store failure modes.

use serde::{Deserialize, Serialize};

use ecotrack::storage::{MemoryMedium, RecordStore, StorageError, StorageMedium};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    id: u32,
    text: String,
}

#[test]
fn test_missing_key_reads_as_empty_collection() {
    let store = RecordStore::new(Box::new(MemoryMedium::new()));
    let notes: Vec<Note> = store.read_collection("notes").unwrap();
    assert!(notes.is_empty());
}

#[test]
fn test_corrupt_bytes_read_as_empty_not_error() {
    let medium = MemoryMedium::new();
    medium.set("notes", b"{\"oops\": tru").unwrap();

    let store = RecordStore::new(Box::new(medium));
    let notes: Vec<Note> = store.read_collection("notes").unwrap();
    assert!(notes.is_empty());
}

#[test]
fn test_wrong_shape_reads_as_empty() {
    // Valid JSON, but an object rather than an array of records.
    let medium = MemoryMedium::new();
    medium.set("notes", b"{\"id\": 1}").unwrap();

    let store = RecordStore::new(Box::new(medium));
    let notes: Vec<Note> = store.read_collection("notes").unwrap();
    assert!(notes.is_empty());
}

#[test]
fn test_quota_failure_is_recoverable() {
    let store = RecordStore::new(Box::new(MemoryMedium::with_quota(128)));

    let small = vec![Note {
        id: 1,
        text: "ok".to_string(),
    }];
    store.write_collection("notes", &small).unwrap();

    let huge: Vec<Note> = (0..50)
        .map(|id| Note {
            id,
            text: "padding".repeat(10),
        })
        .collect();
    let err = store.write_collection("notes", &huge).unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));

    // Prior persisted state survives the rejected write, and a fitting
    // write succeeds afterwards.
    let read: Vec<Note> = store.read_collection("notes").unwrap();
    assert_eq!(read, small);
    store.write_collection("notes", &small).unwrap();
}

#[test]
fn test_remove_collection() {
    let store = RecordStore::new(Box::new(MemoryMedium::new()));
    store
        .write_collection(
            "notes",
            &[Note {
                id: 7,
                text: "bye".to_string(),
            }],
        )
        .unwrap();

    store.remove_collection("notes").unwrap();
    let notes: Vec<Note> = store.read_collection("notes").unwrap();
    assert!(notes.is_empty());
}
