use pretty_assertions::assert_eq;
use std::path::PathBuf;

use session::{FileStorage, MockAuthBackend, SessionStorage, SessionStore, SESSION_KEY};
use shared_types::{LoginRequest, Role};

/// Unique scratch directory per test; removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("studihub-test-{}", uuid::Uuid::new_v4()));
        Self(dir)
    }

    fn storage(&self) -> FileStorage {
        FileStorage::new(&self.0)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[tokio::test]
async fn write_then_read_roundtrip() {
    let scratch = ScratchDir::new();
    let storage = scratch.storage();

    storage.write("user", r#"{"a":1}"#).await.unwrap();
    assert_eq!(
        storage.read("user").await.unwrap(),
        Some(r#"{"a":1}"#.to_string())
    );
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let scratch = ScratchDir::new();
    assert_eq!(scratch.storage().read("user").await.unwrap(), None);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let scratch = ScratchDir::new();
    let storage = scratch.storage();

    storage.write("user", "x").await.unwrap();
    storage.remove("user").await.unwrap();
    storage.remove("user").await.unwrap();
    assert_eq!(storage.read("user").await.unwrap(), None);
}

#[tokio::test]
async fn session_survives_restart_on_disk() {
    let scratch = ScratchDir::new();

    let first = SessionStore::new(scratch.storage(), MockAuthBackend::new());
    let session = first
        .login(LoginRequest::new("ana@studihub.io", "password123", Role::Parent))
        .await
        .unwrap();
    drop(first);

    let second = SessionStore::new(scratch.storage(), MockAuthBackend::new());
    assert_eq!(second.hydrate().await, Some(session));
}

#[tokio::test]
async fn corrupt_file_hydrates_to_anonymous() {
    let scratch = ScratchDir::new();
    let storage = scratch.storage();
    storage.write(SESSION_KEY, "not-json").await.unwrap();

    let store = SessionStore::new(storage, MockAuthBackend::new());
    assert_eq!(store.hydrate().await, None);
}
