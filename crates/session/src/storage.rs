use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use shared_types::{Role, Session, StorageError};

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "user";

/// Version written into every persisted session record. Hydration rejects
/// anything else, so a future layout change cannot be misread as the old
/// shape.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk shape of a persisted session.
///
/// Kept separate from [`Session`] so the storage layout can evolve without
/// touching the in-memory type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl StoredSession {
    pub fn from_session(session: &Session) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id: session.user_id.clone(),
            name: session.name.clone(),
            email: session.email.clone(),
            role: session.role,
        }
    }

    pub fn into_session(self) -> Session {
        Session {
            user_id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Durable client storage, keyed by string.
///
/// Reads and writes are the store's only suspension points; everything
/// else in this crate is synchronous. Implementations must make a
/// completed `write` visible to the next `read`.
#[allow(async_fn_in_trait)]
pub trait SessionStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// Stores take their storage by value; sharing one backing store across
// store instances (e.g. to simulate a process restart) goes through Arc.
impl<S: SessionStorage> SessionStorage for std::sync::Arc<S> {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}

/// In-memory storage. The default for tests and for contexts where
/// persistence across restarts is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value before the store hydrates, simulating state left
    /// behind by a previous process.
    pub async fn seed(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

impl SessionStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// File-backed storage: one JSON file per key inside a directory.
/// The durable option for desktop builds.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
