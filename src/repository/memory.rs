//! In-process storage backend. Clones share the same map, so a test can keep
//! a handle and inspect what the store wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::KeyValueStorage;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> RepositoryResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| RepositoryError::Unexpected(format!("memory storage poisoned: {e}")))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
