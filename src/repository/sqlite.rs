use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::{DbPool, get_connection},
    models::storage_entry::{NewStorageEntry, StorageEntry},
    repository::{KeyValueStorage, errors::RepositoryResult},
};

/// Diesel implementation of [`KeyValueStorage`] over a SQLite table.
#[derive(Clone)]
pub struct DieselStorage {
    pool: DbPool,
}

impl DieselStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// The stored row for `key`, including when it was last written.
    pub fn entry(&self, key: &str) -> RepositoryResult<Option<StorageEntry>> {
        use crate::schema::storage_entries;

        let mut conn = get_connection(&self.pool)?;
        let entry = storage_entries::table
            .find(key)
            .select(StorageEntry::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(entry)
    }
}

impl KeyValueStorage for DieselStorage {
    fn load(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.entry(key)?.map(|entry| entry.value))
    }

    fn save(&self, key: &str, value: &str) -> RepositoryResult<()> {
        use crate::schema::storage_entries;

        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();
        let entry = NewStorageEntry::new(key, value, now);

        diesel::insert_into(storage_entries::table)
            .values(&entry)
            .on_conflict(storage_entries::key)
            .do_update()
            .set((
                storage_entries::value.eq(value),
                storage_entries::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        use crate::schema::storage_entries;

        let mut conn = get_connection(&self.pool)?;
        diesel::delete(storage_entries::table.find(key)).execute(&mut conn)?;
        Ok(())
    }
}
