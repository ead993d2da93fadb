use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::storage_entries)]
#[diesel(primary_key(key))]
/// Diesel model for one persisted key/value pair.
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::storage_entries)]
/// Insertable form of [`StorageEntry`].
pub struct NewStorageEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewStorageEntry<'a> {
    pub fn new(key: &'a str, value: &'a str, updated_at: NaiveDateTime) -> Self {
        Self {
            key,
            value,
            updated_at,
        }
    }
}
