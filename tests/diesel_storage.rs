#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use sgf_store::domain::client::NewClient;
use sgf_store::domain::types::{Email, PersonName};
use sgf_store::models::config::StoreConfig;
use sgf_store::open_store;
use sgf_store::repository::{ClientWriter, DieselStorage, KeyValueStorage};
use sgf_store::CLIENTS_KEY;

mod common;

#[test]
fn test_save_upserts_and_remove_deletes() {
    let test_db = common::TestDb::new("test_save_upserts.db");
    let storage = DieselStorage::new(test_db.pool());

    assert_eq!(storage.load("sgf_user").unwrap(), None);

    storage.save("sgf_user", r#"{"v":1}"#).unwrap();
    storage.save("sgf_user", r#"{"v":2}"#).unwrap();
    assert_eq!(
        storage.load("sgf_user").unwrap().as_deref(),
        Some(r#"{"v":2}"#)
    );

    let entry = storage.entry("sgf_user").unwrap().unwrap();
    assert_eq!(entry.key, "sgf_user");
    assert_eq!(entry.value, r#"{"v":2}"#);

    storage.remove("sgf_user").unwrap();
    assert_eq!(storage.load("sgf_user").unwrap(), None);
    assert!(storage.entry("sgf_user").unwrap().is_none());

    // removing a missing key is not an error
    storage.remove("sgf_user").unwrap();
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_idempotent.db");
    sgf_store::db::run_migrations(&test_db.pool()).unwrap();
}

#[test]
fn test_open_store_seeds_once_and_reloads() {
    let test_db = common::TestDb::new("test_open_store.db");
    let config = StoreConfig {
        database_url: test_db.path().to_string(),
        seed_when_empty: true,
    };

    let added = {
        let mut store = open_store(&config).unwrap();
        assert_eq!(store.clients().len(), 2);
        store
            .add_client(NewClient::new(
                PersonName::new("Carla Souza").unwrap(),
                Email::new("carla@email.com").unwrap(),
                NaiveDate::from_ymd_opt(1992, 11, 3).unwrap(),
            ))
            .unwrap()
    };

    let reopened = open_store(&config).unwrap();
    assert_eq!(reopened.clients().len(), 3);
    assert_eq!(reopened.clients()[2], added);
    assert!(
        reopened
            .storage()
            .load(CLIENTS_KEY)
            .unwrap()
            .unwrap()
            .contains("carla@email.com")
    );
}

#[test]
fn test_open_store_without_seed() {
    let test_db = common::TestDb::new("test_open_store_empty.db");
    let config = StoreConfig {
        database_url: test_db.path().to_string(),
        seed_when_empty: false,
    };

    let store = open_store(&config).unwrap();
    assert!(store.clients().is_empty());
    assert_eq!(store.storage().load(CLIENTS_KEY).unwrap(), None);
}
