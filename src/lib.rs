//! Client data store for a gym management system.
//!
//! [`store::ClientStore`] owns every client together with their invoices,
//! exercise lists and payment vouchers, persisting the whole collection as one
//! JSON snapshot through a [`repository::KeyValueStorage`] backend. The
//! [`query`] module derives the dashboard and listing views from a snapshot,
//! and [`services`] implements the voucher and exercise-list workflows on top
//! of the store traits.

pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod query;
pub mod repository;
pub mod seed;
pub mod services;
pub mod session;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod db;
#[cfg(feature = "sqlite")]
pub mod schema;

/// Storage key holding the JSON array of client records.
pub const CLIENTS_KEY: &str = "sgf_clients";
/// Storage key holding the signed-in user.
pub const USER_KEY: &str = "sgf_user";

#[cfg(feature = "sqlite")]
use crate::{
    models::config::StoreConfig,
    repository::{DieselStorage, errors::RepositoryResult},
    store::ClientStore,
};

/// Opens the SQLite database named by `config`, applies pending migrations and
/// loads (or seeds) the client store.
#[cfg(feature = "sqlite")]
pub fn open_store(config: &StoreConfig) -> RepositoryResult<ClientStore<DieselStorage>> {
    let pool = db::establish_connection_pool(&config.database_url)?;
    db::run_migrations(&pool)?;

    let store = ClientStore::open(DieselStorage::new(pool), config.seed_when_empty)?;
    log::info!(
        "Client store ready at {} with {} client(s)",
        config.database_url,
        store.clients().len()
    );
    Ok(store)
}
