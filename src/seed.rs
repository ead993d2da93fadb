//! Demo dataset installed the first time a store is opened on empty storage.

use crate::domain::client::ClientRecord;
use crate::repository::errors::RepositoryResult;

const SEED_CLIENTS: &str = include_str!("../data/seed_clients.json");

/// Two clients: one with a paid and a pending invoice, an exercise list and an
/// approved voucher; one with a single overdue invoice.
pub fn seed_clients() -> RepositoryResult<Vec<ClientRecord>> {
    Ok(serde_json::from_str(SEED_CLIENTS)?)
}
