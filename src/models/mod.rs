//! Configuration and database models.

pub mod config;
#[cfg(feature = "sqlite")]
pub mod storage_entry;
