//! Workflows layered over the store traits.
//!
//! Services are generic over the reader/writer traits so they run against the
//! real [`crate::store::ClientStore`] as well as the mocks behind the
//! `test-mocks` feature.

pub mod errors;
pub mod exercise_lists;
pub mod vouchers;

pub use errors::{ServiceError, ServiceResult};
