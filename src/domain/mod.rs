//! Domain entities of the client store.

pub mod client;
pub mod exercise_list;
pub mod invoice;
pub mod payment_voucher;
pub mod types;
pub mod user;
