//! Read-only views derived from a client snapshot.
//!
//! Everything here is a pure function of `&[ClientRecord]`; callers recompute
//! after each store change instead of caching.

pub mod dashboard;
pub mod filters;
pub mod joins;
pub mod overview;

pub use dashboard::{ClientDashboard, client_dashboard};
pub use filters::{
    ExerciseListFilter, InvoiceFilter, VoucherFilter, filter_exercise_lists, filter_invoices,
    filter_payment_vouchers, search_clients,
};
pub use joins::{
    ExerciseListRow, InvoiceRow, VoucherRow, invoice_client_name, voucher_invoice,
};
pub use overview::{
    InvoiceStatusCounts, OverviewStats, VoucherStatusCounts, invoice_status_counts, overview,
    recent_clients, recent_invoices, voucher_status_counts,
};
