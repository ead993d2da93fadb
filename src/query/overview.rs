//! Admin overview figures.

use serde::Serialize;

use crate::domain::client::ClientRecord;
use crate::domain::invoice::InvoiceStatus;
use crate::domain::payment_voucher::VoucherStatus;
use crate::domain::types::Amount;
use crate::query::joins::{InvoiceRow, invoice_rows, voucher_rows};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_clients: usize,
    pub total_invoices: usize,
    /// Sum of paid invoice amounts.
    pub total_revenue: Amount,
    /// Number of invoices still pending. Overdue ones are not counted.
    pub pending_payments: usize,
}

pub fn overview(clients: &[ClientRecord]) -> OverviewStats {
    let invoices = || invoice_rows(clients).map(|row| row.invoice);

    OverviewStats {
        total_clients: clients.len(),
        total_invoices: invoices().count(),
        total_revenue: invoices()
            .filter(|invoice| invoice.status == InvoiceStatus::Paid)
            .map(|invoice| invoice.amount)
            .sum(),
        pending_payments: invoices()
            .filter(|invoice| invoice.status == InvoiceStatus::Pending)
            .count(),
    }
}

/// The last `n` clients by insertion order, oldest first.
pub fn recent_clients(clients: &[ClientRecord], n: usize) -> &[ClientRecord] {
    &clients[clients.len().saturating_sub(n)..]
}

/// The `n` newest invoices across all clients, newest first. Invoices
/// created at the same instant keep insertion order.
pub fn recent_invoices(clients: &[ClientRecord], n: usize) -> Vec<InvoiceRow<'_>> {
    let mut rows: Vec<_> = invoice_rows(clients).collect();
    rows.sort_by(|a, b| b.invoice.created_at.cmp(&a.invoice.created_at));
    rows.truncate(n);
    rows
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceStatusCounts {
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VoucherStatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn invoice_status_counts(clients: &[ClientRecord]) -> InvoiceStatusCounts {
    invoice_rows(clients).fold(InvoiceStatusCounts::default(), |mut counts, row| {
        match row.invoice.status {
            InvoiceStatus::Pending => counts.pending += 1,
            InvoiceStatus::Paid => counts.paid += 1,
            InvoiceStatus::Overdue => counts.overdue += 1,
        }
        counts
    })
}

pub fn voucher_status_counts(clients: &[ClientRecord]) -> VoucherStatusCounts {
    voucher_rows(clients).fold(VoucherStatusCounts::default(), |mut counts, row| {
        match row.voucher.status {
            VoucherStatus::Pending => counts.pending += 1,
            VoucherStatus::Approved => counts.approved += 1,
            VoucherStatus::Rejected => counts.rejected += 1,
        }
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_clients;

    #[test]
    fn seed_overview() {
        let clients = seed_clients().unwrap();

        assert_eq!(
            overview(&clients),
            OverviewStats {
                total_clients: 2,
                total_invoices: 3,
                total_revenue: Amount::from_cents(15000).unwrap(),
                pending_payments: 1,
            }
        );
    }

    #[test]
    fn empty_snapshot_overview() {
        let stats = overview(&[]);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.total_revenue, Amount::ZERO);
    }

    #[test]
    fn recent_clients_takes_the_tail() {
        let clients = seed_clients().unwrap();

        let recent = recent_clients(&clients, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name.as_str(), "Maria Santos");
        assert_eq!(recent_clients(&clients, 5).len(), 2);
        assert!(recent_clients(&clients, 0).is_empty());
    }

    #[test]
    fn recent_invoices_are_newest_first() {
        let clients = seed_clients().unwrap();

        let rows = recent_invoices(&clients, 2);
        assert_eq!(rows.len(), 2);
        // Feb invoice first, then the two Jan 1st invoices in insertion order.
        assert_eq!(rows[0].invoice.id.as_str(), "2");
        assert_eq!(rows[1].invoice.id.as_str(), "1");
        assert_eq!(rows[1].client_name(), "João Silva");
    }

    #[test]
    fn status_counts() {
        let clients = seed_clients().unwrap();

        assert_eq!(
            invoice_status_counts(&clients),
            InvoiceStatusCounts {
                pending: 1,
                paid: 1,
                overdue: 1,
            }
        );
        assert_eq!(
            voucher_status_counts(&clients),
            VoucherStatusCounts {
                pending: 0,
                approved: 1,
                rejected: 0,
            }
        );
    }
}
