//! Cross-entity lookups used when listing children together with their
//! owner.

use crate::domain::client::ClientRecord;
use crate::domain::exercise_list::ExerciseList;
use crate::domain::invoice::Invoice;
use crate::domain::payment_voucher::PaymentVoucher;

/// An invoice paired with the client that owns it.
#[derive(Clone, Copy, Debug)]
pub struct InvoiceRow<'a> {
    pub client: &'a ClientRecord,
    pub invoice: &'a Invoice,
}

impl<'a> InvoiceRow<'a> {
    pub fn client_name(&self) -> &'a str {
        self.client.name.as_str()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ExerciseListRow<'a> {
    pub client: &'a ClientRecord,
    pub list: &'a ExerciseList,
}

impl<'a> ExerciseListRow<'a> {
    pub fn client_name(&self) -> &'a str {
        self.client.name.as_str()
    }
}

/// A voucher with its owner and, when it resolves, the invoice it pays.
#[derive(Clone, Copy, Debug)]
pub struct VoucherRow<'a> {
    pub client: &'a ClientRecord,
    pub voucher: &'a PaymentVoucher,
    pub invoice: Option<&'a Invoice>,
}

impl<'a> VoucherRow<'a> {
    pub fn client_name(&self) -> &'a str {
        self.client.name.as_str()
    }
}

pub(crate) fn invoice_rows(clients: &[ClientRecord]) -> impl Iterator<Item = InvoiceRow<'_>> {
    clients.iter().flat_map(|client| {
        client
            .invoices
            .iter()
            .map(move |invoice| InvoiceRow { client, invoice })
    })
}

pub(crate) fn exercise_list_rows(
    clients: &[ClientRecord],
) -> impl Iterator<Item = ExerciseListRow<'_>> {
    clients.iter().flat_map(|client| {
        client
            .exercise_lists
            .iter()
            .map(move |list| ExerciseListRow { client, list })
    })
}

pub(crate) fn voucher_rows(clients: &[ClientRecord]) -> impl Iterator<Item = VoucherRow<'_>> {
    clients.iter().flat_map(|client| {
        client.payment_vouchers.iter().map(move |voucher| VoucherRow {
            client,
            voucher,
            invoice: find_invoice_in(client, voucher),
        })
    })
}

fn find_invoice_in<'a>(client: &'a ClientRecord, voucher: &PaymentVoucher) -> Option<&'a Invoice> {
    client
        .invoices
        .iter()
        .find(|invoice| invoice.id == voucher.invoice_id)
}

/// Name of the client owning `invoice`, or `None` when the owner is gone.
pub fn invoice_client_name<'a>(clients: &'a [ClientRecord], invoice: &Invoice) -> Option<&'a str> {
    clients
        .iter()
        .find(|client| client.id == invoice.client_id)
        .map(|client| client.name.as_str())
}

/// The invoice a voucher pays, looked up inside the voucher's own client.
/// An unresolved reference yields `None`.
pub fn voucher_invoice<'a>(
    clients: &'a [ClientRecord],
    voucher: &PaymentVoucher,
) -> Option<&'a Invoice> {
    clients
        .iter()
        .find(|client| client.id == voucher.client_id)
        .and_then(|client| find_invoice_in(client, voucher))
}
