//! Payment voucher submission and review.

use chrono::NaiveDate;

use crate::domain::invoice::InvoiceStatus;
use crate::domain::payment_voucher::{
    NewPaymentVoucher, PaymentVoucher, UpdatePaymentVoucher, VoucherStatus,
};
use crate::domain::types::{Amount, ClientId, InvoiceId, PaymentVoucherId};
use crate::repository::{ClientReader, PaymentVoucherWriter};
use crate::services::{ServiceError, ServiceResult};

/// A client's proof of payment for one of their invoices.
#[derive(Clone, Debug)]
pub struct SubmitVoucher {
    pub client_id: ClientId,
    pub invoice_id: InvoiceId,
    /// Defaults to the invoice amount.
    pub amount: Option<Amount>,
    pub payment_date: NaiveDate,
    pub description: String,
    pub file_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoucherDecision {
    Approve,
    Reject,
}

impl VoucherDecision {
    fn status(self) -> VoucherStatus {
        match self {
            VoucherDecision::Approve => VoucherStatus::Approved,
            VoucherDecision::Reject => VoucherStatus::Rejected,
        }
    }
}

/// Records a pending voucher against one of the client's unpaid invoices.
pub fn submit_payment_voucher<R>(repo: &mut R, submission: SubmitVoucher) -> ServiceResult<PaymentVoucher>
where
    R: ClientReader + PaymentVoucherWriter + ?Sized,
{
    if repo.get_client_by_id(&submission.client_id).is_none() {
        return Err(ServiceError::NotFound);
    }

    let invoice = repo
        .get_invoice_by_id(&submission.invoice_id)
        .filter(|invoice| invoice.client_id == submission.client_id)
        .ok_or_else(|| ServiceError::Form("The invoice does not belong to this client".to_string()))?;

    if invoice.status == InvoiceStatus::Paid {
        return Err(ServiceError::InvalidState(format!(
            "invoice {} is already paid",
            invoice.id
        )));
    }

    if submission.file_url.trim().is_empty() {
        return Err(ServiceError::Form("A receipt file is required".to_string()));
    }

    let new_voucher = NewPaymentVoucher::new(
        submission.client_id,
        invoice.id,
        submission.amount.unwrap_or(invoice.amount),
        submission.payment_date,
        submission.file_url,
    )
    .description(submission.description);

    repo.add_payment_voucher(new_voucher).map_err(|e| {
        log::error!("Failed to submit payment voucher: {e}");
        ServiceError::from(e)
    })
}

/// Approves or rejects a pending voucher.
pub fn review_payment_voucher<R>(
    repo: &mut R,
    voucher_id: &PaymentVoucherId,
    decision: VoucherDecision,
) -> ServiceResult<PaymentVoucher>
where
    R: ClientReader + PaymentVoucherWriter + ?Sized,
{
    let voucher = repo
        .get_payment_voucher_by_id(voucher_id)
        .ok_or(ServiceError::NotFound)?;

    if voucher.status != VoucherStatus::Pending {
        return Err(ServiceError::InvalidState(format!(
            "voucher {voucher_id} was already {}",
            voucher.status
        )));
    }

    let updates = UpdatePaymentVoucher::default().status(decision.status());
    repo.update_payment_voucher(voucher_id, updates)
        .map_err(|e| {
            log::error!("Failed to review payment voucher {voucher_id}: {e}");
            ServiceError::from(e)
        })?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStorage;
    use crate::store::ClientStore;

    fn seeded() -> ClientStore<MemoryStorage> {
        ClientStore::open(MemoryStorage::new(), true).unwrap()
    }

    fn submission(client: &str, invoice: &str) -> SubmitVoucher {
        SubmitVoucher {
            client_id: ClientId::new(client).unwrap(),
            invoice_id: InvoiceId::new(invoice).unwrap(),
            amount: None,
            payment_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            description: "Transferência".to_string(),
            file_url: "receipt.pdf".to_string(),
        }
    }

    #[test]
    fn submit_defaults_amount_and_status() {
        let mut store = seeded();

        let voucher = submit_payment_voucher(&mut store, submission("1", "2")).unwrap();

        assert_eq!(voucher.amount, Amount::from_cents(15_000).unwrap());
        assert_eq!(voucher.status, VoucherStatus::Pending);
        assert_eq!(store.client(&voucher.client_id).unwrap().payment_vouchers.len(), 2);
    }

    #[test]
    fn submit_rejects_paid_and_foreign_invoices() {
        let mut store = seeded();

        let paid = submit_payment_voucher(&mut store, submission("1", "1"));
        assert!(matches!(paid, Err(ServiceError::InvalidState(_))));

        let foreign = submit_payment_voucher(&mut store, submission("1", "3"));
        assert!(matches!(foreign, Err(ServiceError::Form(_))));

        let unknown_client = submit_payment_voucher(&mut store, submission("99", "3"));
        assert!(matches!(unknown_client, Err(ServiceError::NotFound)));
    }

    #[test]
    fn review_only_applies_to_pending_vouchers() {
        let mut store = seeded();
        let submitted = submit_payment_voucher(&mut store, submission("2", "3")).unwrap();

        let approved =
            review_payment_voucher(&mut store, &submitted.id, VoucherDecision::Approve).unwrap();
        assert_eq!(approved.status, VoucherStatus::Approved);

        let again = review_payment_voucher(&mut store, &submitted.id, VoucherDecision::Reject);
        assert!(matches!(again, Err(ServiceError::InvalidState(_))));
    }

    #[test]
    fn review_unknown_voucher_is_not_found() {
        let mut store = seeded();
        let result = review_payment_voucher(
            &mut store,
            &PaymentVoucherId::new("missing").unwrap(),
            VoucherDecision::Approve,
        );
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
