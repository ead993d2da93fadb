use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, ClientId, InvoiceId, PaymentVoucherId, TypeConstraintError};

/// Proof of payment submitted by a client against one of its invoices.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVoucher {
    pub id: PaymentVoucherId,
    pub client_id: ClientId,
    pub invoice_id: InvoiceId,
    pub amount: Amount,
    pub payment_date: NaiveDate,
    pub description: String,
    /// Opaque reference to the uploaded receipt.
    pub file_url: String,
    pub status: VoucherStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Pending,
    Approved,
    Rejected,
}

impl VoucherStatus {
    pub const ALL: [VoucherStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            VoucherStatus::Pending => "pending",
            VoucherStatus::Approved => "approved",
            VoucherStatus::Rejected => "rejected",
        }
    }
}

impl Display for VoucherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoucherStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(VoucherStatus::Pending),
            "approved" => Ok(VoucherStatus::Approved),
            "rejected" => Ok(VoucherStatus::Rejected),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown voucher status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPaymentVoucher {
    pub client_id: ClientId,
    pub invoice_id: InvoiceId,
    pub amount: Amount,
    pub payment_date: NaiveDate,
    pub description: String,
    pub file_url: String,
    pub status: VoucherStatus,
}

impl NewPaymentVoucher {
    /// A pending voucher; use [`NewPaymentVoucher::status`] to override.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        invoice_id: InvoiceId,
        amount: Amount,
        payment_date: NaiveDate,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            invoice_id,
            amount,
            payment_date,
            description: String::new(),
            file_url: file_url.into().trim().to_string(),
            status: VoucherStatus::Pending,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn status(mut self, status: VoucherStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn into_payment_voucher(self, now: DateTime<Utc>) -> PaymentVoucher {
        PaymentVoucher {
            id: PaymentVoucherId::generate(),
            client_id: self.client_id,
            invoice_id: self.invoice_id,
            amount: self.amount,
            payment_date: self.payment_date,
            description: self.description,
            file_url: self.file_url,
            status: self.status,
            created_at: now,
        }
    }
}

/// Partial update of a voucher. The owning client cannot be changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePaymentVoucher {
    pub invoice_id: Option<InvoiceId>,
    pub amount: Option<Amount>,
    pub payment_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub status: Option<VoucherStatus>,
}

impl UpdatePaymentVoucher {
    #[must_use]
    pub fn invoice_id(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn file_url(mut self, file_url: impl Into<String>) -> Self {
        self.file_url = Some(file_url.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn status(mut self, status: VoucherStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply_to(self, voucher: &mut PaymentVoucher) {
        if let Some(invoice_id) = self.invoice_id {
            voucher.invoice_id = invoice_id;
        }
        if let Some(amount) = self.amount {
            voucher.amount = amount;
        }
        if let Some(date) = self.payment_date {
            voucher.payment_date = date;
        }
        if let Some(description) = self.description {
            voucher.description = description;
        }
        if let Some(file_url) = self.file_url {
            voucher.file_url = file_url;
        }
        if let Some(status) = self.status {
            voucher.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_voucher_defaults_to_pending() {
        let voucher = NewPaymentVoucher::new(
            ClientId::new("1").unwrap(),
            InvoiceId::new("2").unwrap(),
            Amount::from_cents(15000).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            "receipt.pdf",
        );
        assert_eq!(voucher.status, VoucherStatus::Pending);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in VoucherStatus::ALL {
            assert_eq!(status.to_string().parse::<VoucherStatus>().unwrap(), status);
        }
        assert!("paid".parse::<VoucherStatus>().is_err());
    }
}
