use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, ClientId, InvoiceId, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub client_id: ClientId,
    pub amount: Amount,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// Billing state. Always set explicitly; never derived from the due date.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [Self::Pending, Self::Paid, Self::Overdue];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown invoice status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub amount: Amount,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    #[must_use]
    pub fn new(
        client_id: ClientId,
        amount: Amount,
        description: impl Into<String>,
        due_date: NaiveDate,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            client_id,
            amount,
            description: description.into().trim().to_string(),
            due_date,
            status,
        }
    }

    pub(crate) fn into_invoice(self, now: DateTime<Utc>) -> Invoice {
        Invoice {
            id: InvoiceId::generate(),
            client_id: self.client_id,
            amount: self.amount,
            description: self.description,
            due_date: self.due_date,
            status: self.status,
            created_at: now,
        }
    }
}

/// Partial update of an invoice. The owning client cannot be changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateInvoice {
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
}

impl UpdateInvoice {
    #[must_use]
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply_to(self, invoice: &mut Invoice) {
        if let Some(amount) = self.amount {
            invoice.amount = amount;
        }
        if let Some(description) = self.description {
            invoice.description = description;
        }
        if let Some(due_date) = self.due_date {
            invoice.due_date = due_date;
        }
        if let Some(status) = self.status {
            invoice.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values_only() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
        assert!(matches!(
            "cancelled".parse::<InvoiceStatus>(),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }

    #[test]
    fn unknown_status_fails_deserialization() {
        let json = r#"{
            "id": "9",
            "clientId": "1",
            "amount": 10,
            "description": "x",
            "dueDate": "2024-01-31",
            "status": "refunded",
            "createdAt": "2024-01-01T10:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Invoice>(json).is_err());
    }

    #[test]
    fn update_leaves_unset_fields() {
        let mut invoice = NewInvoice::new(
            ClientId::new("1").unwrap(),
            Amount::from_cents(15000).unwrap(),
            " Plano Mensal ",
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            InvoiceStatus::Pending,
        )
        .into_invoice(Utc::now());
        assert_eq!(invoice.description, "Plano Mensal");

        UpdateInvoice::default()
            .status(InvoiceStatus::Paid)
            .apply_to(&mut invoice);

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.amount, Amount::from_cents(15000).unwrap());
        assert_eq!(invoice.description, "Plano Mensal");
    }
}
