//! List filters for the management screens.
//!
//! Search terms match case-insensitively as substrings; a blank term matches
//! everything.

use crate::domain::client::ClientRecord;
use crate::domain::invoice::InvoiceStatus;
use crate::domain::payment_voucher::VoucherStatus;
use crate::domain::types::ClientId;
use crate::query::joins::{
    ExerciseListRow, InvoiceRow, VoucherRow, exercise_list_rows, invoice_rows, voucher_rows,
};

/// Lower-cased search needle; `None` when the term is blank.
fn needle(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn any_contains(needle: Option<&str>, haystacks: &[&str]) -> bool {
    match needle {
        None => true,
        Some(needle) => haystacks
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle)),
    }
}

/// Clients whose name or email contains `term`.
pub fn search_clients<'a>(clients: &'a [ClientRecord], term: &str) -> Vec<&'a ClientRecord> {
    let needle = needle(Some(term));
    clients
        .iter()
        .filter(|client| {
            any_contains(
                needle.as_deref(),
                &[client.name.as_str(), client.email.as_str()],
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<ClientId>,
    /// Matched against the description and the client name.
    pub search: Option<String>,
}

impl InvoiceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub fn filter_invoices<'a>(clients: &'a [ClientRecord], filter: &InvoiceFilter) -> Vec<InvoiceRow<'a>> {
    let needle = needle(filter.search.as_deref());
    invoice_rows(clients)
        .filter(|row| filter.status.is_none_or(|status| row.invoice.status == status))
        .filter(|row| {
            filter
                .client_id
                .as_ref()
                .is_none_or(|id| &row.client.id == id)
        })
        .filter(|row| {
            any_contains(
                needle.as_deref(),
                &[row.invoice.description.as_str(), row.client_name()],
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseListFilter {
    pub client_id: Option<ClientId>,
    /// Matched against the list name and the client name.
    pub search: Option<String>,
}

impl ExerciseListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub fn filter_exercise_lists<'a>(
    clients: &'a [ClientRecord],
    filter: &ExerciseListFilter,
) -> Vec<ExerciseListRow<'a>> {
    let needle = needle(filter.search.as_deref());
    exercise_list_rows(clients)
        .filter(|row| {
            filter
                .client_id
                .as_ref()
                .is_none_or(|id| &row.client.id == id)
        })
        .filter(|row| {
            any_contains(
                needle.as_deref(),
                &[row.list.name.as_str(), row.client_name()],
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct VoucherFilter {
    pub status: Option<VoucherStatus>,
    pub client_id: Option<ClientId>,
    /// Matched against the description and the client name.
    pub search: Option<String>,
}

impl VoucherFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: VoucherStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub fn filter_payment_vouchers<'a>(
    clients: &'a [ClientRecord],
    filter: &VoucherFilter,
) -> Vec<VoucherRow<'a>> {
    let needle = needle(filter.search.as_deref());
    voucher_rows(clients)
        .filter(|row| filter.status.is_none_or(|status| row.voucher.status == status))
        .filter(|row| {
            filter
                .client_id
                .as_ref()
                .is_none_or(|id| &row.client.id == id)
        })
        .filter(|row| {
            any_contains(
                needle.as_deref(),
                &[row.voucher.description.as_str(), row.client_name()],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_clients;

    #[test]
    fn client_search_is_case_insensitive_on_name_and_email() {
        let clients = seed_clients().unwrap();

        let by_name = search_clients(&clients, "MARIA");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id.as_str(), "2");

        let by_email = search_clients(&clients, "joao@");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id.as_str(), "1");

        assert_eq!(search_clients(&clients, "  ").len(), 2);
        assert!(search_clients(&clients, "zzz").is_empty());
    }

    #[test]
    fn invoice_filter_combines_criteria() {
        let clients = seed_clients().unwrap();

        let janeiro = filter_invoices(&clients, &InvoiceFilter::new().search("janeiro"));
        assert_eq!(janeiro.len(), 2);

        let pending = filter_invoices(&clients, &InvoiceFilter::new().status(InvoiceStatus::Pending));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].invoice.id.as_str(), "2");

        let maria_janeiro = filter_invoices(
            &clients,
            &InvoiceFilter::new()
                .client(ClientId::new("2").unwrap())
                .search("janeiro"),
        );
        assert_eq!(maria_janeiro.len(), 1);
        assert_eq!(maria_janeiro[0].invoice.status, InvoiceStatus::Overdue);

        let by_client_name = filter_invoices(&clients, &InvoiceFilter::new().search("santos"));
        assert_eq!(by_client_name.len(), 1);
    }

    #[test]
    fn exercise_list_filter_by_client_and_name() {
        let clients = seed_clients().unwrap();

        assert_eq!(
            filter_exercise_lists(&clients, &ExerciseListFilter::new().search("treino a")).len(),
            1
        );
        assert!(
            filter_exercise_lists(
                &clients,
                &ExerciseListFilter::new().client(ClientId::new("2").unwrap())
            )
            .is_empty()
        );
    }

    #[test]
    fn exercise_list_search_matches_client_name() {
        let clients = seed_clients().unwrap();

        let by_owner = filter_exercise_lists(&clients, &ExerciseListFilter::new().search("joão"));
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].client_name(), "João Silva");

        assert!(
            filter_exercise_lists(&clients, &ExerciseListFilter::new().search("santos")).is_empty()
        );
    }

    #[test]
    fn voucher_filter_by_client() {
        let clients = seed_clients().unwrap();

        let joao = filter_payment_vouchers(
            &clients,
            &VoucherFilter::new().client(ClientId::new("1").unwrap()),
        );
        assert_eq!(joao.len(), 1);
        assert_eq!(joao[0].voucher.id.as_str(), "1");

        assert!(
            filter_payment_vouchers(
                &clients,
                &VoucherFilter::new().client(ClientId::new("2").unwrap())
            )
            .is_empty()
        );
    }

    #[test]
    fn voucher_filter_by_status() {
        let clients = seed_clients().unwrap();

        let approved = filter_payment_vouchers(
            &clients,
            &VoucherFilter::new().status(VoucherStatus::Approved).search("pix"),
        );
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].invoice.map(|i| i.id.as_str()), Some("1"));

        assert!(
            filter_payment_vouchers(&clients, &VoucherFilter::new().status(VoucherStatus::Pending))
                .is_empty()
        );
    }
}
