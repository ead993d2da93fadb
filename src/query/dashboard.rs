use crate::domain::client::ClientRecord;
use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::domain::types::ClientId;

const RECENT_INVOICES: usize = 5;

/// Everything the client-facing home screen shows for one client.
#[derive(Clone, Debug)]
pub struct ClientDashboard<'a> {
    pub client: &'a ClientRecord,
    pub pending_invoices: Vec<&'a Invoice>,
    pub overdue_invoices: Vec<&'a Invoice>,
    /// Invoices a new payment voucher may reference.
    pub unpaid_invoices: Vec<&'a Invoice>,
    /// The client's first invoices in stored order.
    pub recent_invoices: Vec<&'a Invoice>,
}

impl ClientDashboard<'_> {
    pub fn has_open_balance(&self) -> bool {
        !self.unpaid_invoices.is_empty()
    }
}

pub fn client_dashboard<'a>(
    clients: &'a [ClientRecord],
    client_id: &ClientId,
) -> Option<ClientDashboard<'a>> {
    let client = clients.iter().find(|client| &client.id == client_id)?;
    let with_status = move |status: InvoiceStatus| {
        client
            .invoices
            .iter()
            .filter(|invoice| invoice.status == status)
            .collect::<Vec<_>>()
    };

    Some(ClientDashboard {
        client,
        pending_invoices: with_status(InvoiceStatus::Pending),
        overdue_invoices: with_status(InvoiceStatus::Overdue),
        unpaid_invoices: client
            .invoices
            .iter()
            .filter(|invoice| invoice.status != InvoiceStatus::Paid)
            .collect(),
        recent_invoices: client.invoices.iter().take(RECENT_INVOICES).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_clients;

    #[test]
    fn dashboard_splits_invoices_by_status() {
        let clients = seed_clients().unwrap();
        let dashboard = client_dashboard(&clients, &ClientId::new("1").unwrap()).unwrap();

        assert_eq!(dashboard.client.name.as_str(), "João Silva");
        assert_eq!(dashboard.pending_invoices.len(), 1);
        assert!(dashboard.overdue_invoices.is_empty());
        assert_eq!(dashboard.unpaid_invoices[0].id.as_str(), "2");
        assert_eq!(dashboard.recent_invoices.len(), 2);
        assert!(dashboard.has_open_balance());
    }

    #[test]
    fn overdue_invoices_are_unpaid() {
        let clients = seed_clients().unwrap();
        let dashboard = client_dashboard(&clients, &ClientId::new("2").unwrap()).unwrap();

        assert_eq!(dashboard.overdue_invoices.len(), 1);
        assert_eq!(dashboard.unpaid_invoices.len(), 1);
        assert!(dashboard.pending_invoices.is_empty());
    }

    #[test]
    fn unknown_client_has_no_dashboard() {
        let clients = seed_clients().unwrap();
        assert!(client_dashboard(&clients, &ClientId::new("99").unwrap()).is_none());
    }
}
