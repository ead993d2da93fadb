//! Secondary index from child id to owning client id.
//!
//! Each child kind has its own id space, so each gets its own map. The index
//! is rebuilt when a snapshot is loaded and kept in step on add and on
//! cascading client deletion.

use std::collections::HashMap;

use crate::domain::client::ClientRecord;
use crate::domain::types::{ClientId, ExerciseListId, InvoiceId, PaymentVoucherId};

#[derive(Clone, Debug, Default)]
pub(crate) struct ChildIndex {
    invoices: HashMap<InvoiceId, ClientId>,
    exercise_lists: HashMap<ExerciseListId, ClientId>,
    payment_vouchers: HashMap<PaymentVoucherId, ClientId>,
}

impl ChildIndex {
    pub(crate) fn build(clients: &[ClientRecord]) -> Self {
        let mut index = Self::default();
        for client in clients {
            index.insert_client(client);
        }
        index
    }

    /// Registers every child currently owned by `client`.
    pub(crate) fn insert_client(&mut self, client: &ClientRecord) {
        for invoice in &client.invoices {
            self.invoices.insert(invoice.id.clone(), client.id.clone());
        }
        for list in &client.exercise_lists {
            self.exercise_lists
                .insert(list.id.clone(), client.id.clone());
        }
        for voucher in &client.payment_vouchers {
            self.payment_vouchers
                .insert(voucher.id.clone(), client.id.clone());
        }
    }

    /// Drops every child of `client`.
    pub(crate) fn remove_client(&mut self, client: &ClientRecord) {
        for invoice in &client.invoices {
            self.invoices.remove(&invoice.id);
        }
        for list in &client.exercise_lists {
            self.exercise_lists.remove(&list.id);
        }
        for voucher in &client.payment_vouchers {
            self.payment_vouchers.remove(&voucher.id);
        }
    }

    pub(crate) fn insert_invoice(&mut self, id: InvoiceId, owner: ClientId) {
        self.invoices.insert(id, owner);
    }

    pub(crate) fn insert_exercise_list(&mut self, id: ExerciseListId, owner: ClientId) {
        self.exercise_lists.insert(id, owner);
    }

    pub(crate) fn insert_payment_voucher(&mut self, id: PaymentVoucherId, owner: ClientId) {
        self.payment_vouchers.insert(id, owner);
    }

    pub(crate) fn invoice_owner(&self, id: &InvoiceId) -> Option<&ClientId> {
        self.invoices.get(id)
    }

    pub(crate) fn exercise_list_owner(&self, id: &ExerciseListId) -> Option<&ClientId> {
        self.exercise_lists.get(id)
    }

    pub(crate) fn payment_voucher_owner(&self, id: &PaymentVoucherId) -> Option<&ClientId> {
        self.payment_vouchers.get(id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.invoices.len() + self.exercise_lists.len() + self.payment_vouchers.len()
    }
}
