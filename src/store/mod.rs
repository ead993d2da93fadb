//! The client store: single owner of the client collection.
//!
//! Every effective mutation is written to storage as one JSON snapshot under
//! [`crate::CLIENTS_KEY`] before the call returns, and subscribers are then
//! called with the new snapshot. When the write fails the in-memory state is
//! rolled back and the error is returned.
//!
//! Updates and deletes that name an unknown id are silent no-ops: nothing is
//! written and nobody is notified.

use chrono::Utc;

use crate::domain::client::{ClientRecord, NewClient, UpdateClient};
use crate::domain::exercise_list::{ExerciseList, NewExerciseList, UpdateExerciseList};
use crate::domain::invoice::{Invoice, NewInvoice, UpdateInvoice};
use crate::domain::payment_voucher::{NewPaymentVoucher, PaymentVoucher, UpdatePaymentVoucher};
use crate::domain::types::{ClientId, ExerciseListId, InvoiceId, PaymentVoucherId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClientReader, ClientWriter, ExerciseListWriter, InvoiceWriter, KeyValueStorage,
    PaymentVoucherWriter,
};
use crate::seed::seed_clients;
use crate::CLIENTS_KEY;

mod index;
mod subscribers;

use index::ChildIndex;
use subscribers::Subscribers;
pub use subscribers::SubscriptionId;

enum Outcome<T> {
    Changed(T),
    Unchanged(T),
}

pub struct ClientStore<S> {
    storage: S,
    clients: Vec<ClientRecord>,
    index: ChildIndex,
    subscribers: Subscribers,
}

impl<S: KeyValueStorage> ClientStore<S> {
    /// Loads the persisted snapshot. When storage holds none and
    /// `seed_when_empty` is set, the demo dataset is installed and persisted.
    pub fn open(storage: S, seed_when_empty: bool) -> RepositoryResult<Self> {
        let clients = match storage.load(CLIENTS_KEY)? {
            Some(raw) => {
                let clients: Vec<ClientRecord> = serde_json::from_str(&raw)?;
                log::info!("Loaded {} client record(s) from storage", clients.len());
                clients
            }
            None if seed_when_empty => {
                let clients = seed_clients()?;
                storage.save(CLIENTS_KEY, &serde_json::to_string(&clients)?)?;
                log::info!("Installed seed dataset with {} client(s)", clients.len());
                clients
            }
            None => Vec::new(),
        };

        let index = ChildIndex::build(&clients);

        Ok(Self {
            storage,
            clients,
            index,
            subscribers: Subscribers::default(),
        })
    }

    /// Current snapshot in insertion order.
    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn client(&self, id: &ClientId) -> Option<&ClientRecord> {
        self.clients.iter().find(|client| &client.id == id)
    }

    pub fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        let owner = self.index.invoice_owner(id)?;
        self.client(owner)?
            .invoices
            .iter()
            .find(|invoice| &invoice.id == id)
    }

    pub fn exercise_list(&self, id: &ExerciseListId) -> Option<&ExerciseList> {
        let owner = self.index.exercise_list_owner(id)?;
        self.client(owner)?
            .exercise_lists
            .iter()
            .find(|list| &list.id == id)
    }

    pub fn payment_voucher(&self, id: &PaymentVoucherId) -> Option<&PaymentVoucher> {
        let owner = self.index.payment_voucher_owner(id)?;
        self.client(owner)?
            .payment_vouchers
            .iter()
            .find(|voucher| &voucher.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Registers a listener called with every committed snapshot.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[ClientRecord]) + 'static,
    {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscribers.len()
    }

    fn persist(&self) -> RepositoryResult<()> {
        let snapshot = serde_json::to_string(&self.clients)?;
        self.storage.save(CLIENTS_KEY, &snapshot)
    }

    /// Runs `op` against the collection, persists if it changed anything and
    /// notifies subscribers. Any error restores the previous state.
    fn mutate<T, F>(&mut self, op: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut Vec<ClientRecord>, &mut ChildIndex) -> RepositoryResult<Outcome<T>>,
    {
        let previous = (self.clients.clone(), self.index.clone());

        let result = op(&mut self.clients, &mut self.index).and_then(|outcome| match outcome {
            Outcome::Unchanged(value) => Ok((value, false)),
            Outcome::Changed(value) => self.persist().map(|()| (value, true)),
        });

        match result {
            Ok((value, changed)) => {
                if changed {
                    self.subscribers.notify(&self.clients);
                }
                Ok(value)
            }
            Err(err) => {
                (self.clients, self.index) = previous;
                log::error!("Client store mutation rolled back: {err}");
                Err(err)
            }
        }
    }
}

fn find_client_mut<'a>(
    clients: &'a mut [ClientRecord],
    id: &ClientId,
) -> Option<&'a mut ClientRecord> {
    clients.iter_mut().find(|client| &client.id == id)
}

fn client_not_found(id: &ClientId) -> RepositoryError {
    RepositoryError::NotFound(format!("client {id}"))
}

fn foreign_invoice(invoice_id: &InvoiceId, client_id: &ClientId) -> RepositoryError {
    RepositoryError::ConstraintViolation(format!(
        "invoice {invoice_id} does not belong to client {client_id}"
    ))
}

impl<S: KeyValueStorage> ClientReader for ClientStore<S> {
    fn list_clients(&self) -> Vec<ClientRecord> {
        self.clients.clone()
    }

    fn get_client_by_id(&self, id: &ClientId) -> Option<ClientRecord> {
        self.client(id).cloned()
    }

    fn get_invoice_by_id(&self, id: &InvoiceId) -> Option<Invoice> {
        self.invoice(id).cloned()
    }

    fn get_exercise_list_by_id(&self, id: &ExerciseListId) -> Option<ExerciseList> {
        self.exercise_list(id).cloned()
    }

    fn get_payment_voucher_by_id(&self, id: &PaymentVoucherId) -> Option<PaymentVoucher> {
        self.payment_voucher(id).cloned()
    }
}

impl<S: KeyValueStorage> ClientWriter for ClientStore<S> {
    fn add_client(&mut self, new_client: NewClient) -> RepositoryResult<ClientRecord> {
        let record = ClientRecord::create(new_client, Utc::now());
        self.mutate(|clients, _| {
            clients.push(record.clone());
            Ok(Outcome::Changed(record))
        })
    }

    fn update_client(
        &mut self,
        id: &ClientId,
        updates: UpdateClient,
    ) -> RepositoryResult<Option<ClientRecord>> {
        if self.client(id).is_none() {
            log::debug!("Ignoring update of unknown client {id}");
            return Ok(None);
        }

        let now = Utc::now();
        self.mutate(|clients, _| {
            let Some(client) = find_client_mut(clients, id) else {
                return Ok(Outcome::Unchanged(None));
            };
            updates.apply_to(client, now);
            Ok(Outcome::Changed(Some(client.clone())))
        })
    }

    fn delete_client(&mut self, id: &ClientId) -> RepositoryResult<bool> {
        if self.client(id).is_none() {
            log::debug!("Ignoring delete of unknown client {id}");
            return Ok(false);
        }

        self.mutate(|clients, index| {
            let Some(position) = clients.iter().position(|client| &client.id == id) else {
                return Ok(Outcome::Unchanged(false));
            };
            let removed = clients.remove(position);
            index.remove_client(&removed);
            log::info!(
                "Deleted client {id} with {} invoice(s), {} exercise list(s), {} voucher(s)",
                removed.invoices.len(),
                removed.exercise_lists.len(),
                removed.payment_vouchers.len()
            );
            Ok(Outcome::Changed(true))
        })
    }
}

impl<S: KeyValueStorage> InvoiceWriter for ClientStore<S> {
    fn add_invoice(&mut self, new_invoice: NewInvoice) -> RepositoryResult<Invoice> {
        let invoice = new_invoice.into_invoice(Utc::now());
        self.mutate(|clients, index| {
            let client = find_client_mut(clients, &invoice.client_id)
                .ok_or_else(|| client_not_found(&invoice.client_id))?;
            client.invoices.push(invoice.clone());
            index.insert_invoice(invoice.id.clone(), client.id.clone());
            Ok(Outcome::Changed(invoice))
        })
    }

    fn update_invoice(
        &mut self,
        id: &InvoiceId,
        updates: UpdateInvoice,
    ) -> RepositoryResult<Option<Invoice>> {
        let Some(owner) = self.index.invoice_owner(id).cloned() else {
            log::debug!("Ignoring update of unknown invoice {id}");
            return Ok(None);
        };

        self.mutate(|clients, _| {
            let Some(invoice) = find_client_mut(clients, &owner)
                .and_then(|client| client.invoices.iter_mut().find(|inv| &inv.id == id))
            else {
                return Ok(Outcome::Unchanged(None));
            };
            updates.apply_to(invoice);
            Ok(Outcome::Changed(Some(invoice.clone())))
        })
    }
}

impl<S: KeyValueStorage> ExerciseListWriter for ClientStore<S> {
    fn add_exercise_list(&mut self, new_list: NewExerciseList) -> RepositoryResult<ExerciseList> {
        let list = new_list.into_exercise_list(Utc::now());
        self.mutate(|clients, index| {
            let client = find_client_mut(clients, &list.client_id)
                .ok_or_else(|| client_not_found(&list.client_id))?;
            client.exercise_lists.push(list.clone());
            index.insert_exercise_list(list.id.clone(), client.id.clone());
            Ok(Outcome::Changed(list))
        })
    }

    fn update_exercise_list(
        &mut self,
        id: &ExerciseListId,
        updates: UpdateExerciseList,
    ) -> RepositoryResult<Option<ExerciseList>> {
        let Some(owner) = self.index.exercise_list_owner(id).cloned() else {
            log::debug!("Ignoring update of unknown exercise list {id}");
            return Ok(None);
        };

        let now = Utc::now();
        self.mutate(|clients, _| {
            let Some(list) = find_client_mut(clients, &owner)
                .and_then(|client| client.exercise_lists.iter_mut().find(|l| &l.id == id))
            else {
                return Ok(Outcome::Unchanged(None));
            };
            updates.apply_to(list, now);
            Ok(Outcome::Changed(Some(list.clone())))
        })
    }
}

impl<S: KeyValueStorage> PaymentVoucherWriter for ClientStore<S> {
    fn add_payment_voucher(
        &mut self,
        new_voucher: NewPaymentVoucher,
    ) -> RepositoryResult<PaymentVoucher> {
        let voucher = new_voucher.into_payment_voucher(Utc::now());
        self.mutate(|clients, index| {
            let client = find_client_mut(clients, &voucher.client_id)
                .ok_or_else(|| client_not_found(&voucher.client_id))?;
            if !client
                .invoices
                .iter()
                .any(|invoice| invoice.id == voucher.invoice_id)
            {
                return Err(foreign_invoice(&voucher.invoice_id, &client.id));
            }
            client.payment_vouchers.push(voucher.clone());
            index.insert_payment_voucher(voucher.id.clone(), client.id.clone());
            Ok(Outcome::Changed(voucher))
        })
    }

    fn update_payment_voucher(
        &mut self,
        id: &PaymentVoucherId,
        updates: UpdatePaymentVoucher,
    ) -> RepositoryResult<Option<PaymentVoucher>> {
        let Some(owner) = self.index.payment_voucher_owner(id).cloned() else {
            log::debug!("Ignoring update of unknown payment voucher {id}");
            return Ok(None);
        };

        self.mutate(|clients, _| {
            let Some(client) = find_client_mut(clients, &owner) else {
                return Ok(Outcome::Unchanged(None));
            };
            if let Some(invoice_id) = &updates.invoice_id {
                if !client.invoices.iter().any(|invoice| &invoice.id == invoice_id) {
                    return Err(foreign_invoice(invoice_id, &client.id));
                }
            }
            let Some(voucher) = client
                .payment_vouchers
                .iter_mut()
                .find(|voucher| &voucher.id == id)
            else {
                return Ok(Outcome::Unchanged(None));
            };
            updates.apply_to(voucher);
            Ok(Outcome::Changed(Some(voucher.clone())))
        })
    }
}
