//! Persistence seams.
//!
//! [`KeyValueStorage`] is the durable key → serialized-value backend the
//! store writes its snapshot to. The reader/writer traits describe the store
//! operations used by services so they can be exercised against mocks.

use crate::domain::{
    client::{ClientRecord, NewClient, UpdateClient},
    exercise_list::{ExerciseList, NewExerciseList, UpdateExerciseList},
    invoice::{Invoice, NewInvoice, UpdateInvoice},
    payment_voucher::{NewPaymentVoucher, PaymentVoucher, UpdatePaymentVoucher},
    types::{ClientId, ExerciseListId, InvoiceId, PaymentVoucherId},
};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::DieselStorage;

/// Durable storage of serialized values under string keys.
pub trait KeyValueStorage {
    fn load(&self, key: &str) -> RepositoryResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> RepositoryResult<()>;
    fn remove(&self, key: &str) -> RepositoryResult<()>;
}

pub trait ClientReader {
    fn list_clients(&self) -> Vec<ClientRecord>;
    fn get_client_by_id(&self, id: &ClientId) -> Option<ClientRecord>;
    fn get_invoice_by_id(&self, id: &InvoiceId) -> Option<Invoice>;
    fn get_exercise_list_by_id(&self, id: &ExerciseListId) -> Option<ExerciseList>;
    fn get_payment_voucher_by_id(&self, id: &PaymentVoucherId) -> Option<PaymentVoucher>;
}

/// Client mutations. A missing id on update/delete is a silent no-op.
pub trait ClientWriter {
    fn add_client(&mut self, new_client: NewClient) -> RepositoryResult<ClientRecord>;
    fn update_client(
        &mut self,
        id: &ClientId,
        updates: UpdateClient,
    ) -> RepositoryResult<Option<ClientRecord>>;
    fn delete_client(&mut self, id: &ClientId) -> RepositoryResult<bool>;
}

pub trait InvoiceWriter {
    fn add_invoice(&mut self, new_invoice: NewInvoice) -> RepositoryResult<Invoice>;
    fn update_invoice(
        &mut self,
        id: &InvoiceId,
        updates: UpdateInvoice,
    ) -> RepositoryResult<Option<Invoice>>;
}

pub trait ExerciseListWriter {
    fn add_exercise_list(&mut self, new_list: NewExerciseList) -> RepositoryResult<ExerciseList>;
    fn update_exercise_list(
        &mut self,
        id: &ExerciseListId,
        updates: UpdateExerciseList,
    ) -> RepositoryResult<Option<ExerciseList>>;
}

pub trait PaymentVoucherWriter {
    fn add_payment_voucher(
        &mut self,
        new_voucher: NewPaymentVoucher,
    ) -> RepositoryResult<PaymentVoucher>;
    fn update_payment_voucher(
        &mut self,
        id: &PaymentVoucherId,
        updates: UpdatePaymentVoucher,
    ) -> RepositoryResult<Option<PaymentVoucher>>;
}
