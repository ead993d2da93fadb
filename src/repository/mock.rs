//! Mock implementations for isolating services and the store in tests.

use mockall::mock;

use crate::domain::client::{ClientRecord, NewClient, UpdateClient};
use crate::domain::exercise_list::{ExerciseList, NewExerciseList, UpdateExerciseList};
use crate::domain::invoice::{Invoice, NewInvoice, UpdateInvoice};
use crate::domain::payment_voucher::{NewPaymentVoucher, PaymentVoucher, UpdatePaymentVoucher};
use crate::domain::types::{ClientId, ExerciseListId, InvoiceId, PaymentVoucherId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, ExerciseListWriter, InvoiceWriter, KeyValueStorage,
    PaymentVoucherWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn list_clients(&self) -> Vec<ClientRecord>;
        fn get_client_by_id(&self, id: &ClientId) -> Option<ClientRecord>;
        fn get_invoice_by_id(&self, id: &InvoiceId) -> Option<Invoice>;
        fn get_exercise_list_by_id(&self, id: &ExerciseListId) -> Option<ExerciseList>;
        fn get_payment_voucher_by_id(&self, id: &PaymentVoucherId) -> Option<PaymentVoucher>;
    }

    impl ClientWriter for Repository {
        fn add_client(&mut self, new_client: NewClient) -> RepositoryResult<ClientRecord>;
        fn update_client(
            &mut self,
            id: &ClientId,
            updates: UpdateClient,
        ) -> RepositoryResult<Option<ClientRecord>>;
        fn delete_client(&mut self, id: &ClientId) -> RepositoryResult<bool>;
    }

    impl InvoiceWriter for Repository {
        fn add_invoice(&mut self, new_invoice: NewInvoice) -> RepositoryResult<Invoice>;
        fn update_invoice(
            &mut self,
            id: &InvoiceId,
            updates: UpdateInvoice,
        ) -> RepositoryResult<Option<Invoice>>;
    }

    impl ExerciseListWriter for Repository {
        fn add_exercise_list(&mut self, new_list: NewExerciseList) -> RepositoryResult<ExerciseList>;
        fn update_exercise_list(
            &mut self,
            id: &ExerciseListId,
            updates: UpdateExerciseList,
        ) -> RepositoryResult<Option<ExerciseList>>;
    }

    impl PaymentVoucherWriter for Repository {
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
}

mock! {
    pub Storage {}

    impl KeyValueStorage for Storage {
        fn load(&self, key: &str) -> RepositoryResult<Option<String>>;
        fn save(&self, key: &str, value: &str) -> RepositoryResult<()>;
        fn remove(&self, key: &str) -> RepositoryResult<()>;
    }
}
