use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::exercise_list::ExerciseList;
use crate::domain::invoice::Invoice;
use crate::domain::payment_voucher::PaymentVoucher;
use crate::domain::types::{ClientId, Email, Notes, PersonName};

/// A gym client together with everything the client owns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: PersonName,
    pub email: Email,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub emergency_contact: String,
    pub medical_conditions: Notes,
    pub goals: Notes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub invoices: Vec<Invoice>,
    pub exercise_lists: Vec<ExerciseList>,
    pub payment_vouchers: Vec<PaymentVoucher>,
}

impl ClientRecord {
    /// Builds a fresh record with generated id, timestamps and no children.
    pub fn create(new_client: NewClient, now: DateTime<Utc>) -> Self {
        Self {
            id: ClientId::generate(),
            name: new_client.name,
            email: new_client.email,
            phone: new_client.phone,
            date_of_birth: new_client.date_of_birth,
            emergency_contact: new_client.emergency_contact,
            medical_conditions: new_client.medical_conditions,
            goals: new_client.goals,
            created_at: now,
            updated_at: now,
            invoices: Vec::new(),
            exercise_lists: Vec::new(),
            payment_vouchers: Vec::new(),
        }
    }
}

/// Fields supplied by the caller when registering a client.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: PersonName,
    pub email: Email,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub emergency_contact: String,
    pub medical_conditions: Notes,
    pub goals: Notes,
}

impl NewClient {
    #[must_use]
    pub fn new(name: PersonName, email: Email, date_of_birth: NaiveDate) -> Self {
        Self {
            name,
            email,
            phone: String::new(),
            date_of_birth,
            emergency_contact: String::new(),
            medical_conditions: Notes::default(),
            goals: Notes::default(),
        }
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn emergency_contact(mut self, contact: impl Into<String>) -> Self {
        self.emergency_contact = contact.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn medical_conditions(mut self, notes: impl Into<Notes>) -> Self {
        self.medical_conditions = notes.into();
        self
    }

    #[must_use]
    pub fn goals(mut self, notes: impl Into<Notes>) -> Self {
        self.goals = notes.into();
        self
    }
}

/// Partial update of a client record. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateClient {
    pub name: Option<PersonName>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub medical_conditions: Option<Notes>,
    pub goals: Option<Notes>,
}

impl UpdateClient {
    #[must_use]
    pub fn name(mut self, name: PersonName) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    #[must_use]
    pub fn emergency_contact(mut self, contact: impl Into<String>) -> Self {
        self.emergency_contact = Some(contact.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn medical_conditions(mut self, notes: impl Into<Notes>) -> Self {
        self.medical_conditions = Some(notes.into());
        self
    }

    #[must_use]
    pub fn goals(mut self, notes: impl Into<Notes>) -> Self {
        self.goals = Some(notes.into());
        self
    }

    /// Merges the provided fields into `client` and stamps `updated_at`.
    pub fn apply_to(self, client: &mut ClientRecord, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            client.date_of_birth = date_of_birth;
        }
        if let Some(contact) = self.emergency_contact {
            client.emergency_contact = contact;
        }
        if let Some(notes) = self.medical_conditions {
            client.medical_conditions = notes;
        }
        if let Some(goals) = self.goals {
            client.goals = goals;
        }
        client.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_new() -> NewClient {
        NewClient::new(
            PersonName::new("João Silva").unwrap(),
            Email::new("joao@email.com").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
        )
        .phone(" (11) 99999-9999 ")
        .goals("Perder peso")
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = ClientRecord::create(sample_new(), now);

        assert!(!record.id.as_str().is_empty());
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert_eq!(record.phone, "(11) 99999-9999");
        assert!(record.invoices.is_empty());
        assert!(record.exercise_lists.is_empty());
        assert!(record.payment_vouchers.is_empty());
    }

    #[test]
    fn apply_to_merges_only_provided_fields() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let mut record = ClientRecord::create(sample_new(), created);
        let before = record.clone();

        UpdateClient::default()
            .name(PersonName::new("X").unwrap())
            .apply_to(&mut record, later);

        assert_eq!(record.name.as_str(), "X");
        assert_eq!(record.updated_at, later);
        assert_eq!(record.email, before.email);
        assert_eq!(record.phone, before.phone);
        assert_eq!(record.goals, before.goals);
        assert_eq!(record.created_at, before.created_at);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let record = ClientRecord::create(sample_new(), now);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["dateOfBirth"], "1990-05-15");
        assert_eq!(value["createdAt"], "2024-01-15T10:00:00Z");
        assert!(value["exerciseLists"].as_array().unwrap().is_empty());
    }
}
