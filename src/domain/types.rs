//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers,
//! normalized/validated email, non-negative money) so that once a value
//! reaches the domain layer it can be treated as trusted. Wrappers that guard
//! an invariant also re-check it when a persisted snapshot is deserialized.
use std::fmt::{Display, Formatter};
use std::ops::{Add, Deref};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Monetary amount below zero.
    #[error("amount cannot be negative")]
    NegativeAmount,
    /// Monetary amount above the supported maximum.
    #[error("amount is too large")]
    AmountTooLarge,
    /// Counter that must be at least one.
    #[error("value must be greater than zero")]
    NonPositive,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate opaque string identifiers.
///
/// Fresh identifiers are random UUIDs; identifiers read back from a snapshot
/// keep whatever non-empty text they were stored with.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier, rejecting blank input.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client record.");
id_newtype!(InvoiceId, "Unique identifier for an invoice.");
id_newtype!(ExerciseListId, "Unique identifier for an exercise list.");
id_newtype!(ExerciseId, "Unique identifier for an exercise inside a list.");
id_newtype!(PaymentVoucherId, "Unique identifier for a payment voucher.");
id_newtype!(UserId, "Unique identifier for a signed-in user.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    PersonName,
    "Client or user display name enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    ExerciseListName,
    "Exercise list title enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    ExerciseName,
    "Exercise name enforcing trimmed, non-empty values."
);

/// Free-form notes (medical conditions, goals, instructions). Stored as the
/// user typed them, trimmed; may be empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Notes(String);

impl Notes {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text escaped for embedding in HTML.
    pub fn to_html(&self) -> String {
        ammonia::clean_text(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Notes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Notes {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Notes {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
/// Non-empty, validated link to an exercise image or video.
pub struct MediaUrl(String);

impl MediaUrl {
    /// Ensures a trimmed URL is non-empty and well formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = value.into().trim().to_string();
        if url.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        if !url.validate_url() {
            Err(TypeConstraintError::InvalidUrl)
        } else {
            Ok(Self(url))
        }
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MediaUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MediaUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MediaUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MediaUrl> for String {
    fn from(value: MediaUrl) -> Self {
        value.0
    }
}

/// Non-negative monetary amount.
///
/// Stored as a JSON number so snapshots stay readable by the web client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest accepted amount, in cents. Snapshots carry amounts as JSON
    /// numbers, and every cent value up to this bound survives the float trip.
    pub const MAX_CENTS: u64 = 100_000_000_000_000;

    /// Rounds to cents (half away from zero) and rejects negative values and
    /// values above [`Amount::MAX_CENTS`].
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TypeConstraintError::NegativeAmount);
        }
        let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if value > Decimal::from(Self::MAX_CENTS) / Decimal::ONE_HUNDRED {
            return Err(TypeConstraintError::AmountTooLarge);
        }
        Ok(Self(value))
    }

    /// Builds an amount from an integer number of cents.
    pub fn from_cents(cents: u64) -> Result<Self, TypeConstraintError> {
        Self::new(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = TypeConstraintError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
        Self::new(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

/// Number of sets prescribed for an exercise; always at least one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct SetCount(u32);

impl SetCount {
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositive)
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for SetCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for SetCount {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SetCount> for u32 {
    fn from(value: SetCount) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_blank_and_generate_unique_values() {
        assert_eq!(ClientId::new("  "), Err(TypeConstraintError::EmptyString));
        assert_eq!(ClientId::new(" 42 ").unwrap().as_str(), "42");
        assert_ne!(InvoiceId::generate(), InvoiceId::generate());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  Joao@Email.COM ").unwrap();
        assert_eq!(email.as_str(), "joao@email.com");
        assert_eq!(Email::new("not-an-email"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn amount_rejects_negative_values() {
        assert_eq!(
            Amount::new(Decimal::new(-1, 2)),
            Err(TypeConstraintError::NegativeAmount)
        );
        assert_eq!(Amount::new(Decimal::ZERO).unwrap(), Amount::ZERO);
        assert_eq!("150.00".parse::<Amount>().unwrap(), Amount::from_cents(15000).unwrap());
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn amount_rounds_to_cents() {
        assert_eq!(
            "10.005".parse::<Amount>().unwrap(),
            Amount::from_cents(1001).unwrap()
        );
        assert_eq!(
            "19.994".parse::<Amount>().unwrap(),
            Amount::from_cents(1999).unwrap()
        );
    }

    #[test]
    fn amount_upper_bound() {
        let max = Amount::from_cents(Amount::MAX_CENTS).unwrap();
        assert_eq!(max.to_string(), "1000000000000.00");
        assert_eq!(
            Amount::from_cents(Amount::MAX_CENTS + 1),
            Err(TypeConstraintError::AmountTooLarge)
        );
        assert_eq!(
            "12345678901234567.89".parse::<Amount>(),
            Err(TypeConstraintError::AmountTooLarge)
        );
        assert!(serde_json::from_str::<Amount>("12345678901234567.89").is_err());
    }

    #[test]
    fn amounts_survive_the_json_trip() {
        for raw in ["0.01", "0.10", "0.30", "150.00", "1234.57", "999999999999.99", "1000000000000.00"] {
            let amount: Amount = raw.parse().unwrap();
            let json = serde_json::to_string(&amount).unwrap();
            assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount, "{raw}");
        }
    }

    #[test]
    fn amount_serializes_as_number() {
        let json = serde_json::to_string(&Amount::from_cents(15050).unwrap()).unwrap();
        assert_eq!(json, "150.5");

        let parsed: Amount = serde_json::from_str("150").unwrap();
        assert_eq!(parsed, Amount::from_cents(15000).unwrap());

        assert!(serde_json::from_str::<Amount>("-3.5").is_err());
    }

    #[test]
    fn set_count_must_be_positive() {
        assert_eq!(SetCount::new(0), Err(TypeConstraintError::NonPositive));
        assert_eq!(SetCount::new(4).unwrap().get(), 4);
        assert!(serde_json::from_str::<SetCount>("0").is_err());
    }

    #[test]
    fn notes_keep_text_verbatim() {
        let notes = Notes::new("  Hipertensão & diabetes, peso < 80kg, \"controlada\" ");
        assert_eq!(
            notes.as_str(),
            "Hipertensão & diabetes, peso < 80kg, \"controlada\""
        );
        assert!(Notes::new("   ").is_empty());

        let json = serde_json::to_string(&notes).unwrap();
        assert_eq!(serde_json::from_str::<Notes>(&json).unwrap(), notes);
    }

    #[test]
    fn notes_escape_when_rendered() {
        let notes = Notes::new("<script>alert(1)</script> & more");
        let html = notes.to_html();
        assert!(!html.contains('<'));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn media_url_is_validated() {
        assert!(MediaUrl::new("https://images.pexels.com/photos/1552242.jpeg").is_ok());
        assert_eq!(MediaUrl::new("nope"), Err(TypeConstraintError::InvalidUrl));
        assert_eq!(MediaUrl::new(" "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn names_deserialize_through_validation() {
        assert!(serde_json::from_str::<PersonName>("\"  \"").is_err());
        let name: PersonName = serde_json::from_str("\"Maria Santos\"").unwrap();
        assert_eq!(&*name, "Maria Santos");
    }
}
