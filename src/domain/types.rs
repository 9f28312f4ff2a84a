//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be positive was zero/negative or invalid.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than the required minimum.
    #[error("{0} must be at least {1} characters")]
    TooShort(&'static str, usize),
    /// Phone number did not contain enough digits.
    #[error("{0} is invalid")]
    InvalidPhone(&'static str),
    /// Opening time must precede closing time on open days.
    #[error("open_time must be before close_time")]
    InvalidOpeningWindow,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Generates trimmed string newtypes with a minimum character count.
macro_rules! text_newtype {
    ($name:ident, $doc:expr, $field:expr, $min:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed value of at least the required length.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if trimmed.chars().count() < $min {
                    return Err(TypeConstraintError::TooShort($field, $min));
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

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
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

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(ServiceId, "Unique identifier for a salon service.", "service_id");
id_newtype!(
    AppointmentId,
    "Unique identifier for an appointment.",
    "appointment_id"
);
id_newtype!(
    WorkingHourId,
    "Unique identifier for a working hours record.",
    "working_hour_id"
);

text_newtype!(ServiceName, "Service display name.", "name", 2);
text_newtype!(
    ServiceDescription,
    "Free-form service description.",
    "description",
    1
);
text_newtype!(CustomerName, "Name of the booking customer.", "customer_name", 2);

/// Customer phone number holding at least ten digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerPhone(String);

impl CustomerPhone {
    const MIN_DIGITS: usize = 10;

    /// Trims the input and requires ten or more digits, ignoring separators.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "customer_phone")?;
        let digits = trimmed.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(TypeConstraintError::InvalidPhone("customer_phone"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CustomerPhone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CustomerPhone {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerPhone> for String {
    fn from(value: CustomerPhone) -> Self {
        value.0
    }
}

/// Length of a service in whole minutes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    /// Constructs a strictly positive duration.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveNumber("duration_minutes"))
        }
    }

    /// Returns the raw minute count.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Duration as a `chrono` span for interval arithmetic.
    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl Display for DurationMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for DurationMinutes {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationMinutes> for i32 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

impl PartialEq<i32> for DurationMinutes {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Non-negative price value in standard currency units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct ServicePrice(f64);

impl ServicePrice {
    /// Constructs a finite numeric value that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ServicePrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for ServicePrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServicePrice> for f64 {
    fn from(value: ServicePrice) -> Self {
        value.0
    }
}

impl PartialEq<f64> for ServicePrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Lifecycle state of an appointment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Cancelled appointments keep their row but no longer occupy a slot.
    pub const fn occupies_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AppointmentStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "appointment status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Who created an appointment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    Admin,
    Receptionist,
    #[default]
    Customer,
    Ai,
}

impl BookingSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Receptionist => "receptionist",
            Self::Customer => "customer",
            Self::Ai => "ai",
        }
    }
}

impl Display for BookingSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for BookingSource {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "receptionist" => Ok(Self::Receptionist),
            "customer" => Ok(Self::Customer),
            "ai" => Ok(Self::Ai),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "booking source: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for BookingSource {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// All weekdays in calendar order, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// English day name used in persistence and user-facing messages.
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full English day name, ignoring case and surrounding whitespace.
pub fn parse_weekday_name(value: &str) -> Result<Weekday, TypeConstraintError> {
    let value = value.trim();
    WEEK.into_iter()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(value))
        .ok_or_else(|| TypeConstraintError::InvalidValue(format!("day of week: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names() {
        let value = ServiceName::new("  Haircut  ").unwrap();
        assert_eq!(value.as_str(), "Haircut");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ServiceId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("service_id"));
    }

    #[test]
    fn customer_name_needs_two_characters() {
        assert_eq!(
            CustomerName::new(" A ").unwrap_err(),
            TypeConstraintError::TooShort("customer_name", 2)
        );
        assert!(CustomerName::new("Al").is_ok());
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(CustomerPhone::new("+1 (555) 123-4567").is_ok());
        assert_eq!(
            CustomerPhone::new("555-1234").unwrap_err(),
            TypeConstraintError::InvalidPhone("customer_phone")
        );
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(DurationMinutes::new(0).is_err());
        assert_eq!(DurationMinutes::new(45).unwrap().as_duration().num_minutes(), 45);
    }

    #[test]
    fn price_allows_zero_but_not_negative() {
        assert_eq!(ServicePrice::new(0.0).unwrap().get(), 0.0);
        assert_eq!(
            ServicePrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(AppointmentStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(AppointmentStatus::try_from("archived").is_err());
        assert!(!AppointmentStatus::Cancelled.occupies_slot());
    }

    #[test]
    fn deserializing_applies_constraints() {
        let name: CustomerName = serde_json::from_str("\"  Jane Doe \"").unwrap();
        assert_eq!(name.as_str(), "Jane Doe");
        assert!(serde_json::from_str::<CustomerName>("\" \"").is_err());
        assert!(serde_json::from_str::<CustomerPhone>("\"555-1234\"").is_err());
        assert!(serde_json::from_str::<DurationMinutes>("0").is_err());
        assert!(serde_json::from_str::<ServicePrice>("-5.0").is_err());
        assert!(serde_json::from_str::<ServiceId>("-1").is_err());

        let id: AppointmentId = serde_json::from_str("7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let price = ServicePrice::new(25.5).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "25.5");
    }

    #[test]
    fn weekday_names_are_case_insensitive() {
        assert_eq!(parse_weekday_name("wednesday").unwrap(), Weekday::Wed);
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert!(parse_weekday_name("Funday").is_err());
    }
}
