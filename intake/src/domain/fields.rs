//! Raw form input and the validated field groups built from it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::ServiceId;

/// Keys of the form fields the intake flows understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Email,
    Phone,
    #[serde(rename = "dob")]
    DateOfBirth,
    #[serde(rename = "date")]
    AppointmentDate,
    Password,
    Service,
}

impl FieldKey {
    /// Key used by the form markup and the field set.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfBirth => "dob",
            Self::AppointmentDate => "date",
            Self::Password => "password",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current value of every form field at submission time.
///
/// Keys are kept as given; unknown keys are carried but ignored by
/// validation.
///
/// # Examples
/// ```
/// use clinic_intake::domain::{FieldKey, FieldSet};
///
/// let fields = FieldSet::from_pairs([("email", "jo@x.com")]);
/// assert_eq!(fields.get(FieldKey::Email), Some("jo@x.com"));
/// assert_eq!(fields.get(FieldKey::Name), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    /// Empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs; later duplicates win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Set a field value, returning the updated set.
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.0.insert(key.as_str().to_owned(), value.into());
        self
    }

    /// Remove a field, returning the updated set.
    #[must_use]
    pub fn without(mut self, key: FieldKey) -> Self {
        self.0.remove(key.as_str());
        self
    }

    /// Raw value for `key`, if the form supplied one.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(key.as_str()).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FieldSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, pairs: T) {
        self.0
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value.into())));
    }
}

/// Validated registration details.
///
/// ## Invariants
/// - Every value passed its field rules on the day it was validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// Validated appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub appointment_date: NaiveDate,
    /// Used for the age discount when supplied.
    pub date_of_birth: Option<NaiveDate>,
    /// Requested service; the catalogue default applies when absent.
    pub service_id: Option<ServiceId>,
}
