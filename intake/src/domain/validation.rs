//! Per-form validation: which fields each form requires, the order they are
//! checked in, and the message shown for each failed rule.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::{ServiceCatalogue, ServiceId};
use crate::domain::fields::{BookingRequest, ContactFields, FieldKey, FieldSet};
use crate::domain::validators::{
    is_adult_birth_date, is_not_past_date, is_valid_email, is_valid_name, is_valid_password,
    is_valid_phone, parse_date,
};

pub const NAME_MESSAGE: &str = "Name should be 2-30 characters long and contain only letters";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long and contain at least one number and one special character";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number in format: +7(XXX)XXX-XX-XX";
pub const BIRTH_DATE_FORMAT_MESSAGE: &str = "Please enter a valid date of birth";
pub const UNDERAGE_MESSAGE: &str = "You must be at least 18 years old to register";
pub const APPOINTMENT_FORMAT_MESSAGE: &str = "Please enter a valid appointment date";
pub const PAST_APPOINTMENT_MESSAGE: &str = "Appointment date cannot be in the past";
pub const SERVICE_MESSAGE: &str = "Please choose a service from the list";
pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered";

/// Category of a failed field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The value does not match the expected pattern.
    Format,
    /// The value parses but is outside the allowed bound.
    Range,
    /// The value clashes with existing records.
    Conflict,
    /// A required field is missing from the submission.
    UnknownField,
}

/// One failed rule, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    field: FieldKey,
    kind: ValidationErrorKind,
    message: String,
}

impl ValidationError {
    /// Build an error for `field`.
    pub fn new(field: FieldKey, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }

    /// The email is already registered.
    pub fn email_taken() -> Self {
        Self::new(
            FieldKey::Email,
            ValidationErrorKind::Conflict,
            EMAIL_TAKEN_MESSAGE,
        )
    }

    /// Field the error belongs to.
    pub fn field(&self) -> FieldKey {
        self.field
    }

    /// Error category.
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// How many failures a submission reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    /// Stop at the first failing field.
    ShortCircuit,
    /// Check every field and report all failures.
    #[default]
    Accumulate,
}

/// The form a submission comes from, which fixes its required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormContext {
    /// Email only.
    Newsletter,
    /// Name, email, password, phone, date of birth.
    Registration,
    /// Name, phone, email, appointment date; optional date of birth and service.
    Booking,
}

impl FormContext {
    /// Context name used on the command line and in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newsletter => "newsletter",
            Self::Registration => "registration",
            Self::Booking => "booking",
        }
    }

    /// Required fields in check order.
    pub const fn required_fields(self) -> &'static [FieldKey] {
        match self {
            Self::Newsletter => &[FieldKey::Email],
            Self::Registration => &[
                FieldKey::Name,
                FieldKey::Email,
                FieldKey::Password,
                FieldKey::Phone,
                FieldKey::DateOfBirth,
            ],
            Self::Booking => &[
                FieldKey::Name,
                FieldKey::Phone,
                FieldKey::Email,
                FieldKey::AppointmentDate,
            ],
        }
    }
}

impl fmt::Display for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a context name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form context '{0}'; expected newsletter, registration, or booking")]
pub struct ParseFormContextError(String);

impl FromStr for FormContext {
    type Err = ParseFormContextError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newsletter" => Ok(Self::Newsletter),
            "registration" => Ok(Self::Registration),
            "booking" => Ok(Self::Booking),
            _ => Err(ParseFormContextError(value.to_owned())),
        }
    }
}

/// Field values that passed every rule for their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "context", rename_all = "snake_case")]
pub enum ValidatedSubmission {
    Newsletter { email: String },
    Registration(ContactFields),
    Booking(BookingRequest),
}

struct FieldFailure {
    kind: ValidationErrorKind,
    message: &'static str,
}

const fn format_failure(message: &'static str) -> FieldFailure {
    FieldFailure {
        kind: ValidationErrorKind::Format,
        message,
    }
}

const fn range_failure(message: &'static str) -> FieldFailure {
    FieldFailure {
        kind: ValidationErrorKind::Range,
        message,
    }
}

/// Validates raw field sets against a form's rules.
///
/// Validation is a pure function of the field set, the reference catalogue,
/// and `today`, so repeating it yields the same errors.
#[derive(Debug, Clone, Copy)]
pub struct FormValidator<'a> {
    catalogue: &'a ServiceCatalogue,
    strategy: ValidationStrategy,
}

impl<'a> FormValidator<'a> {
    /// Build a validator over `catalogue` using `strategy`.
    pub fn new(catalogue: &'a ServiceCatalogue, strategy: ValidationStrategy) -> Self {
        Self {
            catalogue,
            strategy,
        }
    }

    /// Check `fields` against the rules of `context` as of `today`.
    ///
    /// Within one field the first failing rule is the only one reported.
    /// The error list follows field check order.
    pub fn validate(
        &self,
        context: FormContext,
        fields: &FieldSet,
        today: NaiveDate,
    ) -> Result<ValidatedSubmission, Vec<ValidationError>> {
        let mut checker = Checker::new(fields, self.strategy);
        match context {
            FormContext::Newsletter => {
                let email = checker.required(FieldKey::Email, check_email);
                match email {
                    Some(email) if checker.passed() => {
                        Ok(ValidatedSubmission::Newsletter { email })
                    }
                    _ => Err(checker.into_errors()),
                }
            }
            FormContext::Registration => {
                let name = checker.required(FieldKey::Name, check_name);
                let email = checker.required(FieldKey::Email, check_email);
                let password = checker.required(FieldKey::Password, check_password);
                let phone = checker.required(FieldKey::Phone, check_phone);
                let date_of_birth =
                    checker.required(FieldKey::DateOfBirth, |raw| check_adult_birth_date(raw, today));
                match (name, email, password, phone, date_of_birth) {
                    (Some(name), Some(email), Some(password), Some(phone), Some(date_of_birth))
                        if checker.passed() =>
                    {
                        Ok(ValidatedSubmission::Registration(ContactFields {
                            name,
                            email,
                            phone,
                            date_of_birth,
                            password: Some(password),
                        }))
                    }
                    _ => Err(checker.into_errors()),
                }
            }
            FormContext::Booking => {
                let name = checker.required(FieldKey::Name, check_name);
                let phone = checker.required(FieldKey::Phone, check_phone);
                let email = checker.required(FieldKey::Email, check_email);
                let appointment_date = checker
                    .required(FieldKey::AppointmentDate, |raw| check_appointment_date(raw, today));
                let date_of_birth =
                    checker.optional(FieldKey::DateOfBirth, |raw| check_birth_date(raw, today));
                let service_id =
                    checker.optional(FieldKey::Service, |raw| check_service_id(raw, self.catalogue));
                match (name, phone, email, appointment_date, date_of_birth, service_id) {
                    (
                        Some(name),
                        Some(phone),
                        Some(email),
                        Some(appointment_date),
                        Some(date_of_birth),
                        Some(service_id),
                    ) if checker.passed() => Ok(ValidatedSubmission::Booking(BookingRequest {
                        name,
                        phone,
                        email,
                        appointment_date,
                        date_of_birth,
                        service_id,
                    })),
                    _ => Err(checker.into_errors()),
                }
            }
        }
    }
}

struct Checker<'f> {
    fields: &'f FieldSet,
    strategy: ValidationStrategy,
    errors: Vec<ValidationError>,
}

impl<'f> Checker<'f> {
    fn new(fields: &'f FieldSet, strategy: ValidationStrategy) -> Self {
        Self {
            fields,
            strategy,
            errors: Vec::new(),
        }
    }

    fn halted(&self) -> bool {
        self.strategy == ValidationStrategy::ShortCircuit && !self.errors.is_empty()
    }

    fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    fn required<T>(
        &mut self,
        key: FieldKey,
        parse: impl FnOnce(&str) -> Result<T, FieldFailure>,
    ) -> Option<T> {
        if self.halted() {
            return None;
        }
        let Some(raw) = self.fields.get(key) else {
            self.errors.push(ValidationError::new(
                key,
                ValidationErrorKind::UnknownField,
                format!("{key} is required"),
            ));
            return None;
        };
        self.record(key, parse(raw))
    }

    /// Absent or blank values yield `Some(None)`; failures yield `None`.
    fn optional<T>(
        &mut self,
        key: FieldKey,
        parse: impl FnOnce(&str) -> Result<T, FieldFailure>,
    ) -> Option<Option<T>> {
        if self.halted() {
            return None;
        }
        match self.fields.get(key) {
            Some(raw) if !raw.trim().is_empty() => self.record(key, parse(raw)).map(Some),
            _ => Some(None),
        }
    }

    fn record<T>(&mut self, key: FieldKey, outcome: Result<T, FieldFailure>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(failure) => {
                self.errors
                    .push(ValidationError::new(key, failure.kind, failure.message));
                None
            }
        }
    }

    fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

fn check_name(raw: &str) -> Result<String, FieldFailure> {
    if is_valid_name(raw) {
        Ok(raw.trim().to_owned())
    } else {
        Err(format_failure(NAME_MESSAGE))
    }
}

fn check_email(raw: &str) -> Result<String, FieldFailure> {
    if is_valid_email(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format_failure(EMAIL_MESSAGE))
    }
}

fn check_password(raw: &str) -> Result<String, FieldFailure> {
    if is_valid_password(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format_failure(PASSWORD_MESSAGE))
    }
}

fn check_phone(raw: &str) -> Result<String, FieldFailure> {
    if is_valid_phone(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format_failure(PHONE_MESSAGE))
    }
}

fn check_adult_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldFailure> {
    let date_of_birth = check_birth_date(raw, today)?;
    if is_adult_birth_date(raw, today) {
        Ok(date_of_birth)
    } else {
        Err(range_failure(UNDERAGE_MESSAGE))
    }
}

fn check_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldFailure> {
    match parse_date(raw) {
        Some(date) if date <= today => Ok(date),
        _ => Err(format_failure(BIRTH_DATE_FORMAT_MESSAGE)),
    }
}

fn check_appointment_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldFailure> {
    let Some(date) = parse_date(raw) else {
        return Err(format_failure(APPOINTMENT_FORMAT_MESSAGE));
    };
    if is_not_past_date(raw, today) {
        Ok(date)
    } else {
        Err(range_failure(PAST_APPOINTMENT_MESSAGE))
    }
}

fn check_service_id(raw: &str, catalogue: &ServiceCatalogue) -> Result<ServiceId, FieldFailure> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .map(ServiceId::new)
        .filter(|id| catalogue.find(*id).is_some())
        .ok_or_else(|| format_failure(SERVICE_MESSAGE))
}

#[cfg(test)]
mod tests;
