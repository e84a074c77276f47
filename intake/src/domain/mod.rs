//! Intake domain: form rules, submission orchestration, and the clinic's
//! calculators.
//!
//! Purpose: keep every rule a pure function of its inputs plus an injected
//! clock, so the presentation layer only gathers fields and renders
//! results.
//!
//! Public surface:
//! - `SubmissionService` drives `submit(context, fields)`.
//! - `FormValidator` checks a `FieldSet` against a `FormContext`.
//! - `pricing` and `calculators` hold the stateless derivations.
//! - `DoctorDirectory`, `AvailabilityCalendar`, and `CertificateRegistry`
//!   serve the read-only widgets.

pub mod booking;
pub mod calculators;
pub mod catalogue;
pub mod certificates;
pub mod directory;
pub mod error;
pub mod fields;
pub mod ports;
pub mod pricing;
pub mod schedule;
pub mod session;
pub mod submission;
pub mod validation;
pub mod validators;

pub use self::booking::{BookingResult, ContactInfo, DEFAULT_BOOKING_AGE, derive_booking};
pub use self::catalogue::{Service, ServiceCatalogue, ServiceId};
pub use self::certificates::{Certificate, CertificateRegistry, CertificateStatus};
pub use self::directory::{Doctor, DoctorDirectory, SpecializationFilter};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{BookingRequest, ContactFields, FieldKey, FieldSet};
pub use self::pricing::{DiscountRate, Money};
pub use self::schedule::{AvailabilityCalendar, ScheduleError, TimeSlot};
pub use self::session::{IntakeSession, PendingCheckGuard};
pub use self::submission::{
    InvalidTransition, SubmissionOutcome, SubmissionPolicy, SubmissionRejection,
    SubmissionService, SubmissionState, UNEXPECTED_NOTICE,
};
pub use self::validation::{
    FormContext, FormValidator, ParseFormContextError, ValidatedSubmission, ValidationError,
    ValidationErrorKind, ValidationStrategy,
};
