//! Submission orchestration for the newsletter, registration, and booking
//! forms.
//!
//! `submit(context, fields)` is the single entry point the presentation
//! layer calls. It validates the field set, then runs the context's
//! follow-up work:
//! - newsletter: nothing further;
//! - registration: the email uniqueness check through [`EmailRegistry`];
//! - booking: pricing and the confirmation text.

mod state;

use std::sync::Arc;

use mockable::Clock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use self::state::{InvalidTransition, SubmissionState};
use crate::domain::Error;
use crate::domain::booking::{BookingResult, DEFAULT_BOOKING_AGE, derive_booking};
use crate::domain::catalogue::ServiceCatalogue;
use crate::domain::fields::{ContactFields, FieldSet};
use crate::domain::ports::{EmailRegistry, EmailRegistryError};
use crate::domain::session::IntakeSession;
use crate::domain::validation::{
    FormContext, FormValidator, ValidatedSubmission, ValidationError, ValidationStrategy,
};

/// Notice shown for failures the visitor cannot fix by editing the form.
pub const UNEXPECTED_NOTICE: &str = "Something went wrong, please retry";

/// Tunables applied to every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    /// How many field failures to report.
    pub strategy: ValidationStrategy,
    /// Age used for booking discounts when no birth date is given.
    pub default_booking_age: u32,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            strategy: ValidationStrategy::default(),
            default_booking_age: DEFAULT_BOOKING_AGE,
        }
    }
}

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Newsletter subscription accepted.
    Subscribed { email: String },
    /// Account registered.
    Registered { name: String, email: String },
    /// Appointment booked and priced.
    Booked(BookingResult),
}

/// Why a submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    /// One or more fields failed their rules.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<ValidationError>),
    /// An email check for this session has not resolved yet.
    #[error("An email check is already in progress, please wait")]
    CheckPending,
    /// An internal failure; the cause is logged, not shown.
    #[error("{UNEXPECTED_NOTICE}")]
    Unexpected(Error),
}

impl SubmissionRejection {
    /// Field errors to display, empty for non-field rejections.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::CheckPending | Self::Unexpected(_) => &[],
        }
    }

    /// Message suitable for a banner or alert.
    pub fn notice(&self) -> String {
        match self {
            Self::Invalid(errors) => errors
                .iter()
                .map(ValidationError::message)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::CheckPending | Self::Unexpected(_) => self.to_string(),
        }
    }
}

/// Drives form submissions through validation and their follow-up work.
#[derive(Clone)]
pub struct SubmissionService<R> {
    registry: Arc<R>,
    clock: Arc<dyn Clock>,
    catalogue: Arc<ServiceCatalogue>,
    policy: SubmissionPolicy,
}

impl<R> SubmissionService<R> {
    /// Create a new submission service.
    pub fn new(
        registry: Arc<R>,
        clock: Arc<dyn Clock>,
        catalogue: Arc<ServiceCatalogue>,
        policy: SubmissionPolicy,
    ) -> Self {
        Self {
            registry,
            clock,
            catalogue,
            policy,
        }
    }

    /// Policy in force for this service.
    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    /// Services offered for booking.
    pub fn catalogue(&self) -> &ServiceCatalogue {
        &self.catalogue
    }

    /// Validate `fields` without running any follow-up work.
    ///
    /// Useful for live feedback while the visitor is still typing.
    pub fn validate(
        &self,
        context: FormContext,
        fields: &FieldSet,
    ) -> Result<ValidatedSubmission, Vec<ValidationError>> {
        FormValidator::new(&self.catalogue, self.policy.strategy).validate(
            context,
            fields,
            self.clock.utc().date_naive(),
        )
    }
}

impl<R> SubmissionService<R>
where
    R: EmailRegistry,
{
    /// Submit a form.
    ///
    /// Completed submissions increment the session's counter. A
    /// registration arriving while the session already has an email check
    /// in flight is rejected with [`SubmissionRejection::CheckPending`].
    pub async fn submit(
        &self,
        session: &IntakeSession,
        context: FormContext,
        fields: &FieldSet,
    ) -> Result<SubmissionOutcome, SubmissionRejection> {
        if context == FormContext::Registration && session.is_check_pending() {
            debug!(%context, "email check pending; rejecting submission");
            return Err(SubmissionRejection::CheckPending);
        }

        let mut lifecycle = Lifecycle::new(context);
        lifecycle.advance(SubmissionState::Validating)?;

        let validated = match self.validate(context, fields) {
            Ok(validated) => validated,
            Err(errors) => {
                lifecycle.advance(SubmissionState::Invalid)?;
                debug!(%context, count = errors.len(), "submission failed validation");
                return Err(SubmissionRejection::Invalid(errors));
            }
        };
        lifecycle.advance(SubmissionState::Valid)?;
        lifecycle.advance(SubmissionState::Deriving)?;

        let outcome = match validated {
            ValidatedSubmission::Newsletter { email } => SubmissionOutcome::Subscribed { email },
            ValidatedSubmission::Registration(contact) => {
                self.register(session, &mut lifecycle, contact).await?
            }
            ValidatedSubmission::Booking(request) => {
                let today = self.clock.utc().date_naive();
                let booking = derive_booking(
                    request,
                    &self.catalogue,
                    today,
                    self.policy.default_booking_age,
                )
                .map_err(unexpected)?;
                SubmissionOutcome::Booked(booking)
            }
        };

        lifecycle.advance(SubmissionState::Completed)?;
        let served = session.record_completion();
        info!(%context, served, "submission completed");
        Ok(outcome)
    }

    async fn register(
        &self,
        session: &IntakeSession,
        lifecycle: &mut Lifecycle,
        contact: ContactFields,
    ) -> Result<SubmissionOutcome, SubmissionRejection> {
        let Some(_guard) = session.begin_email_check() else {
            debug!("email check claimed concurrently; rejecting submission");
            return Err(SubmissionRejection::CheckPending);
        };

        let taken = self
            .registry
            .is_registered(&contact.email)
            .await
            .map_err(map_registry_error)?;
        if taken {
            lifecycle.advance(SubmissionState::Invalid)?;
            debug!("registration email already registered");
            return Err(SubmissionRejection::Invalid(vec![
                ValidationError::email_taken(),
            ]));
        }

        Ok(SubmissionOutcome::Registered {
            name: contact.name,
            email: contact.email,
        })
    }
}

/// Tracks and logs one submission's state.
struct Lifecycle {
    context: FormContext,
    state: SubmissionState,
}

impl Lifecycle {
    fn new(context: FormContext) -> Self {
        Self {
            context,
            state: SubmissionState::Idle,
        }
    }

    fn advance(&mut self, next: SubmissionState) -> Result<(), SubmissionRejection> {
        let from = self.state;
        self.state = from.advance(next).map_err(|error| {
            unexpected(Error::internal(error.to_string()))
        })?;
        debug!(context = %self.context, ?from, to = ?next, "submission state changed");
        Ok(())
    }
}

fn unexpected(error: Error) -> SubmissionRejection {
    warn!(code = ?error.code(), message = error.message(), "submission failed unexpectedly");
    SubmissionRejection::Unexpected(error)
}

fn map_registry_error(error: EmailRegistryError) -> SubmissionRejection {
    match &error {
        EmailRegistryError::Unavailable { .. } => {
            unexpected(Error::service_unavailable(error.to_string()))
        }
    }
}
