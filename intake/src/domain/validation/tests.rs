//! Tests for per-form validation.

use super::*;
use crate::domain::catalogue::Service;
use crate::domain::pricing::Money;
use rstest::{fixture, rstest};

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 24).expect("fixture date")
}

#[fixture]
fn catalogue() -> ServiceCatalogue {
    ServiceCatalogue::new(vec![
        Service::new(ServiceId::new(1), "Consultation", Money::from_major(18_000)),
        Service::new(ServiceId::new(2), "Physiotherapy", Money::from_major(12_000)),
    ])
    .expect("catalogue")
}

fn registration_fields() -> FieldSet {
    FieldSet::from_pairs([
        ("name", "Jo"),
        ("email", "jo@x.com"),
        ("password", "secret1!"),
        ("phone", "+7 (701) 123-45-67"),
        ("dob", "2000-01-01"),
    ])
}

fn booking_fields() -> FieldSet {
    FieldSet::from_pairs([
        ("name", "Ada Lovelace"),
        ("phone", "+7 (701) 123-45-67"),
        ("email", "ada@rcclinic.kz"),
        ("date", "2026-03-02"),
    ])
}

fn fields_of(errors: &[ValidationError]) -> Vec<FieldKey> {
    errors.iter().map(ValidationError::field).collect()
}

#[rstest]
fn registration_scenario_passes(catalogue: ServiceCatalogue, today: NaiveDate) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let result = validator.validate(FormContext::Registration, &registration_fields(), today);

    let Ok(ValidatedSubmission::Registration(contact)) = result else {
        panic!("expected registration to validate, got {result:?}");
    };
    assert_eq!(contact.name, "Jo");
    assert_eq!(contact.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1).expect("date"));
    assert_eq!(contact.password.as_deref(), Some("secret1!"));
}

#[rstest]
fn newsletter_reports_a_single_email_error(catalogue: ServiceCatalogue, today: NaiveDate) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = FieldSet::from_pairs([("email", "bad-email"), ("name", "J0")]);

    let errors = validator
        .validate(FormContext::Newsletter, &fields, today)
        .expect_err("invalid email");

    assert_eq!(errors.len(), 1);
    let error = errors.first().expect("one error");
    assert_eq!(error.field(), FieldKey::Email);
    assert_eq!(error.kind(), ValidationErrorKind::Format);
    assert!(error.message().contains("valid email"));
}

#[rstest]
fn accumulate_reports_every_failing_field_in_rule_order(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = registration_fields()
        .with(FieldKey::Name, "J")
        .with(FieldKey::Password, "short")
        .with(FieldKey::DateOfBirth, "2015-05-05");

    let errors = validator
        .validate(FormContext::Registration, &fields, today)
        .expect_err("invalid registration");

    assert_eq!(
        fields_of(&errors),
        vec![FieldKey::Name, FieldKey::Password, FieldKey::DateOfBirth]
    );
    let messages: Vec<&str> = errors.iter().map(ValidationError::message).collect();
    assert_eq!(messages, vec![NAME_MESSAGE, PASSWORD_MESSAGE, UNDERAGE_MESSAGE]);
}

#[rstest]
fn short_circuit_stops_at_the_first_failure(catalogue: ServiceCatalogue, today: NaiveDate) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::ShortCircuit);
    let fields = registration_fields()
        .with(FieldKey::Email, "nope")
        .with(FieldKey::Phone, "123");

    let errors = validator
        .validate(FormContext::Registration, &fields, today)
        .expect_err("invalid registration");

    assert_eq!(fields_of(&errors), vec![FieldKey::Email]);
}

#[rstest]
fn missing_required_fields_are_unknown_field_errors(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = booking_fields().without(FieldKey::Phone);

    let errors = validator
        .validate(FormContext::Booking, &fields, today)
        .expect_err("missing phone");

    assert_eq!(
        errors,
        vec![ValidationError::new(
            FieldKey::Phone,
            ValidationErrorKind::UnknownField,
            "phone is required",
        )]
    );
}

#[rstest]
fn every_required_field_is_reported_when_the_form_is_empty(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
    #[values(FormContext::Newsletter, FormContext::Registration, FormContext::Booking)]
    context: FormContext,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);

    let errors = validator
        .validate(context, &FieldSet::new(), today)
        .expect_err("empty form");

    assert_eq!(fields_of(&errors), context.required_fields().to_vec());
    assert!(
        errors
            .iter()
            .all(|error| error.kind() == ValidationErrorKind::UnknownField)
    );
}

#[rstest]
#[case("not-a-date", ValidationErrorKind::Format, BIRTH_DATE_FORMAT_MESSAGE)]
#[case("2030-01-01", ValidationErrorKind::Format, BIRTH_DATE_FORMAT_MESSAGE)]
#[case("2010-01-01", ValidationErrorKind::Range, UNDERAGE_MESSAGE)]
fn birth_date_failures_are_classified(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
    #[case] raw: &str,
    #[case] kind: ValidationErrorKind,
    #[case] message: &str,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = registration_fields().with(FieldKey::DateOfBirth, raw);

    let errors = validator
        .validate(FormContext::Registration, &fields, today)
        .expect_err("invalid dob");

    assert_eq!(
        errors,
        vec![ValidationError::new(FieldKey::DateOfBirth, kind, message)]
    );
}

#[rstest]
#[case("2026-02-24", None)]
#[case("2026-02-23", Some((ValidationErrorKind::Range, PAST_APPOINTMENT_MESSAGE)))]
#[case("24.02.2026", Some((ValidationErrorKind::Format, APPOINTMENT_FORMAT_MESSAGE)))]
fn appointment_dates_are_checked_against_today(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
    #[case] raw: &str,
    #[case] expected: Option<(ValidationErrorKind, &str)>,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = booking_fields().with(FieldKey::AppointmentDate, raw);

    let result = validator.validate(FormContext::Booking, &fields, today);

    match (result, expected) {
        (Ok(_), None) => {}
        (Err(errors), Some((kind, message))) => assert_eq!(
            errors,
            vec![ValidationError::new(FieldKey::AppointmentDate, kind, message)]
        ),
        (other, expected) => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[rstest]
fn booking_optional_fields_are_parsed(catalogue: ServiceCatalogue, today: NaiveDate) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = booking_fields()
        .with(FieldKey::DateOfBirth, "2012-06-01")
        .with(FieldKey::Service, " 2 ");

    let Ok(ValidatedSubmission::Booking(request)) =
        validator.validate(FormContext::Booking, &fields, today)
    else {
        panic!("expected booking to validate");
    };

    assert_eq!(request.service_id, Some(ServiceId::new(2)));
    // Minors may book; only registration enforces the age limit.
    assert_eq!(request.date_of_birth, NaiveDate::from_ymd_opt(2012, 6, 1));
}

#[rstest]
fn blank_optional_fields_count_as_absent(catalogue: ServiceCatalogue, today: NaiveDate) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = booking_fields()
        .with(FieldKey::DateOfBirth, "  ")
        .with(FieldKey::Service, "");

    let Ok(ValidatedSubmission::Booking(request)) =
        validator.validate(FormContext::Booking, &fields, today)
    else {
        panic!("expected booking to validate");
    };

    assert_eq!(request.service_id, None);
    assert_eq!(request.date_of_birth, None);
}

#[rstest]
#[case("9")]
#[case("two")]
#[case("-1")]
fn unknown_services_are_rejected(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
    #[case] raw: &str,
) {
    let validator = FormValidator::new(&catalogue, ValidationStrategy::Accumulate);
    let fields = booking_fields().with(FieldKey::Service, raw);

    let errors = validator
        .validate(FormContext::Booking, &fields, today)
        .expect_err("unknown service");

    assert_eq!(
        errors,
        vec![ValidationError::new(
            FieldKey::Service,
            ValidationErrorKind::Format,
            SERVICE_MESSAGE,
        )]
    );
}

#[rstest]
fn revalidation_is_idempotent(
    catalogue: ServiceCatalogue,
    today: NaiveDate,
    #[values(ValidationStrategy::Accumulate, ValidationStrategy::ShortCircuit)]
    strategy: ValidationStrategy,
) {
    let validator = FormValidator::new(&catalogue, strategy);
    let fields = registration_fields()
        .with(FieldKey::Email, "bad")
        .with(FieldKey::Phone, "bad");

    let first = validator.validate(FormContext::Registration, &fields, today);
    let second = validator.validate(FormContext::Registration, &fields, today);

    assert_eq!(first, second);
}

#[rstest]
#[case("booking", FormContext::Booking)]
#[case(" Registration ", FormContext::Registration)]
#[case("NEWSLETTER", FormContext::Newsletter)]
fn contexts_parse_from_names(#[case] raw: &str, #[case] expected: FormContext) {
    assert_eq!(raw.parse::<FormContext>(), Ok(expected));
}

#[rstest]
fn unknown_contexts_fail_to_parse() {
    let error = "contact".parse::<FormContext>().expect_err("unknown context");
    assert!(error.to_string().contains("contact"));
}
