//! Booking derivation: from a validated request to a priced confirmation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Error;
use crate::domain::catalogue::ServiceCatalogue;
use crate::domain::fields::BookingRequest;
use crate::domain::pricing::{DiscountRate, Money, apply_discount, calculate_total_cost, discount_rate};
use crate::domain::validators::age_in_years;

/// Age assumed for the discount when the booking form carries no birth date.
pub const DEFAULT_BOOKING_AGE: u32 = 30;

/// How the patient can be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Confirmed booking shown to the patient.
///
/// ## Invariants
/// - Only produced from a [`BookingRequest`] that passed validation.
/// - `final_cost` equals the service cost less `discount_applied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    patient_name: String,
    contact_info: ContactInfo,
    appointment_date: NaiveDate,
    service_name: String,
    total_cost: Money,
    final_cost: Money,
    discount_applied: DiscountRate,
    confirmation: String,
}

impl BookingResult {
    /// Patient's name as entered.
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    /// Email and phone from the form.
    pub fn contact_info(&self) -> &ContactInfo {
        &self.contact_info
    }

    /// Date of the appointment.
    pub fn appointment_date(&self) -> NaiveDate {
        self.appointment_date
    }

    /// Booked service.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Price before the discount.
    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    /// Price the patient pays.
    pub fn final_cost(&self) -> Money {
        self.final_cost
    }

    /// Discount bracket that was applied.
    pub fn discount_applied(&self) -> DiscountRate {
        self.discount_applied
    }

    /// Human-readable confirmation text.
    pub fn confirmation(&self) -> &str {
        &self.confirmation
    }
}

/// Price a validated booking request.
///
/// The patient's age comes from the request's birth date when present and
/// `default_age` otherwise. The service is the requested one or the
/// catalogue default.
///
/// # Errors
/// Returns an internal [`Error`] when the requested service has vanished
/// from the catalogue since validation.
pub fn derive_booking(
    request: BookingRequest,
    catalogue: &ServiceCatalogue,
    today: NaiveDate,
    default_age: u32,
) -> Result<BookingResult, Error> {
    let age = request
        .date_of_birth
        .and_then(|dob| age_in_years(dob, today))
        .unwrap_or(default_age);

    let service = match request.service_id {
        Some(id) => catalogue.find(id),
        None => catalogue.default_service(),
    }
    .ok_or_else(|| Error::internal("booked service is missing from the catalogue"))?;

    let total_cost = calculate_total_cost(std::slice::from_ref(service));
    let discount_applied = discount_rate(age);
    let final_cost = apply_discount(total_cost, discount_applied);

    let confirmation = format!(
        "Appointment confirmed for {name} on {date}: {service} for {cost}",
        name = request.name,
        date = request.appointment_date.format("%-d %B %Y"),
        service = service.name(),
        cost = final_cost,
    );
    let confirmation = if discount_applied.is_discount() {
        format!("{confirmation} ({discount_applied} discount applied).")
    } else {
        format!("{confirmation}.")
    };

    Ok(BookingResult {
        patient_name: request.name,
        contact_info: ContactInfo {
            email: request.email,
            phone: request.phone,
        },
        appointment_date: request.appointment_date,
        service_name: service.name().to_owned(),
        total_cost,
        final_cost,
        discount_applied,
        confirmation,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::catalogue::{Service, ServiceId};
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

    fn request(date_of_birth: Option<NaiveDate>, service_id: Option<ServiceId>) -> BookingRequest {
        BookingRequest {
            name: "Ada Lovelace".into(),
            phone: "+7 (701) 123-45-67".into(),
            email: "ada@rcclinic.kz".into(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("date"),
            date_of_birth,
            service_id,
        }
    }

    #[rstest]
    fn senior_patients_receive_fifteen_percent_off(catalogue: ServiceCatalogue, today: NaiveDate) {
        let dob = NaiveDate::from_ymd_opt(1955, 6, 1);
        let result = derive_booking(request(dob, None), &catalogue, today, DEFAULT_BOOKING_AGE)
            .expect("booking");

        assert_eq!(result.discount_applied(), DiscountRate::SENIOR);
        assert_eq!(result.total_cost(), Money::from_major(18_000));
        assert_eq!(result.final_cost(), Money::from_major(15_300));
        assert_eq!(result.service_name(), "Consultation");
        assert_eq!(
            result.confirmation(),
            "Appointment confirmed for Ada Lovelace on 2 March 2026: Consultation for 15300.00 KZT (15% discount applied)."
        );
    }

    #[rstest]
    fn default_age_is_used_without_a_birth_date(catalogue: ServiceCatalogue, today: NaiveDate) {
        let result = derive_booking(request(None, None), &catalogue, today, DEFAULT_BOOKING_AGE)
            .expect("booking");

        assert_eq!(result.discount_applied(), DiscountRate::NONE);
        assert_eq!(result.final_cost(), Money::from_major(18_000));
        assert!(result.confirmation().ends_with("18000.00 KZT."));
    }

    #[rstest]
    fn configured_default_age_drives_the_discount(catalogue: ServiceCatalogue, today: NaiveDate) {
        let result =
            derive_booking(request(None, None), &catalogue, today, 70).expect("booking");
        assert_eq!(result.final_cost(), Money::from_major(15_300));
    }

    #[rstest]
    fn minors_receive_twenty_percent_off_the_requested_service(
        catalogue: ServiceCatalogue,
        today: NaiveDate,
    ) {
        let dob = NaiveDate::from_ymd_opt(2012, 6, 1);
        let result = derive_booking(
            request(dob, Some(ServiceId::new(2))),
            &catalogue,
            today,
            DEFAULT_BOOKING_AGE,
        )
        .expect("booking");

        assert_eq!(result.service_name(), "Physiotherapy");
        assert_eq!(result.discount_applied(), DiscountRate::MINOR);
        assert_eq!(result.final_cost(), Money::from_major(9_600));
    }

    #[rstest]
    fn missing_services_are_internal_errors(catalogue: ServiceCatalogue, today: NaiveDate) {
        let error = derive_booking(
            request(None, Some(ServiceId::new(99))),
            &catalogue,
            today,
            DEFAULT_BOOKING_AGE,
        )
        .expect_err("unknown service");

        assert_eq!(error.code(), crate::domain::ErrorCode::InternalError);
    }

    #[rstest]
    fn result_keeps_contact_details(catalogue: ServiceCatalogue, today: NaiveDate) {
        let result = derive_booking(request(None, None), &catalogue, today, DEFAULT_BOOKING_AGE)
            .expect("booking");

        assert_eq!(result.patient_name(), "Ada Lovelace");
        assert_eq!(result.contact_info().email, "ada@rcclinic.kz");
        assert_eq!(result.contact_info().phone, "+7 (701) 123-45-67");
        assert_eq!(
            result.appointment_date(),
            NaiveDate::from_ymd_opt(2026, 3, 2).expect("date")
        );
    }
}
