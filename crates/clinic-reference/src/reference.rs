//! Reference document types and JSON parsing.
//!
//! The document is versioned and validated on load so consumers can rely on
//! a non-empty service catalogue with unique identifiers.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReferenceError;
use crate::seed::{CertificateSeed, DoctorSeed, FoodSeed, ServiceSeed};

/// Current supported reference document version.
const SUPPORTED_VERSION: u32 = 1;

/// Canonical form used to compare emails: trimmed and lower-cased.
///
/// ```
/// assert_eq!(clinic_reference::normalise_email(" Jo@X.com "), "jo@x.com");
/// ```
#[must_use]
pub fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Reference document compiled into the crate.
pub const BUNDLED_REFERENCE_JSON: &str = include_str!("../data/reference.json");

/// Validated reference catalogue.
///
/// # Example
///
/// ```
/// use clinic_reference::ReferenceData;
///
/// let json = r#"{
///     "version": 1,
///     "services": [{"id": 7, "name": "Massage", "cost": 9000}],
///     "takenEmails": [],
///     "foods": [],
///     "doctors": [],
///     "certificates": []
/// }"#;
///
/// let reference = ReferenceData::from_json(json).expect("valid reference");
/// assert_eq!(reference.services().len(), 1);
/// assert!(reference.find_service(7).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    services: Vec<ServiceSeed>,
    taken_emails: Vec<String>,
    foods: Vec<FoodSeed>,
    doctors: Vec<DoctorSeed>,
    certificates: Vec<CertificateSeed>,
}

impl ReferenceData {
    /// Parses the reference document compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the bundled document fails validation.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json(BUNDLED_REFERENCE_JSON)
    }

    /// Parses a reference document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if:
    /// - The JSON is malformed or misses required fields
    /// - The version is unsupported
    /// - The service catalogue is empty
    /// - Service ids or food keys repeat
    /// - A service, doctor, or certificate has a blank name
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let raw: RawReferenceData =
            serde_json::from_str(json).map_err(|e| ReferenceError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a reference document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ReferenceError> {
        let contents = fs::read_to_string(path).map_err(|e| ReferenceError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawReferenceData) -> Result<Self, ReferenceError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(ReferenceError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.services.is_empty() {
            return Err(ReferenceError::EmptyServices);
        }

        let mut service_ids = HashSet::new();
        for (index, service) in raw.services.iter().enumerate() {
            if service.name().trim().is_empty() {
                return Err(ReferenceError::BlankEntry {
                    section: "services",
                    index,
                });
            }
            if !service_ids.insert(service.id()) {
                return Err(ReferenceError::DuplicateServiceId { id: service.id() });
            }
        }

        let mut food_keys = HashSet::new();
        for food in &raw.foods {
            if !food_keys.insert(food.key()) {
                return Err(ReferenceError::DuplicateFoodKey {
                    key: food.key().to_owned(),
                });
            }
        }

        ensure_named(&raw.doctors, "doctors", DoctorSeed::name)?;
        ensure_named(&raw.certificates, "certificates", CertificateSeed::title)?;

        // Registered addresses compare case-insensitively.
        let taken_emails = raw
            .taken_emails
            .into_iter()
            .map(|email| normalise_email(&email))
            .collect();

        Ok(Self {
            services: raw.services,
            taken_emails,
            foods: raw.foods,
            doctors: raw.doctors,
            certificates: raw.certificates,
        })
    }

    /// Returns the service catalogue in display order.
    #[must_use]
    pub fn services(&self) -> &[ServiceSeed] {
        &self.services
    }

    /// Finds a service by identifier.
    #[must_use]
    pub fn find_service(&self, id: u32) -> Option<&ServiceSeed> {
        self.services.iter().find(|service| service.id() == id)
    }

    /// Returns the normalised (trimmed, lower-case) taken emails.
    #[must_use]
    pub fn taken_emails(&self) -> &[String] {
        &self.taken_emails
    }

    /// Reports whether the email is already registered.
    #[must_use]
    pub fn is_email_taken(&self, email: &str) -> bool {
        let candidate = normalise_email(email);
        self.taken_emails.iter().any(|taken| *taken == candidate)
    }

    /// Returns the food calorie table.
    #[must_use]
    pub fn foods(&self) -> &[FoodSeed] {
        &self.foods
    }

    /// Returns the doctor directory in display order.
    #[must_use]
    pub fn doctors(&self) -> &[DoctorSeed] {
        &self.doctors
    }

    /// Returns the certificates held by the clinic.
    #[must_use]
    pub fn certificates(&self) -> &[CertificateSeed] {
        &self.certificates
    }
}

fn ensure_named<T>(
    entries: &[T],
    section: &'static str,
    name: impl Fn(&T) -> &str,
) -> Result<(), ReferenceError> {
    match entries
        .iter()
        .position(|entry| name(entry).trim().is_empty())
    {
        Some(index) => Err(ReferenceError::BlankEntry { section, index }),
        None => Ok(()),
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReferenceData {
    version: u32,
    services: Vec<ServiceSeed>,
    #[serde(default)]
    taken_emails: Vec<String>,
    #[serde(default)]
    foods: Vec<FoodSeed>,
    #[serde(default)]
    doctors: Vec<DoctorSeed>,
    #[serde(default)]
    certificates: Vec<CertificateSeed>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn document(services: &str) -> String {
        format!(r#"{{"version": 1, "services": {services}}}"#)
    }

    #[test]
    fn bundled_document_is_valid() {
        let reference = ReferenceData::bundled().expect("bundled reference");

        assert_eq!(reference.services().len(), 4);
        assert_eq!(reference.foods().len(), 5);
        assert_eq!(reference.doctors().len(), 3);
        assert_eq!(reference.certificates().len(), 3);
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let json = document(r#"[{"id": 1, "name": "Massage", "cost": 9000}]"#);
        let reference = ReferenceData::from_json(&json).expect("valid reference");

        assert!(reference.taken_emails().is_empty());
        assert!(reference.foods().is_empty());
    }

    #[rstest]
    #[case("test@example.com", true)]
    #[case("  TEST@Example.com ", true)]
    #[case("new@example.com", false)]
    fn taken_emails_match_case_insensitively(#[case] email: &str, #[case] expected: bool) {
        let reference = ReferenceData::bundled().expect("bundled reference");
        assert_eq!(reference.is_email_taken(email), expected);
    }

    #[rstest]
    #[case("ÅSA@Example.com", "åsa@example.com")]
    #[case("\tjo@x.com\n", "jo@x.com")]
    fn normalise_email_trims_and_lowercases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_email(raw), expected);
    }

    #[test]
    fn rejects_unsupported_version() {
        let json = r#"{"version": 2, "services": []}"#;
        let result = ReferenceData::from_json(json);

        assert_eq!(
            result,
            Err(ReferenceError::UnsupportedVersion {
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn rejects_empty_services() {
        let result = ReferenceData::from_json(&document("[]"));
        assert_eq!(result, Err(ReferenceError::EmptyServices));
    }

    #[test]
    fn rejects_duplicate_service_ids() {
        let json = document(
            r#"[{"id": 1, "name": "A", "cost": 1}, {"id": 1, "name": "B", "cost": 2}]"#,
        );
        let result = ReferenceData::from_json(&json);
        assert_eq!(result, Err(ReferenceError::DuplicateServiceId { id: 1 }));
    }

    #[test]
    fn rejects_blank_service_names() {
        let json = document(r#"[{"id": 1, "name": "  ", "cost": 1}]"#);
        let result = ReferenceData::from_json(&json);
        assert_eq!(
            result,
            Err(ReferenceError::BlankEntry {
                section: "services",
                index: 0,
            })
        );
    }

    #[test]
    fn rejects_duplicate_food_keys() {
        let json = r#"{
            "version": 1,
            "services": [{"id": 1, "name": "A", "cost": 1}],
            "foods": [{"key": "rice", "calories": 1}, {"key": "rice", "calories": 2}]
        }"#;
        let result = ReferenceData::from_json(json);
        assert_eq!(
            result,
            Err(ReferenceError::DuplicateFoodKey {
                key: "rice".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let result = ReferenceData::from_json("{ not json");
        assert!(matches!(result, Err(ReferenceError::ParseError { .. })));
    }
}
