//! Clinic accreditation certificates and their validity window.

use chrono::NaiveDate;
use clinic_reference::ReferenceData;
use serde::Serialize;

use crate::domain::Error;
use crate::domain::validators::parse_date;

/// Days a certificate stays valid after issue.
pub const CERTIFICATE_VALIDITY_DAYS: i64 = 730;

/// An accreditation certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    id: String,
    title: String,
    description: String,
    issue_date: NaiveDate,
}

impl Certificate {
    /// Stable identifier, e.g. `cert1`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Certificate title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Issue date.
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Valid while fewer than [`CERTIFICATE_VALIDITY_DAYS`] have elapsed.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        (today - self.issue_date).num_days() < CERTIFICATE_VALIDITY_DAYS
    }
}

/// Validity of one certificate on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStatus<'a> {
    #[serde(flatten)]
    pub certificate: &'a Certificate,
    pub valid: bool,
}

/// Lookup of the clinic's certificates by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateRegistry {
    certificates: Vec<Certificate>,
}

impl CertificateRegistry {
    /// Registry from the reference catalogue.
    ///
    /// # Errors
    /// Returns an invalid-request [`Error`] when an issue date is not an
    /// ISO-8601 calendar date.
    pub fn from_reference(reference: &ReferenceData) -> Result<Self, Error> {
        let certificates = reference
            .certificates()
            .iter()
            .map(|seed| {
                let issue_date = parse_date(seed.issue_date()).ok_or_else(|| {
                    Error::invalid_request(format!(
                        "certificate {} has invalid issue date '{}'",
                        seed.id(),
                        seed.issue_date()
                    ))
                })?;
                Ok(Certificate {
                    id: seed.id().to_owned(),
                    title: seed.title().to_owned(),
                    description: seed.description().to_owned(),
                    issue_date,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self { certificates })
    }

    /// Certificates in catalogue order.
    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Certificate with `id`, if any.
    pub fn find(&self, id: &str) -> Option<&Certificate> {
        self.certificates.iter().find(|cert| cert.id == id)
    }

    /// Whether `id` names a certificate that is valid on `today`.
    pub fn is_valid(&self, id: &str, today: NaiveDate) -> bool {
        self.find(id).is_some_and(|cert| cert.is_valid_on(today))
    }

    /// Status of every certificate on `today`.
    pub fn statuses(&self, today: NaiveDate) -> Vec<CertificateStatus<'_>> {
        self.certificates
            .iter()
            .map(|certificate| CertificateStatus {
                certificate,
                valid: certificate.is_valid_on(today),
            })
            .collect()
    }
}
