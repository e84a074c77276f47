//! Doctor directory: specialization filter and name autocomplete.

use std::str::FromStr;

use clinic_reference::ReferenceData;
use serde::Serialize;

/// A doctor shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    name: String,
    specialization: String,
}

impl Doctor {
    /// Create a directory entry.
    pub fn new(name: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialization: specialization.into(),
        }
    }

    /// Display name, e.g. `Dr. Dinara Saduakassova`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase specialization key, e.g. `neurology`.
    pub fn specialization(&self) -> &str {
        &self.specialization
    }
}

/// Specialization filter selected in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecializationFilter {
    All,
    Only(String),
}

impl FromStr for SpecializationFilter {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim();
        if key.is_empty() || key.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(key.to_ascii_lowercase()))
        }
    }
}

/// The clinic's doctors in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    /// Directory over `doctors`, kept in the given order.
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// Directory from the reference catalogue.
    pub fn from_reference(reference: &ReferenceData) -> Self {
        Self::new(
            reference
                .doctors()
                .iter()
                .map(|seed| Doctor::new(seed.name(), seed.specialization().to_ascii_lowercase()))
                .collect(),
        )
    }

    /// Every doctor.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Doctors matching `filter`, in catalogue order.
    pub fn filter(&self, filter: &SpecializationFilter) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|doctor| match filter {
                SpecializationFilter::All => true,
                SpecializationFilter::Only(key) => doctor.specialization == *key,
            })
            .collect()
    }

    /// Names containing `term`, ignoring case; a blank term suggests nothing.
    pub fn suggest(&self, term: &str) -> Vec<&str> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.doctors
            .iter()
            .map(Doctor::name)
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> DoctorDirectory {
        let reference = ReferenceData::bundled().expect("bundled reference");
        DoctorDirectory::from_reference(&reference)
    }

    fn names<'a>(doctors: &[&'a Doctor]) -> Vec<&'a str> {
        doctors.iter().map(|doctor| doctor.name()).collect()
    }

    #[rstest]
    #[case("all")]
    #[case("ALL")]
    #[case("")]
    fn all_keeps_catalogue_order(directory: DoctorDirectory, #[case] raw: &str) {
        let filter: SpecializationFilter = raw.parse().expect("infallible");
        assert_eq!(
            names(&directory.filter(&filter)),
            vec![
                "Dr. Azamat Nurlybekov",
                "Dr. Dinara Saduakassova",
                "Dr. Ruslan Mammadov"
            ]
        );
    }

    #[rstest]
    #[case("neurology", vec!["Dr. Dinara Saduakassova"])]
    #[case("Cardiology", vec!["Dr. Ruslan Mammadov"])]
    #[case("dermatology", vec![])]
    fn specialization_filters(
        directory: DoctorDirectory,
        #[case] raw: &str,
        #[case] expected: Vec<&str>,
    ) {
        let filter: SpecializationFilter = raw.parse().expect("infallible");
        assert_eq!(names(&directory.filter(&filter)), expected);
    }

    #[rstest]
    #[case("din", vec!["Dr. Dinara Saduakassova"])]
    #[case("MAMMA", vec!["Dr. Ruslan Mammadov"])]
    #[case("dr.", vec!["Dr. Azamat Nurlybekov", "Dr. Dinara Saduakassova", "Dr. Ruslan Mammadov"])]
    #[case("bek", vec!["Dr. Azamat Nurlybekov"])]
    #[case("zzz", vec![])]
    #[case("   ", vec![])]
    #[case("", vec![])]
    fn autocomplete_matches_substrings(
        directory: DoctorDirectory,
        #[case] term: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(directory.suggest(term), expected);
    }
}
