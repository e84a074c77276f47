//! Seed records exposed by the reference catalogue.
//!
//! Seeds are plain data. Amounts are whole tenge and dates are ISO-8601
//! strings; parsing them into richer types is left to consumers.

use serde::Deserialize;

/// A bookable clinic service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSeed {
    id: u32,
    name: String,
    cost: u64,
}

impl ServiceSeed {
    /// Returns the stable service identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cost in whole tenge.
    #[must_use]
    pub const fn cost(&self) -> u64 {
        self.cost
    }
}

/// Calories contained in one unit of a food.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSeed {
    key: String,
    calories: u32,
}

impl FoodSeed {
    /// Returns the lookup key used by the calculator form.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns kilocalories per unit.
    #[must_use]
    pub const fn calories(&self) -> u32 {
        self.calories
    }
}

/// A doctor listed in the clinic directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSeed {
    name: String,
    specialization: String,
}

impl DoctorSeed {
    /// Returns the doctor's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the specialization slug, e.g. `neurology`.
    #[must_use]
    pub fn specialization(&self) -> &str {
        &self.specialization
    }
}

/// A quality certificate held by the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSeed {
    id: String,
    title: String,
    description: String,
    issue_date: String,
}

impl CertificateSeed {
    /// Returns the certificate identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the certificate title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the certificate description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the issue date as `YYYY-MM-DD`.
    #[must_use]
    pub fn issue_date(&self) -> &str {
        &self.issue_date
    }
}
