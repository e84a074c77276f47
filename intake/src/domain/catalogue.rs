//! Bookable clinic services.

use std::fmt;

use clinic_reference::ReferenceData;
use serde::Serialize;

use crate::domain::Error;
use crate::domain::pricing::Money;

/// Stable service identifier from the reference catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ServiceId(u32);

impl ServiceId {
    /// Wrap a raw identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service a patient can book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    id: ServiceId,
    name: String,
    cost: Money,
}

impl Service {
    /// Build a service from validated parts.
    pub fn new(id: ServiceId, name: impl Into<String>, cost: Money) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
        }
    }

    /// Service identifier.
    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Price before discounts.
    pub fn cost(&self) -> Money {
        self.cost
    }
}

/// Immutable, non-empty list of services in display order.
///
/// ## Invariants
/// - At least one service exists, so bookings always have a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalogue {
    services: Vec<Service>,
}

impl ServiceCatalogue {
    /// Build a catalogue, rejecting an empty list.
    pub fn new(services: Vec<Service>) -> Result<Self, Error> {
        if services.is_empty() {
            return Err(Error::invalid_request(
                "service catalogue must list at least one service",
            ));
        }
        Ok(Self { services })
    }

    /// Convert the reference catalogue's service seeds.
    pub fn from_reference(reference: &ReferenceData) -> Result<Self, Error> {
        let services = reference
            .services()
            .iter()
            .map(|seed| {
                Service::new(
                    ServiceId::new(seed.id()),
                    seed.name(),
                    Money::from_major(seed.cost()),
                )
            })
            .collect();
        Self::new(services)
    }

    /// All services in display order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// The service pre-selected when the booking form names none.
    pub fn default_service(&self) -> Option<&Service> {
        self.services.first()
    }

    /// Look up a service by identifier.
    pub fn find(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }
}
