//! Simulated email registry.
//!
//! There is no account store behind the website; uniqueness is checked
//! against the reference catalogue's registered emails after a fixed delay
//! that stands in for the network round trip.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use clinic_reference::{ReferenceData, normalise_email};
use tracing::debug;

use crate::domain::ports::{EmailRegistry, EmailRegistryError};

/// Latency of one simulated uniqueness check.
pub const DEFAULT_EMAIL_CHECK_DELAY: Duration = Duration::from_millis(1000);

/// [`EmailRegistry`] over a fixed set of registered emails.
#[derive(Debug, Clone)]
pub struct SimulatedEmailRegistry {
    taken: HashSet<String>,
    delay: Duration,
}

impl SimulatedEmailRegistry {
    /// Registry over `taken`, answering after `delay`.
    ///
    /// Emails compare case-insensitively.
    pub fn new<I, S>(taken: I, delay: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            taken: taken.into_iter().map(|email| normalise_email(email.as_ref())).collect(),
            delay,
        }
    }

    /// Registry over the reference catalogue's registered emails.
    pub fn from_reference(reference: &ReferenceData, delay: Duration) -> Self {
        Self::new(reference.taken_emails(), delay)
    }

    /// Simulated latency.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl EmailRegistry for SimulatedEmailRegistry {
    async fn is_registered(&self, email: &str) -> Result<bool, EmailRegistryError> {
        debug!(delay_ms = self.delay.as_millis(), "checking email uniqueness");
        tokio::time::sleep(self.delay).await;
        Ok(self.taken.contains(&normalise_email(email)))
    }
}
