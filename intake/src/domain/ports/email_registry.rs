//! Driven port for checking whether an email address is already registered.
//!
//! Registration asks this port once per valid submission. Adapters may be
//! slow (the website simulates network latency), so the call is async and
//! single-shot; the domain never retries it.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while querying the registered-email store.
    pub enum EmailRegistryError {
        /// The store could not be reached.
        Unavailable { message: String } =>
            "email registry unavailable: {message}",
    }
}

/// Port answering email uniqueness questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRegistry: Send + Sync {
    /// Report whether `email` already belongs to a registered patient.
    async fn is_registered(&self, email: &str) -> Result<bool, EmailRegistryError>;
}
