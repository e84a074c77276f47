//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod email_registry;

#[cfg(test)]
pub use email_registry::MockEmailRegistry;
pub use email_registry::{EmailRegistry, EmailRegistryError};
