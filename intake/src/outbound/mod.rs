//! Outbound adapters implementing domain ports.
//!
//! - **email_registry**: the simulated uniqueness check backed by the
//!   reference catalogue's registered emails.

pub mod email_registry;

pub use email_registry::{DEFAULT_EMAIL_CHECK_DELAY, SimulatedEmailRegistry};
