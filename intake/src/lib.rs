//! Clinic intake library: form validation, booking derivation, and the
//! website's calculators.

pub mod config;
pub mod domain;
pub mod outbound;
